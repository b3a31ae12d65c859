mod chat_message;
mod prompt_request;
mod prompt_response;

pub use chat_message::*;
pub use prompt_request::*;
pub use prompt_response::*;
