mod file_prompt;
mod inline_prompt;

pub use file_prompt::*;
pub use inline_prompt::*;
