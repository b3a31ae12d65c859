pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ChatClient, FilePromptUseCase, InlinePromptUseCase, DEFAULT_OUTPUT_PATH, DEFAULT_PROMPT_PATH,
    FILE_SYSTEM_PROMPT, INLINE_SYSTEM_PROMPT, INLINE_USER_PROMPT,
};

pub use connector::{MockChatClient, OpenAiChatClient};

pub use domain::{
    ChatMessage, Choice, DomainError, PromptRequest, PromptResponse, ResponseMessage, Role,
};
