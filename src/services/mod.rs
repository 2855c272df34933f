// Service exports
pub mod completion;

pub use completion::{CompletionBackend, CompletionError, OpenAiClient};
