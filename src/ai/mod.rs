pub mod openai;
pub mod resolver;

pub use openai::CompletionClient;
pub use resolver::{resolve, Resolution};
