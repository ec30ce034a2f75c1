//! Description enhancer adapters.

mod dto;
mod openai;

pub use openai::{OpenAiDescriptionEnhancer, OpenAiEnhancerConfig};
