//! Provider presets for OpenAI-compatible services

#[cfg(feature = "deepseek")]
pub mod deepseek;
