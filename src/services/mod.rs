pub mod capability;
pub mod llm;
pub mod provider;
