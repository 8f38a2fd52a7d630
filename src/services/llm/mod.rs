pub mod client;

pub use client::LLMService;
