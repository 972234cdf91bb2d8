//! Clients for the external services: the VirusTotal scanner and the
//! chat-completions summarizer. Both are constructed once at startup and
//! injected into handlers through the shared application state.

pub mod openai;
pub mod virustotal;

pub use openai::{OpenAiClient, SummarizeError};
pub use virustotal::{ScanError, VirusTotalClient};
