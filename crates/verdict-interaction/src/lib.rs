//! Application layer of verdict: model clients and the session orchestrator.

pub mod local_model_client;
pub mod model_client;
pub mod orchestrator;
pub mod scripted_model_client;

pub use local_model_client::LocalModelClient;
pub use model_client::{ChatRequest, ModelClient, NO_REPLY_FALLBACK, extract_reply};
pub use orchestrator::Orchestrator;
pub use scripted_model_client::ScriptedModelClient;
