//! Port definitions (interfaces implemented by the infrastructure layer)

pub mod conversation_logger;
pub mod llm_gateway;
pub mod progress;
