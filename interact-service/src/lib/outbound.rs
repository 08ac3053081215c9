pub mod llm;
pub mod repositories;
