pub mod openrouter;

pub use openrouter::OpenRouterClient;
