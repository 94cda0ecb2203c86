pub mod backend;
pub mod classifier;
pub mod types;

pub use backend::{CompletionBackend, GroqBackend};
pub use classifier::Classifier;
pub use types::{Classification, Priority};
