pub mod engine;
pub mod types;

pub use engine::Notifier;
pub use types::*;
