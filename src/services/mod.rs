pub mod notifier;
pub mod practicum;
pub mod telegram;
