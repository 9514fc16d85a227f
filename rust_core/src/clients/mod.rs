pub mod practicum;
pub mod provider;
pub mod telegram;

// Re-export commonly used types
pub use practicum::PracticumClient;
pub use provider::{Notifier, StatusSource};
pub use telegram::TelegramClient;
