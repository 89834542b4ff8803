// Animal List - Core Library
// Exposes the data model and view models for use in the TUI and tests

pub mod animal;
pub mod config;
pub mod detail_view;
pub mod error;
pub mod list_view;
pub mod logging;
pub mod repository;

// Re-export commonly used types
pub use animal::{seed_animals, Animal, Identifiable, SEED_ANIMALS};
pub use config::Config;
pub use detail_view::{ContentMode, DetailView};
pub use error::{ConfigError, RepositoryError};
pub use list_view::{AnimalRow, ListView, LIST_TITLE};
pub use repository::{AnimalRepository, Repository, SubscriptionId};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
