pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod loader;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::Shell;
pub use crate::config::Settings;
pub use crate::core::backing::MapType;
pub use crate::core::session::{AddOutcome, Session};
pub use crate::core::store::RecordStore;
pub use crate::core::subset::UserSubset;
pub use crate::domain::model::Record;
pub use crate::loader::SourceResolver;
pub use crate::utils::error::{DexError, Result};
