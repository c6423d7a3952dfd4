pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    catalog::{BuiltinCatalog, CsvCatalog},
    decoder::{NoDecoder, ZbarDecoder},
    storage::LocalStorage,
};
pub use app::shell::Shell;
pub use config::Settings;
pub use crate::core::{cart::Cart, catalog::Catalog, session::Session};
pub use utils::error::{NutriError, Result};
