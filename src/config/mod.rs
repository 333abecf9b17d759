//! Project configuration (`.filevault.toml`).

pub mod settings;

pub use settings::{Settings, CONFIG_FILE_NAME};
