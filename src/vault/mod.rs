//! Vault module — the persistent file registry.
//!
//! This module provides:
//! - Bounded `Filename` / `Password` types and `VaultEntry` (`entry`)
//! - The plain-text registry line format (`format`)
//! - `RegistryStore`, the in-memory registry mirrored to disk (`store`)

pub mod entry;
pub mod format;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{Filename, Password, VaultEntry, MAX_FIELD_LEN};
pub use store::{RegistryStore, MAX_ENTRIES};
