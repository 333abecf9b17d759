//! One module per subcommand.

pub mod add;
pub mod append;
#[cfg(feature = "audit-log")]
pub mod audit_cmd;
pub mod completions;
pub mod menu;
pub mod passwd;
pub mod view;
