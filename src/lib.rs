pub mod audit;
pub mod cli;
pub mod config;
pub mod errors;
pub mod history;
pub mod service;
pub mod vault;
