//! Core of dirscope: configuration, directory scanning and entry metadata.

pub mod config;
pub mod details;
pub mod scan;

pub use config::{Config, WrapPolicy};
