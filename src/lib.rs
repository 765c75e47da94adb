pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod forge;
pub mod hooks;
pub mod logging;
pub mod release;
pub mod ui;
pub mod vcs;

pub use error::{ReleaseMakerError, Result};
