//! Workflows behind the command-line subcommands
//!
//! Argument parsing lives in `main.rs`; everything here takes plain values so
//! the flows can be driven from tests with a mock forge and a recording VCS.

pub mod workflow;

pub use workflow::{
    boundary_warnings, build_notes, preview, publish, release_title, write_notes, WorkflowArgs,
    WorkflowOutcome,
};
