// ABOUTME: Root module for relay - subagent dispatch for agentic applications.
// ABOUTME: Re-exports all public types from submodules.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod llm;
pub mod local;
pub mod prelude;
pub mod remote;
pub mod subagent;
pub mod tool;

pub use error::RelayError;
