//! Shared plumbing used by every clawsetup crate.

pub mod context;

pub use context::FromMessage;
