//! Interactive provider setup for the OpenClaw gateway.
//!
//! Flow: pick a provider → enter its API key → merge into `openclaw.json` →
//! ensure a gateway auth token exists → print a summary.

pub mod error;
pub mod merge;
pub mod registry;
pub mod token;
pub mod wizard;

pub use {
    error::{Context, Error, Result},
    merge::{TokenStatus, merge_provider_selection},
    registry::{KnownProvider, ProviderDefinition, lookup, providers, select},
    token::generate_token,
    wizard::{SetupOutcome, prompt_line, run_setup},
};
