//! OpenClaw gateway configuration: schema, loading, and persistence.
//!
//! The config lives at `~/.openclaw/openclaw.json` (or under `OPENCLAW_HOME`).
//! Every typed section keeps unknown keys in a flattened `extra` map so a
//! read-modify-write never drops settings owned by other tools.

pub mod env_ref;
pub mod error;
pub mod loader;
pub mod schema;

pub use {
    env_ref::{env_reference, parse_env_reference},
    error::{Context, Error, Result},
    loader::{load_or_init, persist, resolve_config_path},
    schema::{
        AgentDefaults, AgentsSection, ApiFlavor, GatewayAuth, GatewayConfig, GatewaySection,
        InputModality, ModelCost, ModelDescriptor, ModelsSection, ProviderEntry,
        primary_model_selection,
    },
};
