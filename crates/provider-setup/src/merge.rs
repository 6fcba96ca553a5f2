//! Merge a provider selection into the gateway config.
//!
//! Every field written here is overwritten on each run, with one exception:
//! `gateway.auth.token` is only set when no token is present.

use {
    clawsetup_config::{
        GatewayConfig, ProviderEntry, env_reference, primary_model_selection,
        schema::{AgentDefaults, GatewayAuth},
    },
    secrecy::{ExposeSecret, Secret},
    serde_json::{Map, Value},
    tracing::{debug, info},
};

use crate::{error::Result, registry::KnownProvider};

pub const GATEWAY_MODE_LOCAL: &str = "local";
pub const AUTH_MODE_TOKEN: &str = "token";
pub const MODELS_MODE_MERGE: &str = "merge";

/// What happened to `gateway.auth.token` during a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Generated,
    Kept,
}

/// Apply a provider selection to `config` and return the updated document.
///
/// `new_token` is only called when the config has no usable auth token.
pub fn merge_provider_selection(
    mut config: GatewayConfig,
    provider: &KnownProvider,
    api_key: &Secret<String>,
    new_token: impl FnOnce() -> String,
) -> Result<(GatewayConfig, TokenStatus)> {
    let def = &provider.definition;

    let gateway = config.gateway.get_or_insert_with(Default::default);
    gateway.mode = Some(Value::from(GATEWAY_MODE_LOCAL));
    let auth = gateway.auth.get_or_insert_with(GatewayAuth::default);
    auth.mode = Some(Value::from(AUTH_MODE_TOKEN));
    let token_status = ensure_token(auth, new_token);

    config
        .env
        .get_or_insert_with(Map::new)
        .insert(
            def.env_var.to_string(),
            Value::String(api_key.expose_secret().clone()),
        );

    let defaults = config
        .agents
        .get_or_insert_with(Default::default)
        .defaults
        .get_or_insert_with(AgentDefaults::default);
    defaults.model = Some(primary_model_selection(def.default_model));

    let entry = ProviderEntry {
        base_url: def.base_url.to_string(),
        api_key: env_reference(def.env_var),
        api: def.api,
        models: vec![def.model.clone()],
    };
    let models = config.models.get_or_insert_with(Default::default);
    models.mode = Some(Value::from(MODELS_MODE_MERGE));
    let replaced = models
        .providers
        .get_or_insert_with(Map::new)
        .insert(provider.key.to_string(), serde_json::to_value(entry)?)
        .is_some();

    debug!(provider = provider.key, replaced, "provider block written");
    Ok((config, token_status))
}

/// First write wins: a token that is already present is never replaced,
/// whatever its JSON type.
fn ensure_token(auth: &mut GatewayAuth, new_token: impl FnOnce() -> String) -> TokenStatus {
    if auth.has_token() {
        debug!("keeping existing gateway token");
        return TokenStatus::Kept;
    }
    auth.token = Some(Value::String(new_token()));
    info!("generated gateway token");
    TokenStatus::Generated
}
