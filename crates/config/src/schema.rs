//! Typed shape of `openclaw.json`.
//!
//! Only the sections this tool writes are typed. Everything else rides along
//! in the flattened `extra` maps and is written back untouched.

use std::{borrow::Cow, fmt};

use {
    serde::{Deserialize, Serialize},
    serde_json::{Map, Value},
};

use crate::env_ref::parse_env_reference;

// ── root ─────────────────────────────────────────────────────────────────────

/// Root of `~/.openclaw/openclaw.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<GatewaySection>,
    /// Environment variable name → value, injected by the gateway at startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<AgentsSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<ModelsSection>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GatewayConfig {
    /// The gateway auth token, if it is a non-empty string.
    pub fn auth_token(&self) -> Option<&str> {
        self.gateway
            .as_ref()?
            .auth
            .as_ref()?
            .token
            .as_ref()?
            .as_str()
            .filter(|t| !t.is_empty())
    }

    /// `agents.defaults.model.primary`, or the model itself when it is a
    /// bare string.
    pub fn primary_model(&self) -> Option<&str> {
        let model = self.agents.as_ref()?.defaults.as_ref()?.model.as_ref()?;
        match model {
            Value::String(model) => Some(model),
            other => other.get("primary")?.as_str(),
        }
    }

    /// A string entry of the `env` section.
    pub fn env_value(&self, name: &str) -> Option<&str> {
        self.env.as_ref()?.get(name)?.as_str()
    }

    /// Raw `models.providers[key]` block.
    pub fn provider_block(&self, key: &str) -> Option<&Value> {
        self.models.as_ref()?.providers.as_ref()?.get(key)
    }

    /// Name of the env var the provider block's `apiKey` points at.
    ///
    /// `None` when the block is missing or holds a literal key.
    pub fn provider_api_key_var(&self, key: &str) -> Option<&str> {
        let api_key = self.provider_block(key)?.get("apiKey")?.as_str()?;
        parse_env_reference(api_key)
    }
}

// ── gateway ──────────────────────────────────────────────────────────────────

/// `gateway` section.
///
/// `mode` is overwritten on every run, so whatever was there before is kept
/// as raw JSON rather than validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewaySection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<GatewayAuth>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `gateway.auth`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayAuth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GatewayAuth {
    /// Whether a token is already present.
    ///
    /// Missing, `null`, `false`, `0` and `""` count as unset. Any other value,
    /// including a non-string one, is a token the user put there.
    pub fn has_token(&self) -> bool {
        match &self.token {
            None | Some(Value::Null | Value::Bool(false)) => false,
            Some(Value::String(token)) => !token.is_empty(),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(_) => true,
        }
    }
}

// ── agents ───────────────────────────────────────────────────────────────────

/// `agents` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentsSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<AgentDefaults>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `agents.defaults`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentDefaults {
    /// Either a bare `"provider/model"` string or `{primary, fallbacks}`.
    /// Replaced wholesale on every run, so not validated on read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `agents.defaults.model` holding only a primary model.
pub fn primary_model_selection(model: &str) -> Value {
    let mut selection = Map::new();
    selection.insert("primary".to_string(), Value::String(model.to_string()));
    Value::Object(selection)
}

// ── models ───────────────────────────────────────────────────────────────────

/// `models` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelsSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Value>,
    /// Provider key → provider block. Blocks this tool did not write are
    /// kept as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub providers: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One `models.providers.<key>` block as written by this tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEntry {
    pub base_url: String,
    /// `${ENV_VAR}` reference, never the literal key.
    pub api_key: String,
    pub api: ApiFlavor,
    pub models: Vec<ModelDescriptor>,
}

/// Request/response schema the gateway speaks to a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiFlavor {
    #[serde(rename = "anthropic-messages")]
    AnthropicMessages,
    #[serde(rename = "openai-chat")]
    OpenaiChat,
}

impl ApiFlavor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AnthropicMessages => "anthropic-messages",
            Self::OpenaiChat => "openai-chat",
        }
    }
}

impl fmt::Display for ApiFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input kinds a model accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputModality {
    Text,
    Image,
}

/// Model metadata published to the gateway.
///
/// Uses `Cow<'static, _>` so the built-in provider table can be `const` while
/// descriptors read back from disk own their data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub id: Cow<'static, str>,
    pub name: Cow<'static, str>,
    pub reasoning: bool,
    pub input: Cow<'static, [InputModality]>,
    pub cost: ModelCost,
    pub context_window: u32,
    pub max_tokens: u32,
}

/// Price per million tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCost {
    pub input: f64,
    pub output: f64,
    pub cache_read: f64,
    pub cache_write: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use {super::*, rstest::rstest, serde_json::json};

    #[test]
    fn empty_document_serializes_to_empty_object() {
        let value = serde_json::to_value(GatewayConfig::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn unknown_keys_survive_round_trip() {
        let raw = json!({
            "channels": {"telegram": {"botToken": "123:abc"}},
            "gateway": {"mode": "remote", "port": 18789, "auth": {"mode": "token", "token": "t", "allowTailscale": true}},
            "agents": {"defaults": {"workspace": "~/ws", "model": {"primary": "a/b", "fallbacks": ["c/d"]}}},
            "models": {"mode": "replace", "providers": {"custom": {"baseUrl": "http://localhost"}}},
        });
        let config: GatewayConfig = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&config).unwrap(), raw);
    }

    #[test]
    fn accessors_read_nested_fields() {
        let config: GatewayConfig = serde_json::from_value(json!({
            "gateway": {"auth": {"token": "abc"}},
            "env": {"OPENAI_API_KEY": "sk-1", "PORT": 8080},
            "agents": {"defaults": {"model": {"primary": "openai/gpt-4o"}}},
            "models": {"providers": {"openai": {"apiKey": "${OPENAI_API_KEY}"}, "raw": {"apiKey": "sk-raw"}}},
        }))
        .unwrap();

        assert_eq!(config.auth_token(), Some("abc"));
        assert_eq!(config.primary_model(), Some("openai/gpt-4o"));
        assert_eq!(config.env_value("OPENAI_API_KEY"), Some("sk-1"));
        assert_eq!(config.env_value("PORT"), None);
        assert_eq!(config.provider_api_key_var("openai"), Some("OPENAI_API_KEY"));
        assert_eq!(config.provider_api_key_var("raw"), None);
        assert_eq!(config.provider_api_key_var("missing"), None);
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let config: GatewayConfig =
            serde_json::from_value(json!({"gateway": {"auth": {"token": ""}}})).unwrap();
        assert_eq!(config.auth_token(), None);
    }

    #[test]
    fn simple_model_selection_parses() {
        let config: GatewayConfig =
            serde_json::from_value(json!({"agents": {"defaults": {"model": "anthropic/claude"}}}))
                .unwrap();
        assert_eq!(config.primary_model(), Some("anthropic/claude"));
    }

    #[test]
    fn provider_entry_uses_wire_names() {
        let entry = ProviderEntry {
            base_url: "https://api.example.com/v1".into(),
            api_key: "${EXAMPLE_KEY}".into(),
            api: ApiFlavor::OpenaiChat,
            models: vec![ModelDescriptor {
                id: "m".into(),
                name: "M".into(),
                reasoning: true,
                input: Cow::Borrowed(&[InputModality::Text, InputModality::Image]),
                cost: ModelCost {
                    input: 1.0,
                    output: 2.0,
                    cache_read: 0.5,
                    cache_write: 0.0,
                },
                context_window: 1000,
                max_tokens: 100,
            }],
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["baseUrl"], "https://api.example.com/v1");
        assert_eq!(value["api"], "openai-chat");
        assert_eq!(value["models"][0]["input"], json!(["text", "image"]));
        assert_eq!(value["models"][0]["cost"]["cacheRead"], 0.5);
        assert_eq!(value["models"][0]["contextWindow"], 1000);
        assert_eq!(value["models"][0]["maxTokens"], 100);

        let back: ProviderEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn overwritten_fields_accept_any_json() {
        let raw = json!({
            "gateway": {"mode": 1, "auth": {"mode": ["token"], "token": 12345}},
            "agents": {"defaults": {"model": {"primary": "a/b", "fallbacks": "c/d"}}},
            "models": {"mode": false},
        });
        let config: GatewayConfig = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(config.primary_model(), Some("a/b"));
        assert_eq!(config.auth_token(), None);
        assert_eq!(serde_json::to_value(&config).unwrap(), raw);
    }

    #[rstest]
    #[case(json!({}), false)]
    #[case(json!({"token": null}), false)]
    #[case(json!({"token": ""}), false)]
    #[case(json!({"token": false}), false)]
    #[case(json!({"token": 0}), false)]
    #[case(json!({"token": "abc"}), true)]
    #[case(json!({"token": 12345}), true)]
    #[case(json!({"token": true}), true)]
    #[case(json!({"token": {"value": "x"}}), true)]
    fn token_presence(#[case] auth: Value, #[case] present: bool) {
        let auth: GatewayAuth = serde_json::from_value(auth).unwrap();
        assert_eq!(auth.has_token(), present);
    }

    #[test]
    fn primary_model_selection_shape() {
        assert_eq!(primary_model_selection("openai/gpt-4o"), json!({"primary": "openai/gpt-4o"}));
    }
}
