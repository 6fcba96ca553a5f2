//! Built-in provider table.
//!
//! Order is significant: the wizard lists providers in this order and the
//! user picks one by its 1-based position.

use std::borrow::Cow;

use {
    clawsetup_config::{ApiFlavor, InputModality, ModelCost, ModelDescriptor},
    tracing::debug,
};

use crate::error::{Error, Result};

/// Everything needed to wire one provider into the gateway config.
#[derive(Debug, Clone)]
pub struct ProviderDefinition {
    pub display_name: &'static str,
    pub base_url: &'static str,
    pub api: ApiFlavor,
    /// Env var the gateway reads the API key from.
    pub env_var: &'static str,
    pub model: ModelDescriptor,
    /// `provider/model` reference written to `agents.defaults.model.primary`.
    pub default_model: &'static str,
}

/// A provider key paired with its definition.
#[derive(Debug, Clone)]
pub struct KnownProvider {
    pub key: &'static str,
    pub definition: ProviderDefinition,
}

static PROVIDERS: &[KnownProvider] = &[
    KnownProvider {
        key: "minimax",
        definition: ProviderDefinition {
            display_name: "Minimax M2.5",
            base_url: "https://api.minimax.io/anthropic",
            api: ApiFlavor::AnthropicMessages,
            env_var: "MINIMAX_API_KEY",
            model: ModelDescriptor {
                id: Cow::Borrowed("MiniMax-M2.5"),
                name: Cow::Borrowed("MiniMax M2.5"),
                reasoning: false,
                input: Cow::Borrowed(&[InputModality::Text]),
                cost: ModelCost {
                    input: 15.0,
                    output: 60.0,
                    cache_read: 2.0,
                    cache_write: 10.0,
                },
                context_window: 200_000,
                max_tokens: 8192,
            },
            default_model: "minimax/MiniMax-M2.5",
        },
    },
    KnownProvider {
        key: "openai",
        definition: ProviderDefinition {
            display_name: "OpenAI GPT-4o",
            base_url: "https://api.openai.com/v1",
            api: ApiFlavor::OpenaiChat,
            env_var: "OPENAI_API_KEY",
            model: ModelDescriptor {
                id: Cow::Borrowed("gpt-4o"),
                name: Cow::Borrowed("GPT-4o"),
                reasoning: false,
                input: Cow::Borrowed(&[InputModality::Text, InputModality::Image]),
                cost: ModelCost {
                    input: 5.0,
                    output: 15.0,
                    cache_read: 2.5,
                    cache_write: 0.0,
                },
                context_window: 128_000,
                max_tokens: 16384,
            },
            default_model: "openai/gpt-4o",
        },
    },
    KnownProvider {
        key: "deepseek",
        definition: ProviderDefinition {
            display_name: "DeepSeek V3",
            base_url: "https://api.deepseek.com/v1",
            api: ApiFlavor::OpenaiChat,
            env_var: "DEEPSEEK_API_KEY",
            model: ModelDescriptor {
                id: Cow::Borrowed("deepseek-chat"),
                name: Cow::Borrowed("DeepSeek V3"),
                reasoning: false,
                input: Cow::Borrowed(&[InputModality::Text]),
                cost: ModelCost {
                    input: 0.27,
                    output: 1.1,
                    cache_read: 0.07,
                    cache_write: 0.0,
                },
                context_window: 64_000,
                max_tokens: 8192,
            },
            default_model: "deepseek/deepseek-chat",
        },
    },
];

/// All built-in providers, in display order.
pub fn providers() -> &'static [KnownProvider] {
    PROVIDERS
}

/// Find a provider by key.
pub fn lookup(key: &str) -> Option<&'static KnownProvider> {
    PROVIDERS.iter().find(|p| p.key == key)
}

/// Resolve the user's answer to the "select a provider" prompt.
///
/// `input` is a 1-based index into [`providers`]. Only the leading run of
/// digits is read, so `2abc` and `2.5` both pick the second provider. Input
/// that does not start with a digit, or a number outside
/// `1..=providers().len()`, is rejected.
pub fn select(input: &str) -> Result<&'static KnownProvider> {
    let input = input.trim();
    let digits = input
        .find(|c: char| !c.is_ascii_digit())
        .map_or(input, |end| &input[..end]);
    let provider = digits
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| PROVIDERS.get(i));

    match provider {
        Some(provider) => {
            debug!(provider = provider.key, "provider selected");
            Ok(provider)
        },
        None => Err(Error::InvalidSelection {
            input: input.to_string(),
            count: PROVIDERS.len(),
        }),
    }
}
