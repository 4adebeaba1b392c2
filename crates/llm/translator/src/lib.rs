//! # OpenRouter translation client
//!
//! Thin wrapper around [async-openai] pointed at an OpenAI-compatible
//! completions endpoint (OpenRouter by default). Sends one system turn with
//! the trading-signal glossary prompt plus the message text as a user turn,
//! temperature 0.1 for near-deterministic output, then strips parenthetical
//! asides from the reply.
//!
//! Implements [`relay_core::Translator`]: failures never escape this crate,
//! they come back as `None`.

use async_openai::{
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use relay_core::Translator;
use std::sync::Arc;
use tracing::{info, warn};

/// Default completions endpoint.
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Fixed system instruction. Trading vocabulary must survive translation
/// untouched; parentheses are banned (and stripped again client-side).
pub const DEFAULT_SYSTEM_PROMPT: &str = "You translate forex and trading signals from English to Persian. Keep all technical terms, symbols, numbers, and emojis intact. Provide ONLY the direct translation with no explanations or parentheses. This is for a trading signals channel.
Use a friendly, conversational tone in translations rather than formal/bookish language, while maintaining high quality translations.
The following terms MUST remain in English:
buy - sell - buy limit - sell limit - buy stop - sell stop - TP - Take profit - Stop - Stop loss - Sl";

/// Sampling temperature; low for consistent glossary handling.
const TEMPERATURE: f32 = 0.1;

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 {
        "***".to_string()
    } else {
        let head_len = 7.min(len);
        let tail_len = 4.min(len.saturating_sub(head_len));
        let head = &token[..head_len];
        let tail = if tail_len > 0 {
            &token[len - tail_len..]
        } else {
            ""
        };
        format!("{}***{}", head, tail)
    }
}

/// Removes every parenthetical span `(...)` from `text`.
///
/// Non-nested: each removal runs from a `(` to the next `)`.
/// An unmatched trailing `(` is left intact.
pub fn strip_parentheticals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('(') {
        out.push_str(&rest[..open]);
        rest = &rest[open..];
        match rest.find(')') {
            Some(close) => rest = &rest[close + 1..],
            None => break,
        }
    }

    out.push_str(rest);
    out
}

/// Translation client for trading-signal posts.
#[derive(Clone)]
pub struct SignalTranslator {
    /// Shared async-openai client used for all API calls.
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    model: String,
    system_prompt: String,
    /// API key stored only for logging (masked).
    api_key_for_logging: String,
}

impl SignalTranslator {
    /// Builds a translator against the default OpenRouter endpoint.
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, OPENROUTER_BASE_URL.to_string())
    }

    /// Builds a translator with a custom base URL (e.g. for proxies or
    /// other OpenAI-compatible endpoints).
    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        let client = Client::with_config(config);
        Self {
            client: Arc::new(client),
            model,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            api_key_for_logging,
        }
    }

    /// Replaces the built-in system prompt (deployment override).
    pub fn with_system_prompt(mut self, system_prompt: String) -> Self {
        self.system_prompt = system_prompt;
        self
    }

    /// Sends the completion request and returns the raw assistant content,
    /// or `None` when the response carries no content.
    async fn request(&self, text: &str) -> anyhow::Result<Option<String>> {
        info!(
            model = %self.model,
            api_key = %mask_token(&self.api_key_for_logging),
            text_len = text.len(),
            "Translation request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(TEMPERATURE)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(self.system_prompt.as_str())
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(text)
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "Translation usage"
            );
        }

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}

#[async_trait]
impl Translator for SignalTranslator {
    async fn translate(&self, text: &str) -> Option<String> {
        match self.request(text).await {
            Ok(Some(content)) => {
                let cleaned = strip_parentheticals(&content).trim().to_string();
                if cleaned.is_empty() {
                    warn!("Translation empty after post-processing");
                    None
                } else {
                    info!(translated_len = cleaned.len(), "Translation successful");
                    Some(cleaned)
                }
            }
            Ok(None) => {
                warn!("Translation returned no content");
                None
            }
            Err(e) => {
                warn!(error = %e, "Translation request failed");
                None
            }
        }
    }
}
