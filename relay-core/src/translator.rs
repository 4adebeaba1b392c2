//! Translator abstraction.

use async_trait::async_trait;

/// Translates one message's text.
///
/// `None` means "no translation produced" (endpoint error, empty response,
/// or nothing left after post-processing) and is a first-class outcome, not
/// an exceptional one; implementations never let errors cross this boundary.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Option<String>;
}
