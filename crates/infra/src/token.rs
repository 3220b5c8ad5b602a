//! External token-service adapters.

use async_trait::async_trait;

use reporthub_embed::{EmbedToken, EmbedTokenProvider, TokenError};

/// Token provider for deployments without a configured Power BI tenant.
///
/// Always fails the exchange, which the embed service degrades to its
/// needs-configuration answer — reports with a plain embed URL keep working.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableTokenProvider;

#[async_trait]
impl EmbedTokenProvider for UnavailableTokenProvider {
    async fn embed_token(&self, _: &str, _: &str) -> Result<EmbedToken, TokenError> {
        Err(TokenError::Unavailable(
            "no Power BI tenant configured".to_string(),
        ))
    }
}
