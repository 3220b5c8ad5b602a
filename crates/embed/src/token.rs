//! Power BI embed token acquisition.
//!
//! The only network call in the core. It is bounded by a timeout, honors
//! caller cancellation (dropping the future drops the in-flight exchange),
//! and degrades to a needs-configuration answer instead of surfacing raw
//! transport errors.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use reporthub_catalog::{EmbedConfig, Report};

use crate::descriptor::{ConfigGap, EmbedResolution};
use crate::resolve::{configured, resolve_embed};

/// A short-lived embed token issued by the Power BI tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

/// Token exchange failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("embed token service unavailable: {0}")]
    Unavailable(String),

    #[error("embed token request denied: {0}")]
    Denied(String),
}

/// External collaborator: exchanges workspace + report ids for an embed token.
#[async_trait]
pub trait EmbedTokenProvider: Send + Sync {
    async fn embed_token(&self, workspace_id: &str, report_id: &str) -> Result<EmbedToken, TokenError>;
}

const DEFAULT_TOKEN_TIMEOUT: Duration = Duration::from_secs(5);

/// Embed resolution with token acquisition layered on top of
/// [`resolve_embed`].
pub struct EmbedService<P> {
    tokens: P,
    token_timeout: Duration,
}

impl<P> EmbedService<P>
where
    P: EmbedTokenProvider,
{
    pub fn new(tokens: P) -> Self {
        Self {
            tokens,
            token_timeout: DEFAULT_TOKEN_TIMEOUT,
        }
    }

    pub fn with_token_timeout(mut self, token_timeout: Duration) -> Self {
        self.token_timeout = token_timeout;
        self
    }

    /// Resolve a report to its embed target.
    ///
    /// A token is attempted only for an interactive Power BI embed whose
    /// configuration carries both workspace and report ids; every other case
    /// is the pure resolution unchanged. Upstream failure or timeout
    /// degrades to `NeedsConfiguration` rather than an error.
    pub async fn resolve(&self, report: &Report) -> EmbedResolution {
        let resolution = resolve_embed(report);

        let EmbedResolution::Ready(descriptor) = resolution else {
            return resolution;
        };
        let EmbedConfig::PowerBi(config) = &report.embed else {
            return EmbedResolution::Ready(descriptor);
        };
        let (Some(workspace_id), Some(powerbi_report_id)) =
            (configured(&config.workspace_id), configured(&config.report_id))
        else {
            return EmbedResolution::Ready(descriptor);
        };

        let exchange = self.tokens.embed_token(workspace_id, powerbi_report_id);
        match tokio::time::timeout(self.token_timeout, exchange).await {
            Ok(Ok(token)) => EmbedResolution::Ready(descriptor.with_token(token.value)),
            Ok(Err(error)) => {
                tracing::warn!(%error, report_id = %report.id, "embed token exchange failed");
                EmbedResolution::NeedsConfiguration(ConfigGap::TokenServiceUnavailable)
            }
            Err(_) => {
                tracing::warn!(report_id = %report.id, "embed token exchange timed out");
                EmbedResolution::NeedsConfiguration(ConfigGap::TokenServiceUnavailable)
            }
        }
    }
}
