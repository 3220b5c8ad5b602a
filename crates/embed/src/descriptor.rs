use serde::Serialize;

/// Outcome of embed resolution.
///
/// `NeedsConfiguration` is not a failure: the caller renders it as a
/// user-facing "not yet configured" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum EmbedResolution {
    Ready(EmbedDescriptor),
    NeedsConfiguration(ConfigGap),
}

/// A renderable embed target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedDescriptor {
    pub url: String,

    /// Short-lived Power BI embed token, when one was obtained.
    pub token: Option<String>,

    /// SSRS proxy rendering: the serving layer must append the caller's
    /// bearer token as a query parameter (iframe contexts cannot carry
    /// Authorization headers). Composing that query is the serving layer's
    /// job, not this resolver's.
    pub append_auth_query: bool,
}

impl EmbedDescriptor {
    /// A URL renderable as-is.
    pub fn direct(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            append_auth_query: false,
        }
    }

    /// An SSRS target the serving layer must authenticate via query string.
    pub fn ssrs_proxy(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            append_auth_query: true,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// What is missing before a report can be rendered.
///
/// The display strings are user-facing and stable; the serving layer shows
/// them verbatim in the "not yet configured" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigGap {
    /// Power BI report without an embed URL.
    MissingEmbedUrl,
    /// SSRS report missing the server URL and/or report path.
    MissingServerConfiguration,
    /// Paginated report hosted in Power BI: embedding it needs the Power BI
    /// Embedded API integration, which is configured per deployment.
    RequiresPowerBiEmbeddedApi,
    /// Paginated report with no usable source at all.
    MissingEmbedSource,
    /// The token exchange with the Power BI tenant failed or timed out.
    TokenServiceUnavailable,
}

impl core::fmt::Display for ConfigGap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let reason = match self {
            ConfigGap::MissingEmbedUrl => "missing embed URL",
            ConfigGap::MissingServerConfiguration => "missing server configuration",
            ConfigGap::RequiresPowerBiEmbeddedApi => "requires Power BI Embedded API",
            ConfigGap::MissingEmbedSource => "requires either embed URL or SSRS details",
            ConfigGap::TokenServiceUnavailable => "embed token service unavailable",
        };
        f.write_str(reason)
    }
}
