//! Pure embed resolution: configuration in, embed target out.

use reporthub_catalog::{EmbedConfig, PaginatedEmbed, PowerBiEmbed, Report, SsrsEmbed};

use crate::descriptor::{ConfigGap, EmbedDescriptor, EmbedResolution};

/// Resolve a report's embed configuration to a renderable target.
///
/// Pure function of the current configuration — no IO, no state. Token
/// acquisition for Power BI is layered on top by
/// [`crate::EmbedService::resolve`].
pub fn resolve_embed(report: &Report) -> EmbedResolution {
    match &report.embed {
        EmbedConfig::PowerBi(config) => resolve_power_bi(config),
        EmbedConfig::Ssrs(config) => resolve_ssrs(config),
        EmbedConfig::Paginated(config) => resolve_paginated(config),
    }
}

fn resolve_power_bi(config: &PowerBiEmbed) -> EmbedResolution {
    match configured(&config.embed_url) {
        Some(url) => EmbedResolution::Ready(EmbedDescriptor::direct(url)),
        None => EmbedResolution::NeedsConfiguration(ConfigGap::MissingEmbedUrl),
    }
}

fn resolve_ssrs(config: &SsrsEmbed) -> EmbedResolution {
    match (configured(&config.server_url), configured(&config.report_path)) {
        (Some(server_url), Some(report_path)) => {
            EmbedResolution::Ready(EmbedDescriptor::ssrs_proxy(join_server_path(
                server_url,
                report_path,
            )))
        }
        _ => EmbedResolution::NeedsConfiguration(ConfigGap::MissingServerConfiguration),
    }
}

/// Paginated reports try, in order: a ready embed URL, a Power-BI-hosted
/// paginated report id (external integration, reported as a configuration
/// state), an SSRS server/path pair rendered through the report viewer.
fn resolve_paginated(config: &PaginatedEmbed) -> EmbedResolution {
    if let Some(url) = configured(&config.embed_url) {
        return EmbedResolution::Ready(EmbedDescriptor::direct(url));
    }

    if configured(&config.paginated_report_id).is_some() {
        return EmbedResolution::NeedsConfiguration(ConfigGap::RequiresPowerBiEmbeddedApi);
    }

    match (configured(&config.server_url), configured(&config.report_path)) {
        (Some(server_url), Some(report_path)) => EmbedResolution::Ready(
            EmbedDescriptor::ssrs_proxy(ssrs_render_url(server_url, report_path)),
        ),
        _ => EmbedResolution::NeedsConfiguration(ConfigGap::MissingEmbedSource),
    }
}

/// A configuration field counts as present only when non-blank.
pub(crate) fn configured(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// `{server}{path}` with the trailing slash stripped from the server and a
/// leading slash enforced on the path.
fn join_server_path(server_url: &str, report_path: &str) -> String {
    let server_url = server_url.trim_end_matches('/');
    if report_path.starts_with('/') {
        format!("{server_url}{report_path}")
    } else {
        format!("{server_url}/{report_path}")
    }
}

/// SSRS report-viewer render URL for paginated reports.
fn ssrs_render_url(server_url: &str, report_path: &str) -> String {
    let server_url = server_url.trim_end_matches('/');
    let report_path = if report_path.starts_with('/') {
        report_path.to_string()
    } else {
        format!("/{report_path}")
    };
    format!("{server_url}/Pages/ReportViewer.aspx?{report_path}&rs:Command=Render&rs:Embed=true")
}
