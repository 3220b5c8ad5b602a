use serde::{Deserialize, Serialize};

use reporthub_core::{DomainResult, ReportGroupId, ReportId};

use crate::validate;

/// Report rendering technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    PowerBi,
    Ssrs,
    Paginated,
}

impl core::fmt::Display for ReportType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReportType::PowerBi => write!(f, "powerbi"),
            ReportType::Ssrs => write!(f, "ssrs"),
            ReportType::Paginated => write!(f, "paginated"),
        }
    }
}

/// Power BI interactive embed configuration.
///
/// `workspace_id`/`report_id` are only needed when a short-lived embed token
/// is fetched from the tenant; an `embed_url` alone is renderable as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerBiEmbed {
    pub embed_url: Option<String>,
    pub workspace_id: Option<String>,
    pub report_id: Option<String>,
}

/// On-premises SSRS / PBIRS embed configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsrsEmbed {
    pub server_url: Option<String>,
    pub report_path: Option<String>,
}

/// Paginated (RDL) embed configuration.
///
/// A paginated report can be served three ways, tried in this order by the
/// embed resolver: a ready embed URL, a Power-BI-hosted paginated report id,
/// or an SSRS server + path pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedEmbed {
    pub embed_url: Option<String>,
    pub paginated_report_id: Option<String>,
    pub server_url: Option<String>,
    pub report_path: Option<String>,
}

/// Technology-specific embed configuration, tagged by report type.
///
/// The variant is fixed at report creation; re-typing a report means
/// recreating it. Keeping this closed makes embed resolution
/// exhaustive-checkable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EmbedConfig {
    PowerBi(PowerBiEmbed),
    Ssrs(SsrsEmbed),
    Paginated(PaginatedEmbed),
}

impl EmbedConfig {
    pub fn report_type(&self) -> ReportType {
        match self {
            EmbedConfig::PowerBi(_) => ReportType::PowerBi,
            EmbedConfig::Ssrs(_) => ReportType::Ssrs,
            EmbedConfig::Paginated(_) => ReportType::Paginated,
        }
    }
}

/// A report inside a report group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub report_group_id: ReportGroupId,
    pub code: String,
    pub name: String,
    pub sort_order: i32,
    pub embed: EmbedConfig,
    pub is_active: bool,
}

impl Report {
    /// Create an active report with validated fields.
    pub fn new(
        id: ReportId,
        report_group_id: ReportGroupId,
        code: impl Into<String>,
        name: impl Into<String>,
        sort_order: i32,
        embed: EmbedConfig,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            report_group_id,
            code: validate::entity_code(code)?,
            name: validate::entity_name(name)?,
            sort_order,
            embed,
            is_active: true,
        })
    }

    pub fn report_type(&self) -> ReportType {
        self.embed.report_type()
    }
}

#[cfg(test)]
mod tests {
    use reporthub_core::DomainError;

    use super::*;

    fn report_with(embed: EmbedConfig) -> Report {
        Report::new(ReportId::new(), ReportGroupId::new(), "REV", "Revenue", 1, embed).unwrap()
    }

    #[test]
    fn report_type_follows_embed_variant() {
        assert_eq!(
            report_with(EmbedConfig::PowerBi(PowerBiEmbed::default())).report_type(),
            ReportType::PowerBi
        );
        assert_eq!(
            report_with(EmbedConfig::Ssrs(SsrsEmbed::default())).report_type(),
            ReportType::Ssrs
        );
        assert_eq!(
            report_with(EmbedConfig::Paginated(PaginatedEmbed::default())).report_type(),
            ReportType::Paginated
        );
    }

    #[test]
    fn embed_config_serializes_with_type_tag() {
        let embed = EmbedConfig::Ssrs(SsrsEmbed {
            server_url: Some("https://reports.internal".to_string()),
            report_path: Some("/finance/revenue".to_string()),
        });

        let json = serde_json::to_value(&embed).unwrap();
        assert_eq!(json["type"], "ssrs");
        assert_eq!(json["server_url"], "https://reports.internal");
    }

    #[test]
    fn blank_code_is_rejected() {
        let err = Report::new(
            ReportId::new(),
            ReportGroupId::new(),
            "",
            "Revenue",
            1,
            EmbedConfig::PowerBi(PowerBiEmbed::default()),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
