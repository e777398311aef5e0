//! Dashboard use cases over the persistence service and the tool registry.

use lb_config::{LintboardConfig, UploadConfig};
use lb_core::entities::Report;
use lb_core::enums::IssueProperty;
use lb_core::responses::{IssuesTable, PropertyDistribution};
use lb_db::service::EntityService;
use lb_parsers::{AnalysisTool, ToolRegistry, strip_utf8_bom};

use crate::distribution::property_distribution;
use crate::error::DashboardError;
use crate::table::summary_table;

/// Uploads reports and builds the dashboard's charts and tables.
pub struct IssuesService {
    entities: EntityService,
    tools: ToolRegistry,
    placeholder_file_name: String,
}

impl IssuesService {
    #[must_use]
    pub fn new(entities: EntityService, tools: ToolRegistry) -> Self {
        Self {
            entities,
            tools,
            placeholder_file_name: UploadConfig::default().placeholder_file_name,
        }
    }

    /// Open the configured database and use the configured upload defaults.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Database` if the database cannot be opened.
    pub async fn from_config(
        config: &LintboardConfig,
        tools: ToolRegistry,
    ) -> Result<Self, DashboardError> {
        let entities = EntityService::new_local(&config.database.path).await?;
        Ok(Self::new(entities, tools)
            .with_placeholder_file_name(config.upload.placeholder_file_name.clone()))
    }

    #[must_use]
    pub fn with_placeholder_file_name(mut self, name: impl Into<String>) -> Self {
        self.placeholder_file_name = name.into();
        self
    }

    #[must_use]
    pub const fn entities(&self) -> &EntityService {
        &self.entities
    }

    /// The registered analysis tools, sorted by display name.
    #[must_use]
    pub fn find_all_tools(&self) -> Vec<AnalysisTool> {
        self.tools.find_all_tools()
    }

    /// Load the report uploaded for `tool_id` under `reference`.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::NotFound` if there is no such report.
    pub async fn find_report(
        &self,
        tool_id: &str,
        reference: &str,
    ) -> Result<Report, DashboardError> {
        self.entities
            .select_report_by_tool_id_and_origin_report_file(tool_id, reference)
            .await?
            .ok_or_else(|| DashboardError::NotFound {
                tool_id: tool_id.to_string(),
                reference: reference.to_string(),
            })
    }

    /// Number of issues per value of `property` in one stored report.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::NotFound` if there is no such report, never
    /// an empty distribution.
    pub async fn distribution(
        &self,
        tool_id: &str,
        reference: &str,
        property: IssueProperty,
    ) -> Result<PropertyDistribution, DashboardError> {
        let report = self.find_report(tool_id, reference).await?;
        Ok(property_distribution(&report, |issue| property.extract(issue)))
    }

    /// Number of issues per category.
    ///
    /// # Errors
    ///
    /// See [`Self::distribution`].
    pub async fn distribution_by_category(
        &self,
        tool_id: &str,
        reference: &str,
    ) -> Result<PropertyDistribution, DashboardError> {
        self.distribution(tool_id, reference, IssueProperty::Category)
            .await
    }

    /// Number of issues per type.
    ///
    /// # Errors
    ///
    /// See [`Self::distribution`].
    pub async fn distribution_by_type(
        &self,
        tool_id: &str,
        reference: &str,
    ) -> Result<PropertyDistribution, DashboardError> {
        self.distribution(tool_id, reference, IssueProperty::Type)
            .await
    }

    /// One statistics row per stored report, in upload order.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Database` if the reports cannot be loaded.
    pub async fn create_issues_statistics(&self) -> Result<IssuesTable, DashboardError> {
        let mut reports: Vec<Report> = self
            .entities
            .select_all_reports()
            .await?
            .into_iter()
            .collect();
        reports.sort_by_key(|report| report.id);
        Ok(summary_table(&reports))
    }

    /// Surrogate ids of all stored reports.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Database` if the query fails.
    pub async fn references(&self) -> Result<Vec<String>, DashboardError> {
        Ok(self.entities.find_all_references().await?)
    }

    /// Parse an uploaded file with the parser of `tool_id` and store it.
    ///
    /// A blank `reference` falls back to `file_name`, and a blank
    /// `file_name` to the configured placeholder. A leading UTF-8 byte-order
    /// mark is ignored. The tool and the reference are recorded on the
    /// report and on each of its issues.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Parser` for an unknown tool or unreadable
    /// content and `DashboardError::Database` if storing fails.
    pub async fn upload(
        &self,
        tool_id: &str,
        reference: &str,
        file_name: &str,
        content: &[u8],
    ) -> Result<Report, DashboardError> {
        let tool = self.tools.tool(tool_id)?;
        let parser = self.tools.resolve_parser(tool_id)?;

        let file_name = if file_name.trim().is_empty() {
            self.placeholder_file_name.as_str()
        } else {
            file_name
        };
        let reference = if reference.trim().is_empty() {
            file_name
        } else {
            reference
        };

        let mut report = parser.parse(&mut strip_utf8_bom(content))?;
        report.set_origin(&tool.id, &tool.name);
        report.set_reference(reference);

        let stored = self.entities.insert_report(&report).await?;
        tracing::info!(
            tool_id = %tool.id,
            reference,
            issues = stored.size(),
            report_id = ?stored.id,
            "stored uploaded report"
        );
        Ok(stored)
    }
}
