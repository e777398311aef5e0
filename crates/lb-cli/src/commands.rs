use std::path::Path;

use anyhow::Context;
use lb_config::LintboardConfig;
use lb_core::enums::IssueProperty;
use lb_dashboard::IssuesService;

use crate::cli::{Commands, OutputFormat};
use crate::output::output;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    service: &IssuesService,
    config: &LintboardConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        Commands::Upload {
            tool,
            file,
            reference,
        } => upload(service, &tool, &file, reference.as_deref(), format).await,
        Commands::Tools => output(&service.find_all_tools(), format),
        Commands::Table => output(&service.create_issues_statistics().await?, format),
        Commands::Distribution {
            tool,
            reference,
            property,
        } => {
            let property = resolve_property(property.as_deref(), config)?;
            let distribution = service.distribution(&tool, &reference, property).await?;
            output(&distribution, format)
        }
        Commands::References => output(&service.references().await?, format),
    }
}

async fn upload(
    service: &IssuesService,
    tool: &str,
    file: &Path,
    reference: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let content =
        std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let report = service
        .upload(tool, reference.unwrap_or_default(), &file_name, &content)
        .await
        .with_context(|| format!("upload of {} failed", file.display()))?;
    output(&report, format)
}

fn resolve_property(
    requested: Option<&str>,
    config: &LintboardConfig,
) -> anyhow::Result<IssueProperty> {
    match requested {
        Some(name) => Ok(name.parse()?),
        None => Ok(config.general.default_property()?),
    }
}
