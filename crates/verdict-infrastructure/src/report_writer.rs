//! Writes validation reports to disk.

use std::path::{Path, PathBuf};

use verdict_core::error::{Result, VerdictError};
use verdict_core::export::ValidationReport;

#[derive(Debug, Clone, Default)]
pub struct ReportWriter;

impl ReportWriter {
    pub fn new() -> Self {
        Self
    }

    /// Writes the Markdown report.
    ///
    /// When `target` is an existing directory the report's suggested file name
    /// is used inside it. Returns the path written.
    pub async fn write_markdown(&self, report: &ValidationReport, target: &Path) -> Result<PathBuf> {
        let path = if tokio::fs::metadata(target)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
        {
            target.join(report.suggested_file_name())
        } else {
            target.to_path_buf()
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                VerdictError::export(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        tokio::fs::write(&path, report.to_markdown())
            .await
            .map_err(|e| VerdictError::export(format!("cannot write {}: {e}", path.display())))?;

        tracing::info!("[ReportWriter] Wrote report to {}", path.display());
        Ok(path)
    }
}
