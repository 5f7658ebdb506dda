//! @ai:module:intent Boundary between composed documents and concrete file formats
//! @ai:module:layer infrastructure
//! @ai:module:public_api DocumentSink, write_chart_sidecar

use crate::report::document::ReportDocument;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// @ai:intent Exporter serializing a report document to one file format
pub trait DocumentSink: Send + Sync {
    /// @ai:intent File extension of the main artifact, without the dot
    fn extension(&self) -> &'static str;

    /// @ai:intent Write the document into a directory, returning the main artifact path
    fn write(&self, document: &ReportDocument, output_dir: &Path) -> Result<PathBuf>;

    /// @ai:intent Path the main artifact will be written to
    fn target_path(&self, document: &ReportDocument, output_dir: &Path) -> PathBuf {
        output_dir.join(document.file_name(self.extension()))
    }
}

/// @ai:intent Write the chart image next to the main artifact
/// @ai:post returns the sidecar file name when the document holds an image
/// @ai:effects fs:write
pub fn write_chart_sidecar(document: &ReportDocument, output_dir: &Path) -> Result<Option<String>> {
    let Some(image) = document.chart_image() else {
        return Ok(None);
    };

    let file_name = document.file_name(image.format.extension());
    let path = output_dir.join(&file_name);
    std::fs::write(&path, &image.bytes)
        .with_context(|| format!("Failed to write chart image: {}", path.display()))?;

    Ok(Some(file_name))
}
