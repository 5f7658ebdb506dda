//! @ai:module:intent JSON export of report documents
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonSink
//! @ai:module:stateless true

use crate::report::document::ReportDocument;
use crate::report::sink::{write_chart_sidecar, DocumentSink};
use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// @ai:intent Exported JSON shape: the document plus where its chart was written
#[derive(Serialize)]
struct JsonExport<'a> {
    #[serde(flatten)]
    document: &'a ReportDocument,
    chart_file: Option<String>,
}

/// @ai:intent Writes report documents as pretty-printed JSON
pub struct JsonSink;

impl JsonSink {
    /// @ai:intent Create a new JSON sink
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSink for JsonSink {
    fn extension(&self) -> &'static str {
        "json"
    }

    /// @ai:intent Write JSON report to file
    /// @ai:effects fs:write
    fn write(&self, document: &ReportDocument, output_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir)?;

        let chart_file = write_chart_sidecar(document, output_dir)?;
        let json = serde_json::to_string_pretty(&JsonExport {
            document,
            chart_file,
        })?;

        let path = self.target_path(document, output_dir);
        std::fs::write(&path, json)?;
        Ok(path)
    }
}
