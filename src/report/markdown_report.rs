//! @ai:module:intent Markdown export of report documents
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownSink
//! @ai:module:stateless true

use crate::report::document::{
    ChartContent, ChartSection, FooterSection, HeaderSection, MetadataSection,
    RecommendationsSection, ReportDocument, ReportSection, TableSection,
};
use crate::report::sink::{write_chart_sidecar, DocumentSink};
use anyhow::{Context, Result};
use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

/// @ai:intent Writes report documents as Markdown with a PNG sidecar
pub struct MarkdownSink;

impl MarkdownSink {
    /// @ai:intent Create a new Markdown sink
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Render every section in document order
    /// @ai:effects pure
    pub fn render(document: &ReportDocument, chart_file: Option<&str>) -> Result<String> {
        let mut output = String::new();

        for section in &document.sections {
            match section {
                ReportSection::Header(header) => Self::render_header(&mut output, header)?,
                ReportSection::Metadata(metadata) => {
                    Self::render_metadata(&mut output, metadata, &document.display_name)?
                }
                ReportSection::Chart(chart) => Self::render_chart(&mut output, chart, chart_file)?,
                ReportSection::Table(table) => Self::render_table(&mut output, table)?,
                ReportSection::Recommendations(recommendations) => {
                    Self::render_recommendations(&mut output, recommendations)?
                }
                ReportSection::Footer(footer) => Self::render_footer(&mut output, footer)?,
            }
        }

        Ok(output)
    }

    fn render_header(output: &mut String, header: &HeaderSection) -> std::fmt::Result {
        writeln!(output, "# {}", header.brand_title)?;
        writeln!(output)?;
        writeln!(output, "## {}", header.title)?;
        writeln!(output)?;
        writeln!(output, "**Generated:** {}", header.generated_date.format("%Y-%m-%d"))?;
        writeln!(output)
    }

    fn render_metadata(
        output: &mut String,
        metadata: &MetadataSection,
        display_name: &str,
    ) -> std::fmt::Result {
        writeln!(output, "**Resource:** {}", display_name)?;
        writeln!(output, "**Period:** {}", metadata.range)?;

        match metadata.projection {
            Some(value) => writeln!(output, "**Projection:** {:.2} {}", value, metadata.unit)?,
            None => writeln!(output, "**Projection:** n/a")?,
        }

        if let Some(notice) = &metadata.degraded_notice {
            writeln!(output)?;
            writeln!(output, "> **Notice:** {}", notice)?;
        }

        writeln!(output)
    }

    fn render_chart(
        output: &mut String,
        chart: &ChartSection,
        chart_file: Option<&str>,
    ) -> std::fmt::Result {
        match (&chart.content, chart_file) {
            (ChartContent::Image(_), Some(file)) => {
                writeln!(output, "![{}]({})", chart.alt_text, file)?
            }
            (ChartContent::Image(_), None) => writeln!(output, "_Chart: {}_", chart.alt_text)?,
            (ChartContent::Summary { text }, _) => {
                writeln!(output, "_Chart unavailable._ {}", text)?
            }
        }
        writeln!(output)
    }

    fn render_table(output: &mut String, table: &TableSection) -> std::fmt::Result {
        writeln!(output, "### {}", table.caption)?;
        writeln!(output)?;
        writeln!(output, "| Year | Production ({}) |", table.unit)?;
        writeln!(output, "|------|-----------------|")?;

        for row in &table.rows {
            writeln!(output, "| {} | {:.2} |", row.period, row.value)?;
        }

        writeln!(output)
    }

    fn render_recommendations(
        output: &mut String,
        recommendations: &RecommendationsSection,
    ) -> std::fmt::Result {
        writeln!(output, "### Recommendations")?;
        writeln!(output)?;

        for (index, item) in recommendations.items.iter().enumerate() {
            writeln!(output, "{}. {}", index + 1, item)?;
        }

        writeln!(output)
    }

    fn render_footer(output: &mut String, footer: &FooterSection) -> std::fmt::Result {
        writeln!(output, "---")?;
        writeln!(output)?;
        writeln!(output, "{}", footer.copyright)
    }
}

impl Default for MarkdownSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSink for MarkdownSink {
    fn extension(&self) -> &'static str {
        "md"
    }

    /// @ai:intent Write the Markdown report and its chart sidecar
    /// @ai:effects fs:write
    fn write(&self, document: &ReportDocument, output_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir)?;

        let chart_file = write_chart_sidecar(document, output_dir)?;
        let content = Self::render(document, chart_file.as_deref())?;

        let path = self.target_path(document, output_dir);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;

        Ok(path)
    }
}
