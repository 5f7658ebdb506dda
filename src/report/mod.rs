//! @ai:module:intent Report synthesis for analytics stores
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportComposer, ReportPipeline, ReportDocument, ChartCapture, DocumentSink, MarkdownSink, JsonSink

pub mod charts;
pub mod composer;
pub mod document;
pub mod json_report;
pub mod markdown_report;
pub mod pipeline;
pub mod sink;

pub use charts::{ChartCapture, PlottersChartRenderer};
pub use composer::{ReportBranding, ReportComposer};
pub use document::{ChartContent, ChartImage, ImageFormat, ReportDocument, ReportSection};
pub use json_report::JsonSink;
pub use markdown_report::MarkdownSink;
pub use pipeline::ReportPipeline;
pub use sink::DocumentSink;

use crate::config::ExportFormat;

/// @ai:intent Sink for a configured export format
/// @ai:effects pure
pub fn sink_for(format: ExportFormat) -> Box<dyn DocumentSink> {
    match format {
        ExportFormat::Markdown => Box::new(MarkdownSink::new()),
        ExportFormat::Json => Box::new(JsonSink::new()),
    }
}
