//! @ai:module:intent In-memory report document assembled from a store snapshot
//! @ai:module:layer domain
//! @ai:module:public_api ReportDocument, ReportSection, ChartImage, ImageFormat, ChartContent
//! @ai:module:stateless true

use crate::analytics::SeriesSummary;
use crate::resource::ResourceType;
use crate::series::{PeriodRange, TimeSeriesPoint};
use chrono::NaiveDate;
use serde::Serialize;

/// @ai:intent Encoding of a captured chart image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Svg => "image/svg+xml",
        }
    }
}

/// @ai:intent Opaque rendered chart handed over by a chart capture
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartImage {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing)]
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderSection {
    pub brand_title: String,
    pub title: String,
    pub generated_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataSection {
    pub resource: ResourceType,
    pub range: PeriodRange,
    pub projection: Option<f64>,
    pub unit: String,
    /// Present exactly when the data is simulated.
    pub degraded_notice: Option<String>,
    pub summary: Option<SeriesSummary>,
}

/// @ai:intent Either the captured chart or a textual stand-in
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartContent {
    Image(ChartImage),
    Summary { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSection {
    pub alt_text: String,
    pub content: ChartContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSection {
    pub caption: String,
    pub unit: String,
    pub rows: Vec<TimeSeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationsSection {
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterSection {
    pub copyright: String,
}

/// @ai:intent One block of the report, in fixed document order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum ReportSection {
    Header(HeaderSection),
    Metadata(MetadataSection),
    Chart(ChartSection),
    Table(TableSection),
    Recommendations(RecommendationsSection),
    Footer(FooterSection),
}

impl ReportSection {
    pub fn kind(&self) -> &'static str {
        match self {
            ReportSection::Header(_) => "header",
            ReportSection::Metadata(_) => "metadata",
            ReportSection::Chart(_) => "chart",
            ReportSection::Table(_) => "table",
            ReportSection::Recommendations(_) => "recommendations",
            ReportSection::Footer(_) => "footer",
        }
    }
}

/// @ai:intent Ordered sections plus the identity used for export filenames
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub resource: ResourceType,
    pub display_name: String,
    pub sections: Vec<ReportSection>,
}

impl ReportDocument {
    /// @ai:intent Filename stem following `<DisplayName>_Summary`
    /// @ai:effects pure
    pub fn file_stem(&self) -> String {
        format!("{}_Summary", self.display_name.replace(char::is_whitespace, "_"))
    }

    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.file_stem(), extension)
    }

    pub fn section_kinds(&self) -> Vec<&'static str> {
        self.sections.iter().map(ReportSection::kind).collect()
    }

    pub fn header(&self) -> Option<&HeaderSection> {
        self.sections.iter().find_map(|section| match section {
            ReportSection::Header(header) => Some(header),
            _ => None,
        })
    }

    pub fn metadata(&self) -> Option<&MetadataSection> {
        self.sections.iter().find_map(|section| match section {
            ReportSection::Metadata(metadata) => Some(metadata),
            _ => None,
        })
    }

    pub fn chart(&self) -> Option<&ChartSection> {
        self.sections.iter().find_map(|section| match section {
            ReportSection::Chart(chart) => Some(chart),
            _ => None,
        })
    }

    pub fn table(&self) -> Option<&TableSection> {
        self.sections.iter().find_map(|section| match section {
            ReportSection::Table(table) => Some(table),
            _ => None,
        })
    }

    pub fn recommendations(&self) -> Option<&RecommendationsSection> {
        self.sections.iter().find_map(|section| match section {
            ReportSection::Recommendations(recommendations) => Some(recommendations),
            _ => None,
        })
    }

    /// @ai:intent Captured chart image, if the chart section holds one
    /// @ai:effects pure
    pub fn chart_image(&self) -> Option<&ChartImage> {
        match &self.chart()?.content {
            ChartContent::Image(image) => Some(image),
            ChartContent::Summary { .. } => None,
        }
    }

    pub fn is_simulated(&self) -> bool {
        self.metadata()
            .map(|metadata| metadata.degraded_notice.is_some())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(display_name: &str) -> ReportDocument {
        ReportDocument {
            resource: ResourceType::Solar,
            display_name: display_name.to_string(),
            sections: vec![ReportSection::Footer(FooterSection {
                copyright: "(c)".to_string(),
            })],
        }
    }

    #[test]
    fn test_file_name_convention() {
        assert_eq!(document("Solar").file_name("md"), "Solar_Summary.md");
        assert_eq!(document("Solar Power").file_stem(), "Solar_Power_Summary");
    }

    #[test]
    fn test_section_serializes_with_tag() {
        let json = serde_json::to_value(&document("Solar")).unwrap();
        assert_eq!(json["sections"][0]["section"], "footer");
        assert_eq!(json["sections"][0]["copyright"], "(c)");
    }

    #[test]
    fn test_chart_bytes_are_not_serialized() {
        let content = ChartContent::Image(ChartImage {
            format: ImageFormat::Png,
            width: 4,
            height: 3,
            bytes: vec![1, 2, 3],
        });
        let json = serde_json::to_value(&content).unwrap();

        assert_eq!(json["kind"], "image");
        assert_eq!(json["format"], "png");
        assert!(json.get("bytes").is_none());
    }
}
