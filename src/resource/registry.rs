//! @ai:module:intent Closed registry of per-resource configuration
//! @ai:module:layer domain
//! @ai:module:public_api ResourceTypeRegistry, ResourceTypeConfig, FallbackShape, DocumentTemplate, DisplayColor
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::resource::kind::ResourceType;
use serde::Serialize;

/// @ai:intent RGB color used for charts and headings of one resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DisplayColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// @ai:intent Render as `#RRGGBB`
    /// @ai:effects pure
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// @ai:intent Parameters of the closed-form fallback curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FallbackShape {
    /// Level at the first period of a range, before the periodic offset.
    pub base_level: f64,
    pub amplitude: f64,
    /// Length of one periodic cycle, in periods. Must be positive.
    pub cycle_periods: f64,
    pub phase: f64,
    pub growth_per_period: f64,
}

/// @ai:intent Static narrative strings for exported reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentTemplate {
    pub title: &'static str,
    pub table_caption: &'static str,
    pub recommendations: &'static [&'static str],
}

/// @ai:intent Immutable configuration for a single resource type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceTypeConfig {
    pub resource: ResourceType,
    pub display_name: &'static str,
    pub endpoint_path: &'static str,
    pub unit: &'static str,
    pub display_color: DisplayColor,
    pub fallback_shape: FallbackShape,
    pub document_template: DocumentTemplate,
}

impl ResourceTypeConfig {
    pub fn key(&self) -> &'static str {
        self.resource.as_str()
    }
}

impl ResourceType {
    /// @ai:intent Typed configuration payload carried by each variant
    /// @ai:effects pure
    pub fn config(&self) -> ResourceTypeConfig {
        match self {
            ResourceType::Solar => ResourceTypeConfig {
                resource: *self,
                display_name: self.display_name(),
                endpoint_path: "/api/solar/production",
                unit: "GWh",
                display_color: DisplayColor::rgb(0xF5, 0xA6, 0x23),
                fallback_shape: FallbackShape {
                    base_level: 420.0,
                    amplitude: 35.0,
                    cycle_periods: 11.0,
                    phase: 0.0,
                    growth_per_period: 48.0,
                },
                document_template: DocumentTemplate {
                    title: "Solar Energy Production Summary",
                    table_caption: "Annual solar generation (GWh)",
                    recommendations: &[
                        "Prioritise rooftop installations on public buildings with south-facing exposure.",
                        "Pair new utility-scale arrays with battery storage to shift midday surplus into the evening peak.",
                        "Schedule panel cleaning ahead of the dry season to limit soiling losses.",
                    ],
                },
            },
            ResourceType::Wind => ResourceTypeConfig {
                resource: *self,
                display_name: self.display_name(),
                endpoint_path: "/api/wind/production",
                unit: "GWh",
                display_color: DisplayColor::rgb(0x4A, 0x90, 0xE2),
                fallback_shape: FallbackShape {
                    base_level: 610.0,
                    amplitude: 55.0,
                    cycle_periods: 7.0,
                    phase: 1.2,
                    growth_per_period: 36.0,
                },
                document_template: DocumentTemplate {
                    title: "Wind Energy Production Summary",
                    table_caption: "Annual wind generation (GWh)",
                    recommendations: &[
                        "Repower turbines older than fifteen years with higher-capacity nacelles.",
                        "Expand grid interconnection at coastal sites to reduce curtailment.",
                        "Coordinate maintenance windows with the low-wind season.",
                    ],
                },
            },
            ResourceType::Hydro => ResourceTypeConfig {
                resource: *self,
                display_name: self.display_name(),
                endpoint_path: "/api/hydro/production",
                unit: "GWh",
                display_color: DisplayColor::rgb(0x2E, 0x86, 0xAB),
                fallback_shape: FallbackShape {
                    base_level: 1280.0,
                    amplitude: 140.0,
                    cycle_periods: 5.0,
                    phase: 0.6,
                    growth_per_period: 6.0,
                },
                document_template: DocumentTemplate {
                    title: "Hydroelectric Production Summary",
                    table_caption: "Annual hydroelectric generation (GWh)",
                    recommendations: &[
                        "Review reservoir release schedules against multi-year rainfall outlooks.",
                        "Evaluate pumped-storage retrofits at existing dams.",
                        "Monitor sediment build-up at intakes to protect turbine efficiency.",
                    ],
                },
            },
            ResourceType::Geothermal => ResourceTypeConfig {
                resource: *self,
                display_name: self.display_name(),
                endpoint_path: "/api/geothermal/production",
                unit: "GWh",
                display_color: DisplayColor::rgb(0xC0, 0x39, 0x2B),
                fallback_shape: FallbackShape {
                    base_level: 95.0,
                    amplitude: 4.0,
                    cycle_periods: 9.0,
                    phase: 2.1,
                    growth_per_period: 3.5,
                },
                document_template: DocumentTemplate {
                    title: "Geothermal Production Summary",
                    table_caption: "Annual geothermal generation (GWh)",
                    recommendations: &[
                        "Track reservoir pressure decline and plan reinjection wells accordingly.",
                        "Assess binary-cycle units for lower-temperature fields.",
                        "Explore district heating offtake for residual heat.",
                    ],
                },
            },
            ResourceType::Biomass => ResourceTypeConfig {
                resource: *self,
                display_name: self.display_name(),
                endpoint_path: "/api/biomass/production",
                unit: "GWh",
                display_color: DisplayColor::rgb(0x6B, 0x8E, 0x23),
                fallback_shape: FallbackShape {
                    base_level: 150.0,
                    amplitude: 12.0,
                    cycle_periods: 6.0,
                    phase: 0.3,
                    growth_per_period: 5.0,
                },
                document_template: DocumentTemplate {
                    title: "Biomass Energy Production Summary",
                    table_caption: "Annual biomass generation (GWh)",
                    recommendations: &[
                        "Secure long-term feedstock contracts from certified sustainable sources.",
                        "Co-locate plants with agricultural processors to cut transport emissions.",
                        "Report lifecycle emissions alongside generation figures.",
                    ],
                },
            },
        }
    }
}

/// @ai:intent Static table from resource-type key to configuration
pub struct ResourceTypeRegistry {
    configs: Vec<ResourceTypeConfig>,
}

impl ResourceTypeRegistry {
    /// @ai:intent Build the registry with every known resource type
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            configs: ResourceType::ALL.iter().map(ResourceType::config).collect(),
        }
    }

    /// @ai:intent Resolve a configuration by its string key
    /// @ai:effects pure
    pub fn get_config(&self, key: &str) -> Result<&ResourceTypeConfig> {
        let resource: ResourceType = key.parse()?;
        self.configs
            .iter()
            .find(|config| config.resource == resource)
            .ok_or_else(|| Error::UnknownResourceType(key.to_string()))
    }

    /// @ai:intent Resolve the configuration of a typed resource
    /// @ai:effects pure
    pub fn get(&self, resource: ResourceType) -> &ResourceTypeConfig {
        // Built from ResourceType::ALL in the same order.
        &self.configs[resource as usize]
    }

    pub fn resource_types(&self) -> impl Iterator<Item = ResourceType> + '_ {
        self.configs.iter().map(|config| config.resource)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceTypeConfig> {
        self.configs.iter()
    }
}

impl Default for ResourceTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_by_key() {
        let registry = ResourceTypeRegistry::new();
        let config = registry.get_config("wind").unwrap();
        assert_eq!(config.resource, ResourceType::Wind);
        assert_eq!(config.endpoint_path, "/api/wind/production");
    }

    #[test]
    fn test_get_config_unknown_key() {
        let registry = ResourceTypeRegistry::new();
        let err = registry.get_config("nuclear").unwrap_err();
        assert!(matches!(err, Error::UnknownResourceType(_)));
    }

    #[test]
    fn test_get_matches_variant_for_every_resource() {
        let registry = ResourceTypeRegistry::new();
        for resource in ResourceType::ALL {
            assert_eq!(registry.get(resource).resource, resource);
        }
    }

    #[test]
    fn test_every_config_is_well_formed() {
        let registry = ResourceTypeRegistry::new();
        for config in registry.iter() {
            assert!(config.endpoint_path.starts_with('/'));
            assert!(config.fallback_shape.cycle_periods > 0.0);
            assert!(config.fallback_shape.base_level > config.fallback_shape.amplitude);
            assert!(!config.document_template.recommendations.is_empty());
        }
    }

    #[test]
    fn test_display_color_hex() {
        assert_eq!(DisplayColor::rgb(0xF5, 0xA6, 0x23).hex(), "#F5A623");
    }
}
