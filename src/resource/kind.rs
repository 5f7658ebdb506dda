//! @ai:module:intent Sealed set of tracked generation categories
//! @ai:module:layer domain
//! @ai:module:public_api ResourceType
//! @ai:module:stateless true

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// @ai:intent Category of renewable generation tracked by the dashboard
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Solar,
    Wind,
    Hydro,
    Geothermal,
    Biomass,
}

impl ResourceType {
    /// Registration order, also the display order of overviews.
    pub const ALL: [ResourceType; 5] = [
        ResourceType::Solar,
        ResourceType::Wind,
        ResourceType::Hydro,
        ResourceType::Geothermal,
        ResourceType::Biomass,
    ];

    /// @ai:intent Convert resource type to its registry key
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Solar => "solar",
            ResourceType::Wind => "wind",
            ResourceType::Hydro => "hydro",
            ResourceType::Geothermal => "geothermal",
            ResourceType::Biomass => "biomass",
        }
    }

    /// @ai:intent Human-readable name used in headings and export filenames
    /// @ai:effects pure
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceType::Solar => "Solar",
            ResourceType::Wind => "Wind",
            ResourceType::Hydro => "Hydro",
            ResourceType::Geothermal => "Geothermal",
            ResourceType::Biomass => "Biomass",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = Error;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let normalized = key.trim().to_ascii_lowercase();
        ResourceType::ALL
            .into_iter()
            .find(|resource| resource.as_str() == normalized)
            .ok_or_else(|| Error::UnknownResourceType(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trips_through_from_str() {
        for resource in ResourceType::ALL {
            assert_eq!(resource.as_str().parse::<ResourceType>().unwrap(), resource);
        }
    }

    #[test]
    fn test_from_str_ignores_case_and_whitespace() {
        assert_eq!(" Wind ".parse::<ResourceType>().unwrap(), ResourceType::Wind);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = "tidal".parse::<ResourceType>().unwrap_err();
        assert!(matches!(err, Error::UnknownResourceType(key) if key == "tidal"));
    }
}
