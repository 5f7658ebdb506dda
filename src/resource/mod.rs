//! @ai:module:intent Resource types and their static configuration registry
//! @ai:module:layer domain
//! @ai:module:public_api ResourceType, ResourceTypeConfig, ResourceTypeRegistry, FallbackShape, DocumentTemplate, DisplayColor

pub mod kind;
pub mod registry;

pub use kind::ResourceType;
pub use registry::{
    DisplayColor, DocumentTemplate, FallbackShape, ResourceTypeConfig, ResourceTypeRegistry,
};
