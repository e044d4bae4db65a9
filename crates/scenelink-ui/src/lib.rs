//! scenelink-ui: host registration surface
//!
//! This crate defines the descriptor types the addon registers with the
//! host 3D application (panels, operators, property groups, preference
//! pages) and the registry they are registered into. It knows nothing
//! about any concrete host toolkit.

pub mod descriptors;
pub mod registry;

pub use descriptors::*;
pub use registry::{HostRegistry, RegistryError};
