//! Scene and user property groups

use scenelink_ui::{PropertyField, PropertyGroupDescriptor, PropertyKind, RegistryError};

use super::AddonModule;
use crate::lifecycle::LifecycleContext;

const ROOM_SETTINGS_ID: &str = "scenelink.room_settings";
const USER_SETTINGS_ID: &str = "scenelink.user_settings";

/// Registers the addon's property groups
pub struct PropertiesModule;

impl PropertiesModule {
    fn room_settings() -> PropertyGroupDescriptor {
        PropertyGroupDescriptor {
            id: ROOM_SETTINGS_ID.to_string(),
            fields: vec![
                PropertyField::new("host", PropertyKind::Text),
                PropertyField::new("port", PropertyKind::Int),
                PropertyField::new("room", PropertyKind::Text),
                PropertyField::new("experimental_sync", PropertyKind::Bool),
            ],
        }
    }

    fn user_settings() -> PropertyGroupDescriptor {
        PropertyGroupDescriptor {
            id: USER_SETTINGS_ID.to_string(),
            fields: vec![
                PropertyField::new("display_name", PropertyKind::Text),
                PropertyField::new("color_hue", PropertyKind::Float),
            ],
        }
    }
}

impl AddonModule for PropertiesModule {
    fn name(&self) -> &'static str {
        "properties"
    }

    fn register(&mut self, ctx: &mut LifecycleContext) -> Result<(), RegistryError> {
        ctx.registry.add_property_group(Self::room_settings())?;
        ctx.registry.add_property_group(Self::user_settings())?;
        Ok(())
    }

    fn unregister(&mut self, ctx: &mut LifecycleContext) -> Result<(), RegistryError> {
        ctx.registry.remove_property_group(USER_SETTINGS_ID)?;
        ctx.registry.remove_property_group(ROOM_SETTINGS_ID)?;
        Ok(())
    }
}
