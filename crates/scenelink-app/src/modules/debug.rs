//! Internal debug tooling
//!
//! Registers a debug panel and a self-test operator, but only when the
//! debug preference is on. The module remembers whether it registered
//! anything so unregister stays symmetric when the preference changed
//! in between.

use scenelink_ui::{OperatorDescriptor, PanelDescriptor, PanelSpace, RegistryError};

use super::AddonModule;
use crate::lifecycle::LifecycleContext;

const PANEL_ID: &str = "scenelink.debug";
const SELF_TEST_ID: &str = "scenelink.debug_self_test";

/// Registers the internal debug surface
pub struct DebugModule {
    registered: bool,
}

impl DebugModule {
    pub fn new() -> Self {
        Self { registered: false }
    }
}

impl Default for DebugModule {
    fn default() -> Self {
        Self::new()
    }
}

impl AddonModule for DebugModule {
    fn name(&self) -> &'static str {
        "debug"
    }

    fn register(&mut self, ctx: &mut LifecycleContext) -> Result<(), RegistryError> {
        if !ctx.prefs.debug.enabled {
            return Ok(());
        }

        ctx.registry.add_panel(PanelDescriptor {
            id: PANEL_ID.to_string(),
            label: "Scenelink Debug".to_string(),
            space: PanelSpace::Debug,
        })?;
        ctx.registry.add_operator(OperatorDescriptor {
            id: SELF_TEST_ID.to_string(),
            label: "Run Self Test".to_string(),
            description: "Exercise the addon's data hooks against the open scene".to_string(),
        })?;
        self.registered = true;
        log::debug!("debug tooling registered");
        Ok(())
    }

    fn unregister(&mut self, ctx: &mut LifecycleContext) -> Result<(), RegistryError> {
        if !self.registered {
            return Ok(());
        }
        ctx.registry.remove_operator(SELF_TEST_ID)?;
        ctx.registry.remove_panel(PANEL_ID)?;
        self.registered = false;
        Ok(())
    }
}
