//! User-invokable operators

use scenelink_ui::{OperatorDescriptor, RegistryError};

use super::AddonModule;
use crate::lifecycle::LifecycleContext;

const OPERATORS: [(&str, &str, &str); 4] = [
    (
        "scenelink.connect",
        "Connect",
        "Connect to a sync server and join a room",
    ),
    (
        "scenelink.disconnect",
        "Disconnect",
        "Leave the current room and drop the server connection",
    ),
    (
        "scenelink.launch_local_server",
        "Launch Local Server",
        "Start a sync server on this machine for the session",
    ),
    (
        "scenelink.save_statistics",
        "Save Statistics",
        "Write the current session statistics to disk",
    ),
];

/// Registers the addon's operators
pub struct OperatorsModule;

impl AddonModule for OperatorsModule {
    fn name(&self) -> &'static str {
        "operators"
    }

    fn register(&mut self, ctx: &mut LifecycleContext) -> Result<(), RegistryError> {
        for (id, label, description) in OPERATORS {
            ctx.registry.add_operator(OperatorDescriptor {
                id: id.to_string(),
                label: label.to_string(),
                description: description.to_string(),
            })?;
        }
        log::debug!("registered {} operators", OPERATORS.len());
        Ok(())
    }

    fn unregister(&mut self, ctx: &mut LifecycleContext) -> Result<(), RegistryError> {
        for (id, _, _) in OPERATORS.iter().rev() {
            ctx.registry.remove_operator(id)?;
        }
        Ok(())
    }
}
