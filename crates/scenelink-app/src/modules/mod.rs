//! Addon modules
//!
//! Each module contributes one slice of the addon's host integration
//! and exposes symmetric register/unregister hooks. The lifecycle
//! controller calls them in the order of `default_modules` during
//! activation and in reverse during deactivation.

mod debug;
mod operators;
mod panels;
mod preferences;
mod properties;

pub use debug::DebugModule;
pub use operators::OperatorsModule;
pub use panels::PanelsModule;
pub use preferences::PreferencesModule;
pub use properties::PropertiesModule;

use scenelink_ui::RegistryError;

use crate::lifecycle::LifecycleContext;

/// One registerable slice of the addon
pub trait AddonModule {
    /// Stable module name, used in error reporting
    fn name(&self) -> &'static str;

    /// Bring the module's host integration into existence
    fn register(&mut self, ctx: &mut LifecycleContext) -> Result<(), RegistryError>;

    /// Remove exactly what `register` added
    fn unregister(&mut self, ctx: &mut LifecycleContext) -> Result<(), RegistryError>;
}

/// The addon's modules in activation order
pub fn default_modules() -> Vec<Box<dyn AddonModule>> {
    vec![
        Box::new(DebugModule::new()),
        Box::new(PreferencesModule),
        Box::new(PropertiesModule),
        Box::new(PanelsModule),
        Box::new(OperatorsModule),
    ]
}
