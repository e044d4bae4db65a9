//! Shutdown hooks
//!
//! Named finalizers the host invokes during its own shutdown sequence.
//! The addon registers cleanup here on activation and removes it again
//! on explicit deactivation, so cleanup runs exactly once whichever
//! path the host takes. Running the hooks drains the registry.

use crate::lifecycle::LifecycleContext;

/// A finalizer invoked with the host-owned context
pub type Hook = fn(&mut LifecycleContext);

/// Registry of named shutdown hooks
#[derive(Default)]
pub struct ShutdownHooks {
    hooks: Vec<(&'static str, Hook)>,
}

impl ShutdownHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hook, replacing any hook already registered under `name`
    pub fn add(&mut self, name: &'static str, hook: Hook) {
        self.remove(name);
        self.hooks.push((name, hook));
    }

    /// Remove a hook by name; returns whether one was registered
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(n, _)| *n != name);
        before != self.hooks.len()
    }

    /// Whether a hook is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.hooks.iter().any(|(n, _)| *n == name)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run and drain all hooks in registration order
    pub fn run_all(&mut self, ctx: &mut LifecycleContext) {
        for (name, hook) in self.hooks.drain(..) {
            log::debug!("running shutdown hook `{}`", name);
            hook(ctx);
        }
    }
}
