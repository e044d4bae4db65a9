//! Addon lifecycle
//!
//! Brings the addon's logging, crash diagnostics and host integration
//! into existence on activation and reverses all of it on deactivation
//! or host shutdown. The host owns the single `Addon` instance and the
//! `LifecycleContext` threaded through every call; the only
//! process-wide state left is what is process-wide by nature (the
//! global logger, signal dispositions), each behind an idempotency
//! guard.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use scenelink_core::session::Session;
use scenelink_core::{fault, logging, stats};
use scenelink_ui::{HostRegistry, RegistryError};

use crate::modules::{default_modules, AddonModule};
use crate::prefs::Preferences;
use crate::shutdown::ShutdownHooks;

const CLEANUP_HOOK: &str = "scenelink.cleanup";

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("failed to install logger: {0}")]
    Logging(#[from] logging::InstallError),

    #[error("failed to enable fault handler: {0}")]
    Fault(#[source] io::Error),

    #[error("module `{module}` failed to {action}: {source}")]
    Module {
        module: &'static str,
        action: &'static str,
        source: RegistryError,
    },

    #[error("failed to save statistics: {0}")]
    SaveStatistics(#[source] io::Error),
}

/// Host-owned state threaded through the lifecycle calls
pub struct LifecycleContext {
    /// Current session
    pub session: Session,
    /// The host's registration surface
    pub registry: HostRegistry,
    /// Addon preferences
    pub prefs: Preferences,
    /// Log file for the rotating file sink
    pub log_file: PathBuf,
    /// Fault report file for the crash-signal handler
    pub fault_report_file: PathBuf,
    /// Whether this addon enabled the fault handler (and so may
    /// disable it again)
    pub owns_fault_handler: bool,
}

impl LifecycleContext {
    /// Build a context from preferences, using per-user default paths
    pub fn new(prefs: Preferences) -> Self {
        let mut session = Session::new(prefs.general.user.clone(), prefs.statistics_directory());
        session.auto_save_statistics = prefs.statistics.auto_save;
        Self {
            session,
            registry: HostRegistry::new(),
            log_file: logging::log_file(),
            fault_report_file: fault::report_file(),
            owns_fault_handler: false,
            prefs,
        }
    }
}

/// The addon's lifecycle controller
pub struct Addon {
    modules: Vec<Box<dyn AddonModule>>,
    active: bool,
}

impl Addon {
    pub fn new() -> Self {
        Self::with_modules(default_modules())
    }

    /// Build a controller over a custom module set
    pub fn with_modules(modules: Vec<Box<dyn AddonModule>>) -> Self {
        Self {
            modules,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Module names in activation order
    pub fn module_names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    /// Activate the addon.
    ///
    /// Installs the logger (skipped when already installed), enables
    /// the fault handler (remembering ownership), registers the
    /// modules in order, and registers cleanup with the host's
    /// shutdown hooks. Module failures propagate; setup is fail-fast.
    pub fn activate(
        &mut self,
        ctx: &mut LifecycleContext,
        hooks: &mut ShutdownHooks,
    ) -> Result<(), LifecycleError> {
        logging::install(&ctx.log_file, ctx.prefs.log_level())?;

        if fault::enable(&ctx.fault_report_file).map_err(LifecycleError::Fault)? {
            ctx.owns_fault_handler = true;
        }

        for module in self.modules.iter_mut() {
            module.register(ctx).map_err(|source| LifecycleError::Module {
                module: module.name(),
                action: "register",
                source,
            })?;
        }

        hooks.add(CLEANUP_HOOK, run_cleanup_hook);
        self.active = true;
        log::info!("scenelink addon activated");
        Ok(())
    }

    /// Deactivate the addon.
    ///
    /// Runs cleanup explicitly, drops the shutdown-hook registration,
    /// then unregisters the modules in reverse activation order.
    pub fn deactivate(
        &mut self,
        ctx: &mut LifecycleContext,
        hooks: &mut ShutdownHooks,
    ) -> Result<(), LifecycleError> {
        cleanup(ctx)?;
        hooks.remove(CLEANUP_HOOK);

        for module in self.modules.iter_mut().rev() {
            module
                .unregister(ctx)
                .map_err(|source| LifecycleError::Module {
                    module: module.name(),
                    action: "unregister",
                    source,
                })?;
        }

        self.active = false;
        log::info!("scenelink addon deactivated");
        Ok(())
    }
}

impl Default for Addon {
    fn default() -> Self {
        Self::new()
    }
}

/// Release session resources.
///
/// Idempotent; called both from explicit deactivation and from the
/// host's shutdown sequence. Saves statistics when present and
/// auto-save is on, kills the local server best-effort, and disables
/// the fault handler only when this addon enabled it.
pub fn cleanup(ctx: &mut LifecycleContext) -> Result<(), LifecycleError> {
    if ctx.session.auto_save_statistics {
        if let Some(statistics) = &ctx.session.current_statistics {
            stats::save_statistics(statistics, &ctx.session.statistics_directory)
                .map_err(LifecycleError::SaveStatistics)?;
        }
    }

    // Termination is advisory; a dead or unkillable server must not
    // derail the rest of teardown.
    if let Some(server) = ctx.session.local_server.as_mut() {
        if let Err(err) = server.kill() {
            log::debug!("local server kill failed: {}", err);
        }
    }
    ctx.session.local_server = None;

    if ctx.owns_fault_handler {
        fault::disable();
        ctx.owns_fault_handler = false;
    }

    Ok(())
}

/// Hook wrapper: cleanup failures must not escape into the host's exit
/// path.
fn run_cleanup_hook(ctx: &mut LifecycleContext) {
    if let Err(err) = cleanup(ctx) {
        log::warn!("cleanup failed during shutdown: {}", err);
    }
}
