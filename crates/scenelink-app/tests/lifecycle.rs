//! Lifecycle integration tests
//!
//! The global logger and the fault handler are process-wide, so tests
//! that activate the addon serialize on a lock and leave the fault
//! handler disabled when they finish.

use std::cell::RefCell;
use std::process::{Command, Stdio};
use std::rc::Rc;

use parking_lot::Mutex;
use tempfile::TempDir;

use scenelink_app::modules::AddonModule;
use scenelink_app::{cleanup, Addon, LifecycleContext, Preferences, ShutdownHooks};
use scenelink_core::{fault, logging, ServerProcess};
use scenelink_ui::RegistryError;

static LIFECYCLE_LOCK: Mutex<()> = Mutex::new(());

fn test_context(dir: &TempDir) -> LifecycleContext {
    let mut prefs = Preferences::default();
    prefs.statistics.directory = Some(dir.path().join("statistics"));
    let mut ctx = LifecycleContext::new(prefs);
    ctx.log_file = dir.path().join("logs").join("scenelink.log");
    ctx.fault_report_file = dir.path().join("fault.log");
    ctx
}

/// Module that records its hook invocations
struct RecordingModule {
    name: &'static str,
    events: Rc<RefCell<Vec<String>>>,
}

impl AddonModule for RecordingModule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn register(&mut self, _ctx: &mut LifecycleContext) -> Result<(), RegistryError> {
        self.events.borrow_mut().push(format!("register:{}", self.name));
        Ok(())
    }

    fn unregister(&mut self, _ctx: &mut LifecycleContext) -> Result<(), RegistryError> {
        self.events
            .borrow_mut()
            .push(format!("unregister:{}", self.name));
        Ok(())
    }
}

#[test]
fn test_double_activation_keeps_sink_count() {
    let _guard = LIFECYCLE_LOCK.lock();
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(&dir);
    let mut hooks = ShutdownHooks::new();
    let mut addon = Addon::with_modules(vec![]);

    addon.activate(&mut ctx, &mut hooks).unwrap();
    assert_eq!(logging::sink_count(), 2);

    addon.activate(&mut ctx, &mut hooks).unwrap();
    assert_eq!(logging::sink_count(), 2, "second activation must not add sinks");
    assert_eq!(hooks.len(), 1, "cleanup hook must not be duplicated");

    addon.deactivate(&mut ctx, &mut hooks).unwrap();
}

#[test]
fn test_fault_handler_owned_by_activation_is_disabled() {
    let _guard = LIFECYCLE_LOCK.lock();
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(&dir);
    let mut hooks = ShutdownHooks::new();
    let mut addon = Addon::with_modules(vec![]);

    assert!(!fault::is_enabled());
    addon.activate(&mut ctx, &mut hooks).unwrap();
    assert!(fault::is_enabled());
    assert!(ctx.owns_fault_handler);

    addon.deactivate(&mut ctx, &mut hooks).unwrap();
    assert!(!fault::is_enabled(), "owned handler must be disabled");
}

#[test]
fn test_fault_handler_enabled_elsewhere_is_left_on() {
    let _guard = LIFECYCLE_LOCK.lock();
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(&dir);
    let mut hooks = ShutdownHooks::new();
    let mut addon = Addon::with_modules(vec![]);

    // The host enabled the handler before the addon came up
    assert!(fault::enable(&dir.path().join("host-fault.log")).unwrap());

    addon.activate(&mut ctx, &mut hooks).unwrap();
    assert!(!ctx.owns_fault_handler);

    addon.deactivate(&mut ctx, &mut hooks).unwrap();
    assert!(fault::is_enabled(), "foreign handler must be left enabled");

    fault::disable();
}

#[test]
fn test_deactivation_unregisters_in_reverse_order() {
    let _guard = LIFECYCLE_LOCK.lock();
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(&dir);
    let mut hooks = ShutdownHooks::new();

    let events = Rc::new(RefCell::new(Vec::new()));
    let modules: Vec<Box<dyn AddonModule>> = ["first", "second", "third"]
        .into_iter()
        .map(|name| {
            Box::new(RecordingModule {
                name,
                events: events.clone(),
            }) as Box<dyn AddonModule>
        })
        .collect();

    let mut addon = Addon::with_modules(modules);
    addon.activate(&mut ctx, &mut hooks).unwrap();
    addon.deactivate(&mut ctx, &mut hooks).unwrap();

    assert_eq!(
        *events.borrow(),
        vec![
            "register:first",
            "register:second",
            "register:third",
            "unregister:third",
            "unregister:second",
            "unregister:first",
        ]
    );
}

#[test]
fn test_default_module_order() {
    let addon = Addon::new();
    assert_eq!(
        addon.module_names(),
        vec!["debug", "preferences", "properties", "panels", "operators"]
    );
}

#[test]
fn test_cleanup_survives_failed_kill() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(&dir);

    // A child that was already reaped cannot be killed again
    let mut child = Command::new("true")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    child.wait().unwrap();
    ctx.session.local_server = Some(ServerProcess::from_child(child, 12800));

    cleanup(&mut ctx).unwrap();
    assert!(ctx.session.local_server.is_none());
}

#[test]
fn test_cleanup_kills_running_server() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(&dir);

    let child = Command::new("sleep")
        .arg("30")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    ctx.session.local_server = Some(ServerProcess::from_child(child, 12800));

    cleanup(&mut ctx).unwrap();
    assert!(ctx.session.local_server.is_none());
}

#[test]
fn test_cleanup_saves_statistics_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(&dir);
    ctx.session.begin_statistics("studio");

    cleanup(&mut ctx).unwrap();

    let stats_dir = dir.path().join("statistics");
    let entries: Vec<_> = std::fs::read_dir(&stats_dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_cleanup_skips_statistics_when_auto_save_off() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(&dir);
    ctx.session.begin_statistics("studio");
    ctx.session.auto_save_statistics = false;

    cleanup(&mut ctx).unwrap();

    assert!(!dir.path().join("statistics").exists());
}

#[test]
fn test_cleanup_skips_statistics_when_none_collected() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(&dir);
    assert!(ctx.session.auto_save_statistics);

    cleanup(&mut ctx).unwrap();

    assert!(!dir.path().join("statistics").exists());
}

#[test]
fn test_full_cycle_with_default_modules() {
    let _guard = LIFECYCLE_LOCK.lock();
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(&dir);
    let mut hooks = ShutdownHooks::new();
    let mut addon = Addon::new();

    addon.activate(&mut ctx, &mut hooks).unwrap();
    assert!(addon.is_active());
    assert_eq!(ctx.registry.panel_count(), 3);
    assert_eq!(ctx.registry.operator_count(), 4);
    assert_eq!(ctx.registry.property_group_count(), 2);
    assert_eq!(ctx.registry.preference_page_count(), 1);
    // Debug tooling is off by default
    assert!(ctx.registry.panel("scenelink.debug").is_none());

    addon.deactivate(&mut ctx, &mut hooks).unwrap();
    assert!(!addon.is_active());
    assert!(ctx.registry.is_empty());
    assert!(hooks.is_empty());
}

#[test]
fn test_debug_module_gated_by_preference() {
    let _guard = LIFECYCLE_LOCK.lock();
    let dir = tempfile::tempdir().unwrap();
    let mut prefs = Preferences::default();
    prefs.statistics.directory = Some(dir.path().join("statistics"));
    prefs.debug.enabled = true;
    let mut ctx = LifecycleContext::new(prefs);
    ctx.log_file = dir.path().join("scenelink.log");
    ctx.fault_report_file = dir.path().join("fault.log");

    let mut hooks = ShutdownHooks::new();
    let mut addon = Addon::new();

    addon.activate(&mut ctx, &mut hooks).unwrap();
    assert!(ctx.registry.panel("scenelink.debug").is_some());
    assert!(ctx.registry.operator("scenelink.debug_self_test").is_some());

    addon.deactivate(&mut ctx, &mut hooks).unwrap();
    assert!(ctx.registry.is_empty());
}

#[test]
fn test_shutdown_hooks_run_cleanup_without_deactivate() {
    let _guard = LIFECYCLE_LOCK.lock();
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = test_context(&dir);
    let mut hooks = ShutdownHooks::new();
    let mut addon = Addon::with_modules(vec![]);

    addon.activate(&mut ctx, &mut hooks).unwrap();
    ctx.session.begin_statistics("studio");

    // Host exits without an explicit deactivation
    hooks.run_all(&mut ctx);

    assert!(hooks.is_empty());
    assert!(!fault::is_enabled());
    let stats_dir = dir.path().join("statistics");
    let entries: Vec<_> = std::fs::read_dir(&stats_dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
}
