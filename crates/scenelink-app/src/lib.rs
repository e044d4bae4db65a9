//! scenelink-app: lifecycle controller and host harness
//!
//! This crate contains the addon's lifecycle controller (activation,
//! deactivation, cleanup), its module set, preferences, and a headless
//! harness standing in for a host plugin manager.

pub mod cli;
pub mod lifecycle;
pub mod modules;
pub mod prefs;
pub mod shutdown;

pub use lifecycle::{cleanup, Addon, LifecycleContext, LifecycleError};
pub use prefs::Preferences;
pub use shutdown::ShutdownHooks;

use std::io::BufRead;

use cli::Cli;

/// Run the headless harness: activate the addon, hold it active until
/// stdin closes, then deactivate and run the host shutdown sequence.
pub fn run() -> anyhow::Result<()> {
    let args = Cli::parse_args();

    let mut prefs = match &args.prefs_path {
        Some(path) => Preferences::load(path)?,
        None => Preferences::load_default()?,
    };
    args.apply(&mut prefs);

    let mut ctx = LifecycleContext::new(prefs);
    let mut hooks = ShutdownHooks::new();
    let mut addon = Addon::new();

    addon.activate(&mut ctx, &mut hooks)?;

    if args.launch_server {
        let server = scenelink_core::ServerProcess::spawn(
            &ctx.prefs.server.program,
            &[],
            ctx.prefs.server.port,
        )?;
        ctx.session.local_server = Some(server);
    }
    if let Some(room) = &args.room {
        ctx.session.begin_statistics(room.clone());
    }

    println!(
        "scenelink active as `{}` (log: {}); close stdin to deactivate",
        ctx.session.user,
        ctx.log_file.display()
    );

    // Host-driven: stay active until the host (stdin) goes away
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        if line.is_err() {
            break;
        }
    }

    addon.deactivate(&mut ctx, &mut hooks)?;

    // The host's own shutdown sequence; empty after a clean deactivate
    hooks.run_all(&mut ctx);

    Ok(())
}
