//! scenelink - collaborative scene-editing addon runtime
//!
//! This is the main entry point; all of the lifecycle logic lives in
//! the app crate.

fn main() {
    if let Err(err) = scenelink_app::run() {
        eprintln!("scenelink: {:#}", err);
        std::process::exit(1);
    }
}
