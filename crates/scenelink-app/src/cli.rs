//! CLI argument parsing for the host harness

use std::path::PathBuf;

use clap::Parser;

use crate::prefs::Preferences;

/// scenelink - headless host harness for the scenelink addon
#[derive(Parser, Debug)]
#[command(name = "scenelink")]
#[command(about = "Headless host harness for the scenelink addon")]
#[command(version)]
pub struct Cli {
    /// Preferences file (default: per-user preferences)
    #[arg(long = "prefs")]
    pub prefs_path: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long = "log-level")]
    pub log_level: Option<String>,

    /// Directory for statistics files
    #[arg(long = "stats-dir")]
    pub statistics_directory: Option<PathBuf>,

    /// Do not save statistics during cleanup
    #[arg(long = "no-auto-save")]
    pub no_auto_save: bool,

    /// User name for this session
    #[arg(long = "user")]
    pub user: Option<String>,

    /// Room to collect session statistics for
    #[arg(long = "room")]
    pub room: Option<String>,

    /// Launch the local sync server for this session
    #[arg(long = "launch-server")]
    pub launch_server: bool,

    /// Register the debug panel and self-test operator
    #[arg(long = "debug-module")]
    pub debug_module: bool,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Overlay command-line overrides onto loaded preferences
    pub fn apply(&self, prefs: &mut Preferences) {
        if let Some(level) = &self.log_level {
            prefs.general.log_level = level.clone();
        }
        if let Some(dir) = &self.statistics_directory {
            prefs.statistics.directory = Some(dir.clone());
        }
        if self.no_auto_save {
            prefs.statistics.auto_save = false;
        }
        if let Some(user) = &self.user {
            prefs.general.user = user.clone();
        }
        if self.debug_module {
            prefs.debug.enabled = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let cli = Cli::parse_from(["scenelink"]);
        assert!(cli.prefs_path.is_none());
        assert!(cli.log_level.is_none());
        assert!(cli.statistics_directory.is_none());
        assert!(!cli.no_auto_save);
        assert!(cli.user.is_none());
        assert!(cli.room.is_none());
        assert!(!cli.launch_server);
        assert!(!cli.debug_module);
    }

    #[test]
    fn test_room_and_server_flags() {
        let cli = Cli::parse_from(["scenelink", "--room", "studio", "--launch-server"]);
        assert_eq!(cli.room.as_deref(), Some("studio"));
        assert!(cli.launch_server);
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from([
            "scenelink",
            "--log-level",
            "debug",
            "--stats-dir",
            "/tmp/stats",
            "--no-auto-save",
            "--user",
            "alice",
            "--debug-module",
        ]);

        let mut prefs = Preferences::default();
        cli.apply(&mut prefs);

        assert_eq!(prefs.general.log_level, "debug");
        assert_eq!(
            prefs.statistics.directory.as_deref(),
            Some(std::path::Path::new("/tmp/stats"))
        );
        assert!(!prefs.statistics.auto_save);
        assert_eq!(prefs.general.user, "alice");
        assert!(prefs.debug.enabled);
    }

    #[test]
    fn test_apply_keeps_prefs_when_no_flags() {
        let cli = Cli::parse_from(["scenelink"]);

        let mut prefs = Preferences::default();
        prefs.general.user = "bob".to_string();
        cli.apply(&mut prefs);

        assert_eq!(prefs.general.user, "bob");
        assert!(prefs.statistics.auto_save);
    }

    #[test]
    fn test_custom_prefs_path() {
        let cli = Cli::parse_from(["scenelink", "--prefs", "/etc/scenelink.toml"]);
        assert_eq!(
            cli.prefs_path.as_deref(),
            Some(std::path::Path::new("/etc/scenelink.toml"))
        );
    }
}
