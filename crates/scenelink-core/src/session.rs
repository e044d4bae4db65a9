//! Session state
//!
//! The session object shared between the addon and the host. The host
//! owns the single instance and threads it through the lifecycle calls;
//! nothing here is a process-wide singleton.

use std::path::PathBuf;

use crate::server::ServerProcess;
use crate::stats::Statistics;

/// Current collaborative-editing session state
pub struct Session {
    /// User name, used for statistics file naming
    pub user: String,
    /// Room joined for this session, if any
    pub room: Option<String>,
    /// Statistics for the current session, if collection has started
    pub current_statistics: Option<Statistics>,
    /// Whether statistics are persisted automatically during cleanup
    pub auto_save_statistics: bool,
    /// Directory statistics files are written to
    pub statistics_directory: PathBuf,
    /// Handle to the local sync-server subprocess, if one was launched
    pub local_server: Option<ServerProcess>,
}

impl Session {
    /// Create a session for a user with a statistics directory
    pub fn new(user: impl Into<String>, statistics_directory: impl Into<PathBuf>) -> Self {
        Self {
            user: user.into(),
            room: None,
            current_statistics: None,
            auto_save_statistics: true,
            statistics_directory: statistics_directory.into(),
            local_server: None,
        }
    }

    /// Begin collecting statistics for a room
    pub fn begin_statistics(&mut self, room: impl Into<String>) {
        let room = room.into();
        self.current_statistics = Some(Statistics::start(&self.user, Some(room.clone())));
        self.room = Some(room);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_no_statistics() {
        let session = Session::new("alice", "/tmp/stats");
        assert!(session.current_statistics.is_none());
        assert!(session.local_server.is_none());
        assert!(session.auto_save_statistics);
    }

    #[test]
    fn test_begin_statistics_tags_user_and_room() {
        let mut session = Session::new("alice", "/tmp/stats");
        session.begin_statistics("studio");

        let stats = session.current_statistics.as_ref().unwrap();
        assert_eq!(stats.user, "alice");
        assert_eq!(stats.room.as_deref(), Some("studio"));
        assert_eq!(session.room.as_deref(), Some("studio"));
    }
}
