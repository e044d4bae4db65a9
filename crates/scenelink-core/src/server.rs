//! Local sync-server subprocess handle
//!
//! The addon can launch a local server for the session; this wraps the
//! child process so the lifecycle controller can check on it and kill
//! it during cleanup. Kill failures surface as `io::Error` — the
//! caller decides whether termination is best-effort.

use std::io;
use std::process::{Child, Command, Stdio};

/// Handle to the local sync-server subprocess
pub struct ServerProcess {
    child: Child,
    port: u16,
}

impl ServerProcess {
    /// Spawn the server program, passing the port to listen on
    pub fn spawn(program: &str, args: &[String], port: u16) -> io::Result<Self> {
        let child = Command::new(program)
            .args(args)
            .arg("--port")
            .arg(port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        log::info!("launched local server pid {} on port {}", child.id(), port);

        Ok(Self { child, port })
    }

    /// Wrap an already-spawned child
    pub fn from_child(child: Child, port: u16) -> Self {
        Self { child, port }
    }

    /// Port the server was asked to listen on
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Process id of the server
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Whether the server is still running
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Forcibly terminate the server and reap it
    pub fn kill(&mut self) -> io::Result<()> {
        self.child.kill()?;
        let _ = self.child.wait();
        log::info!("killed local server pid {}", self.child.id());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_sleeper() -> Child {
        Command::new("sleep")
            .arg("30")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .unwrap()
    }

    #[test]
    fn test_kill_running_server() {
        let mut server = ServerProcess::from_child(spawn_sleeper(), 12800);
        assert!(server.is_running());
        server.kill().unwrap();
        assert!(!server.is_running());
    }

    #[test]
    fn test_kill_reaped_server_fails() {
        let mut child = Command::new("true")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();
        child.wait().unwrap();

        let mut server = ServerProcess::from_child(child, 12800);
        assert!(server.kill().is_err());
    }

    #[test]
    fn test_port_is_kept() {
        let mut server = ServerProcess::from_child(spawn_sleeper(), 12850);
        assert_eq!(server.port(), 12850);
        let _ = server.kill();
    }
}
