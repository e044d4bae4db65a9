//! Crash-signal diagnostics
//!
//! Best-effort fault reporting for low-level crashes: on SIGSEGV and
//! friends a minimal report (signal number, pid) is written to a
//! pre-opened file descriptor, then the signal is re-raised with its
//! default disposition. Only async-signal-safe calls are made from the
//! handler.
//!
//! The handler is process-wide state by nature, so enable/disable are
//! guarded by an atomic flag rather than a lock. `enable` reports
//! whether this call turned the handler on, which lets the lifecycle
//! controller disable only what it enabled.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use directories::ProjectDirs;

static ENABLED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
static REPORT_FD: std::sync::atomic::AtomicI32 = std::sync::atomic::AtomicI32::new(-1);

#[cfg(unix)]
const FAULT_SIGNALS: [libc::c_int; 5] = [
    libc::SIGSEGV,
    libc::SIGBUS,
    libc::SIGILL,
    libc::SIGFPE,
    libc::SIGABRT,
];

/// Whether the fault handler is currently enabled
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::SeqCst)
}

/// Default per-user fault report path
pub fn report_file() -> PathBuf {
    ProjectDirs::from("com", "scenelink", "scenelink")
        .map(|dirs| dirs.cache_dir().join("fault.log"))
        .unwrap_or_else(|| std::env::temp_dir().join("scenelink-fault.log"))
}

/// Enable the fault handler, unless already enabled.
///
/// Returns `Ok(true)` when this call enabled it, `Ok(false)` when it
/// was already on.
#[cfg(unix)]
pub fn enable(report_path: &Path) -> io::Result<bool> {
    if ENABLED.swap(true, Ordering::SeqCst) {
        return Ok(false);
    }

    match open_report(report_path) {
        Ok(fd) => {
            REPORT_FD.store(fd, Ordering::SeqCst);
            install_handlers();
            Ok(true)
        }
        Err(err) => {
            ENABLED.store(false, Ordering::SeqCst);
            Err(err)
        }
    }
}

/// Disable the fault handler and restore default dispositions.
///
/// No-op when not enabled.
#[cfg(unix)]
pub fn disable() {
    if !ENABLED.swap(false, Ordering::SeqCst) {
        return;
    }

    unsafe {
        for sig in FAULT_SIGNALS {
            libc::signal(sig, libc::SIG_DFL);
        }
    }

    let fd = REPORT_FD.swap(-1, Ordering::SeqCst);
    if fd >= 0 {
        unsafe {
            libc::close(fd);
        }
    }
}

#[cfg(unix)]
fn open_report(path: &Path) -> io::Result<i32> {
    use std::os::unix::fs::OpenOptionsExt;
    use std::os::unix::io::IntoRawFd;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Report may leak session details, keep it private
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600)
        .open(path)?;
    Ok(file.into_raw_fd())
}

#[cfg(unix)]
fn install_handlers() {
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = on_fault as extern "C" fn(libc::c_int) as libc::sighandler_t;
        action.sa_flags = 0;
        libc::sigemptyset(&mut action.sa_mask);
        for sig in FAULT_SIGNALS {
            libc::sigaction(sig, &action, std::ptr::null_mut());
        }
    }
}

#[cfg(unix)]
extern "C" fn on_fault(sig: libc::c_int) {
    let fd = REPORT_FD.load(Ordering::Relaxed);
    if fd >= 0 {
        let mut buf = [0u8; 48];
        let len = render_report(&mut buf, sig as u32, std::process::id());
        unsafe {
            libc::write(fd, buf.as_ptr().cast(), len);
        }
    }

    unsafe {
        libc::signal(sig, libc::SIG_DFL);
        libc::raise(sig);
    }
}

/// Render "fault signal <sig> pid <pid>\n" without allocating
#[cfg(unix)]
fn render_report(buf: &mut [u8; 48], sig: u32, pid: u32) -> usize {
    let mut pos = put_bytes(buf, 0, b"fault signal ");
    pos = put_decimal(buf, pos, sig);
    pos = put_bytes(buf, pos, b" pid ");
    pos = put_decimal(buf, pos, pid);
    put_bytes(buf, pos, b"\n")
}

#[cfg(unix)]
fn put_bytes(buf: &mut [u8], pos: usize, bytes: &[u8]) -> usize {
    let end = (pos + bytes.len()).min(buf.len());
    buf[pos..end].copy_from_slice(&bytes[..end - pos]);
    end
}

#[cfg(unix)]
fn put_decimal(buf: &mut [u8], pos: usize, mut value: u32) -> usize {
    let mut digits = [0u8; 10];
    let mut count = 0;
    loop {
        digits[count] = b'0' + (value % 10) as u8;
        value /= 10;
        count += 1;
        if value == 0 {
            break;
        }
    }
    let mut pos = pos;
    while count > 0 && pos < buf.len() {
        count -= 1;
        buf[pos] = digits[count];
        pos += 1;
    }
    pos
}

#[cfg(not(unix))]
pub fn enable(_report_path: &Path) -> io::Result<bool> {
    Ok(!ENABLED.swap(true, Ordering::SeqCst))
}

#[cfg(not(unix))]
pub fn disable() {
    ENABLED.store(false, Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_disable_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fault.log");

        assert!(!is_enabled());
        assert!(enable(&path).unwrap(), "first enable should take ownership");
        assert!(is_enabled());

        // Second enable is a no-op and does not claim ownership
        assert!(!enable(&path).unwrap());
        assert!(is_enabled());

        disable();
        assert!(!is_enabled());

        // Disable when already off is harmless
        disable();
        assert!(!is_enabled());
    }

    #[cfg(unix)]
    #[test]
    fn test_render_report() {
        let mut buf = [0u8; 48];
        let len = render_report(&mut buf, 11, 4321);
        assert_eq!(&buf[..len], b"fault signal 11 pid 4321\n");
    }
}
