//! Best-effort process and user names for connecting peers.
//!
//! Used when the daemon records who touched a resource. None of these
//! lookups fail: when the OS cannot answer, the numeric id stands in.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

#[cfg(target_os = "linux")]
use crate::constants::PROC_ROOT;

/// Name of the process `pid`, or `pid` as a string when unavailable.
pub fn process_name_by_pid(pid: u32) -> String {
    #[cfg(target_os = "linux")]
    {
        process_name_by_pid_in(Path::new(PROC_ROOT), pid)
    }
    #[cfg(not(target_os = "linux"))]
    {
        pid.to_string()
    }
}

/// Like [`process_name_by_pid`], reading `<proc_root>/<pid>/status`.
pub fn process_name_by_pid_in(proc_root: &Path, pid: u32) -> String {
    match read_status_name(proc_root, pid) {
        Ok(name) => name,
        Err(e) => {
            debug!(pid, error = %e, "process name unavailable, using pid");
            pid.to_string()
        }
    }
}

/// The first line of a status record is `Name:\t<comm>`.
fn read_status_name(proc_root: &Path, pid: u32) -> io::Result<String> {
    let status = File::open(proc_root.join(pid.to_string()).join("status"))?;
    let mut raw = Vec::new();
    BufReader::new(status).read_until(b'\n', &mut raw)?;
    // comm is raw bytes; the kernel does not promise UTF-8.
    let line = String::from_utf8_lossy(&raw);

    let name = line
        .split_once(':')
        .map(|(_, value)| value)
        .unwrap_or(&*line)
        .trim();
    if name.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "status record has no name",
        ));
    }
    Ok(name.to_string())
}

/// Login name for `uid`, or `uid` as a string when unavailable.
#[cfg(unix)]
pub fn user_name_by_uid(uid: u32) -> String {
    use nix::unistd::{Uid, User};

    match User::from_uid(Uid::from_raw(uid)) {
        Ok(Some(user)) => user.name,
        Ok(None) => {
            debug!(uid, "no passwd entry, using uid");
            uid.to_string()
        }
        Err(e) => {
            debug!(uid, error = %e, "passwd lookup failed, using uid");
            uid.to_string()
        }
    }
}

/// Login name for `uid`. No user database here, so always the number.
#[cfg(not(unix))]
pub fn user_name_by_uid(uid: u32) -> String {
    uid.to_string()
}

/// Who is on the other end of a connection, for audit logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeerIdentity {
    pub pid: u32,
    pub uid: u32,
    pub process: String,
    pub user: String,
}

impl PeerIdentity {
    /// Look up both names for a peer.
    pub fn lookup(pid: u32, uid: u32) -> Self {
        Self {
            pid,
            uid,
            process: process_name_by_pid(pid),
            user: user_name_by_uid(uid),
        }
    }
}

impl fmt::Display for PeerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] as {}({})",
            self.process, self.pid, self.user, self.uid
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
