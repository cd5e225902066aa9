use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

pub const LOCK_FILE_NAME: &str = ".sequin.lock";
const STALE_LOCK_TIMEOUT_SECS: u64 = 300; // 5 minutes

/// Guard preventing two sequin processes from renaming inside the same
/// directory at once
#[derive(Debug)]
pub struct LockFile {
    path: PathBuf,
    pid: u32,
    timestamp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

impl LockFile {
    /// Acquire the lock for `dir`, clearing stale or orphaned locks
    pub fn acquire(dir: &Path) -> Result<Self> {
        let lock_path = dir.join(LOCK_FILE_NAME);

        if lock_path.exists() {
            let content =
                fs::read_to_string(&lock_path).context("Failed to read lock file content")?;

            // Format: "pid:timestamp"
            match content.trim().split_once(':') {
                Some((pid, timestamp)) => {
                    let pid = pid.parse::<u32>().unwrap_or(0);
                    let timestamp = timestamp.parse::<u64>().unwrap_or(0);

                    if now_secs().saturating_sub(timestamp) > STALE_LOCK_TIMEOUT_SECS {
                        debug!("Removing stale lock {}", lock_path.display());
                        fs::remove_file(&lock_path).context("Failed to remove stale lock file")?;
                    } else if is_process_running(pid) {
                        return Err(anyhow!(
                            "Another sequin process is already running (PID: {}). \
                            If this is incorrect, remove the lock file at: {}",
                            pid,
                            lock_path.display()
                        ));
                    } else {
                        debug!("Removing orphaned lock {} (PID {})", lock_path.display(), pid);
                        fs::remove_file(&lock_path)
                            .context("Failed to remove orphaned lock file")?;
                    }
                },
                None => {
                    warn!("Replacing malformed lock file {}", lock_path.display());
                    fs::remove_file(&lock_path).context("Failed to remove malformed lock file")?;
                },
            }
        }

        let pid = process::id();
        let timestamp = now_secs();

        // create_new fails if another process won the race
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file {}", lock_path.display()))?;

        file.write_all(format!("{}:{}", pid, timestamp).as_bytes())
            .context("Failed to write lock file")?;

        Ok(Self {
            path: lock_path,
            pid,
            timestamp,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_ours(&self) -> bool {
        fs::read_to_string(&self.path)
            .is_ok_and(|content| content.trim() == format!("{}:{}", self.pid, self.timestamp))
    }

    /// Release the lock, leaving it alone if another process replaced it
    pub fn release(self) -> Result<()> {
        if self.is_ours() {
            fs::remove_file(&self.path).context("Failed to remove lock file")?;
        }
        Ok(())
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if self.is_ours() {
            let _ = fs::remove_file(&self.path);
        }
    }
}

#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    // Signal 0 only checks that the process exists
    #[allow(clippy::cast_possible_wrap)]
    unsafe {
        libc::kill(pid as libc::pid_t, 0) == 0
    }
}

#[cfg(windows)]
fn is_process_running(pid: u32) -> bool {
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::OpenProcess;
    use winapi::um::winnt::PROCESS_QUERY_INFORMATION;

    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_INFORMATION, 0, pid);
        if handle.is_null() {
            false
        } else {
            CloseHandle(handle);
            true
        }
    }
}

#[cfg(not(any(unix, windows)))]
fn is_process_running(_pid: u32) -> bool {
    false
}
