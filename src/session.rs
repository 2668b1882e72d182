use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// The remote-session capability: open an interactive shell to an address
/// and block until it ends.
pub trait SessionLauncher {
    fn open(&self, address: &str) -> Result<()>;
}

/// Spawns the system `ssh` with the invoking terminal's streams attached
/// directly. No retries: a failed session is the operator's to re-run.
pub struct SshLauncher;

impl SessionLauncher for SshLauncher {
    fn open(&self, address: &str) -> Result<()> {
        let status = Command::new("ssh")
            .arg(address)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::Session(format!("failed to spawn ssh: {e}")))?;

        if !status.success() {
            return Err(Error::Session(match status.code() {
                Some(code) => format!("ssh exited with status {code}"),
                None => "ssh terminated by signal".to_string(),
            }));
        }

        Ok(())
    }
}
