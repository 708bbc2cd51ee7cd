use super::{HostOs, Runner};
use crate::{Error, Result};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

const LOGIN_SHELL_ARGS: &[&str] = &["-l", "-c"];
const SHELL_ARGS: &[&str] = &["-c"];

/// Runs commands through the platform shell.
///
/// The child is detached from the launcher: its own process group, no
/// inherited stdio, and it outlives the session. A background task reaps it.
#[derive(Debug, Clone, Copy)]
pub struct ShellRunner {
    os: HostOs,
}

impl ShellRunner {
    #[must_use]
    pub fn new(os: HostOs) -> Self {
        Self { os }
    }

    /// Shell program and the arguments preceding the command string
    #[must_use]
    pub fn shell(self) -> (&'static str, &'static [&'static str]) {
        match self.os {
            // Login shell so apps see the user's PATH, not launchd's
            HostOs::MacOs => ("/bin/zsh", LOGIN_SHELL_ARGS),
            HostOs::Linux => ("/bin/sh", SHELL_ARGS),
        }
    }
}

impl Runner for ShellRunner {
    fn execute(&self, command: &str) -> Result<()> {
        if command.trim().is_empty() {
            return Err(Error::LaunchFailed("empty command".to_string()));
        }
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(Error::LaunchFailed(
                "no async runtime to supervise the launch".to_string(),
            ));
        }

        let (program, args) = self.shell();
        let mut cmd = Command::new(program);
        cmd.args(args)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false);
        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = cmd
            .spawn()
            .map_err(|e| Error::LaunchFailed(format!("{program}: {e}")))?;

        info!(
            "Launched {:?} via {} (pid {:?})",
            command,
            self.os.as_str(),
            child.id()
        );

        let command = command.to_string();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => debug!("{:?} exited with {}", command, status),
                Err(e) => warn!("Failed to wait for {:?}: {}", command, e),
            }
        });

        Ok(())
    }
}
