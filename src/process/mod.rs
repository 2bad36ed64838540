//! Engine process management: captured batch runs and detached GUI launches.

use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

/// What a finished batch process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Starts engine processes from a complete argv (`argv[0]` is the program).
#[async_trait]
pub trait Launcher: Send + Sync {
    /// Run to completion, capturing stdout and stderr in full.
    async fn run_captured(&self, argv: &[String]) -> io::Result<CapturedOutput>;

    /// Start and return immediately; the process is not tracked afterwards.
    async fn spawn_detached(&self, argv: &[String]) -> io::Result<()>;
}

/// Launcher backed by real OS processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

fn command_for(argv: &[String]) -> io::Result<Command> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command line"))?;
    let mut cmd = Command::new(program);
    cmd.args(args).stdin(Stdio::null());
    Ok(cmd)
}

#[async_trait]
impl Launcher for SystemLauncher {
    async fn run_captured(&self, argv: &[String]) -> io::Result<CapturedOutput> {
        let mut cmd = command_for(argv)?;
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let child = cmd.spawn()?;
        debug!(pid = ?child.id(), "engine started");
        let out = child.wait_with_output().await?;

        Ok(CapturedOutput {
            code: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }

    async fn spawn_detached(&self, argv: &[String]) -> io::Result<()> {
        let mut cmd = command_for(argv)?;
        cmd.stdout(Stdio::null()).stderr(Stdio::null());

        // Dropping the handle leaves the process running; tokio reaps it on exit.
        let child = cmd.spawn()?;
        info!(pid = ?child.id(), "engine detached");
        Ok(())
    }
}
