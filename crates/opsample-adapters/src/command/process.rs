//! Subprocess runner built on `std::process`.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use opsample_core::{
    application::{ApplicationError, ExecutionContext, ports::CommandOutput, ports::CommandRunner},
    domain::CommandSpec,
    error::SampleResult,
};
use tracing::{debug, instrument, warn};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs commands as child processes and captures stdout and stderr.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    poll_interval: Duration,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// How often a timed command is checked for completion.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn wait_with_deadline(
        &self,
        child: &mut Child,
        limit: Duration,
        command: &CommandSpec,
    ) -> SampleResult<ExitStatus> {
        let started = Instant::now();
        loop {
            if let Some(status) = child
                .try_wait()
                .map_err(|e| ApplicationError::io(command.program(), "wait for process", e))?
            {
                return Ok(status);
            }

            if started.elapsed() >= limit {
                warn!(
                    command = %command,
                    seconds = limit.as_secs(),
                    "Command timed out, killing it"
                );
                if let Err(e) = child.kill() {
                    warn!(error = %e, "Could not kill timed out command");
                }
                let _ = child.wait();
                return Err(ApplicationError::Timeout {
                    command: command.to_string(),
                    seconds: limit.as_secs(),
                }
                .into());
            }

            thread::sleep(self.poll_interval);
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip_all, fields(command = %command, dir = %ctx.working_dir().display()))]
    fn run(&self, command: &CommandSpec, ctx: &ExecutionContext) -> SampleResult<CommandOutput> {
        let mut child = Command::new(command.program())
            .args(command.args())
            .current_dir(ctx.working_dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ApplicationError::io(command.program(), "spawn process", e))?;

        // Both pipes are drained concurrently so a chatty child never blocks.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = match ctx.timeout() {
            Some(limit) => self.wait_with_deadline(&mut child, limit, command)?,
            None => child
                .wait()
                .map_err(|e| ApplicationError::io(command.program(), "wait for process", e))?,
        };

        let mut combined = String::from_utf8_lossy(&collect(stdout)).into_owned();
        combined.push_str(&String::from_utf8_lossy(&collect(stderr)));

        debug!(status = ?status.code(), bytes = combined.len(), "Command finished");
        Ok(CommandOutput {
            status: status.code(),
            combined,
        })
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}
