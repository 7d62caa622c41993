// ABOUTME: Child process plumbing for gcloud invocations.
// ABOUTME: Captured queries for short calls, line streaming for long-running deploys.

use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::error::{Error, Result};

/// gcloud's environment equivalent of `--quiet`; without it gcloud may block on a prompt.
const DISABLE_PROMPTS_VAR: &str = "CLOUDSDK_CORE_DISABLE_PROMPTS";

/// Exit status and output of a streamed call.
#[derive(Debug, Clone, Default)]
pub struct CallOutput {
    /// Exit code, or `None` if the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl CallOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// All output lines, stdout first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.iter().chain(&self.stderr).map(String::as_str)
    }
}

fn command(program: &str, args: &[String]) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .env(DISABLE_PROMPTS_VAR, "1")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

fn spawn_error(program: &str) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Spawn {
        program: program.to_string(),
        source,
    }
}

/// Run a short query and return its stdout.
///
/// A non-zero exit becomes [`Error::CommandFailed`] carrying gcloud's stderr.
pub async fn query(program: &str, args: &[String]) -> Result<String> {
    tracing::debug!("Running {} {}", program, args.join(" "));

    let output = command(program, args)
        .output()
        .await
        .map_err(spawn_error(program))?;

    if !output.status.success() {
        return Err(Error::CommandFailed {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a long call, echoing each output line to stderr as it arrives when `echo` is set.
///
/// `display_args` is what gets logged, so secrets can be kept out of it.
pub async fn stream(
    program: &str,
    args: &[String],
    display_args: &[String],
    echo: bool,
) -> Result<CallOutput> {
    tracing::debug!("Running {} {}", program, display_args.join(" "));

    let mut child = command(program, args)
        .spawn()
        .map_err(spawn_error(program))?;

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return Err(Error::Io(std::io::Error::other("child output pipes unavailable")));
    };

    // Both pipes are drained together so a chatty stderr cannot stall the child.
    let (stdout, stderr, status) =
        tokio::try_join!(pump(stdout, echo), pump(stderr, echo), child.wait())?;

    tracing::debug!("{} exited with {}", program, status);

    Ok(CallOutput {
        code: status.code(),
        stdout,
        stderr,
    })
}

/// Read lines until EOF. Build steps may print bytes that are not UTF-8, so
/// lines are decoded lossily rather than failing the call.
async fn pump<R: AsyncRead + Unpin>(reader: R, echo: bool) -> std::io::Result<Vec<String>> {
    let mut lines = BufReader::new(reader).split(b'\n');
    let mut collected = Vec::new();
    while let Some(raw) = lines.next_segment().await? {
        let trimmed = raw.strip_suffix(b"\r").unwrap_or(&raw[..]);
        let line = String::from_utf8_lossy(trimmed).into_owned();
        if echo {
            eprintln!("{line}");
        }
        collected.push(line);
    }
    Ok(collected)
}
