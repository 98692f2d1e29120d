//! External process execution behind a trait, so backends never spawn
//! processes directly.

use std::process::{Command, Stdio};

use tracing::debug;

/// Exit status and trimmed output of one external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `-1` when the process could not be started or was killed.
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool { self.code == 0 }

    pub fn ok<S: Into<String>>(stdout: S) -> Self {
        CommandOutput { code: 0, stdout: stdout.into(), stderr: String::new() }
    }

    pub fn failed<S: Into<String>>(code: i32, stderr: S) -> Self {
        CommandOutput { code, stdout: String::new(), stderr: stderr.into() }
    }

    /// Standard error when non-empty, otherwise `fallback`.
    pub fn stderr_or(&self, fallback: &str) -> String {
        if self.stderr.is_empty() { fallback.to_string() } else { self.stderr.clone() }
    }

    /// Standard error when non-empty, otherwise standard output.
    pub fn stderr_or_stdout(&self) -> String {
        if self.stderr.is_empty() { self.stdout.clone() } else { self.stderr.clone() }
    }
}

/// Runs a program with an argument vector and waits for it to exit.
/// Implementations block the calling thread; there is no timeout.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[&str]) -> CommandOutput;
}

/// Spawns real processes with `std::process::Command`. No shell is involved,
/// so arguments are passed through verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> CommandOutput {
        debug!(target: "net_gateway", command = %redacted(program, args), "exec");
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output();
        match output {
            Ok(out) => CommandOutput {
                code: out.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&out.stdout).trim().to_string(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            },
            Err(e) => CommandOutput::failed(-1, format!("{}: {}", program, e)),
        }
    }
}

/// Command line for logs with passwords masked: the value after a `password`
/// argument, and the trailing positional password of `-setairportnetwork`.
pub fn redacted(program: &str, args: &[&str]) -> String {
    let mut parts = vec![program.to_string()];
    let mut mask_next = false;
    let airport_join = args.first().is_some_and(|a| *a == "-setairportnetwork");
    for (i, a) in args.iter().enumerate() {
        if mask_next || (airport_join && i >= 3) {
            parts.push("******".to_string());
            mask_next = false;
            continue;
        }
        mask_next = a.eq_ignore_ascii_case("password");
        parts.push(a.to_string());
    }
    parts.join(" ")
}
