//! Recording stand-in for [`CommandRunner`], used by the backend and HTTP
//! suites to observe which commands a route would run.

use std::collections::VecDeque;

use parking_lot::Mutex;

use super::command::{CommandOutput, CommandRunner};

/// Replays canned outputs in order and records every invocation instead of
/// spawning anything. Once the script runs out it answers with empty success.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Mutex<VecDeque<CommandOutput>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new<I: IntoIterator<Item = CommandOutput>>(responses: I) -> Self {
        ScriptedRunner { responses: Mutex::new(responses.into_iter().collect()), calls: Mutex::new(Vec::new()) }
    }

    /// Program followed by its arguments, one entry per invocation.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&str]) -> CommandOutput {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().map(|a| a.to_string()));
        self.calls.lock().push(call);
        self.responses.lock().pop_front().unwrap_or_else(|| CommandOutput::ok(""))
    }
}
