use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use malt_core::error::RunnerError;
use malt_core::ops::BrewRunner;
use malt_core::runner::{CommandOutcome, CommandStream, OutputLine, OutputStream};

/// One canned command: the lines it "writes" and its exit code.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub lines: Vec<OutputLine>,
    pub exit_code: i32,
}

impl Script {
    pub fn new(exit_code: i32) -> Self {
        Self {
            lines: Vec::new(),
            exit_code,
        }
    }

    pub fn stdout(mut self, text: &str) -> Self {
        self.lines.push(OutputLine {
            stream: OutputStream::Stdout,
            text: text.to_string(),
        });
        self
    }

    pub fn stderr(mut self, text: &str) -> Self {
        self.lines.push(OutputLine {
            stream: OutputStream::Stderr,
            text: text.to_string(),
        });
        self
    }
}

/// Scripted stand-in for the process runner: maps the first argument (the
/// brew verb) to a canned output stream. Unknown verbs fail to "spawn",
/// which is how tests simulate a launch failure mid-sequence.
pub struct ScriptedRunner {
    scripts: Mutex<HashMap<String, Script>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
        }
    }

    pub fn script(self, key: &str, script: Script) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(key.to_string(), script);
        self
    }
}

#[async_trait]
impl BrewRunner for ScriptedRunner {
    async fn start(&self, args: &[&str]) -> Result<Box<dyn CommandStream>, RunnerError> {
        let key = args.join(" ");
        let script = self
            .scripts
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| RunnerError::Spawn(format!("no script for `{key}`")))?;

        Ok(Box::new(ScriptedStream {
            lines: script.lines.into_iter().collect(),
            exit_code: script.exit_code,
        }))
    }
}

pub struct ScriptedStream {
    lines: VecDeque<OutputLine>,
    exit_code: i32,
}

#[async_trait]
impl CommandStream for ScriptedStream {
    async fn next_line(&mut self) -> Option<OutputLine> {
        self.lines.pop_front()
    }

    async fn wait(&mut self) -> Result<CommandOutcome, RunnerError> {
        Ok(CommandOutcome {
            exit_code: self.exit_code,
            duration_ms: 1,
            stdout_tail: Vec::new(),
            stderr_tail: Vec::new(),
            cancelled: None,
        })
    }
}
