use anyhow::Result;
use serde_json::json;
use std::io::{BufRead, Write};

use crate::checker::{parse_hook_bytes, CheckOptions, Checker, Outcome};
use crate::config::Overrides;
use crate::syntax;

/// Per-line reply: `{"decision": "pass"|"skip"|"block", "message": ...}`.
pub fn reply_for(outcome: &Outcome) -> serde_json::Value {
    match outcome {
        Outcome::Skip(reason) => json!({ "decision": "skip", "message": reason.message() }),
        Outcome::Pass => json!({ "decision": "pass", "message": "" }),
        Outcome::Block { message, comments } => json!({
            "decision": "block",
            "message": message,
            "comments": comments,
        }),
    }
}

#[derive(Debug, Default)]
pub struct ServerState {
    overrides: Overrides,
}

impl ServerState {
    pub fn new(overrides: Overrides) -> Self {
        Self { overrides }
    }

    /// Config is resolved per request since each record may carry its own `cwd`.
    pub fn handle_line(&self, line: &[u8]) -> serde_json::Value {
        let outcome = match parse_hook_bytes(line) {
            Ok(input) => {
                let cfg = self.overrides.resolve(&input.cwd);
                Checker::new(CheckOptions::from(&cfg)).check_input(&input)
            }
            Err(reason) => Outcome::Skip(reason),
        };
        reply_for(&outcome)
    }
}

pub fn run_stdio_server(overrides: Overrides) -> Result<()> {
    let warmed = syntax::warm_up();
    debug_log!("[comment-checker] serve: {warmed} queries compiled");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let state = ServerState::new(overrides);

    // Split on raw bytes: a line that is not UTF-8 still gets its own reply.
    for line in stdin.lock().split(b'\n') {
        let line = line?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let reply = state.handle_line(&line);
        writeln!(stdout, "{}", reply)?;
        stdout.flush()?;
    }

    Ok(())
}
