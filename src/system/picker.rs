use crate::core::error::VaultError;
use crate::core::ports::{KeyBinding, Picker, PickerOutcome};
use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, error};

/// rofi in dmenu mode, reporting the chosen row as an index (`-format i`).
pub struct RofiPicker {
    program: PathBuf,
}

impl RofiPicker {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }
}

impl Picker for RofiPicker {
    fn pick(&self, prompt: &str, rows: &[String], keymap: &[KeyBinding]) -> Result<PickerOutcome> {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-dmenu", "-format", "i", "-p", prompt]);
        for binding in keymap {
            cmd.arg(&binding.flag).arg(&binding.keys);
        }
        debug!(program = %self.program.display(), rows = rows.len(), "starting picker");

        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .inspect_err(|e| error!(err = %e, "Failed to start picker"))
            .with_context(|| format!("Failed to start {}", self.program.display()))?;
        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| anyhow!("picker has no stdin"))?;
            let mut input = rows.join("\n");
            input.push('\n');
            stdin.write_all(input.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        let status = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_outcome(status, &stdout)?)
    }
}

/// Interpret what rofi printed. An empty answer with exit status 1 means the user dismissed the
/// picker.
pub fn parse_outcome(status: i32, stdout: &str) -> Result<PickerOutcome, VaultError> {
    let answer = stdout.trim();
    if answer.is_empty() && status == 1 {
        return Err(VaultError::Cancelled);
    }
    let index = answer
        .parse::<usize>()
        .map_err(|_| VaultError::InvalidSelection(answer.to_string()))?;
    Ok(PickerOutcome { status, index })
}
