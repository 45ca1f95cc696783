use crate::core::ports::ClipboardSink;
use anyhow::{anyhow, Context, Result};
use copypasta::{ClipboardContext, ClipboardProvider};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Mutex;
use tracing::debug;

const WL_COPY_ARGS: &[&str] = &[];
const XCLIP_ARGS: &[&str] = &["-selection", "clipboard"];
const XSEL_ARGS: &[&str] = &["--clipboard", "--input"];

/// In-process clipboard through copypasta. On X11 the content lives only as long as the
/// process, so command based clipboards are preferred when available.
pub struct SystemClipboardEngine {
    ctx: Mutex<ClipboardContext>,
}

impl SystemClipboardEngine {
    pub fn new() -> Result<Self> {
        let ctx =
            ClipboardContext::new().map_err(|e| anyhow!("Failed to access clipboard: {e}"))?;
        Ok(Self {
            ctx: Mutex::new(ctx),
        })
    }
}

impl ClipboardSink for SystemClipboardEngine {
    fn copy(&self, text: &str) -> Result<()> {
        let mut guard = self
            .ctx
            .lock()
            .map_err(|_| anyhow!("clipboard lock poisoned"))?;
        guard
            .set_contents(text.to_string())
            .map_err(|e| anyhow!("Failed to copy to clipboard: {e}"))
    }
}

/// Clipboard helper program fed through stdin (`wl-copy`, `xclip`, `xsel`).
pub struct CommandClipboard {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: PathBuf, args: &[&str]) -> Self {
        Self {
            program,
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// First helper found in PATH, preferring Wayland when a Wayland session is active.
    pub fn detect() -> Option<Self> {
        let wayland = std::env::var("WAYLAND_DISPLAY").is_ok();
        let mut candidates: Vec<(&str, &[&str])> = Vec::new();
        if wayland {
            candidates.push(("wl-copy", WL_COPY_ARGS));
        }
        candidates.push(("xclip", XCLIP_ARGS));
        candidates.push(("xsel", XSEL_ARGS));
        candidates.into_iter().find_map(|(name, args)| {
            which::which(name)
                .ok()
                .map(|program| CommandClipboard::new(program, args))
        })
    }
}

impl ClipboardSink for CommandClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        debug!(program = %self.program.display(), "copying through clipboard helper");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start {}", self.program.display()))?;
        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| anyhow!("clipboard helper has no stdin"))?;
            stdin.write_all(text.as_bytes())?;
        }
        let status = child.wait()?;
        if !status.success() {
            return Err(anyhow!(
                "{} exited with {status}",
                self.program.display()
            ));
        }
        Ok(())
    }
}

/// Best clipboard available on this host.
pub fn system_clipboard() -> Result<Box<dyn ClipboardSink>> {
    if let Some(cmd) = CommandClipboard::detect() {
        return Ok(Box::new(cmd));
    }
    Ok(Box::new(SystemClipboardEngine::new()?))
}

/// Best-effort environment warning when clipboard is likely unavailable (SSH/headless)
pub fn environment_warning() -> Option<String> {
    let is_ssh = std::env::var("SSH_CONNECTION").is_ok() || std::env::var("SSH_TTY").is_ok();
    #[cfg(all(target_family = "unix", not(target_os = "macos")))]
    let headless = std::env::var("DISPLAY").is_err() && std::env::var("WAYLAND_DISPLAY").is_err();
    #[cfg(any(not(target_family = "unix"), target_os = "macos"))]
    let headless = false;
    if is_ssh {
        return Some("Detected SSH session; clipboard may be unavailable.".to_string());
    }
    if headless {
        return Some("No DISPLAY/WAYLAND detected; clipboard may be unavailable.".to_string());
    }
    None
}
