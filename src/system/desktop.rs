use crate::core::ports::{NotificationSink, UrlOpener};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::warn;

/// Desktop notifications via `notify-send`. Without the helper every call is a no-op.
pub struct NotifySend {
    program: Option<PathBuf>,
    timeout_ms: u32,
}

impl NotifySend {
    pub fn new(program: Option<PathBuf>) -> Self {
        Self {
            program,
            timeout_ms: 1500,
        }
    }

    pub fn disabled() -> Self {
        Self::new(None)
    }
}

impl NotificationSink for NotifySend {
    fn notify(&self, message: &str) {
        let Some(program) = &self.program else {
            return;
        };
        let timeout = self.timeout_ms.to_string();
        let result = Command::new(program)
            .args(["-t", timeout.as_str(), message])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        if let Err(e) = result {
            warn!(err = %e, "notification failed");
        }
    }
}

/// Opens urls with the desktop default handler (`xdg-open`). No-op without the helper.
pub struct XdgOpen {
    program: Option<PathBuf>,
}

impl XdgOpen {
    pub fn new(program: Option<PathBuf>) -> Self {
        Self { program }
    }

    pub fn disabled() -> Self {
        Self::new(None)
    }
}

impl UrlOpener for XdgOpen {
    fn open(&self, url: &str) {
        let Some(program) = &self.program else {
            return;
        };
        let result = Command::new(program)
            .arg(url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        if let Err(e) = result {
            warn!(err = %e, url, "opening url failed");
        }
    }
}
