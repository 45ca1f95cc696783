use anyhow::Result;

use crate::vault::models::VaultDocument;

pub trait VaultCodec: Send + Sync {
    fn encode(&self, document: &VaultDocument) -> Result<Vec<u8>>;
    fn decode(&self, data: &[u8]) -> Result<VaultDocument>;
}

pub trait ByteStore: Send + Sync {
    fn read(&self) -> Result<Vec<u8>>;
    fn write(&self, bytes: &[u8]) -> Result<()>;
}

/// One key binding handed to the picker, e.g. (`-kb-custom-1`, `Ctrl+c`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub flag: String,
    pub keys: String,
}

/// What the picker process reported: its exit status and the index of the chosen row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerOutcome {
    pub status: i32,
    pub index: usize,
}

// External selector UI. Blocks until the user picks a row.
pub trait Picker {
    fn pick(&self, prompt: &str, rows: &[String], keymap: &[KeyBinding]) -> Result<PickerOutcome>;
}

pub trait ClipboardSink {
    fn copy(&self, text: &str) -> Result<()>;
}

pub trait NotificationSink {
    fn notify(&self, message: &str);
}

pub trait UrlOpener {
    fn open(&self, url: &str);
}
