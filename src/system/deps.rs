use crate::core::error::VaultError;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const NOTIFIER: &str = "notify-send";
pub const OPENER: &str = "xdg-open";

/// External programs resolved from PATH. Only the picker is mandatory.
#[derive(Debug, Clone)]
pub struct Capabilities {
    pub picker: PathBuf,
    pub notifier: Option<PathBuf>,
    pub opener: Option<PathBuf>,
}

pub fn check_dependencies(picker: &str) -> Result<Capabilities, VaultError> {
    let picker_path =
        which::which(picker).map_err(|_| VaultError::DependencyMissing(picker.to_string()))?;
    debug!(picker = %picker_path.display(), "picker resolved");

    let notifier = optional(NOTIFIER);
    let opener = optional(OPENER);
    Ok(Capabilities {
        picker: picker_path,
        notifier,
        opener,
    })
}

fn optional(name: &str) -> Option<PathBuf> {
    match which::which(name) {
        Ok(path) => Some(path),
        Err(_) => {
            warn!(program = name, "optional helper not found; feature disabled");
            None
        }
    }
}
