use crate::core::credential::Credential;
use crate::core::defaults::Defaults;
use crate::core::error::VaultError;
use crate::core::otp::totp_at;
use crate::core::ports::{ClipboardSink, KeyBinding, NotificationSink, Picker, UrlOpener};
use crate::core::set::CredentialSet;
use crate::selection::action::{Action, CopyField, Direction};
use crate::selection::render::{render_rows, RowLayout};
use crate::vault::service::CredentialStore;
use anyhow::Result;
use tracing::debug;

const NONE_TEXT: &str = "None";

/// Whether the picker should be shown again after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Done,
    Refresh,
}

/// The external programs a picker round talks to.
pub struct Sinks<'a> {
    pub picker: &'a dyn Picker,
    pub clipboard: &'a dyn ClipboardSink,
    pub notifier: &'a dyn NotificationSink,
    pub opener: &'a dyn UrlOpener,
}

#[derive(Debug, Clone)]
pub struct PickerSettings {
    pub prompt: String,
    pub layout: RowLayout,
    pub keymap: Vec<KeyBinding>,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            prompt: "Select Credential".to_string(),
            layout: RowLayout::default(),
            keymap: crate::selection::keys::KeyBindings::default().keymap(),
        }
    }
}

fn system_clock() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

/// Drives picker rounds: render, await the selection, dispatch, and go again after structural
/// changes.
pub struct SelectionController<'a> {
    store: &'a CredentialStore,
    sinks: Sinks<'a>,
    settings: PickerSettings,
    overrides: Defaults,
    stored: Defaults,
    clock: fn() -> u64,
}

impl<'a> SelectionController<'a> {
    pub fn new(
        store: &'a CredentialStore,
        sinks: Sinks<'a>,
        settings: PickerSettings,
        overrides: Defaults,
    ) -> Self {
        Self {
            store,
            sinks,
            settings,
            overrides,
            stored: Defaults::default(),
            clock: system_clock,
        }
    }

    /// Replace the time source used for OTP codes.
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    /// Configured overrides first, then the defaults stored in the file.
    pub fn defaults(&self) -> Defaults {
        self.overrides.overlay(&self.stored)
    }

    /// Run rounds until an action ends the flow or the vault is empty.
    /// Returns the number of rounds shown.
    pub fn run(&mut self) -> Result<usize> {
        let mut rounds = 0;
        loop {
            self.stored = Defaults::default();
            let mut credentials = self.store.load(&mut self.stored)?;
            if credentials.is_empty() {
                debug!("no credentials to pick from");
                return Ok(rounds);
            }

            let rows = render_rows(&credentials, &self.settings.layout);
            let outcome =
                self.sinks
                    .picker
                    .pick(&self.settings.prompt, &rows, &self.settings.keymap)?;
            rounds += 1;

            let ordinal = credentials
                .sorted()
                .get(outcome.index)
                .map(|c| c.ordinal)
                .ok_or_else(|| VaultError::InvalidSelection(outcome.index.to_string()))?;
            let action = Action::from_status(outcome.status)?;
            debug!(
                status = outcome.status,
                ordinal,
                action = action.describe(),
                structural = action.is_structural(),
                "picker returned"
            );

            match self.dispatch(action, ordinal, &mut credentials)? {
                Flow::Refresh => continue,
                Flow::Done => return Ok(rounds),
            }
        }
    }

    /// Apply `action` to the credential with `ordinal`. Structural actions persist `credentials`
    /// before returning [`Flow::Refresh`]. A move with no neighbour to swap with ends the round.
    pub fn dispatch(
        &self,
        action: Action,
        ordinal: usize,
        credentials: &mut CredentialSet,
    ) -> Result<Flow> {
        match action {
            Action::Copy(field) => {
                let credential = credentials
                    .get(ordinal)
                    .ok_or(VaultError::UnknownOrdinal(ordinal))?;
                let value = self.copy_value(field, credential)?;
                self.copy_and_notify(value.as_deref())?;
                Ok(Flow::Done)
            }
            Action::Delete => {
                credentials
                    .remove(ordinal)
                    .ok_or(VaultError::UnknownOrdinal(ordinal))?;
                self.store.save(credentials, &self.stored)?;
                Ok(Flow::Refresh)
            }
            Action::Reorder(direction) => {
                let neighbour = match direction {
                    Direction::Up => ordinal.checked_sub(1),
                    Direction::Down => ordinal.checked_add(1),
                };
                let moved =
                    neighbour.is_some_and(|other| credentials.swap_ordinals(ordinal, other));
                if !moved {
                    debug!(ordinal, "nothing to swap with");
                    return Ok(Flow::Done);
                }
                self.store.save(credentials, &self.stored)?;
                Ok(Flow::Refresh)
            }
            Action::OpenUrl => {
                let credential = credentials
                    .get(ordinal)
                    .ok_or(VaultError::UnknownOrdinal(ordinal))?;
                if let Some(url) = credential.url.as_deref() {
                    self.sinks.opener.open(url);
                }
                Ok(Flow::Done)
            }
        }
    }

    fn copy_value(&self, field: CopyField, c: &Credential) -> Result<Option<String>> {
        let defaults = self.defaults();
        let value = match field {
            CopyField::Password => c.password_str().map(str::to_string),
            CopyField::Username => c.username.clone(),
            CopyField::Otp => match c.otp_str() {
                Some(secret) => Some(totp_at(secret, (self.clock)())?),
                None => None,
            },
            CopyField::Url => c.url.clone().or_else(|| defaults.url.clone()),
            CopyField::Domain => c.domain.clone().or_else(|| defaults.domain.clone()),
            CopyField::UserDomain => {
                let user = c.username.as_deref().unwrap_or(NONE_TEXT);
                Some(match c.domain.as_deref().or(defaults.domain.as_deref()) {
                    Some(domain) => format!("{domain}/{user}"),
                    None => user.to_string(),
                })
            }
        };
        Ok(value)
    }

    fn copy_and_notify(&self, value: Option<&str>) -> Result<()> {
        let text = value.unwrap_or(NONE_TEXT);
        self.sinks.clipboard.copy(text)?;
        self.sinks
            .notifier
            .notify(&format!("{text} copied to clipboard"));
        Ok(())
    }
}
