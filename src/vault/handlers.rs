use crate::config::app_config::Config;
use crate::core::credential::{Credential, CredentialFields};
use crate::core::defaults::Defaults;
use crate::core::error::VaultError;
use crate::core::otp::decode_secret;
use crate::core::ports::{ByteStore, VaultCodec};
use crate::core::set::CredentialSet;
use crate::filesystem::clipboard::{environment_warning, system_clipboard};
use crate::filesystem::store::FileByteStore;
use crate::selection::controller::{PickerSettings, SelectionController, Sinks};
use crate::system::deps::check_dependencies;
use crate::system::desktop::{NotifySend, XdgOpen};
use crate::system::picker::RofiPicker;
use crate::vault::codec::YamlCodec;
use crate::vault::service::CredentialStore;
use crate::vault::transfer::{self, ExportOptions};
use anyhow::{Context, Result};
use inquire::{Confirm, Password, Text};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExportField {
    Usernames,
    Passwords,
    Domains,
    Urls,
    UserDomain,
    UserPass,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImportField {
    Usernames,
    Passwords,
    UserPass,
}

pub struct Vault<'a> {
    config: &'a Config,
    store: CredentialStore,
}

impl<'a> Vault<'a> {
    pub fn create(config: &'a Config) -> Self {
        // Compose default adapters
        let bytes: Arc<dyn ByteStore> = Arc::new(FileByteStore::new_with_backups(
            config.credential_file.clone(),
            config.backups,
        ));
        let codec: Arc<dyn VaultCodec> = Arc::new(YamlCodec);
        let store = CredentialStore::new(bytes, codec);

        Vault { config, store }
    }

    /// The set plus the defaults stored in the file, without config overrides.
    fn load(&self) -> Result<(CredentialSet, Defaults)> {
        let mut stored = Defaults::default();
        let set = self.store.load(&mut stored)?;
        Ok((set, stored))
    }

    pub fn handle_pick(&self) -> Result<()> {
        let caps = check_dependencies(&self.config.picker)?;
        if let Some(warn) = environment_warning() {
            eprintln!("⚠️ {warn}");
        }

        let picker = RofiPicker::new(caps.picker);
        let clipboard = system_clipboard()?;
        let notifier = NotifySend::new(caps.notifier);
        let opener = XdgOpen::new(caps.opener);
        let sinks = Sinks {
            picker: &picker,
            clipboard: clipboard.as_ref(),
            notifier: &notifier,
            opener: &opener,
        };
        let settings = PickerSettings {
            prompt: self.config.prompt.clone(),
            layout: self.config.layout,
            keymap: self.config.keys.keymap(),
        };

        let mut controller =
            SelectionController::new(&self.store, sinks, settings, self.config.defaults.clone());
        let rounds = controller.run()?;
        if rounds == 0 {
            println!("(empty)");
        }
        debug!(rounds, "picker finished");
        Ok(())
    }

    pub fn handle_export(
        &self,
        field: ExportField,
        opts: &ExportOptions,
        json_mode: bool,
    ) -> Result<()> {
        let (set, stored) = self.load()?;
        let defaults = self.config.defaults.overlay(&stored);
        let lines = match field {
            ExportField::Usernames => transfer::export_usernames(&set),
            ExportField::Passwords => transfer::export_passwords(&set),
            ExportField::Domains => transfer::export_domains(&set, &defaults),
            ExportField::Urls => transfer::export_urls(&set, &defaults),
            ExportField::UserDomain => transfer::export_user_domain(&set, &defaults),
            ExportField::UserPass => transfer::export_user_pass(&set, &defaults, opts),
        };

        if json_mode {
            println!("{}", serde_json::to_string_pretty(&lines)?);
            return Ok(());
        }
        for line in lines {
            println!("{line}");
        }
        Ok(())
    }

    pub fn handle_import(
        &self,
        field: ImportField,
        input: &Path,
        separator: &str,
        domain_split: bool,
    ) -> Result<()> {
        let text = fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        let lines = text.lines().filter(|l| !l.trim().is_empty());
        let imported = match field {
            ImportField::Usernames => transfer::import_usernames(lines, domain_split),
            ImportField::Passwords => transfer::import_passwords(lines),
            ImportField::UserPass => transfer::import_userpass(lines, separator, domain_split),
        };

        let candidates = imported.len();
        let added = self.store.merge_into(imported)?;
        println!(
            "✅ Imported {added} credential(s), {} already present.",
            candidates - added
        );
        Ok(())
    }

    pub fn handle_add(&self, fields: CredentialFields) -> Result<()> {
        let (mut set, stored) = self.load()?;

        // Use provided flags or prompt for every field
        let fields = if fields.is_empty() {
            prompt_fields()?
        } else {
            fields
        };
        if fields.is_empty() {
            println!("❌ Nothing to save.");
            return Ok(());
        }
        validate_otp(&fields)?;

        if !set.insert(Credential::new(fields, 0, None)) {
            println!("❌ Credential already exists.");
            return Ok(());
        }
        self.store.save(&set, &stored)?;
        println!("✅ Credential saved.");
        Ok(())
    }

    pub fn handle_edit(&self, ordinal: usize, fields: CredentialFields) -> Result<()> {
        let (mut set, stored) = self.load()?;
        validate_otp(&fields)?;
        let credential = set
            .get_mut(ordinal)
            .ok_or(VaultError::UnknownOrdinal(ordinal))?;
        credential.update(&fields);
        self.store.save(&set, &stored)?;
        println!("✅ Credential {ordinal} updated.");
        Ok(())
    }

    pub fn handle_clone(&self, ordinal: usize, fields: CredentialFields) -> Result<()> {
        let (mut set, stored) = self.load()?;
        validate_otp(&fields)?;
        let copy = set
            .get(ordinal)
            .ok_or(VaultError::UnknownOrdinal(ordinal))?
            .clone_with(&fields);
        if !set.insert(copy) {
            println!("❌ An identical credential already exists.");
            return Ok(());
        }
        self.store.save(&set, &stored)?;
        println!("✅ Credential {ordinal} cloned.");
        Ok(())
    }

    pub fn handle_clean(&self, yes: bool) -> Result<()> {
        let (set, stored) = self.load()?;
        let kept = set.without_imports();
        let removed = set.len() - kept.len();
        if removed == 0 {
            println!("(no imported credentials)");
            return Ok(());
        }

        if !yes {
            let msg = format!("Remove {removed} imported credential(s)?");
            let proceed = Confirm::new(&msg).with_default(false).prompt()?;
            if !proceed {
                println!("❎ Clean cancelled.");
                return Ok(());
            }
        }

        self.store.save(&kept, &stored)?;
        println!("🗑️ Removed {removed} imported credential(s).");
        Ok(())
    }

    pub fn handle_defaults(
        &self,
        url: Option<String>,
        domain: Option<String>,
        clear: bool,
    ) -> Result<()> {
        // Config overrides are reported separately
        let (set, mut stored) = self.load()?;

        if clear {
            self.store.save(&set, &Defaults::default())?;
            println!("✅ Defaults cleared.");
            return Ok(());
        }
        if url.is_some() || domain.is_some() {
            let mut updated = Defaults::new(url, domain);
            updated.merge_missing(stored.url, stored.domain);
            self.store.save(&set, &updated)?;
            println!("✅ Defaults saved.");
            stored = updated;
        }

        let show = |v: Option<&str>| v.unwrap_or("(none)").to_string();
        println!("default url:    {}", show(stored.url.as_deref()));
        println!("default domain: {}", show(stored.domain.as_deref()));
        let overrides = &self.config.defaults;
        if overrides.url.is_some() || overrides.domain.is_some() {
            println!(
                "config overrides: url={} domain={}",
                show(overrides.url.as_deref()),
                show(overrides.domain.as_deref())
            );
        }
        Ok(())
    }

    pub fn handle_keys(&self) -> Result<()> {
        print!("{}", self.config.keys.help_text());
        Ok(())
    }
}

fn prompt_fields() -> Result<CredentialFields> {
    let optional = |label: &str| -> Result<Option<String>> {
        let value = Text::new(label).with_default("").prompt()?;
        Ok(Some(value).filter(|v| !v.is_empty()))
    };
    let username = optional("Username (optional)")?;
    let password = Password::new("Password (optional)")
        .without_confirmation()
        .prompt()?;
    Ok(CredentialFields {
        username,
        password: Some(password).filter(|p| !p.is_empty()),
        otp_secret: optional("OTP secret, base32 (optional)")?,
        url: optional("URL (optional)")?,
        domain: optional("Domain (optional)")?,
        note: optional("Note (optional)")?,
        alias: optional("Alias (optional)")?,
    })
}

fn validate_otp(fields: &CredentialFields) -> Result<(), VaultError> {
    match fields.otp_secret.as_deref() {
        Some(secret) if !secret.is_empty() => decode_secret(secret).map(|_| ()),
        _ => Ok(()),
    }
}
