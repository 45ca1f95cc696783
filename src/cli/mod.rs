#![allow(clippy::module_inception)]
use crate::cli::cli::{Cli, Commands, ExportKind, FieldArgs, ImportKind};
use crate::config::app_config::Config;
use crate::core::credential::CredentialFields;
use crate::vault::handlers::{ExportField, ImportField, Vault};
use crate::vault::transfer::ExportOptions;
use clap::Parser;
use std::path::{Path, PathBuf};

pub mod cli;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let file = cli.file.map(PathBuf::from);

    match cli.command.unwrap_or(Commands::Pick { prompt: None }) {
        Commands::Pick { prompt } => {
            let config = Config::create(file, prompt)?;
            Vault::create(&config).handle_pick()?;
        }
        Commands::Export {
            kind,
            sep,
            mix,
            domain,
            basic,
            json,
        } => {
            let config = Config::create(file, None)?;
            let field = match kind {
                ExportKind::Usernames => ExportField::Usernames,
                ExportKind::Passwords => ExportField::Passwords,
                ExportKind::Domains => ExportField::Domains,
                ExportKind::Urls => ExportField::Urls,
                ExportKind::UserDomain => ExportField::UserDomain,
                ExportKind::UserPass => ExportField::UserPass,
            };
            let opts = ExportOptions {
                separator: sep,
                mix,
                with_domain: domain,
                basic,
            };
            Vault::create(&config).handle_export(field, &opts, json)?;
        }
        Commands::Import {
            kind,
            input,
            sep,
            domain,
        } => {
            let config = Config::create(file, None)?;
            let field = match kind {
                ImportKind::Usernames => ImportField::Usernames,
                ImportKind::Passwords => ImportField::Passwords,
                ImportKind::UserPass => ImportField::UserPass,
            };
            Vault::create(&config).handle_import(field, Path::new(&input), &sep, domain)?;
        }
        Commands::Add(fields) => {
            let config = Config::create(file, None)?;
            Vault::create(&config).handle_add(fields.into())?;
        }
        Commands::Edit { ordinal, fields } => {
            let config = Config::create(file, None)?;
            Vault::create(&config).handle_edit(ordinal, fields.into())?;
        }
        Commands::Clone { ordinal, fields } => {
            let config = Config::create(file, None)?;
            Vault::create(&config).handle_clone(ordinal, fields.into())?;
        }
        Commands::Clean { yes } => {
            let config = Config::create(file, None)?;
            Vault::create(&config).handle_clean(yes)?;
        }
        Commands::Defaults { url, domain, clear } => {
            let config = Config::create(file, None)?;
            Vault::create(&config).handle_defaults(url, domain, clear)?;
        }
        Commands::Keys => {
            let config = Config::create(file, None)?;
            Vault::create(&config).handle_keys()?;
        }
    }

    Ok(())
}

impl From<FieldArgs> for CredentialFields {
    fn from(args: FieldArgs) -> Self {
        CredentialFields {
            username: args.user,
            password: args.password,
            otp_secret: args.otp,
            url: args.url,
            domain: args.domain,
            note: args.note,
            alias: args.alias,
        }
    }
}
