use clap::{Args, Parser, Subcommand, ValueEnum};

const CTFCRED_LONG_VERSION: &str = concat!(
    "version: ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "git sha: ",
    env!("CTFCRED_GIT_SHA"),
    "\n",
    "build time (UTC): ",
    env!("CTFCRED_BUILD_TIME"),
    "\n",
    "target: ",
    env!("CTFCRED_TARGET")
);

#[derive(Parser)]
#[command(
    name = "ctfcred",
    version = env!("CARGO_PKG_VERSION"),
    long_version = CTFCRED_LONG_VERSION,
    about = " 🔑 ctfcred — credential picker for rofi"
)]
pub struct Cli {
    /// Credential file override (defaults to CTFCRED_FILE or ~/.ctfcred.yml)
    #[arg(long, global = true)]
    pub file: Option<String>,

    /// Without a subcommand the picker is launched
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the credential picker
    Pick {
        /// Prompt displayed by the picker
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Print credential data, one value per line
    Export {
        #[arg(value_enum)]
        kind: ExportKind,
        /// Separator between username and password (user-pass)
        #[arg(long, default_value = ":")]
        sep: String,
        /// Combine every username with every password (user-pass)
        #[arg(long)]
        mix: bool,
        /// Prefix usernames with their domain (user-pass)
        #[arg(long)]
        domain: bool,
        /// Base64 encode each pair for HTTP basic auth (user-pass)
        #[arg(long)]
        basic: bool,
        /// Output a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Add credentials from a file with one entry per line
    Import {
        #[arg(value_enum)]
        kind: ImportKind,
        /// Input file
        input: String,
        /// Separator between username and password (user-pass)
        #[arg(long, default_value = ":")]
        sep: String,
        /// Treat `domain/user` prefixes as the credential domain
        #[arg(long)]
        domain: bool,
    },
    /// Add a credential (prompts when no field is given)
    Add(FieldArgs),
    /// Update fields of an existing credential
    Edit {
        ordinal: usize,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Duplicate a credential, overriding the given fields
    Clone {
        ordinal: usize,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Remove every imported credential
    Clean {
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Show or persist the fallback url and domain
    Defaults {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        domain: Option<String>,
        /// Remove both stored defaults
        #[arg(long, conflicts_with_all = ["url", "domain"])]
        clear: bool,
    },
    /// Print the picker key bindings
    Keys,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    #[arg(long)]
    pub user: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    /// Base32 TOTP secret
    #[arg(long)]
    pub otp: Option<String>,
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub domain: Option<String>,
    #[arg(long)]
    pub note: Option<String>,
    /// Name shown in the picker instead of the username
    #[arg(long)]
    pub alias: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Usernames,
    Passwords,
    Domains,
    Urls,
    UserDomain,
    UserPass,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ImportKind {
    Usernames,
    Passwords,
    UserPass,
}
