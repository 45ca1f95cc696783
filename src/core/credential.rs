use chrono::{DateTime, Local, Utc};
use secrecy::{ExposeSecret, SecretString};
use std::hash::{Hash, Hasher};

/// Note attached to every record created by the bulk import routines.
pub const IMPORT_MARKER: &str = "Import";

const NOTE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Plain field values used to construct a credential or to override fields of an existing one.
/// `None` and empty strings both mean "no value".
#[derive(Debug, Clone, Default)]
pub struct CredentialFields {
    pub username: Option<String>,
    pub password: Option<String>,
    pub otp_secret: Option<String>,
    pub url: Option<String>,
    pub domain: Option<String>,
    pub note: Option<String>,
    pub alias: Option<String>,
}

impl CredentialFields {
    pub fn is_empty(&self) -> bool {
        [
            &self.username,
            &self.password,
            &self.otp_secret,
            &self.url,
            &self.domain,
            &self.note,
            &self.alias,
        ]
        .iter()
        .all(|f| f.as_deref().map_or(true, str::is_empty))
    }
}

/// One vault entry.
///
/// `ordinal` is a display position handed out by [`CredentialSet`](super::set::CredentialSet);
/// it is reassigned on every load and never persisted.
#[derive(Debug, Clone)]
pub struct Credential {
    pub ordinal: usize,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub otp_secret: Option<SecretString>,
    pub url: Option<String>,
    pub domain: Option<String>,
    pub note: String,
    pub note_is_custom: bool,
    pub alias: Option<String>,
    pub created_at: i64,
}

impl Credential {
    /// Build a credential from field values.
    ///
    /// A `created_at` of 0 means "now". Without a note, the creation time is rendered into the
    /// note and the note is flagged as not custom. `custom_note` only matters when a note is
    /// given; it defaults to `true` in that case.
    pub fn new(fields: CredentialFields, created_at: i64, custom_note: Option<bool>) -> Self {
        let created_at = if created_at == 0 {
            now_unix()
        } else {
            created_at
        };

        let (note, note_is_custom) = match non_empty(fields.note) {
            Some(note) => (note, custom_note.unwrap_or(true)),
            None => (auto_note(created_at), false),
        };

        Self {
            ordinal: 0,
            username: non_empty(fields.username),
            password: non_empty(fields.password).map(|p| SecretString::new(p.into())),
            otp_secret: non_empty(fields.otp_secret).map(|o| SecretString::new(o.into())),
            url: non_empty(fields.url),
            domain: non_empty(fields.domain),
            note,
            note_is_custom,
            alias: non_empty(fields.alias),
            created_at,
        }
    }

    pub fn password_str(&self) -> Option<&str> {
        self.password.as_ref().map(|p| p.expose_secret())
    }

    pub fn otp_str(&self) -> Option<&str> {
        self.otp_secret.as_ref().map(|o| o.expose_secret())
    }

    /// Name shown in the picker: alias first, then username, then the literal `None`.
    pub fn display_name(&self) -> &str {
        self.alias
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("None")
    }

    /// Three character flag string: `P` password, `O` OTP secret, `D` domain.
    pub fn property_flags(&self) -> String {
        let mut flags = String::with_capacity(3);
        if self.password.is_some() {
            flags.push('P');
        }
        if self.otp_secret.is_some() {
            flags.push('O');
        }
        if self.domain.is_some() {
            flags.push('D');
        }
        format!("{flags:<3}")
    }

    /// Copy with overrides. Absent or empty overrides keep the base value; a non-empty note
    /// marks the note as custom. The copy gets a fresh creation time and no ordinal.
    pub fn clone_with(&self, overrides: &CredentialFields) -> Credential {
        let mut copy = self.clone();
        copy.ordinal = 0;
        copy.created_at = now_unix();
        copy.update(overrides);
        copy
    }

    /// In-place variant of [`clone_with`](Self::clone_with). Leaves the ordinal alone.
    pub fn update(&mut self, overrides: &CredentialFields) {
        if let Some(v) = non_empty(overrides.username.clone()) {
            self.username = Some(v);
        }
        if let Some(v) = non_empty(overrides.password.clone()) {
            self.password = Some(SecretString::new(v.into()));
        }
        if let Some(v) = non_empty(overrides.otp_secret.clone()) {
            self.otp_secret = Some(SecretString::new(v.into()));
        }
        if let Some(v) = non_empty(overrides.url.clone()) {
            self.url = Some(v);
        }
        if let Some(v) = non_empty(overrides.domain.clone()) {
            self.domain = Some(v);
        }
        if let Some(v) = non_empty(overrides.alias.clone()) {
            self.alias = Some(v);
        }
        if let Some(v) = non_empty(overrides.note.clone()) {
            self.note = v;
            self.note_is_custom = true;
        }
    }

    pub fn is_import(&self) -> bool {
        self.note == IMPORT_MARKER
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        let same = self.username == other.username
            && self.password_str() == other.password_str()
            && self.otp_str() == other.otp_str()
            && self.url == other.url
            && self.domain == other.domain;

        if self.note_is_custom || other.note_is_custom {
            same && self.note == other.note
        } else {
            same
        }
    }
}

impl Eq for Credential {}

// The note is left out so that equal values always hash alike.
impl Hash for Credential {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.username.hash(state);
        self.password_str().hash(state);
        self.otp_str().hash(state);
        self.url.hash(state);
        self.domain.hash(state);
    }
}

pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

fn auto_note(created_at: i64) -> String {
    DateTime::from_timestamp(created_at, 0)
        .map(|t| t.with_timezone(&Local).format(NOTE_TIME_FORMAT).to_string())
        .unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
