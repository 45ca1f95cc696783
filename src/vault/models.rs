use crate::core::credential::{Credential, CredentialFields};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

/// Keys every persisted credential record must carry, possibly with a null value.
pub const REQUIRED_KEYS: [&str; 9] = [
    "username",
    "password",
    "otp",
    "note",
    "custom_note",
    "url",
    "domain",
    "timestamp",
    "alias",
];

/// On-disk shape of the credential file.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct VaultDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub credentials: Vec<PersistedCredential>,
    #[serde(default)]
    pub default_url: Option<String>,
    #[serde(default)]
    pub default_domain: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PersistedCredential {
    pub username: Option<String>,
    #[serde(with = "crate::core::secret_string_option")]
    pub password: Option<SecretString>,
    #[serde(with = "crate::core::secret_string_option")]
    pub otp: Option<SecretString>,
    pub note: Option<String>,
    pub custom_note: Option<bool>,
    pub url: Option<String>,
    pub domain: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub timestamp: i64,
    pub alias: Option<String>,
}

impl From<&Credential> for PersistedCredential {
    fn from(c: &Credential) -> Self {
        Self {
            username: c.username.clone(),
            password: c.password.clone(),
            otp: c.otp_secret.clone(),
            note: Some(c.note.clone()),
            custom_note: Some(c.note_is_custom),
            url: c.url.clone(),
            domain: c.domain.clone(),
            timestamp: c.created_at,
            alias: c.alias.clone(),
        }
    }
}

impl PersistedCredential {
    pub fn into_credential(self) -> Credential {
        let fields = CredentialFields {
            username: self.username,
            password: self.password.map(|p| p.expose_secret().to_string()),
            otp_secret: self.otp.map(|o| o.expose_secret().to_string()),
            url: self.url,
            domain: self.domain,
            note: self.note,
            alias: self.alias,
        };
        Credential::new(fields, self.timestamp, self.custom_note)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<PersistedCredential>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<PersistedCredential>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Int(i64),
    Float(f64),
}

// Older files store fractional seconds; null means "unknown" and is replaced by now on load.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawTimestamp>::deserialize(deserializer)? {
        Some(RawTimestamp::Int(i)) => i,
        Some(RawTimestamp::Float(f)) => f as i64,
        None => 0,
    })
}
