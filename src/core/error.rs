use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VaultError {
    #[error("credential file is malformed: {0}")]
    MalformedStorage(String),
    #[error("credential record is missing the '{0}' attribute (credential file from an older version?)")]
    MissingField(String),
    #[error("unable to find '{0}' in your current PATH")]
    DependencyMissing(String),
    #[error("picker returned unexpected return code: {0}")]
    UnexpectedStatus(i32),
    #[error("picker returned unexpected index: '{0}'")]
    InvalidSelection(String),
    #[error("selection cancelled")]
    Cancelled,
    #[error("no credential with id {0}")]
    UnknownOrdinal(usize),
    #[error("OTP secret is not valid base32")]
    InvalidOtpSecret,
}
