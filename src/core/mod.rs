pub mod credential;
pub mod defaults;
pub mod error;
pub mod otp;
pub mod ports;
pub mod secret_string_option;
pub mod set;
