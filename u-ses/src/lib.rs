#![doc = include_str!("../README.md")]

#[cfg(feature = "ses")]
pub mod ses;

/// Credentials used to sign SES requests
#[cfg(feature = "ses")]
pub mod credentials;
