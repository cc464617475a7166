//! Credentials definitions.
//!
//! `Credentials`在client构建之后就不会再变化，client只持有这一份状态，所以同一个client可以在多个任务中并发使用。
//!
//! # Example
//! ```no_run
//! use u_ses::credentials::Credentials;
//! use u_ses::ses;
//!
//! fn get_ses_client() -> ses::Client {
//!     let file_str = std::fs::read_to_string("tests/ses/config.toml").unwrap();
//!     let creds = toml::from_str::<Credentials>(&file_str).unwrap();
//!     ses::Client::builder().credentials(creds).build().unwrap()
//! }
//! ```

use serde::Deserialize;
use std::fmt::{Debug, Formatter};

/// 未指定region时使用的默认值
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Clone, Deserialize)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
    #[serde(default)]
    region: Option<String>,
}

impl Credentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: Option<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region,
        }
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub(crate) fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    /// 构建client时检查，缺少的字段在这里就报错，而不是等到发送请求时
    pub(crate) fn validate(&self) -> Result<(), CredentialsError> {
        if self.access_key_id.trim().is_empty() {
            return Err(CredentialsError::Missing("access_key_id"));
        }
        if self.secret_access_key.is_empty() {
            return Err(CredentialsError::Missing("secret_access_key"));
        }
        if let Some(region) = &self.region {
            if region.trim().is_empty() {
                return Err(CredentialsError::Missing("region"));
            }
        }
        Ok(())
    }
}

// secret不能出现在日志里
impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"******")
            .field("region", &self.region())
            .finish()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CredentialsError {
    #[error("missing credentials field: {0}")]
    Missing(&'static str),
}

#[test]
fn credentials_test() {
    let creds = Credentials::new("AKID", "secret", None);
    assert_eq!(creds.region(), DEFAULT_REGION);
    assert!(creds.validate().is_ok());

    let debug = format!("{:?}", Credentials::new("AKID", "wJalrXUtnFEMI", None));
    assert!(debug.contains("AKID"));
    assert!(!debug.contains("wJalrXUtnFEMI"));

    let creds = Credentials::new("AKID", "secret", Some("eu-west-1".to_owned()));
    assert_eq!(creds.region(), "eu-west-1");

    assert!(matches!(
        Credentials::new("", "secret", None).validate(),
        Err(CredentialsError::Missing("access_key_id"))
    ));
    assert!(matches!(
        Credentials::new("AKID", "", None).validate(),
        Err(CredentialsError::Missing("secret_access_key"))
    ));
    assert!(matches!(
        Credentials::new("AKID", "secret", Some(" ".to_owned())).validate(),
        Err(CredentialsError::Missing("region"))
    ));
}

#[test]
fn credentials_from_toml_test() {
    let s = r#"
        access_key_id = "AKID"
        secret_access_key = "secret"
    "#;
    let creds = toml::from_str::<Credentials>(s).unwrap();
    assert_eq!(creds.access_key_id(), "AKID");
    assert_eq!(creds.region(), DEFAULT_REGION);
}
