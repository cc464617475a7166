//! Amazon SES sdk（query API，表单POST + XML响应）
//!
//! SES文档：<https://docs.aws.amazon.com/ses/latest/APIReference/>
//!
//! 所有api的流程都相同：构造参数 -> 签名并组装请求 -> 通过[`Transport`]发送 -> 解析xml响应。
//! 每次调用只有一次网络请求，不做重试。

pub use self::types_rs::*;

mod identity;
pub use identity::{
    DeleteVerifiedEmailAddress, DeleteVerifiedEmailAddressBuilder, ListVerifiedEmailAddresses,
    ListVerifiedEmailAddressesBuilder, VerifyEmailAddress, VerifyEmailAddressBuilder,
};

mod quota;
pub use quota::{GetSendQuota, GetSendQuotaBuilder, GetSendStatistics, GetSendStatisticsBuilder};

mod send_email;
pub use send_email::{SendEmail, SendEmailBuilder};

mod request;
pub use request::SignedRequest;

mod transport;
pub use transport::{RawResponse, ReqwestTransport, Transport};

mod error;
mod response;
mod types_rs;

pub use error::Error;

use crate::credentials::Credentials;
use bon::bon;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

pub struct Client {
    credentials: Credentials,
    transport: Arc<dyn Transport>,
}

#[bon]
impl Client {
    /// 不传`transport`时使用默认的[`ReqwestTransport`]
    #[builder]
    pub fn new(
        credentials: Credentials,
        transport: Option<Arc<dyn Transport>>,
    ) -> Result<Self, Error> {
        credentials.validate()?;
        let transport = transport.unwrap_or_else(|| Arc::new(ReqwestTransport::default()));
        Ok(Self {
            credentials,
            transport,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn host(&self) -> String {
        request::service_host(self.credentials.region())
    }

    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        action: &str,
        params: BTreeMap<String, String>,
    ) -> Result<T, Error> {
        let req = request::build_request(&self.credentials, action, params)?;
        debug!(
            action,
            host = %req.host,
            body_len = req.body.len(),
            "send ses request"
        );

        let resp = self.transport.send(&req).await?;
        debug!(action, status = %resp.status, "receive ses response");

        response::normalize(resp.status, &resp.body)
    }
}
