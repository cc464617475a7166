use super::Error;
use super::request::SignedRequest;
use reqwest::StatusCode;
use u_ses_common::helper::into_header_map;

/// 原始响应，状态码不在这里解释
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// 发送[`SignedRequest`]的http层
///
/// 默认使用[`ReqwestTransport`]，测试或者需要自定义http client时可以自己实现。
/// 同一个client会在多个任务中并发调用`send`，实现需要是并发安全的。
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &SignedRequest) -> Result<RawResponse, Error>;
}

#[derive(Default, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &SignedRequest) -> Result<RawResponse, Error> {
        let headers = into_header_map(&request.headers)?;
        let resp = self
            .http_client
            .request(request.method.clone(), request.url())
            .headers(headers)
            .body(request.body.clone())
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        Ok(RawResponse { status, body })
    }
}
