use crate::credentials::CredentialsError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(#[from] CredentialsError),
    /// 调用者传入的参数不满足前置条件，此时请求还没有发出
    #[error("usage error: {0}")]
    Usage(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// 自定义[`Transport`](super::Transport)返回的错误
    #[error("transport error: {0}")]
    Transport(#[from] Box<dyn std::error::Error + Send + Sync>),
    #[error("decode response xml failed: {0}")]
    Decode(#[from] quick_xml::DeError),
    /// 服务端返回了`ErrorResponse`
    #[error("service error ({code}): {message}")]
    Service {
        kind: Option<String>,
        code: String,
        message: String,
        request_id: Option<String>,
    },
    #[error("response status is not success: {status}, text: {text}")]
    RequestAPIFailed { status: String, text: String },
    #[error("error: {0}")]
    Common(#[from] u_ses_common::Error),
}
