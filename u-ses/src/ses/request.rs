use super::Error;
use crate::credentials::Credentials;
use reqwest::Method;
use std::collections::{BTreeMap, HashMap};
use u_ses_common::helper::{now_gmt, sign_hmac_sha256_base64};
use u_ses_common::query::encode_form;

// 签名文档：https://docs.aws.amazon.com/ses/latest/dg/using-ses-api-authentication.html

pub(crate) const SERVICE_PATH: &str = "/";
pub(crate) const AUTHORIZATION_HEADER: &str = "X-Amzn-Authorization";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// 已经签好名、可以直接交给[`Transport`](super::Transport)发送的请求
#[derive(Clone, Debug)]
pub struct SignedRequest {
    pub method: Method,
    pub host: String,
    pub path: String,
    /// Date, Host, Content-Type, Content-Length, X-Amzn-Authorization
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl SignedRequest {
    pub fn url(&self) -> String {
        format!("https://{}{}", self.host, self.path)
    }
}

pub(crate) fn service_host(region: &str) -> String {
    format!("email.{region}.amazonaws.com")
}

/// 输出格式: AWS3-HTTPS AWSAccessKeyId=xxx,Algorithm=HmacSHA256,Signature=xxx
fn authorization(access_key_id: &str, signature: &str) -> String {
    format!("AWS3-HTTPS AWSAccessKeyId={access_key_id},Algorithm=HmacSHA256,Signature={signature}")
}

pub(crate) fn build_request(
    creds: &Credentials,
    action: &str,
    params: BTreeMap<String, String>,
) -> Result<SignedRequest, Error> {
    let now = now_gmt()?;
    build_request_at(creds, action, params, now)
}

// Date头的值就是被签名的字符串，两者必须一致
fn build_request_at(
    creds: &Credentials,
    action: &str,
    mut params: BTreeMap<String, String>,
    date: String,
) -> Result<SignedRequest, Error> {
    params.insert("Action".to_owned(), action.to_owned());
    let body = encode_form(&params);

    let host = service_host(creds.region());
    let signature = sign_hmac_sha256_base64(creds.secret_access_key(), &date);

    let mut headers = HashMap::new();
    headers.insert("Date".to_owned(), date);
    headers.insert("Host".to_owned(), host.clone());
    headers.insert("Content-Type".to_owned(), FORM_CONTENT_TYPE.to_owned());
    headers.insert("Content-Length".to_owned(), body.len().to_string());
    headers.insert(
        AUTHORIZATION_HEADER.to_owned(),
        authorization(creds.access_key_id(), &signature),
    );

    Ok(SignedRequest {
        method: Method::POST,
        host,
        path: SERVICE_PATH.to_owned(),
        headers,
        body,
    })
}

#[test]
fn build_request_test() {
    let creds = Credentials::new("AKID", "secret", None);
    let date = "Thu, 13 Nov 2025 13:32:03 GMT".to_owned();
    let req = build_request_at(&creds, "GetSendQuota", BTreeMap::new(), date.clone()).unwrap();

    assert_eq!(req.method, Method::POST);
    assert_eq!(req.host, "email.us-east-1.amazonaws.com");
    assert_eq!(req.url(), "https://email.us-east-1.amazonaws.com/");
    assert_eq!(req.body, "Action=GetSendQuota");
    assert_eq!(req.headers["Date"], date);
    assert_eq!(req.headers["Host"], "email.us-east-1.amazonaws.com");
    assert_eq!(
        req.headers["Content-Type"],
        "application/x-www-form-urlencoded; charset=utf-8"
    );
    assert_eq!(req.headers["Content-Length"], "19");
    assert_eq!(
        req.headers[AUTHORIZATION_HEADER],
        "AWS3-HTTPS AWSAccessKeyId=AKID,Algorithm=HmacSHA256,\
         Signature=XNjX2Jz8AVHxZWFb7bwjZJJEv0v3g27VSG4WJSD4lU4="
    );
    assert_eq!(req.headers.len(), 5);
}

#[test]
fn build_request_region_test() {
    let creds = Credentials::new("AKID", "secret", Some("eu-west-1".to_owned()));
    let req = build_request(&creds, "GetSendQuota", BTreeMap::new()).unwrap();
    assert_eq!(req.host, "email.eu-west-1.amazonaws.com");
    assert_eq!(req.headers["Host"], "email.eu-west-1.amazonaws.com");

    // 签名的就是Date头本身
    let expect = authorization("AKID", &sign_hmac_sha256_base64("secret", &req.headers["Date"]));
    assert_eq!(req.headers[AUTHORIZATION_HEADER], expect);
}

#[test]
fn build_request_content_length_test() {
    let creds = Credentials::new("AKID", "secret", None);
    let mut params = BTreeMap::new();
    params.insert("Message.Subject.Data".to_owned(), "你好, wörld ✉".to_owned());
    params.insert("Source".to_owned(), "a@example.com".to_owned());
    let req = build_request_at(&creds, "SendEmail", params, "date".to_owned()).unwrap();

    assert_eq!(req.headers["Content-Length"], req.body.as_bytes().len().to_string());
    assert!(req.body.starts_with("Action=SendEmail&Message.Subject.Data=%E4%BD%A0%E5%A5%BD"));
    assert!(req.body.ends_with("&Source=a%40example.com"));
}
