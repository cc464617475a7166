use super::Client;
use super::Error;
use super::types_rs::SendEmailResponse;
use bon::Builder;
use serde::Serialize;
use std::collections::BTreeMap;
use u_ses_common::query::to_query_map;

const CHARSET: &str = "UTF-8";

/// 发送邮件
///
/// `text_body`和`html_body`至少要设置一个，否则`send`会直接返回[`Error::Usage`]，不会发出请求。
///
/// 收件人、抄送、密送、回复地址都按传入的顺序编号（从1开始）。
#[derive(Builder)]
pub struct SendEmail<'a> {
    #[builder(start_fn)]
    client: &'a Client,

    source: &'a str,
    #[builder(default, into)]
    to_addresses: Vec<&'a str>,
    #[builder(default, into)]
    cc_addresses: Vec<&'a str>,
    #[builder(default, into)]
    bcc_addresses: Vec<&'a str>,
    #[builder(default, into)]
    reply_to_addresses: Vec<&'a str>,
    subject: &'a str,
    text_body: Option<&'a str>,
    html_body: Option<&'a str>,
}

impl Client {
    pub fn send_email(&self) -> SendEmailBuilder<'_> {
        SendEmail::builder(self)
    }
}

//region query params
// 最终序列化后的结构，经过to_query_map展开为 Destination.ToAddresses.member.1 这种形式
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailQuery<'a> {
    action: &'static str,
    source: &'a str,
    destination: Destination<'a>,
    reply_to_addresses: Members<'a>,
    message: Message<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Destination<'a> {
    to_addresses: Members<'a>,
    cc_addresses: Members<'a>,
    bcc_addresses: Members<'a>,
}

// 空数组展开后不产生任何key
#[derive(Serialize)]
struct Members<'a> {
    member: &'a [&'a str],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Message<'a> {
    subject: Content<'a>,
    body: Body<'a>,
}

#[serde_with::skip_serializing_none]
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Body<'a> {
    text: Option<Content<'a>>,
    html: Option<Content<'a>>,
}

#[serde_with::skip_serializing_none]
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Content<'a> {
    data: &'a str,
    charset: Option<&'static str>,
}

impl<'a> Content<'a> {
    fn body(data: &'a str) -> Self {
        Self {
            data,
            charset: Some(CHARSET),
        }
    }
}
//endregion

impl SendEmail<'_> {
    fn query(&self) -> SendEmailQuery<'_> {
        SendEmailQuery {
            action: "SendEmail",
            source: self.source,
            destination: Destination {
                to_addresses: Members {
                    member: &self.to_addresses,
                },
                cc_addresses: Members {
                    member: &self.cc_addresses,
                },
                bcc_addresses: Members {
                    member: &self.bcc_addresses,
                },
            },
            reply_to_addresses: Members {
                member: &self.reply_to_addresses,
            },
            message: Message {
                subject: Content {
                    data: self.subject,
                    charset: None,
                },
                body: Body {
                    text: self.text_body.map(Content::body),
                    html: self.html_body.map(Content::body),
                },
            },
        }
    }

    /// 展开后的请求参数，不做任何校验
    pub(crate) fn flatten(&self) -> Result<BTreeMap<String, String>, Error> {
        Ok(to_query_map(&self.query())?)
    }

    pub async fn send(&self) -> Result<SendEmailResponse, Error> {
        // Text 和 Html 是同一封邮件的两种表示，两者必须传其一
        if self.text_body.is_none() && self.html_body.is_none() {
            return Err(Error::Usage(
                "one of text_body or html_body must be set".to_owned(),
            ));
        }

        let params = self.flatten()?;
        self.client.call("SendEmail", params).await
    }
}

#[cfg(test)]
fn test_client() -> Client {
    use crate::credentials::Credentials;
    Client::builder()
        .credentials(Credentials::new("AKID", "secret", None))
        .build()
        .unwrap()
}

#[cfg(test)]
fn owned_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[test]
fn flatten_single_recipient_text_body_test() {
    let client = test_client();
    let map = client
        .send_email()
        .source("sender@example.com")
        .to_addresses(vec!["a@example.com"])
        .subject("Hi")
        .text_body("Hello")
        .build()
        .flatten()
        .unwrap();

    let expect = owned_map(&[
        ("Action", "SendEmail"),
        ("Source", "sender@example.com"),
        ("Message.Subject.Data", "Hi"),
        ("Message.Body.Text.Data", "Hello"),
        ("Message.Body.Text.Charset", "UTF-8"),
        ("Destination.ToAddresses.member.1", "a@example.com"),
    ]);
    assert_eq!(map, expect);
}

#[test]
fn flatten_all_roles_keep_order_test() {
    let client = test_client();
    let to = vec!["t3@example.com", "t1@example.com", "t2@example.com"];
    let map = client
        .send_email()
        .source("sender@example.com")
        .to_addresses(to.clone())
        .cc_addresses(vec!["c1@example.com"])
        .bcc_addresses(vec!["b2@example.com", "b1@example.com"])
        .reply_to_addresses(vec!["r@example.com"])
        .subject("Hi")
        .html_body("<b>Hello</b>")
        .build()
        .flatten()
        .unwrap();

    for (i, addr) in to.iter().enumerate() {
        let key = format!("Destination.ToAddresses.member.{}", i + 1);
        assert_eq!(map[&key], *addr);
    }
    assert!(!map.contains_key("Destination.ToAddresses.member.0"));
    assert!(!map.contains_key("Destination.ToAddresses.member.4"));
    assert_eq!(map["Destination.CcAddresses.member.1"], "c1@example.com");
    assert_eq!(map["Destination.BccAddresses.member.1"], "b2@example.com");
    assert_eq!(map["Destination.BccAddresses.member.2"], "b1@example.com");
    assert_eq!(map["ReplyToAddresses.member.1"], "r@example.com");

    assert_eq!(map["Message.Body.Html.Data"], "<b>Hello</b>");
    assert_eq!(map["Message.Body.Html.Charset"], "UTF-8");
    assert!(!map.contains_key("Message.Body.Text.Data"));
    assert!(!map.contains_key("Message.Body.Text.Charset"));

    let role_keys = |prefix: &str| map.keys().filter(|k| k.starts_with(prefix)).count();
    assert_eq!(role_keys("Destination.ToAddresses."), 3);
    assert_eq!(role_keys("Destination.CcAddresses."), 1);
    assert_eq!(role_keys("Destination.BccAddresses."), 2);
    assert_eq!(role_keys("ReplyToAddresses."), 1);
}

#[test]
fn flatten_both_bodies_no_recipients_test() {
    let client = test_client();
    let map = client
        .send_email()
        .source("sender@example.com")
        .subject("Hi")
        .text_body("Hello")
        .html_body("<p>Hello</p>")
        .build()
        .flatten()
        .unwrap();

    assert_eq!(map["Message.Body.Text.Data"], "Hello");
    assert_eq!(map["Message.Body.Html.Data"], "<p>Hello</p>");
    assert!(!map.keys().any(|k| k.contains("Addresses")));
    assert!(!map.contains_key("Message.Subject.Charset"));
    assert_eq!(map.len(), 7);
}
