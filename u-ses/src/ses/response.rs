use super::Error;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

// 错误响应格式：
// <ErrorResponse>
//   <Error><Type>Sender</Type><Code>MessageRejected</Code><Message>...</Message></Error>
//   <RequestId>...</RequestId>
// </ErrorResponse>
#[derive(Deserialize, Debug)]
struct ErrorProbe {
    #[serde(rename = "Error")]
    error: Option<ErrorNode>,
    #[serde(rename = "RequestId")]
    request_id: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorNode {
    #[serde(rename = "Type")]
    kind: Option<String>,
    #[serde(rename = "Code", default)]
    code: String,
    #[serde(rename = "Message", default)]
    message: String,
}

/// 解析响应body
///
/// 不管http状态码是什么都先解析xml，出现`Error`节点就返回[`Error::Service`]；
/// 没有`Error`节点但状态码不是2xx的返回[`Error::RequestAPIFailed`]；
/// 否则把整个body反序列化为`T`。
pub(crate) fn normalize<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, Error> {
    let probe: ErrorProbe = quick_xml::de::from_str(body)?;
    if let Some(node) = probe.error {
        warn!(
            code = %node.code,
            request_id = probe.request_id.as_deref().unwrap_or_default(),
            "ses returned an error response"
        );
        return Err(Error::Service {
            kind: node.kind,
            code: node.code,
            message: node.message,
            request_id: probe.request_id,
        });
    }

    if !status.is_success() {
        warn!(%status, "ses response status is not success");
        return Err(Error::RequestAPIFailed {
            status: status.to_string(),
            text: body.to_owned(),
        });
    }

    Ok(quick_xml::de::from_str(body)?)
}

#[cfg(test)]
use super::types_rs::*;

#[test]
fn normalize_service_error_test() {
    let body = r#"<ErrorResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
  <Error>
    <Type>Sender</Type>
    <Code>MessageRejected</Code>
    <Message>Email address is not verified. The following identities failed the check: a@example.com</Message>
  </Error>
  <RequestId>42d59b56-7407-4c4a-be0f-4c88daeea257</RequestId>
</ErrorResponse>"#;
    let res = normalize::<SendEmailResponse>(StatusCode::BAD_REQUEST, body);
    match res {
        Err(Error::Service {
            kind,
            code,
            message,
            request_id,
        }) => {
            assert_eq!(kind.as_deref(), Some("Sender"));
            assert_eq!(code, "MessageRejected");
            assert_eq!(
                message,
                "Email address is not verified. The following identities failed the check: a@example.com"
            );
            assert_eq!(
                request_id.as_deref(),
                Some("42d59b56-7407-4c4a-be0f-4c88daeea257")
            );
        }
        other => panic!("unexpected result: {:?}", other),
    }

    // 即使状态码是200，只要有Error节点也是错误
    let res = normalize::<SendEmailResponse>(StatusCode::OK, body);
    assert!(matches!(res, Err(Error::Service { .. })));
}

#[test]
fn normalize_send_email_test() {
    let body = r#"<SendEmailResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
  <SendEmailResult>
    <MessageId>00000131d51d2292-159ad6eb-077c-46e6-ad09-ae7c05925ed4-000000</MessageId>
  </SendEmailResult>
  <ResponseMetadata>
    <RequestId>d5964849-c866-11e0-9beb-01a62d68c57f</RequestId>
  </ResponseMetadata>
</SendEmailResponse>"#;
    let res = normalize::<SendEmailResponse>(StatusCode::OK, body).unwrap();
    assert_eq!(
        res.send_email_result.message_id,
        "00000131d51d2292-159ad6eb-077c-46e6-ad09-ae7c05925ed4-000000"
    );
    assert_eq!(
        res.response_metadata.request_id,
        "d5964849-c866-11e0-9beb-01a62d68c57f"
    );
}

#[test]
fn normalize_member_list_test() {
    let one = r#"<ListVerifiedEmailAddressesResponse>
  <ListVerifiedEmailAddressesResult>
    <VerifiedEmailAddresses>
      <member>only@example.com</member>
    </VerifiedEmailAddresses>
  </ListVerifiedEmailAddressesResult>
  <ResponseMetadata><RequestId>r1</RequestId></ResponseMetadata>
</ListVerifiedEmailAddressesResponse>"#;
    let res = normalize::<ListVerifiedEmailAddressesResponse>(StatusCode::OK, one).unwrap();
    assert_eq!(
        res.list_verified_email_addresses_result
            .verified_email_addresses
            .member,
        vec!["only@example.com".to_owned()]
    );

    let two = r#"<ListVerifiedEmailAddressesResponse>
  <ListVerifiedEmailAddressesResult>
    <VerifiedEmailAddresses>
      <member>b@example.com</member>
      <member>a@example.com</member>
    </VerifiedEmailAddresses>
  </ListVerifiedEmailAddressesResult>
</ListVerifiedEmailAddressesResponse>"#;
    let res = normalize::<ListVerifiedEmailAddressesResponse>(StatusCode::OK, two).unwrap();
    assert_eq!(
        res.list_verified_email_addresses_result
            .verified_email_addresses
            .member,
        vec!["b@example.com".to_owned(), "a@example.com".to_owned()]
    );

    let empty = r#"<ListVerifiedEmailAddressesResponse>
  <ListVerifiedEmailAddressesResult>
    <VerifiedEmailAddresses/>
  </ListVerifiedEmailAddressesResult>
</ListVerifiedEmailAddressesResponse>"#;
    let res = normalize::<ListVerifiedEmailAddressesResponse>(StatusCode::OK, empty).unwrap();
    assert!(
        res.list_verified_email_addresses_result
            .verified_email_addresses
            .member
            .is_empty()
    );
}

#[test]
fn normalize_send_quota_test() {
    let body = r#"<GetSendQuotaResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
  <GetSendQuotaResult>
    <SentLast24Hours>127.0</SentLast24Hours>
    <Max24HourSend>200.0</Max24HourSend>
    <MaxSendRate>1.0</MaxSendRate>
  </GetSendQuotaResult>
  <ResponseMetadata><RequestId>273021c6-c866-11e0-b926-699e21c3af9e</RequestId></ResponseMetadata>
</GetSendQuotaResponse>"#;
    let res = normalize::<GetSendQuotaResponse>(StatusCode::OK, body).unwrap();
    assert_eq!(
        res.get_send_quota_result,
        SendQuota {
            max_24_hour_send: 200.0,
            max_send_rate: 1.0,
            sent_last_24_hours: 127.0,
        }
    );
}

#[test]
fn normalize_decode_error_test() {
    let res = normalize::<GetSendQuotaResponse>(StatusCode::OK, "<GetSendQuotaResponse><oops>");
    assert!(matches!(res, Err(Error::Decode(_))));

    let res = normalize::<GetSendQuotaResponse>(StatusCode::OK, "");
    assert!(matches!(res, Err(Error::Decode(_))));
}

#[test]
fn normalize_status_without_error_node_test() {
    let body = "<html><body>Service Unavailable</body></html>";
    let res = normalize::<GetSendQuotaResponse>(StatusCode::SERVICE_UNAVAILABLE, body);
    match res {
        Err(Error::RequestAPIFailed { status, text }) => {
            assert!(status.starts_with("503"));
            assert_eq!(text, body);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
