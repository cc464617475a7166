#![cfg(feature = "ses")]

use reqwest::StatusCode;
use std::sync::{Arc, Mutex};
use u_ses::credentials::Credentials;
use u_ses::ses::{self, Error, RawResponse, SignedRequest, Transport};

// 记录收到的请求并返回固定响应
struct MockTransport {
    status: StatusCode,
    body: String,
    fail: bool,
    requests: Mutex<Vec<SignedRequest>>,
}

impl MockTransport {
    fn new(status: StatusCode, body: &str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.to_owned(),
            fail: false,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            status: StatusCode::OK,
            body: String::new(),
            fail: true,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<SignedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &SignedRequest) -> Result<RawResponse, Error> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(Error::Transport("connection reset by peer".into()));
        }
        Ok(RawResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

fn mock_client(transport: Arc<MockTransport>) -> ses::Client {
    ses::Client::builder()
        .credentials(Credentials::new("AKID", "secret", None))
        .transport(transport)
        .build()
        .unwrap()
}

fn form_pairs(body: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect()
}

const METADATA_ONLY: &str = r#"<VerifyEmailAddressResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
  <ResponseMetadata>
    <RequestId>8edd7eb2-4b8e-4d2c-b5b4-ccd0ba9d0a6e</RequestId>
  </ResponseMetadata>
</VerifyEmailAddressResponse>"#;

const SERVICE_ERROR: &str = r#"<ErrorResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
  <Error>
    <Type>Sender</Type>
    <Code>MessageRejected</Code>
    <Message>Email address is not verified.</Message>
  </Error>
  <RequestId>0f1d0d2e-4c8b-11e0-a1c1-bd9b3a3e0d50</RequestId>
</ErrorResponse>"#;

#[tokio::test]
async fn send_email_dispatches_signed_form() {
    let body = r#"<SendEmailResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
  <SendEmailResult>
    <MessageId>00000131d51d2292-159ad6eb-077c-46e6-ad09-ae7c05925ed4-000000</MessageId>
  </SendEmailResult>
  <ResponseMetadata>
    <RequestId>d5964849-c866-11e0-9beb-01a62d68c57f</RequestId>
  </ResponseMetadata>
</SendEmailResponse>"#;
    let transport = MockTransport::new(StatusCode::OK, body);
    let client = mock_client(transport.clone());

    let resp = client
        .send_email()
        .source("sender@example.com")
        .to_addresses(vec!["a@example.com", "b@example.com"])
        .subject("Hi")
        .text_body("Hello")
        .build()
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.send_email_result.message_id,
        "00000131d51d2292-159ad6eb-077c-46e6-ad09-ae7c05925ed4-000000"
    );
    assert_eq!(
        resp.response_metadata.request_id,
        "d5964849-c866-11e0-9beb-01a62d68c57f"
    );

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.method, reqwest::Method::POST);
    assert_eq!(req.url(), "https://email.us-east-1.amazonaws.com/");
    assert_eq!(req.headers["Content-Length"], req.body.len().to_string());
    assert!(
        req.headers["X-Amzn-Authorization"]
            .starts_with("AWS3-HTTPS AWSAccessKeyId=AKID,Algorithm=HmacSHA256,Signature=")
    );

    let pairs = form_pairs(&req.body);
    let get = |k: &str| {
        pairs
            .iter()
            .find(|(key, _)| key == k)
            .map(|(_, v)| v.as_str())
    };
    assert_eq!(get("Action"), Some("SendEmail"));
    assert_eq!(get("Source"), Some("sender@example.com"));
    assert_eq!(get("Destination.ToAddresses.member.1"), Some("a@example.com"));
    assert_eq!(get("Destination.ToAddresses.member.2"), Some("b@example.com"));
    assert_eq!(get("Message.Body.Text.Charset"), Some("UTF-8"));
    assert_eq!(get("Message.Body.Html.Data"), None);
    assert_eq!(pairs.len(), 7);
}

#[tokio::test]
async fn send_email_without_body_is_not_dispatched() {
    let transport = MockTransport::new(StatusCode::OK, METADATA_ONLY);
    let client = mock_client(transport.clone());

    let res = client
        .send_email()
        .source("sender@example.com")
        .to_addresses(vec!["a@example.com"])
        .subject("Hi")
        .build()
        .send()
        .await;
    assert!(matches!(res, Err(Error::Usage(_))));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn send_email_service_error() {
    let transport = MockTransport::new(StatusCode::BAD_REQUEST, SERVICE_ERROR);
    let client = mock_client(transport);

    let res = client
        .send_email()
        .source("sender@example.com")
        .to_addresses(vec!["a@example.com"])
        .subject("Hi")
        .html_body("<p>Hello</p>")
        .build()
        .send()
        .await;
    match res {
        Err(Error::Service { code, message, .. }) => {
            assert_eq!(code, "MessageRejected");
            assert_eq!(message, "Email address is not verified.");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn verify_and_delete_email_address() {
    let transport = MockTransport::new(StatusCode::OK, METADATA_ONLY);
    let client = mock_client(transport.clone());

    let meta = client
        .verify_email_address()
        .email_address("new@example.com")
        .build()
        .send()
        .await
        .unwrap();
    assert_eq!(meta.request_id, "8edd7eb2-4b8e-4d2c-b5b4-ccd0ba9d0a6e");

    let meta = client
        .delete_verified_email_address()
        .email_address("old@example.com")
        .build()
        .send()
        .await
        .unwrap();
    assert_eq!(meta.request_id, "8edd7eb2-4b8e-4d2c-b5b4-ccd0ba9d0a6e");

    let requests = transport.requests();
    assert_eq!(
        form_pairs(&requests[0].body),
        vec![
            ("Action".to_owned(), "VerifyEmailAddress".to_owned()),
            ("EmailAddress".to_owned(), "new@example.com".to_owned()),
        ]
    );
    assert_eq!(
        form_pairs(&requests[1].body),
        vec![
            ("Action".to_owned(), "DeleteVerifiedEmailAddress".to_owned()),
            ("EmailAddress".to_owned(), "old@example.com".to_owned()),
        ]
    );
}

#[tokio::test]
async fn list_verified_email_addresses_single_member() {
    let body = r#"<ListVerifiedEmailAddressesResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
  <ListVerifiedEmailAddressesResult>
    <VerifiedEmailAddresses>
      <member>example@amazon.com</member>
    </VerifiedEmailAddresses>
  </ListVerifiedEmailAddressesResult>
  <ResponseMetadata>
    <RequestId>3dd50e97-c865-11e0-b235-099eb63d928d</RequestId>
  </ResponseMetadata>
</ListVerifiedEmailAddressesResponse>"#;
    let transport = MockTransport::new(StatusCode::OK, body);
    let client = mock_client(transport.clone());

    let addresses = client
        .list_verified_email_addresses()
        .build()
        .send()
        .await
        .unwrap();
    assert_eq!(addresses, vec!["example@amazon.com".to_owned()]);
    assert_eq!(transport.requests()[0].body, "Action=ListVerifiedEmailAddresses");
}

#[tokio::test]
async fn get_send_quota() {
    let body = r#"<GetSendQuotaResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
  <GetSendQuotaResult>
    <SentLast24Hours>127.0</SentLast24Hours>
    <Max24HourSend>200.0</Max24HourSend>
    <MaxSendRate>1.0</MaxSendRate>
  </GetSendQuotaResult>
  <ResponseMetadata>
    <RequestId>273021c6-c866-11e0-b926-699e21c3af9e</RequestId>
  </ResponseMetadata>
</GetSendQuotaResponse>"#;
    let client = mock_client(MockTransport::new(StatusCode::OK, body));

    let quota = client.get_send_quota().build().send().await.unwrap();
    assert_eq!(quota.max_24_hour_send, 200.0);
    assert_eq!(quota.max_send_rate, 1.0);
    assert_eq!(quota.sent_last_24_hours, 127.0);
}

#[tokio::test]
async fn get_send_statistics() {
    let body = r#"<GetSendStatisticsResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
  <GetSendStatisticsResult>
    <SendDataPoints>
      <member>
        <DeliveryAttempts>8</DeliveryAttempts>
        <Timestamp>2011-08-03T19:23:00Z</Timestamp>
        <Rejects>0</Rejects>
        <Bounces>0</Bounces>
        <Complaints>0</Complaints>
      </member>
      <member>
        <DeliveryAttempts>7</DeliveryAttempts>
        <Timestamp>2011-08-03T06:53:00Z</Timestamp>
        <Rejects>0</Rejects>
        <Bounces>1</Bounces>
        <Complaints>2</Complaints>
      </member>
    </SendDataPoints>
  </GetSendStatisticsResult>
  <ResponseMetadata>
    <RequestId>c2b66ee5-c866-11e0-b17f-cddb0ab334db</RequestId>
  </ResponseMetadata>
</GetSendStatisticsResponse>"#;
    let client = mock_client(MockTransport::new(StatusCode::OK, body));

    let points = client.get_send_statistics().build().send().await.unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].delivery_attempts, 8);
    assert_eq!(
        points[0].timestamp,
        time::macros::datetime!(2011-08-03 19:23:00 UTC)
    );
    assert_eq!(points[1].bounces, 1);
    assert_eq!(points[1].complaints, 2);
}

#[tokio::test]
async fn malformed_response_is_decode_error() {
    let client = mock_client(MockTransport::new(
        StatusCode::OK,
        "<GetSendQuotaResponse><GetSendQuotaResult>",
    ));
    let res = client.get_send_quota().build().send().await;
    assert!(matches!(res, Err(Error::Decode(_))));
}

#[tokio::test]
async fn transport_error_is_passed_through() {
    let transport = MockTransport::failing();
    let client = mock_client(transport.clone());
    let res = client.list_verified_email_addresses().build().send().await;
    match res {
        Err(Error::Transport(e)) => assert_eq!(e.to_string(), "connection reset by peer"),
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn client_uses_region_host() {
    let client = ses::Client::builder()
        .credentials(Credentials::new("AKID", "secret", Some("eu-west-1".to_owned())))
        .build()
        .unwrap();
    assert_eq!(client.host(), "email.eu-west-1.amazonaws.com");
}

#[test]
fn client_without_secret_is_configuration_error() {
    let res = ses::Client::builder()
        .credentials(Credentials::new("AKID", "", None))
        .build();
    assert!(matches!(res, Err(Error::Configuration(_))));
}

// 获取本地配置信息测试
fn get_ses_client() -> ses::Client {
    let conf_str = std::fs::read_to_string("tests/ses/config.toml").unwrap();
    let creds = toml::from_str::<Credentials>(&conf_str).unwrap();
    ses::Client::builder().credentials(creds).build().unwrap()
}

#[tokio::test]
#[ignore]
async fn get_send_quota_live() {
    let client = get_ses_client();
    match client.get_send_quota().build().send().await {
        Ok(data) => println!("ok: {:#?}", data),
        Err(e) => println!("error: {:#?}", e),
    }
}

#[tokio::test]
#[ignore]
async fn list_verified_email_addresses_live() {
    let client = get_ses_client();
    match client.list_verified_email_addresses().build().send().await {
        Ok(data) => println!("ok: {:#?}", data),
        Err(e) => println!("error: {:#?}", e),
    }
}

#[tokio::test]
#[ignore]
async fn send_email_live() {
    let client = get_ses_client();
    let response = client
        .send_email()
        .source("noreply@example.com")
        .to_addresses(vec!["example@example.com"])
        .subject("test")
        .text_body("text body")
        .build()
        .send()
        .await;

    match response {
        Ok(data) => println!("ok: {:#?}", data),
        Err(e) => println!("error: {:#?}", e),
    }
}
