use crate::Error;
use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use sha2::Sha256;
use std::collections::HashMap;
use time::OffsetDateTime;
use time::macros::format_description;

/// 输出格式: Day, DD Mon YYYY hh:mm:ss GMT
///
/// eg: Thu, 13 Nov 2025 13:32:03 GMT
pub fn gmt_format(date_time: &OffsetDateTime) -> Result<String, Error> {
    let format = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    let utc = date_time.to_offset(time::UtcOffset::UTC);
    Ok(utc.format(format)?)
}

pub fn now_gmt() -> Result<String, Error> {
    gmt_format(&OffsetDateTime::now_utc())
}

/// HMAC-SHA256后再做标准base64编码
pub fn sign_hmac_sha256_base64(secret: &str, str_to_sign: &str) -> String {
    type HmacSha256 = Hmac<Sha256>;
    // HMAC接受任意长度的key，这里不会失败
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(str_to_sign.as_bytes());
    general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}

pub fn into_header_map(map: &HashMap<String, String>) -> Result<HeaderMap, Error> {
    map.iter()
        .map(|(k, v)| {
            let name = HeaderName::from_bytes(k.as_bytes()).map_err(|e| Error::InvalidHeader {
                name: k.clone(),
                reason: e.to_string(),
            })?;
            let value = HeaderValue::from_str(v).map_err(|e| Error::InvalidHeader {
                name: k.clone(),
                reason: e.to_string(),
            })?;
            Ok::<_, Error>((name, value))
        })
        .collect()
}

#[test]
fn gmt_format_test() {
    use time::macros::datetime;

    let dt = datetime!(2025-11-13 13:32:03 UTC);
    assert_eq!(gmt_format(&dt).unwrap(), "Thu, 13 Nov 2025 13:32:03 GMT");

    // 非UTC时间也要先转换为GMT
    let dt = datetime!(2025-01-02 08:04:05 +8);
    assert_eq!(gmt_format(&dt).unwrap(), "Thu, 02 Jan 2025 00:04:05 GMT");
}

#[test]
fn sign_hmac_sha256_base64_test() {
    // RFC 4231 test case 2
    let s = sign_hmac_sha256_base64("Jefe", "what do ya want for nothing?");
    assert_eq!(s, "W9zBRr9gdU5qBCQmCJV1x1oAPwidJzmDnexYuWTsOEM=");

    let again = sign_hmac_sha256_base64("Jefe", "what do ya want for nothing?");
    assert_eq!(s, again);
    assert_ne!(s, sign_hmac_sha256_base64("jefe", "what do ya want for nothing?"));
}

#[test]
fn into_header_map_test() {
    let mut map = HashMap::new();
    map.insert("Date".to_owned(), "Thu, 13 Nov 2025 13:32:03 GMT".to_owned());
    map.insert("X-Amzn-Authorization".to_owned(), "AWS3-HTTPS a=b".to_owned());
    let headers = into_header_map(&map).unwrap();
    assert_eq!(headers.len(), 2);
    assert_eq!(
        headers.get("x-amzn-authorization").unwrap(),
        "AWS3-HTTPS a=b"
    );

    let mut bad = HashMap::new();
    bad.insert("Bad Name".to_owned(), "v".to_owned());
    assert!(matches!(
        into_header_map(&bad),
        Err(Error::InvalidHeader { .. })
    ));
}
