use crate::Error;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use url::form_urlencoded;

/// 把请求参数序列化为扁平的`BTreeMap<String, String>`
///
/// 嵌套对象用`.`连接字段名，数组按下标展开且下标从1开始：
/// `{"Destination": {"ToAddresses": {"member": ["a", "b"]}}}` 会得到
/// `Destination.ToAddresses.member.1=a` 和 `Destination.ToAddresses.member.2=b`。
///
/// `null`和空数组不产生任何key，调用者应配合`skip_serializing_none`使用。
/// 传入的query需要是一个to_value后为Value::Object的类型
pub fn to_query_map(query: &impl Serialize) -> Result<BTreeMap<String, String>, Error> {
    let v = serde_json::to_value(query)?;
    match v {
        Value::Object(map) => {
            let mut res = BTreeMap::new();
            for (k, val) in &map {
                flatten_with_prefix(k, val, &mut res);
            }
            Ok(res)
        }
        _ => Err(Error::Common(
            "to_query_map: input query is not an object".to_owned(),
        )),
    }
}

fn flatten_with_prefix(prefix: &str, v: &Value, out: &mut BTreeMap<String, String>) {
    match v {
        Value::Null => {}
        Value::Bool(b) => {
            out.insert(prefix.to_owned(), b.to_string());
        }
        Value::Number(n) => {
            out.insert(prefix.to_owned(), n.to_string());
        }
        Value::String(s) => {
            out.insert(prefix.to_owned(), s.clone());
        }
        Value::Array(arr) => {
            for (i, item) in arr.iter().enumerate() {
                // 下标从 1 开始："member.1"、"member.2"…
                let new_prefix = format!("{prefix}.{}", i + 1);
                flatten_with_prefix(&new_prefix, item, out);
            }
        }
        Value::Object(map) => {
            for (k, val) in map {
                let new_prefix = format!("{prefix}.{k}");
                flatten_with_prefix(&new_prefix, val, out);
            }
        }
    }
}

/// application/x-www-form-urlencoded 编码
pub fn encode_form<'a>(params: impl IntoIterator<Item = (&'a String, &'a String)>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (k, v) in params {
        serializer.append_pair(k, v);
    }
    serializer.finish()
}

#[test]
fn to_query_map_test() {
    let v = serde_json::json!({
        "Action": "SendEmail",
        "Destination": {
            "ToAddresses": { "member": ["a@example.com", "b@example.com"] },
            "CcAddresses": { "member": [] }
        },
        "Skipped": null,
        "Max": 3,
        "Flag": true
    });
    let map = to_query_map(&v).unwrap();

    let expect: BTreeMap<String, String> = [
        ("Action", "SendEmail"),
        ("Destination.ToAddresses.member.1", "a@example.com"),
        ("Destination.ToAddresses.member.2", "b@example.com"),
        ("Flag", "true"),
        ("Max", "3"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect();
    assert_eq!(map, expect);

    assert!(to_query_map(&vec!["not", "object"]).is_err());
}

#[test]
fn encode_form_test() {
    let mut map = BTreeMap::new();
    map.insert("Action".to_owned(), "SendEmail".to_owned());
    map.insert("Message.Subject.Data".to_owned(), "Hi there & bye".to_owned());
    map.insert("Source".to_owned(), "a@example.com".to_owned());
    assert_eq!(
        encode_form(&map),
        "Action=SendEmail&Message.Subject.Data=Hi+there+%26+bye&Source=a%40example.com"
    );
}
