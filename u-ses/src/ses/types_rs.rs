use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseMetadata {
    pub request_id: String,
}

/// 重复出现的`<member>`元素，只有一个元素时也是`Vec`
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct MemberList<T> {
    #[serde(default = "Vec::new")]
    pub member: Vec<T>,
}

// derive(Default)会要求T: Default
impl<T> Default for MemberList<T> {
    fn default() -> Self {
        Self { member: Vec::new() }
    }
}

//region verify_email_address / delete_verified_email_address
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct MetadataOnlyResponse {
    pub response_metadata: ResponseMetadata,
}
//endregion

//region list_verified_email_addresses
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ListVerifiedEmailAddressesResponse {
    pub list_verified_email_addresses_result: ListVerifiedEmailAddressesResult,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ListVerifiedEmailAddressesResult {
    #[serde(default)]
    pub verified_email_addresses: MemberList<String>,
}
//endregion

//region get_send_quota
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct GetSendQuotaResponse {
    pub get_send_quota_result: SendQuota,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SendQuota {
    #[serde(rename = "Max24HourSend")]
    pub max_24_hour_send: f64,
    #[serde(rename = "MaxSendRate")]
    pub max_send_rate: f64,
    #[serde(rename = "SentLast24Hours")]
    pub sent_last_24_hours: f64,
}
//endregion

//region get_send_statistics
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct GetSendStatisticsResponse {
    pub get_send_statistics_result: GetSendStatisticsResult,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct GetSendStatisticsResult {
    #[serde(default)]
    pub send_data_points: MemberList<SendDataPoint>,
}

/// 15分钟内的发送统计
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SendDataPoint {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub delivery_attempts: u64,
    pub bounces: u64,
    pub complaints: u64,
    pub rejects: u64,
}
//endregion

//region send_email
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailResponse {
    pub send_email_result: SendEmailResult,
    pub response_metadata: ResponseMetadata,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailResult {
    pub message_id: String,
}
//endregion
