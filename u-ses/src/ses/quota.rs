use super::Client;
use super::Error;
use super::types_rs::{GetSendQuotaResponse, GetSendStatisticsResponse, SendDataPoint, SendQuota};
use bon::Builder;
use std::collections::BTreeMap;

//region get_send_quota
#[derive(Builder)]
pub struct GetSendQuota<'a> {
    #[builder(start_fn)]
    client: &'a Client,
}

impl Client {
    pub fn get_send_quota(&self) -> GetSendQuotaBuilder<'_> {
        GetSendQuota::builder(self)
    }
}

impl GetSendQuota<'_> {
    pub async fn send(&self) -> Result<SendQuota, Error> {
        let resp: GetSendQuotaResponse = self.client.call("GetSendQuota", BTreeMap::new()).await?;
        Ok(resp.get_send_quota_result)
    }
}
//endregion

//region get_send_statistics
/// 最近两周的发送统计，每个数据点对应15分钟
#[derive(Builder)]
pub struct GetSendStatistics<'a> {
    #[builder(start_fn)]
    client: &'a Client,
}

impl Client {
    pub fn get_send_statistics(&self) -> GetSendStatisticsBuilder<'_> {
        GetSendStatistics::builder(self)
    }
}

impl GetSendStatistics<'_> {
    pub async fn send(&self) -> Result<Vec<SendDataPoint>, Error> {
        let resp: GetSendStatisticsResponse = self
            .client
            .call("GetSendStatistics", BTreeMap::new())
            .await?;
        Ok(resp.get_send_statistics_result.send_data_points.member)
    }
}
//endregion
