use super::Client;
use super::Error;
use super::types_rs::{
    ListVerifiedEmailAddressesResponse, MetadataOnlyResponse, ResponseMetadata,
};
use bon::Builder;
use serde::Serialize;
use std::collections::BTreeMap;
use u_ses_common::query::to_query_map;

//region verify_email_address
/// 向指定地址发送一封确认邮件，确认后该地址成为已验证地址
#[derive(Builder, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyEmailAddress<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,

    email_address: &'a str,
}

impl Client {
    pub fn verify_email_address(&self) -> VerifyEmailAddressBuilder<'_> {
        VerifyEmailAddress::builder(self)
    }
}

impl VerifyEmailAddress<'_> {
    pub async fn send(&self) -> Result<ResponseMetadata, Error> {
        let params = to_query_map(self)?;
        let resp: MetadataOnlyResponse = self.client.call("VerifyEmailAddress", params).await?;
        Ok(resp.response_metadata)
    }
}
//endregion

//region list_verified_email_addresses
#[derive(Builder)]
pub struct ListVerifiedEmailAddresses<'a> {
    #[builder(start_fn)]
    client: &'a Client,
}

impl Client {
    pub fn list_verified_email_addresses(&self) -> ListVerifiedEmailAddressesBuilder<'_> {
        ListVerifiedEmailAddresses::builder(self)
    }
}

impl ListVerifiedEmailAddresses<'_> {
    /// 返回所有已验证的地址，没有时为空`Vec`
    pub async fn send(&self) -> Result<Vec<String>, Error> {
        let resp: ListVerifiedEmailAddressesResponse = self
            .client
            .call("ListVerifiedEmailAddresses", BTreeMap::new())
            .await?;
        Ok(resp
            .list_verified_email_addresses_result
            .verified_email_addresses
            .member)
    }
}
//endregion

//region delete_verified_email_address
#[derive(Builder, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteVerifiedEmailAddress<'a> {
    #[builder(start_fn)]
    #[serde(skip_serializing)]
    client: &'a Client,

    email_address: &'a str,
}

impl Client {
    pub fn delete_verified_email_address(&self) -> DeleteVerifiedEmailAddressBuilder<'_> {
        DeleteVerifiedEmailAddress::builder(self)
    }
}

impl DeleteVerifiedEmailAddress<'_> {
    pub async fn send(&self) -> Result<ResponseMetadata, Error> {
        let params = to_query_map(self)?;
        let resp: MetadataOnlyResponse = self
            .client
            .call("DeleteVerifiedEmailAddress", params)
            .await?;
        Ok(resp.response_metadata)
    }
}
//endregion
