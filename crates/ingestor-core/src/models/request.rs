use serde::{Deserialize, Deserializer};

use super::identity::OwningIdentity;
use crate::error::AppError;

/// Decoded JSON body of an upload request.
///
/// Every field is optional at the parsing stage; presence rules are enforced by
/// [`IngestRequest::validate`]. Empty strings deserialize as `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    /// Base64-encoded image
    #[serde(default, deserialize_with = "non_empty")]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub account_id: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub champion_fund_id: Option<String>,
    /// Business content category, used as the second key segment
    #[serde(rename = "type", default, deserialize_with = "non_empty")]
    pub category: Option<String>,
    #[serde(rename = "ccampaignId", default, deserialize_with = "non_empty")]
    pub campaign_id: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub content_document_id: Option<String>,
    /// Caller-declared provenance; never used to decide the stored format
    #[serde(default, deserialize_with = "non_empty")]
    pub content_type: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub content_version_id: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub user_id: Option<String>,
}

/// Ownership fields of a request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOwnership {
    pub identity: OwningIdentity,
    pub category: String,
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

impl IngestRequest {
    /// Enforce the identity and category rules.
    ///
    /// A category and at least one of `accountId`/`championFundId` are required.
    /// `championFundId` cannot be combined with `accountId` or `ccampaignId`.
    pub fn validate(&self) -> Result<ValidatedOwnership, AppError> {
        let category = self.category.clone();

        let (identity, category) = match (&self.account_id, &self.champion_fund_id, category) {
            (None, None, _) => {
                return Err(AppError::MissingMetadata(
                    "one of accountId or championFundId is required".to_string(),
                ))
            }
            (_, _, None) => {
                return Err(AppError::MissingMetadata("type is required".to_string()))
            }
            (Some(_), Some(_), _) => {
                return Err(AppError::IdMismatch(
                    "championFundId cannot be combined with accountId".to_string(),
                ))
            }
            (None, Some(_), _) if self.campaign_id.is_some() => {
                return Err(AppError::IdMismatch(
                    "championFundId cannot be combined with ccampaignId".to_string(),
                ))
            }
            (Some(account_id), None, Some(category)) => {
                (OwningIdentity::Account(account_id.clone()), category)
            }
            (None, Some(fund_id), Some(category)) => {
                (OwningIdentity::ChampionFund(fund_id.clone()), category)
            }
        };

        Ok(ValidatedOwnership { identity, category })
    }
}
