use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::params::{
    ParamValues, ACCOUNT_ID, ADVERTISER_NAME, CREATIVE_ID, DECLARED_ATTRIBUTES,
    DECLARED_CLICK_URLS, DECLARED_RESTRICTED_CATEGORIES, DECLARED_VENDOR_IDS, VIDEO_URL,
};
use crate::utils::non_empty;

pub const MAX_CREATIVE_ID_BYTES: usize = 128;

/// A creative resource of the Real-time Bidding API.
///
/// Fields the server fills in and this tool does not name are kept in
/// `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creative {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creative_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertiser_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub declared_attributes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub declared_click_through_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub declared_restricted_categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub declared_vendor_ids: Vec<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_update_time: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A created creative as returned by the API.
///
/// `body` is the response exactly as received, including `null` and empty
/// values the typed `creative` drops when serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedCreative {
    pub creative: Creative,
    pub body: Value,
}

impl CreatedCreative {
    pub fn from_body(body: Value) -> serde_json::Result<Self> {
        let creative = Creative::deserialize(&body)?;
        Ok(Self { creative, body })
    }
}

pub fn parent_name(account_id: &str) -> String {
    format!("buyers/{account_id}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoCreativeRequest {
    pub parent: String,
    pub creative: Creative,
}

impl VideoCreativeRequest {
    pub fn from_values(values: &ParamValues) -> Result<Self> {
        let account_id = values.single(ACCOUNT_ID);
        if account_id.is_empty() {
            return Err(Error::MissingParameter(ACCOUNT_ID));
        }
        // Becomes a path segment of the request URL, so only a numeric id is accepted
        if !account_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidParameter {
                name: ACCOUNT_ID,
                value: account_id.to_string(),
            });
        }

        let creative_id = values.single(CREATIVE_ID);
        if creative_id.len() > MAX_CREATIVE_ID_BYTES {
            return Err(Error::CreativeIdTooLong(creative_id.len()));
        }

        let declared_vendor_ids = values
            .list(DECLARED_VENDOR_IDS)
            .iter()
            .map(|id| {
                id.parse::<i32>().map_err(|_| Error::InvalidParameter {
                    name: DECLARED_VENDOR_IDS,
                    value: id.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let creative = Creative {
            advertiser_name: non_empty(values.single(ADVERTISER_NAME)),
            creative_id: non_empty(creative_id),
            declared_attributes: values.list(DECLARED_ATTRIBUTES).to_vec(),
            declared_click_through_urls: values.list(DECLARED_CLICK_URLS).to_vec(),
            declared_restricted_categories: values.list(DECLARED_RESTRICTED_CATEGORIES).to_vec(),
            declared_vendor_ids,
            video: Some(VideoContent {
                video_url: non_empty(values.single(VIDEO_URL)),
                ..Default::default()
            }),
            ..Default::default()
        };

        Ok(Self {
            parent: parent_name(account_id),
            creative,
        })
    }
}
