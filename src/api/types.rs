use chrono::{DateTime, FixedOffset};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::deserializers::lenient_string;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// One `field -> direction` entry of a query sort.
///
/// Serializes as `{"<field>": {"order": "asc"|"desc"}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub field: String,
    pub order: SortOrder,
}

impl SortField {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct OrderSpec {
    order: SortOrder,
}

impl Serialize for SortField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &OrderSpec { order: self.order })?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for SortField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, OrderSpec>::deserialize(deserializer)?;
        let mut entries = entries.into_iter();
        match (entries.next(), entries.next()) {
            (Some((field, spec)), None) => Ok(Self {
                field,
                order: spec.order,
            }),
            _ => Err(de::Error::custom("sort entry must name exactly one field")),
        }
    }
}

/// Options for the query-style search endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    /// Result offset (default 0)
    pub from: Option<u32>,
    /// Page size (default from `ClientConfig::default_page_size`)
    pub size: Option<u32>,
    /// Sort (default from `ClientConfig::default_sort`)
    pub sort: Option<Vec<SortField>>,
    /// Auth placement (default from `ClientConfig::use_auth_header`)
    pub use_auth_header: Option<bool>,
}

/// Options shared by endpoints whose only knob is auth placement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub use_auth_header: Option<bool>,
}

/// `total` block of a query response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Total {
    pub value: u64,
    #[serde(default)]
    pub relation: Option<String>,
}

/// One filing as returned by the query API and the real-time stream.
///
/// Fields the service adds beyond the common ones land in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filing {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub accession_no: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cik: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ticker: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub company_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub form_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub filed_at: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub period_of_report: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub link_to_html: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub link_to_txt: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub link_to_filing_details: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Filing {
    /// `filedAt` parsed as an RFC 3339 timestamp
    pub fn filed_at_datetime(&self) -> Option<DateTime<FixedOffset>> {
        self.filed_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    }
}

/// Typed body of a query API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilingsResponse {
    #[serde(default)]
    pub total: Option<Total>,
    #[serde(default)]
    pub filings: Vec<Filing>,
}
