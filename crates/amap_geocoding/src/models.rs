//! Wire models for the Amap regeo endpoint
//!
//! The raw response types mirror the provider JSON and are discarded after
//! mapping; [`AddressInfo`] is the normalized result handed to the caller.

use serde::{Deserialize, Serialize};

/// A loosely-typed scalar from the provider JSON
///
/// Amap serializes address fields as strings or numbers depending on the
/// region, and omits some entirely; absent fields decode as [`Scalar::Null`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Text(String),
    Number(serde_json::Number),
    #[default]
    Null,
}

impl Scalar {
    /// Normalize to a string; `Null` becomes the empty string
    pub fn coerce(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => number.to_string(),
            Self::Null => String::new(),
        }
    }

    /// True for `Null` and empty text; numbers are never empty
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Number(_) => false,
            Self::Null => true,
        }
    }
}

/// Raw regeo response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct RegeoResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub regeocode: Option<Regeocode>,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub infocode: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Regeocode {
    #[serde(rename = "addressComponent", default)]
    pub address_component: AddressComponent,
    #[serde(rename = "formatted_address", default)]
    pub formatted_address: Scalar,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AddressComponent {
    #[serde(default)]
    pub province: Scalar,
    #[serde(default)]
    pub city: Scalar,
    #[serde(default)]
    pub district: Scalar,
    #[serde(default)]
    pub township: Scalar,
    #[serde(default)]
    pub adcode: Scalar,
}

/// Normalized administrative address
///
/// `province_code` and `city_code` are the two- and four-character prefixes
/// of the six-character `district_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInfo {
    /// Province name
    pub province: String,
    /// Two-character province code
    pub province_code: String,
    /// City name; equals the province for municipalities without a city field
    pub city: String,
    /// Four-character city code
    pub city_code: String,
    /// District name; falls back to the township when absent
    pub district: String,
    /// Six-character district code
    pub district_code: String,
    /// Formatted address as reported by the provider
    pub address: String,
}
