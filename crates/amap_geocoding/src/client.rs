//! Amap reverse-geocoding client
//!
//! HTTP client for the Amap regeo endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::config::AmapConfig;
use crate::error::GeocodingError;
use crate::limiter::RateLimiter;
use crate::models::{AddressInfo, RegeoResponse};

/// Trait for reverse-geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolve a longitude/latitude pair to a normalized address
    ///
    /// `request_id` is an opaque caller-supplied identifier carried into the
    /// per-call log record for correlation; it never reaches the provider.
    /// Coordinates are passed through to the provider verbatim.
    async fn reverse_geocode(
        &self,
        request_id: &str,
        longitude: &str,
        latitude: &str,
    ) -> Result<AddressInfo, GeocodingError>;
}

/// Amap regeo client with outbound rate limiting
#[derive(Debug)]
pub struct AmapClient {
    client: Client,
    config: AmapConfig,
    limiter: RateLimiter,
}

impl AmapClient {
    /// Create a new Amap client
    ///
    /// # Errors
    ///
    /// Returns [`GeocodingError::Configuration`] if the configuration is
    /// invalid (an empty API key in particular), or
    /// [`GeocodingError::ConnectionFailed`] if the HTTP client cannot be
    /// initialized. A misconfigured client can never be constructed.
    pub fn new(config: &AmapConfig) -> Result<Self, GeocodingError> {
        config.validate().map_err(GeocodingError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("amap-geocoding/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            limiter: RateLimiter::new(Duration::from_millis(config.rate_limit_interval_ms)),
        })
    }

    /// Run the request pipeline: throttle, send, decode, extract
    async fn execute(
        &self,
        longitude: &str,
        latitude: &str,
    ) -> Result<AddressInfo, GeocodingError> {
        self.limiter.acquire().await;

        let url = format!("{}/geocode/regeo", self.config.base_url);
        let location = format!("{longitude},{latitude}");
        let params = [
            ("output", "JSON"),
            ("extensions", "base"),
            ("key", self.config.key.as_str()),
            ("location", location.as_str()),
        ];

        debug!(%location, "requesting reverse geocode");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        let body: RegeoResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Self::extract_address(body)
    }

    /// Map a decoded provider response into a normalized address
    fn extract_address(body: RegeoResponse) -> Result<AddressInfo, GeocodingError> {
        if body.status != "1" {
            return Err(GeocodingError::Provider {
                info: body.info,
                infocode: body.infocode,
            });
        }

        let regeocode = body.regeocode.ok_or_else(|| {
            GeocodingError::ParseError("No regeocode data in response".to_string())
        })?;
        let component = regeocode.address_component;

        let district_code = component.adcode.coerce();
        if district_code.chars().count() != 6 {
            return Err(GeocodingError::InvalidAdcode {
                adcode: district_code,
            });
        }

        let province = component.province.coerce();

        let city = if component.city.is_empty() {
            province.clone()
        } else {
            component.city.coerce()
        };

        let district = if component.district.is_empty() {
            component.township.coerce()
        } else {
            component.district.coerce()
        };

        if province.is_empty() || city.is_empty() || district.is_empty() {
            return Err(GeocodingError::InvalidRegion);
        }

        Ok(AddressInfo {
            province,
            province_code: char_prefix(&district_code, 2),
            city,
            city_code: char_prefix(&district_code, 4),
            district,
            district_code,
            address: regeocode.formatted_address.coerce(),
        })
    }
}

#[async_trait]
impl GeocodingClient for AmapClient {
    #[instrument(skip(self))]
    async fn reverse_geocode(
        &self,
        request_id: &str,
        longitude: &str,
        latitude: &str,
    ) -> Result<AddressInfo, GeocodingError> {
        let result = self.execute(longitude, latitude).await;

        // Exactly one record per call, on every exit path.
        match &result {
            Ok(_) => info!(%request_id, %longitude, %latitude, "reverse geocode"),
            Err(error) => info!(%request_id, %longitude, %latitude, %error, "reverse geocode"),
        }

        result
    }
}

/// First `n` characters of `s`
fn char_prefix(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: serde_json::Value) -> RegeoResponse {
        serde_json::from_value(json).unwrap()
    }

    fn success_body(component: serde_json::Value, formatted: &str) -> serde_json::Value {
        serde_json::json!({
            "status": "1",
            "regeocode": {
                "addressComponent": component,
                "formatted_address": formatted
            },
            "info": "OK",
            "infocode": "10000"
        })
    }

    #[test]
    fn test_extract_full_address() {
        let body = response(success_body(
            serde_json::json!({
                "province": "广东省",
                "city": "深圳市",
                "district": "南山区",
                "township": "粤海街道",
                "adcode": "440305"
            }),
            "广东省深圳市南山区科苑路1号",
        ));

        let address = AmapClient::extract_address(body).unwrap();
        assert_eq!(address.province, "广东省");
        assert_eq!(address.province_code, "44");
        assert_eq!(address.city, "深圳市");
        assert_eq!(address.city_code, "4403");
        assert_eq!(address.district, "南山区");
        assert_eq!(address.district_code, "440305");
        assert_eq!(address.address, "广东省深圳市南山区科苑路1号");
    }

    #[test]
    fn test_extract_falls_back_to_province_and_township() {
        let body = response(success_body(
            serde_json::json!({
                "province": "广东省",
                "city": "",
                "district": "",
                "township": "某街道",
                "adcode": "440305"
            }),
            "某路1号",
        ));

        let address = AmapClient::extract_address(body).unwrap();
        assert_eq!(address.province, "广东省");
        assert_eq!(address.city, "广东省");
        assert_eq!(address.district, "某街道");
        assert_eq!(address.province_code, "44");
        assert_eq!(address.city_code, "4403");
        assert_eq!(address.district_code, "440305");
        assert_eq!(address.address, "某路1号");
    }

    #[test]
    fn test_extract_coerces_numeric_adcode() {
        let body = response(success_body(
            serde_json::json!({
                "province": "北京市",
                "city": null,
                "district": "朝阳区",
                "township": null,
                "adcode": 110105
            }),
            "北京市朝阳区",
        ));

        let address = AmapClient::extract_address(body).unwrap();
        assert_eq!(address.district_code, "110105");
        assert_eq!(address.city, "北京市");
    }

    #[test]
    fn test_provider_failure_status() {
        let body = response(serde_json::json!({
            "status": "0",
            "info": "INVALID_USER_KEY",
            "infocode": "10001"
        }));

        let err = AmapClient::extract_address(body).unwrap_err();
        assert_eq!(err.to_string(), "INVALID_USER_KEY(10001)");
        assert!(matches!(err, GeocodingError::Provider { .. }));
    }

    #[test]
    fn test_short_adcode_is_rejected() {
        let body = response(success_body(
            serde_json::json!({
                "province": "广东省",
                "city": "深圳市",
                "district": "南山区",
                "township": "",
                "adcode": "4403"
            }),
            "somewhere",
        ));

        let err = AmapClient::extract_address(body).unwrap_err();
        assert_eq!(err.to_string(), "address code invalid");
        assert!(matches!(err, GeocodingError::InvalidAdcode { .. }));
    }

    #[test]
    fn test_missing_adcode_is_rejected() {
        let body = response(success_body(
            serde_json::json!({
                "province": "广东省",
                "city": "深圳市",
                "district": "南山区",
                "township": ""
            }),
            "somewhere",
        ));

        let err = AmapClient::extract_address(body).unwrap_err();
        assert!(matches!(err, GeocodingError::InvalidAdcode { .. }));
    }

    #[test]
    fn test_empty_region_after_fallback_is_rejected() {
        let body = response(success_body(
            serde_json::json!({
                "province": "",
                "city": "",
                "district": "",
                "township": "",
                "adcode": "440305"
            }),
            "somewhere",
        ));

        let err = AmapClient::extract_address(body).unwrap_err();
        assert_eq!(err.to_string(), "administrative region invalid");
        assert!(matches!(err, GeocodingError::InvalidRegion));
    }

    #[test]
    fn test_success_status_without_regeocode_is_parse_error() {
        let body = response(serde_json::json!({
            "status": "1",
            "info": "OK",
            "infocode": "10000"
        }));

        let err = AmapClient::extract_address(body).unwrap_err();
        assert!(matches!(err, GeocodingError::ParseError(_)));
    }

    #[test]
    fn test_client_creation_requires_key() {
        let config = AmapConfig::default();
        let result = AmapClient::new(&config);
        assert!(matches!(result, Err(GeocodingError::Configuration(_))));
    }

    #[test]
    fn test_client_creation_with_valid_config() {
        let config = AmapConfig::for_testing();
        assert!(AmapClient::new(&config).is_ok());
    }

    #[test]
    fn test_char_prefix() {
        assert_eq!(char_prefix("440305", 2), "44");
        assert_eq!(char_prefix("440305", 4), "4403");
        assert_eq!(char_prefix("440305", 6), "440305");
        assert_eq!(char_prefix("44", 4), "44");
    }
}
