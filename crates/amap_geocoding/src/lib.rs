//! Amap reverse-geocoding integration
//!
//! Client for the [Amap (AutoNavi) Web API](https://lbs.amap.com/api/webservice/guide/api/georegeo)
//! regeo endpoint: resolves a longitude/latitude pair into a normalized
//! administrative address (province, city, and district names plus their
//! division codes).
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern: [`GeocodingClient`] defines the
//! interface, implemented by [`AmapClient`]. Every call waits on a
//! client-owned single-token bucket so at most one request per refill
//! interval reaches the provider, and every call emits exactly one structured
//! log record carrying the caller's correlation identifier.
//!
//! # Example
//!
//! ```rust,ignore
//! use amap_geocoding::{AmapClient, AmapConfig, GeocodingClient};
//!
//! let config = AmapConfig {
//!     key: "your-api-key".to_string(),
//!     ..Default::default()
//! };
//! let client = AmapClient::new(&config)?;
//!
//! let address = client
//!     .reverse_geocode("order-1042", "113.93029", "22.53291")
//!     .await?;
//! println!("{} {} {}", address.province, address.city, address.district);
//! ```

mod client;
mod config;
mod error;
mod limiter;
mod models;

pub use client::{AmapClient, GeocodingClient};
pub use config::AmapConfig;
pub use error::GeocodingError;
pub use models::AddressInfo;
