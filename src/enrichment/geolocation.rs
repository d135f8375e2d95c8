//! Observer location from the public IP address (`ip-api.com`).
use hifitime::Epoch;
use log::debug;
use serde::Deserialize;

use crate::{env_state::MeraiEnv, merai_errors::MeraiError, observers::ObserverFrame};

pub const IP_API_URL: &str = "http://ip-api.com/json/";

#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// `"City, Country"`.
    pub label: String,
}

impl GeoLocation {
    /// Observer frame at this location.
    pub fn observer_at(&self, instant: Epoch) -> Result<ObserverFrame, MeraiError> {
        ObserverFrame::new(self.latitude, self.longitude, instant)
    }
}

pub trait GeoLocator {
    fn resolve_location(&self) -> Result<GeoLocation, MeraiError>;
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: Option<String>,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IpGeoLocator {
    env: MeraiEnv,
    url: String,
}

impl IpGeoLocator {
    pub fn new(env: MeraiEnv) -> Self {
        Self::with_url(env, IP_API_URL)
    }

    pub fn with_url(env: MeraiEnv, url: &str) -> Self {
        IpGeoLocator {
            env,
            url: url.to_string(),
        }
    }
}

impl GeoLocator for IpGeoLocator {
    /// Errors
    /// ----------
    /// * [`MeraiError::ExternalTimeout`] when the service does not answer in time,
    /// * [`MeraiError::LookupMiss`] for every other failure.
    fn resolve_location(&self) -> Result<GeoLocation, MeraiError> {
        let body = self.env.get_from_url(&self.url).map_err(|e| match e {
            MeraiError::ExternalTimeout(_) => e,
            other => MeraiError::LookupMiss(format!("geolocation request failed: {other}")),
        })?;
        let location = parse_ip_api(&body)?;
        debug!(
            "Located observer at {} ({:.4}, {:.4})",
            location.label, location.latitude, location.longitude
        );
        Ok(location)
    }
}

/// Decode an `ip-api.com` JSON answer.
pub fn parse_ip_api(body: &str) -> Result<GeoLocation, MeraiError> {
    let raw: IpApiResponse = serde_json::from_str(body)
        .map_err(|e| MeraiError::LookupMiss(format!("malformed geolocation answer: {e}")))?;

    if raw.status.as_deref() == Some("fail") {
        return Err(MeraiError::LookupMiss(format!(
            "geolocation refused: {}",
            raw.message.as_deref().unwrap_or("no reason given")
        )));
    }

    let (Some(latitude), Some(longitude)) = (raw.lat, raw.lon) else {
        return Err(MeraiError::LookupMiss(
            "geolocation answer has no coordinates".to_string(),
        ));
    };

    let label = match (raw.city, raw.country) {
        (Some(city), Some(country)) => format!("{city}, {country}"),
        (Some(place), None) | (None, Some(place)) => place,
        (None, None) => "Unknown location".to_string(),
    };

    Ok(GeoLocation {
        latitude,
        longitude,
        label,
    })
}
