use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

use super::ForecastProvider;
use crate::config::OpenWeatherMapConfig;
use crate::error::{ProviderError, ProviderErrorKind, Result, ShambaOpsError};
use crate::models::{ForecastLocation, ForecastPayload, ForecastPoint};

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const SERVICE: &str = "openweathermap";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const KELVIN_OFFSET: f64 = 273.15;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
    base_url: String,
}

// OpenWeatherMap API response structures. The API answers in its default
// units: Kelvin and m/s.
#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
    city: OwmCity,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    wind: OwmWind,
    #[serde(default)]
    rain: Option<OwmPrecipitation>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmPrecipitation {
    #[serde(rename = "3h", default)]
    three_hour: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCity {
    name: String,
    coord: OwmCoord,
}

#[derive(Debug, Deserialize)]
struct OwmCoord {
    lat: f64,
    lon: f64,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Result<Self> {
        Self::with_base_url(config, API_BASE_URL.to_string())
    }

    /// Custom base URL, for pointing tests at a stub server.
    pub fn with_base_url(config: OpenWeatherMapConfig, base_url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ShambaOpsError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Probe the API with a current-weather call.
    pub async fn test_connection(&self, latitude: f64, longitude: f64) -> Result<bool> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}",
            self.base_url, latitude, longitude, self.config.api_key
        );
        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        Ok(response.status().is_success())
    }

    fn convert_response(&self, response: OwmForecastResponse) -> ForecastPayload {
        let points = response
            .list
            .iter()
            .map(|item| ForecastPoint {
                timestamp: DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now),
                temp_c: item.main.temp - KELVIN_OFFSET,
                precipitation_mm: item.rain.as_ref().map(|r| r.three_hour).unwrap_or(0.0),
                wind_speed_ms: item.wind.speed,
                conditions: item.weather.iter().map(|w| w.main.clone()).collect(),
            })
            .collect();

        ForecastPayload {
            location: ForecastLocation {
                name: response.city.name,
                latitude: response.city.coord.lat,
                longitude: response.city.coord.lon,
            },
            points,
        }
    }
}

impl ForecastProvider for OpenWeatherMapClient {
    /// Fetch the 5-day/3-hour forecast. Errors carry a distinct kind per
    /// upstream condition so degraded-mode logging can say why.
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<ForecastPayload> {
        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}",
            self.base_url, latitude, longitude, self.config.api_key
        );

        let response = self.client.get(&url).send().await.map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::new(
                SERVICE,
                status_kind(status),
                format!("{}: {}", status, body),
            )
            .into());
        }

        let owm_response: OwmForecastResponse = response.json().await.map_err(|e| {
            ProviderError::new(
                SERVICE,
                ProviderErrorKind::Unknown,
                format!("failed to parse forecast response: {}", e),
            )
        })?;

        Ok(self.convert_response(owm_response))
    }
}

fn status_kind(status: reqwest::StatusCode) -> ProviderErrorKind {
    match status.as_u16() {
        401 => ProviderErrorKind::Auth,
        404 => ProviderErrorKind::NotFound,
        429 => ProviderErrorKind::RateLimited,
        500..=599 => ProviderErrorKind::Server,
        _ => ProviderErrorKind::Unknown,
    }
}

fn transport_error(e: reqwest::Error) -> ShambaOpsError {
    let kind = if e.is_timeout() {
        ProviderErrorKind::Timeout
    } else {
        ProviderErrorKind::Unknown
    };
    ProviderError::new(SERVICE, kind, e.to_string()).into()
}
