use crate::config::EvccConfig;
use crate::models::{ChargeSession, IntelligentVehicle, VehicleInfo};
use log::{debug, warn};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub mod utils;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Sink for failure messages, injected by whoever owns the adapter
pub type LogFn = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvccError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),
    #[error("invalid JSON: {0}")]
    Parse(String),
}

impl EvccError {
    pub fn kind(&self) -> &'static str {
        match self {
            EvccError::Network(_) => "network",
            EvccError::HttpStatus(_) => "http_status",
            EvccError::Parse(_) => "parse",
        }
    }
}

/// Client for the REST API of a local EVCC instance.
///
/// EVCC may know several vehicles and sessions, we only ever look at the first
/// vehicle and the current session.
#[derive(Clone)]
pub struct EvccApi {
    base_url: String,
    timeout: Duration,
    log: LogFn,
    client: reqwest::Client,
}

impl EvccApi {
    /// Failures are forwarded to the `log` crate
    pub fn new(base_url: &str) -> Self {
        return EvccApi::with_log(base_url, |msg| warn!("{msg}"));
    }

    pub fn with_log<F>(base_url: &str, log: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        return EvccApi {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            log: Arc::new(log),
            client: reqwest::Client::new(),
        };
    }

    pub fn from_config(conf: &EvccConfig) -> Self {
        return EvccApi::new(&conf.base_url).with_timeout(Duration::from_secs(conf.timeout));
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        return self;
    }

    pub fn base_url(&self) -> &str {
        return &self.base_url;
    }

    pub fn timeout(&self) -> Duration {
        return self.timeout;
    }

    async fn get_json(&self, endpoint: &str) -> Result<Value, EvccError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("Requesting {url}");

        let res = self.client.get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| EvccError::Network(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(EvccError::HttpStatus(status.as_u16()));
        }

        let body = res.text().await.map_err(|e| EvccError::Network(e.to_string()))?;
        return serde_json::from_str(&body).map_err(|e| EvccError::Parse(e.to_string()));
    }

    /// Vehicle state, `Ok(None)` if EVCC reports no vehicle
    pub async fn try_fetch_vehicle_info(&self) -> Result<Option<VehicleInfo>, EvccError> {
        let doc = self.get_json("vehicles").await?;
        return Ok(vehicle_info_from_json(&doc));
    }

    /// Current session, empty if EVCC reports none
    pub async fn try_fetch_charge_sessions(&self) -> Result<Vec<ChargeSession>, EvccError> {
        let doc = self.get_json("charge").await?;
        return Ok(charge_sessions_from_json(&doc));
    }

    /// Vehicle state, empty on any failure.
    ///
    /// An empty result means "unknown", not "no capacity" or "not charging".
    pub async fn fetch_vehicle_info(&self) -> VehicleInfo {
        match self.try_fetch_vehicle_info().await {
            Ok(vi) => vi.unwrap_or_default(),
            Err(e) => {
                (self.log)(&format!("EVCC error: {e}"));
                VehicleInfo::default()
            }
        }
    }

    /// Current session as a list of zero or one entries, empty on any failure
    pub async fn fetch_charge_sessions(&self) -> Vec<ChargeSession> {
        match self.try_fetch_charge_sessions().await {
            Ok(sessions) => sessions,
            Err(e) => {
                (self.log)(&format!("EVCC error: {e}"));
                Vec::new()
            }
        }
    }

    /// Vehicle state in the provider schema of the scheduler. Only queries `/vehicles`.
    pub async fn get_intelligent_vehicle(&self) -> IntelligentVehicle {
        let vi = self.fetch_vehicle_info().await;
        return IntelligentVehicle::from_vehicle_info(&vi);
    }
}

/// Map a `/vehicles` response. Only the first vehicle is used.
pub fn vehicle_info_from_json(doc: &Value) -> Option<VehicleInfo> {
    let v = doc.get("vehicles")?.as_array()?.first()?;
    if !v.is_object() {
        debug!("First vehicle is not an object, ignoring it");
        return None;
    }

    let vi = VehicleInfo {
        model: utils::json_to_string(v, "title"),
        battery_size: utils::json_to_f64(v, "capacity"),
        soc: utils::json_to_f64(v, "soc"),
        charging: utils::json_to_bool(v, "connected"),
        charge_power: utils::json_to_f64(v, "chargePower"),
    };
    debug!("Vehicle info: {vi:?}");
    return Some(vi);
}

/// Map a `/charge` response into zero or one sessions
pub fn charge_sessions_from_json(doc: &Value) -> Vec<ChargeSession> {
    let Some(s) = doc.get("session").filter(|s| utils::is_filled_object(s)) else {
        return Vec::new();
    };

    let cs = ChargeSession {
        start: utils::json_to_value(s, "start"),
        duration: utils::json_to_f64(s, "duration"),
        energy: utils::json_to_f64(s, "energy"),
        charge_power: utils::json_to_f64(s, "chargePower"),
    };
    debug!("Charge session: {cs:?}");
    return vec![cs];
}
