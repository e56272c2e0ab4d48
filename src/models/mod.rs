use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDateTime, Utc};


pub const PROVIDER_EVCC: &str = "EVCC";

/// Charging state of the (single) vehicle known to EVCC
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VehicleInfo {
    /// Vehicle title as configured in EVCC
    pub model: Option<String>,
    /// Battery capacity in kWh
    pub battery_size: Option<f64>,
    /// State of charge in percent
    pub soc: Option<f64>,
    /// Taken from the `connected` flag of the vehicle
    pub charging: Option<bool>,
    /// Charge power in kW
    pub charge_power: Option<f64>,
}

impl VehicleInfo {
    /// True if nothing is known about the vehicle, either because the
    /// request failed or because EVCC reported no vehicle at all
    pub fn is_empty(&self) -> bool {
        return self.model.is_none()
            && self.battery_size.is_none()
            && self.soc.is_none()
            && self.charging.is_none()
            && self.charge_power.is_none();
    }

    /// Unknown charging state counts as not charging
    pub fn is_charging(&self) -> bool {
        return self.charging.unwrap_or(false);
    }
}

/// The current or most recent charge session
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChargeSession {
    /// Passed through untouched, EVCC decides on the format
    pub start: Option<serde_json::Value>,
    pub duration: Option<f64>,
    pub energy: Option<f64>,
    pub charge_power: Option<f64>,
}

impl ChargeSession {
    /// Try to read `start` as a point in time.
    ///
    /// Accepts RFC 3339 strings, naive `YYYY-MM-DDTHH:MM[:SS]` strings (taken as UTC)
    /// and unix timestamps in seconds.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        match self.start.as_ref()? {
            serde_json::Value::String(s) => {
                if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
                    return Some(ts.with_timezone(&Utc));
                }

                for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
                    if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
                        return Some(ts.and_utc());
                    }
                }
                None
            }
            serde_json::Value::Number(n) => {
                let secs = n.as_i64()?;
                DateTime::from_timestamp(secs, 0)
            }
            _ => None,
        }
    }
}

/// Charging status as understood by the scheduling side
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum VehicleStatus {
    #[serde(rename = "LIVE")]
    Live,
    #[serde(rename = "IDLE")]
    Idle,
}

impl VehicleStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "LIVE" => Some(VehicleStatus::Live),
            "IDLE" => Some(VehicleStatus::Idle),
            _ => None,
        }
    }

    pub fn to_string(&self) -> String {
        match self {
            VehicleStatus::Live => "LIVE".to_string(),
            VehicleStatus::Idle => "IDLE".to_string(),
        }
    }
}

/// Vehicle record in the shape the scheduler expects from a smart charging provider.
///
/// EVCC has no notion of target times or SOC limits, those fields stay `None`
/// and serialize as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntelligentVehicle {
    pub vehicle_battery_size_in_kwh: Option<f64>,
    pub charge_point_power_in_kw: Option<f64>,
    pub weekday_target_time: Option<String>,
    pub weekday_target_soc: Option<f64>,
    pub weekend_target_time: Option<String>,
    pub weekend_target_soc: Option<f64>,
    pub minimum_soc: Option<f64>,
    pub maximum_soc: Option<f64>,
    pub suspended: bool,
    pub model: Option<String>,
    pub provider: String,
    pub status: VehicleStatus,
}

impl IntelligentVehicle {
    pub fn from_vehicle_info(vi: &VehicleInfo) -> Self {
        let charging = vi.is_charging();

        IntelligentVehicle {
            vehicle_battery_size_in_kwh: vi.battery_size,
            charge_point_power_in_kw: vi.charge_power,
            weekday_target_time: None,
            /* EVCC only knows the current SOC, this is what the scheduler gets as target */
            weekday_target_soc: vi.soc,
            weekend_target_time: None,
            weekend_target_soc: None,
            minimum_soc: None,
            maximum_soc: None,
            suspended: !charging,
            model: vi.model.clone(),
            provider: PROVIDER_EVCC.to_string(),
            status: if charging { VehicleStatus::Live } else { VehicleStatus::Idle },
        }
    }
}

impl From<&VehicleInfo> for IntelligentVehicle {
    fn from(vi: &VehicleInfo) -> Self {
        IntelligentVehicle::from_vehicle_info(vi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_intelligent_vehicle_while_charging() {
        let vi = VehicleInfo {
            model: Some("Tesla".to_string()),
            battery_size: Some(75.0),
            soc: Some(80.0),
            charging: Some(true),
            charge_power: Some(11.0),
        };

        let iv = IntelligentVehicle::from_vehicle_info(&vi);
        let expected = json!({
            "vehicleBatterySizeInKwh": 75.0,
            "chargePointPowerInKw": 11.0,
            "weekdayTargetTime": null,
            "weekdayTargetSoc": 80.0,
            "weekendTargetTime": null,
            "weekendTargetSoc": null,
            "minimumSoc": null,
            "maximumSoc": null,
            "suspended": false,
            "model": "Tesla",
            "provider": "EVCC",
            "status": "LIVE"
        });
        assert_eq!(serde_json::to_value(&iv).unwrap(), expected);
    }

    #[test]
    fn test_intelligent_vehicle_from_empty_info() {
        let iv = IntelligentVehicle::from(&VehicleInfo::default());
        assert!(iv.suspended);
        assert_eq!(iv.status, VehicleStatus::Idle);
        assert_eq!(iv.provider, "EVCC");
        assert_eq!(iv.model, None);
        assert_eq!(iv.vehicle_battery_size_in_kwh, None);
    }

    #[test]
    fn test_intelligent_vehicle_not_charging() {
        let vi = VehicleInfo { charging: Some(false), soc: Some(42.0), ..Default::default() };
        let iv = IntelligentVehicle::from_vehicle_info(&vi);
        assert!(iv.suspended);
        assert_eq!(iv.status.to_string(), "IDLE");
        assert_eq!(iv.weekday_target_soc, Some(42.0));
    }

    #[test]
    fn test_vehicle_info_is_empty() {
        assert!(VehicleInfo::default().is_empty());
        let vi = VehicleInfo { soc: Some(10.0), ..Default::default() };
        assert!(!vi.is_empty());
    }

    #[test]
    fn test_vehicle_status_strings() {
        assert_eq!(VehicleStatus::from_str("LIVE"), Some(VehicleStatus::Live));
        assert_eq!(VehicleStatus::from_str("IDLE"), Some(VehicleStatus::Idle));
        assert_eq!(VehicleStatus::from_str("live"), None);
    }

    #[test]
    fn test_session_started_at() {
        let mut session = ChargeSession { start: Some(json!("2024-01-01T10:00")), ..Default::default() };
        let ts = session.started_at().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-01T10:00:00+00:00");

        session.start = Some(json!("2024-01-01T10:00:00+01:00"));
        assert_eq!(session.started_at().unwrap().to_rfc3339(), "2024-01-01T09:00:00+00:00");

        session.start = Some(json!(1704103200));
        assert_eq!(session.started_at().unwrap().to_rfc3339(), "2024-01-01T10:00:00+00:00");

        session.start = Some(json!("yesterday"));
        assert_eq!(session.started_at(), None);

        session.start = None;
        assert_eq!(session.started_at(), None);
    }
}
