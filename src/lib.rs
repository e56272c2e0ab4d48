//! EVCC vehicle data adapter
//!
//! Reads vehicle and charge session data from the REST API of a local EVCC
//! instance and maps it into the records used by the scheduling side.

pub mod config;
pub mod models;
pub mod evcc;

// Re-export common types for easier access
pub use models::{ChargeSession, IntelligentVehicle, VehicleInfo, VehicleStatus};
pub use evcc::{EvccApi, EvccError};
pub use config::{Config, EvccConfig};
