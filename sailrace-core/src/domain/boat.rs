use serde::{Deserialize, Serialize};

use super::ids::{BoatTypeId, IndividualId};

/// A boat class with its fleet and Portsmouth-style performance number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoatType {
    pub id: BoatTypeId,
    /// Class name, e.g. "Laser".
    #[serde(alias = "btype")]
    pub name: String,
    pub fleet: String,
    pub pyn: u32,
}

/// One sailor sailing one boat. A sailor who changes boats during a series
/// appears as several individuals with the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    pub id: IndividualId,
    pub boat_type_id: BoatTypeId,
    pub name: String,
    #[serde(default)]
    pub boat_number: Option<String>,
    /// Personal handicap. Stored but not applied by the corrector.
    #[serde(default)]
    pub ph: Option<i32>,
}
