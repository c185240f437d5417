use serde::{Deserialize, Serialize};

use crate::travel_matrices::TravelMatrices;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TravelMatrixProvider {
    /// https://project-osrm.org/docs/v5.24.0/api/#table-service
    Osrm {
        #[serde(default = "default_osrm_profile")]
        profile: String,
    },

    AsTheCrowFlies {
        speed_kmh: f64,
    },

    Custom {
        matrices: TravelMatrices,
    },
}

fn default_osrm_profile() -> String {
    String::from("driving")
}

impl Default for TravelMatrixProvider {
    fn default() -> Self {
        TravelMatrixProvider::Osrm {
            profile: default_osrm_profile(),
        }
    }
}
