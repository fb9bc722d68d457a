use serde::Serialize;

/// Physical parameters decoded from a simulation filename.
///
/// Tokens are kept verbatim: they are echoed into output filenames and never
/// used in arithmetic, so `3.0e+03` must not come back as `3000`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationFileName {
    pub photon_count: String,
    pub identity: SimulationIdentity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "grammar", rename_all = "snake_case")]
pub enum SimulationIdentity {
    WithTemperature {
        ejecta_mass: String,
        half_opening_angle: String,
        temperature: String,
    },
    NoTemperature {
        ejecta_mass: String,
        half_opening_angle: String,
    },
    BinaryMerger {
        ejecta_mass_dynamical: String,
        ejecta_mass_wind: String,
        half_opening_angle: String,
    },
}

impl SimulationIdentity {
    pub fn half_opening_angle(&self) -> &str {
        match self {
            Self::WithTemperature {
                half_opening_angle, ..
            }
            | Self::NoTemperature {
                half_opening_angle, ..
            }
            | Self::BinaryMerger {
                half_opening_angle, ..
            } => half_opening_angle,
        }
    }

    pub fn temperature(&self) -> Option<&str> {
        match self {
            Self::WithTemperature { temperature, .. } => Some(temperature.as_str()),
            Self::NoTemperature { .. } | Self::BinaryMerger { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EjectaMass {
    Total { mass: f64 },
    Components { dynamical: f64, wind: f64 },
}

/// Numeric view of an output SED filename.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutputSedName {
    pub cos_theta: f64,
    pub ejecta_mass: EjectaMass,
    pub half_opening_angle: f64,
    pub temperature: Option<f64>,
}
