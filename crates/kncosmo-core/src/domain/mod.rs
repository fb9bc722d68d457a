pub mod errors;

pub use errors::{KnError, KnErrorCategory, KnResult, ParserResult};

use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SedFormat {
    /// `[wavelength, flux × n_time_bins]` block, written as-is.
    #[default]
    Raw,
    /// Long `[phase, wavelength, flux]` table.
    Snana,
}

impl SedFormat {
    pub const fn from_snana_flag(snana: bool) -> Self {
        if snana { Self::Snana } else { Self::Raw }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Snana => "snana",
        }
    }
}

impl Display for SedFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractRequest {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub format: SedFormat,
}

impl ExtractRequest {
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        format: SedFormat,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            format,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SedArtifact {
    pub path: PathBuf,
    pub angle_index: usize,
    pub cos_theta: f64,
    pub rows: usize,
}
