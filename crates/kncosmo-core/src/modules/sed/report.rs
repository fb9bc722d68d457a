use super::parser::SimulationHeader;
use crate::domain::{KnError, KnResult, SedArtifact, SedFormat};
use crate::modules::naming::SimulationFileName;
use crate::modules::serialization::write_text_artifact;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionReport {
    pub input_path: PathBuf,
    pub simulation: SimulationFileName,
    pub header: SimulationHeader,
    pub format: SedFormat,
    pub output_dir: PathBuf,
    pub artifacts: Vec<SedArtifact>,
}

impl ExtractionReport {
    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.artifacts
            .iter()
            .map(|artifact| artifact.path.clone())
            .collect()
    }

    pub fn to_json_pretty(&self) -> KnResult<String> {
        serde_json::to_string_pretty(self).map_err(|source| {
            KnError::internal(
                "RUN.SED_REPORT_SERIALIZE",
                format!("failed to serialize extraction report: {}", source),
            )
        })
    }

    pub fn write_json(&self, path: &Path) -> KnResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| {
                KnError::io_system(
                    "IO.SED_REPORT_DIRECTORY",
                    format!(
                        "failed to create report directory '{}': {}",
                        parent.display(),
                        source
                    ),
                )
            })?;
        }

        let content = self.to_json_pretty()?;
        write_text_artifact(path, &content).map_err(|source| {
            KnError::io_system(
                "IO.SED_REPORT_WRITE",
                format!("failed to write report '{}': {}", path.display(), source),
            )
        })
    }
}
