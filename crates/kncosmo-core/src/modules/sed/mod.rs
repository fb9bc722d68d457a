//! Per-angle SED extraction from multi-angle simulation outputs.
//!
//! A simulation file carries three header lines (angle count, wavelength
//! count, `n_time_bins t_initial t_final`) followed by
//! `n_angles × n_wavelengths` rows of `[wavelength, flux × n_time_bins]`.
//! Each angle's block is written to its own file, named after the input's
//! physical parameters and the cosine of the viewing angle.
//!
//! Files are written in angle order with no rollback: when a later write
//! fails, files for earlier angles stay on disk.

mod model;
mod parser;
mod report;

pub use model::{RenderedSed, SedBlock, SedModel, SedTimeSeries};
pub use parser::{SimulationHeader, SimulationMatrix, parse_header, parse_matrix};
pub use report::ExtractionReport;

use super::naming::{format_output_filename, parse_input_filename};
use super::serialization::write_text_artifact;
use crate::domain::{ExtractRequest, KnError, KnResult, SedArtifact, SedFormat};
use parser::{input_file_name, read_input_source};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct SedExtractor;

impl SedExtractor {
    pub fn load(&self, input_path: &Path) -> KnResult<SedModel> {
        let name = input_file_name(input_path)?;
        let source = read_input_source(input_path)?;
        SedModel::from_source(name, &source)
    }

    pub fn run(&self, request: &ExtractRequest) -> KnResult<ExtractionReport> {
        let name = input_file_name(&request.input_path)?;
        let simulation = parse_input_filename(name)?;
        debug!(input = name, identity = ?simulation.identity, "decoded simulation filename");

        let model = self.load(&request.input_path)?;
        let header = *model.header();
        debug!(
            angles = header.n_observation_angles,
            wavelengths = header.n_wavelength_bins,
            epochs = header.n_time_bins,
            t_initial = header.t_initial,
            t_final = header.t_final,
            "parsed simulation header"
        );

        ensure_output_dir(&request.output_dir)?;

        let mut artifacts = Vec::with_capacity(header.n_observation_angles);
        for block in model.blocks() {
            let file_name = format_output_filename(block.cos_theta, &simulation.identity);
            let path = request.output_dir.join(&file_name);
            let rendered = model.render(&block, request.format);

            write_text_artifact(&path, &rendered.content).map_err(|source| {
                KnError::io_system(
                    "IO.SED_OUTPUT_WRITE",
                    format!("failed to write SED '{}': {}", path.display(), source),
                )
            })?;
            info!(
                angle_index = block.angle_index,
                cos_theta = block.cos_theta,
                rows = rendered.rows,
                path = %path.display(),
                "wrote SED"
            );

            artifacts.push(SedArtifact {
                path,
                angle_index: block.angle_index,
                cos_theta: block.cos_theta,
                rows: rendered.rows,
            });
        }

        Ok(ExtractionReport {
            input_path: request.input_path.clone(),
            simulation,
            header,
            format: request.format,
            output_dir: request.output_dir.clone(),
            artifacts,
        })
    }

    /// Runs the extraction and keeps only the written artifacts.
    pub fn execute(&self, request: &ExtractRequest) -> KnResult<Vec<SedArtifact>> {
        self.run(request).map(|report| report.artifacts)
    }
}

pub fn extract(
    input_path: impl Into<PathBuf>,
    output_dir: impl Into<PathBuf>,
    snana_format: bool,
) -> KnResult<Vec<PathBuf>> {
    let request = ExtractRequest::new(
        input_path,
        output_dir,
        SedFormat::from_snana_flag(snana_format),
    );
    SedExtractor
        .run(&request)
        .map(|report| report.written_paths())
}

fn ensure_output_dir(output_dir: &Path) -> KnResult<()> {
    if output_dir.is_dir() {
        return Ok(());
    }

    Err(KnError::io_system(
        "IO.SED_OUTPUT_DIRECTORY",
        format!(
            "output directory '{}' does not exist or is not a directory",
            output_dir.display()
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::{SedExtractor, extract};
    use crate::domain::{ExtractRequest, KnErrorCategory, SedFormat};
    use crate::modules::naming::parse_output_filename;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const TEMPERATURE_NAME: &str = "nph1.0e+06_mej0.01_phi15_T3.0e+03.txt";

    fn simulation_source(angles: usize, wavelengths: usize, epochs: usize) -> String {
        let mut source = format!("{angles}\n{wavelengths}\n{epochs} 0.0 {}\n", epochs as f64 * 2.0);
        for angle in 0..angles {
            for wavelength in 0..wavelengths {
                source.push_str(&format!("{}", 1000.0 + 10.0 * wavelength as f64));
                for epoch in 0..epochs {
                    source.push_str(&format!(" {}", (angle * 100 + wavelength * 10 + epoch) as f64));
                }
                source.push('\n');
            }
        }
        source
    }

    fn stage_input(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).expect("input should be written");
        path
    }

    #[test]
    fn snana_extraction_writes_one_long_table_per_angle() {
        let temp = TempDir::new().expect("tempdir should be created");
        let input = stage_input(temp.path(), TEMPERATURE_NAME, &simulation_source(2, 20, 3));
        let output_dir = temp.path().join("seds");
        fs::create_dir(&output_dir).expect("output dir");

        let written = extract(&input, &output_dir, true).expect("extraction should succeed");

        let names = written
            .iter()
            .map(|path| path.file_name().and_then(|name| name.to_str()).expect("name"))
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "sed_cos_theta_0.0_mej_0.01_phi_15_T_3.0e+03.txt",
                "sed_cos_theta_1.0_mej_0.01_phi_15_T_3.0e+03.txt",
            ]
        );

        for path in &written {
            let content = fs::read_to_string(path).expect("SED should be readable");
            let rows = content.lines().collect::<Vec<_>>();
            assert_eq!(rows.len(), 60);
            assert!(rows.iter().all(|row| row.split_whitespace().count() == 3));
        }

        let second = fs::read_to_string(&written[1]).expect("second SED");
        assert_eq!(second.lines().next(), Some("1.00 1000.00 1.0000e+02"));
        assert_eq!(second.lines().nth(20), Some("3.00 1000.00 1.0100e+02"));
    }

    #[test]
    fn raw_extraction_keeps_wavelength_rows() {
        let temp = TempDir::new().expect("tempdir should be created");
        let input = stage_input(
            temp.path(),
            "nph1.0e+06_mej0.05_phi30.txt",
            &simulation_source(5, 4, 6),
        );

        let artifacts = SedExtractor
            .execute(&ExtractRequest::new(&input, temp.path(), SedFormat::Raw))
            .expect("extraction should succeed");

        assert_eq!(artifacts.len(), 5);
        let cosines = artifacts.iter().map(|artifact| artifact.cos_theta).collect::<Vec<_>>();
        assert_eq!(cosines, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        for artifact in &artifacts {
            assert_eq!(artifact.rows, 4);
            let content = fs::read_to_string(&artifact.path).expect("SED should be readable");
            assert_eq!(content.lines().count(), 4);
            assert!(content.lines().all(|row| row.split_whitespace().count() == 7));

            let name = artifact.path.file_name().and_then(|name| name.to_str()).expect("name");
            let parsed = parse_output_filename(name).expect("output name should parse");
            assert_eq!(parsed.temperature, None);
            assert_eq!(parsed.half_opening_angle, 30.0);
        }
    }

    #[test]
    fn binary_merger_inputs_use_component_template() {
        let temp = TempDir::new().expect("tempdir should be created");
        let input = stage_input(
            temp.path(),
            "nph1.0e+06_mejdyn0.005_mejwind0.050_phi30.txt",
            &simulation_source(2, 2, 2),
        );

        let written = extract(&input, temp.path(), false).expect("extraction should succeed");
        assert_eq!(
            written[1].file_name().and_then(|name| name.to_str()),
            Some("sed_cos_theta_1.0_mejdyn_0.005_mejwind_0.050_phi_30.txt")
        );
    }

    #[test]
    fn repeated_extraction_is_byte_identical() {
        let temp = TempDir::new().expect("tempdir should be created");
        let input = stage_input(temp.path(), TEMPERATURE_NAME, &simulation_source(3, 5, 4));
        let output_dir = temp.path().join("out");
        fs::create_dir(&output_dir).expect("output dir");

        let first_paths = extract(&input, &output_dir, true).expect("first run");
        let first = first_paths
            .iter()
            .map(|path| fs::read(path).expect("read"))
            .collect::<Vec<_>>();

        fs::remove_dir_all(&output_dir).expect("clear output");
        fs::create_dir(&output_dir).expect("recreate output");

        let second_paths = extract(&input, &output_dir, true).expect("second run");
        let second = second_paths
            .iter()
            .map(|path| fs::read(path).expect("read"))
            .collect::<Vec<_>>();

        assert_eq!(first_paths, second_paths);
        assert_eq!(first, second);
    }

    #[test]
    fn missing_output_directory_is_an_io_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let input = stage_input(temp.path(), TEMPERATURE_NAME, &simulation_source(2, 2, 2));

        let error = extract(&input, temp.path().join("missing"), true).expect_err("no output dir");
        assert_eq!(error.category(), KnErrorCategory::IoSystemError);
        assert_eq!(error.code(), "IO.SED_OUTPUT_DIRECTORY");
        assert!(!temp.path().join("missing").exists());
    }

    #[test]
    fn shape_mismatch_fails_before_any_file_is_written() {
        let temp = TempDir::new().expect("tempdir should be created");
        let mut source = simulation_source(2, 3, 2);
        source.push_str("1030 1 2\n");
        let input = stage_input(temp.path(), TEMPERATURE_NAME, &source);
        let output_dir = temp.path().join("out");
        fs::create_dir(&output_dir).expect("output dir");

        let error = extract(&input, &output_dir, false).expect_err("extra row");
        assert_eq!(error.category(), KnErrorCategory::ShapeError);
        assert_eq!(
            fs::read_dir(&output_dir).expect("list output").count(),
            0
        );
    }

    #[test]
    fn unrecognized_input_name_is_a_parse_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let input = stage_input(temp.path(), "model.txt", &simulation_source(1, 1, 1));

        let error = extract(&input, temp.path(), false).expect_err("bad name");
        assert_eq!(error.category(), KnErrorCategory::ParseError);
        assert!(error.message().contains("model.txt"));
    }

    #[test]
    fn missing_input_is_an_io_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let error = extract(temp.path().join(TEMPERATURE_NAME), temp.path(), false)
            .expect_err("missing input");
        assert_eq!(error.category(), KnErrorCategory::IoSystemError);
        assert_eq!(error.code(), "IO.SED_INPUT_READ");
    }

    #[test]
    fn report_lists_artifacts_in_angle_order() {
        let temp = TempDir::new().expect("tempdir should be created");
        let input = stage_input(temp.path(), TEMPERATURE_NAME, &simulation_source(3, 2, 2));

        let report = SedExtractor
            .run(&ExtractRequest::new(&input, temp.path(), SedFormat::Snana))
            .expect("extraction should succeed");

        assert_eq!(report.header.n_observation_angles, 3);
        assert_eq!(report.simulation.photon_count, "1.0e+06");
        let indices = report
            .artifacts
            .iter()
            .map(|artifact| artifact.angle_index)
            .collect::<Vec<_>>();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(report.artifacts.iter().all(|artifact| artifact.rows == 4));

        let json = report.to_json_pretty().expect("report should serialize");
        assert!(json.contains("\"grammar\": \"with_temperature\""));
        assert!(json.contains("\"format\": \"snana\""));
    }
}
