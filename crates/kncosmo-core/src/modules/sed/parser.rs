use crate::domain::{KnError, KnResult, ParserResult};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub(crate) const HEADER_LINE_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationHeader {
    pub n_observation_angles: usize,
    pub n_wavelength_bins: usize,
    pub n_time_bins: usize,
    pub t_initial: f64,
    pub t_final: f64,
}

impl SimulationHeader {
    /// `None` when the declared counts overflow `usize`.
    pub const fn expected_rows(&self) -> Option<usize> {
        self.n_observation_angles.checked_mul(self.n_wavelength_bins)
    }

    /// `wavelength` followed by one flux column per epoch.
    pub const fn expected_columns(&self) -> Option<usize> {
        self.n_time_bins.checked_add(1)
    }
}

/// Dense row-major body of a simulation file.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationMatrix {
    columns: usize,
    values: Vec<f64>,
}

impl SimulationMatrix {
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn row_count(&self) -> usize {
        if self.columns == 0 {
            0
        } else {
            self.values.len() / self.columns
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.columns.max(1))
    }

    pub fn row_range(&self, start: usize, count: usize) -> Option<&[f64]> {
        let begin = start.checked_mul(self.columns)?;
        let end = start.checked_add(count)?.checked_mul(self.columns)?;
        self.values.get(begin..end)
    }
}

pub(super) fn input_file_name(path: &Path) -> ParserResult<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            KnError::parse(
                "INPUT.SIMULATION_FILENAME",
                format!(
                    "simulation input '{}' has no UTF-8 file name",
                    path.display()
                ),
            )
        })
}

pub(super) fn read_input_source(path: &Path) -> KnResult<String> {
    fs::read_to_string(path).map_err(|source| {
        KnError::io_system(
            "IO.SED_INPUT_READ",
            format!(
                "failed to read simulation input '{}': {}",
                path.display(),
                source
            ),
        )
    })
}

pub fn parse_header(source_name: &str, source: &str) -> ParserResult<SimulationHeader> {
    let lines = source.lines().take(HEADER_LINE_COUNT).collect::<Vec<_>>();
    if lines.len() < HEADER_LINE_COUNT {
        return Err(KnError::parse(
            "INPUT.SED_HEADER",
            format!(
                "'{}' has {} line(s); a simulation file needs {} header lines",
                source_name,
                lines.len(),
                HEADER_LINE_COUNT
            ),
        ));
    }

    let n_observation_angles = parse_count(source_name, lines[0], 1, "n_observation_angles")?;
    let n_wavelength_bins = parse_count(source_name, lines[1], 2, "n_wavelength_bins")?;

    let time_tokens = lines[2].split_whitespace().collect::<Vec<_>>();
    if time_tokens.len() < 3 {
        return Err(KnError::parse(
            "INPUT.SED_HEADER",
            format!(
                "line 3 of '{}' must hold 'n_time_bins t_initial t_final', found '{}'",
                source_name,
                lines[2].trim()
            ),
        ));
    }
    let n_time_bins = parse_count(source_name, time_tokens[0], 3, "n_time_bins")?;
    let t_initial = parse_time(source_name, time_tokens[1], "t_initial")?;
    let t_final = parse_time(source_name, time_tokens[2], "t_final")?;

    if t_final <= t_initial {
        return Err(KnError::parse(
            "INPUT.SED_HEADER",
            format!(
                "line 3 of '{}' declares t_final {} not after t_initial {}",
                source_name, t_final, t_initial
            ),
        ));
    }

    Ok(SimulationHeader {
        n_observation_angles,
        n_wavelength_bins,
        n_time_bins,
        t_initial,
        t_final,
    })
}

pub fn parse_matrix(
    source_name: &str,
    source: &str,
    header: &SimulationHeader,
) -> KnResult<SimulationMatrix> {
    let (expected_rows, columns) = matrix_dimensions(source_name, header)?;
    // Grown from the body only; the header's counts are untrusted until the
    // row check below.
    let mut values = Vec::new();
    let mut rows = 0_usize;

    for (index, line) in source.lines().enumerate().skip(HEADER_LINE_COUNT) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let line_number = index + 1;
        let before = values.len();
        for token in trimmed.split_whitespace() {
            values.push(parse_float(source_name, token, line_number, "matrix value")?);
        }

        let found = values.len() - before;
        if found != columns {
            return Err(KnError::shape(
                "SHAPE.SED_COLUMNS",
                format!(
                    "line {} of '{}' has {} column(s); expected {} (wavelength + {} epochs)",
                    line_number, source_name, found, columns, header.n_time_bins
                ),
            ));
        }
        rows += 1;
    }

    if rows != expected_rows {
        return Err(KnError::shape(
            "SHAPE.SED_ROWS",
            format!(
                "'{}' has {} data row(s); header declares {} angles x {} wavelengths = {}",
                source_name,
                rows,
                header.n_observation_angles,
                header.n_wavelength_bins,
                expected_rows
            ),
        ));
    }

    Ok(SimulationMatrix { columns, values })
}

fn matrix_dimensions(source_name: &str, header: &SimulationHeader) -> KnResult<(usize, usize)> {
    header
        .expected_rows()
        .zip(header.expected_columns())
        .filter(|(rows, columns)| rows.checked_mul(*columns).is_some())
        .ok_or_else(|| {
            KnError::shape(
                "SHAPE.SED_ROWS",
                format!(
                    "'{}' declares {} angles x {} wavelengths x {} epochs, which overflows the matrix size",
                    source_name,
                    header.n_observation_angles,
                    header.n_wavelength_bins,
                    header.n_time_bins
                ),
            )
        })
}

fn parse_count(
    source_name: &str,
    line_or_token: &str,
    line_number: usize,
    field: &str,
) -> ParserResult<usize> {
    let token = line_or_token.split_whitespace().next().unwrap_or_default();
    let value = token.parse::<usize>().map_err(|_| {
        KnError::parse(
            "INPUT.SED_HEADER",
            format!(
                "line {} of '{}' must start with integer {}, found '{}'",
                line_number, source_name, field, token
            ),
        )
    })?;

    if value == 0 {
        return Err(KnError::parse(
            "INPUT.SED_HEADER",
            format!(
                "line {} of '{}' declares {} = 0; at least 1 is required",
                line_number, source_name, field
            ),
        ));
    }

    Ok(value)
}

/// Accepts `nan` and `inf` spellings; flux columns may carry them.
fn parse_float(
    source_name: &str,
    token: &str,
    line_number: usize,
    field: &str,
) -> ParserResult<f64> {
    token.parse::<f64>().map_err(|_| {
        KnError::parse(
            if line_number <= HEADER_LINE_COUNT {
                "INPUT.SED_HEADER"
            } else {
                "INPUT.SED_MATRIX"
            },
            format!(
                "line {} of '{}' has non-numeric {} '{}'",
                line_number, source_name, field, token
            ),
        )
    })
}

fn parse_time(source_name: &str, token: &str, field: &str) -> ParserResult<f64> {
    let value = parse_float(source_name, token, HEADER_LINE_COUNT, field)?;
    if !value.is_finite() {
        return Err(KnError::parse(
            "INPUT.SED_HEADER",
            format!(
                "line {} of '{}' has non-finite {} '{}'",
                HEADER_LINE_COUNT, source_name, field, token
            ),
        ));
    }
    Ok(value)
}
