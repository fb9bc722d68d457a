use super::parser::{SimulationHeader, SimulationMatrix, parse_header, parse_matrix};
use crate::domain::{KnResult, SedFormat};
use crate::modules::serialization::{ColumnFormat, render_table};
use crate::numerics::{bin_centers, linear_grid};

const RAW_COLUMNS: [ColumnFormat; 1] = [ColumnFormat::Scientific(18)];
const SNANA_COLUMNS: [ColumnFormat; 3] = [
    ColumnFormat::Fixed(2),
    ColumnFormat::Fixed(2),
    ColumnFormat::Scientific(4),
];

#[derive(Debug, Clone)]
pub struct SedModel {
    header: SimulationHeader,
    matrix: SimulationMatrix,
}

/// Rows of one viewing angle, `[wavelength, flux_0, ..., flux_{n-1}]` each.
#[derive(Debug, Clone, Copy)]
pub struct SedBlock<'a> {
    pub angle_index: usize,
    pub cos_theta: f64,
    values: &'a [f64],
    columns: usize,
}

impl<'a> SedBlock<'a> {
    pub fn rows(&self) -> impl Iterator<Item = &'a [f64]> + use<'a> {
        self.values.chunks_exact(self.columns)
    }

    pub fn row_count(&self) -> usize {
        self.values.len() / self.columns
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSed {
    pub content: String,
    pub rows: usize,
}

/// Phase-major flux grid for one viewing angle.
#[derive(Debug, Clone, PartialEq)]
pub struct SedTimeSeries {
    pub cos_theta: f64,
    pub phases: Vec<f64>,
    pub wavelengths: Vec<f64>,
    pub flux: Vec<Vec<f64>>,
}

impl SedTimeSeries {
    pub fn flux_at(&self, phase_index: usize, wavelength_index: usize) -> Option<f64> {
        self.flux.get(phase_index)?.get(wavelength_index).copied()
    }
}

impl SedModel {
    pub fn from_source(source_name: &str, source: &str) -> KnResult<Self> {
        let header = parse_header(source_name, source)?;
        let matrix = parse_matrix(source_name, source, &header)?;
        Ok(Self { header, matrix })
    }

    pub fn header(&self) -> &SimulationHeader {
        &self.header
    }

    pub fn viewing_angles(&self) -> Vec<f64> {
        linear_grid(0.0, 1.0, self.header.n_observation_angles)
    }

    pub fn phases(&self) -> Vec<f64> {
        bin_centers(
            self.header.t_initial,
            self.header.t_final,
            self.header.n_time_bins,
        )
    }

    pub fn blocks(&self) -> impl Iterator<Item = SedBlock<'_>> {
        self.viewing_angles()
            .into_iter()
            .enumerate()
            .filter_map(move |(angle_index, cos_theta)| self.block(angle_index, cos_theta))
    }

    pub fn angle_block(&self, angle_index: usize) -> Option<SedBlock<'_>> {
        let cos_theta = *self.viewing_angles().get(angle_index)?;
        self.block(angle_index, cos_theta)
    }

    fn block(&self, angle_index: usize, cos_theta: f64) -> Option<SedBlock<'_>> {
        let rows = self.header.n_wavelength_bins;
        let values = self.matrix.row_range(angle_index.checked_mul(rows)?, rows)?;
        Some(SedBlock {
            angle_index,
            cos_theta,
            values,
            columns: self.matrix.columns(),
        })
    }

    pub fn render(&self, block: &SedBlock<'_>, format: SedFormat) -> RenderedSed {
        match format {
            SedFormat::Raw => RenderedSed {
                content: render_table(block.rows(), &RAW_COLUMNS),
                rows: block.row_count(),
            },
            SedFormat::Snana => {
                let long_rows = self.snana_rows(block);
                RenderedSed {
                    content: render_table(long_rows.iter().map(|row| &row[..]), &SNANA_COLUMNS),
                    rows: long_rows.len(),
                }
            }
        }
    }

    /// One `[phase, wavelength, flux]` row per (epoch, wavelength), all
    /// wavelengths of an epoch before the next epoch.
    pub fn snana_rows(&self, block: &SedBlock<'_>) -> Vec<[f64; 3]> {
        let phases = self.phases();
        let mut rows = Vec::with_capacity(phases.len() * block.row_count());
        for (epoch, phase) in phases.iter().enumerate() {
            for row in block.rows() {
                rows.push([*phase, row[0], row[epoch + 1]]);
            }
        }
        rows
    }

    pub fn time_series(&self, angle_index: usize) -> Option<SedTimeSeries> {
        let block = self.angle_block(angle_index)?;
        let wavelengths = block.rows().map(|row| row[0]).collect::<Vec<_>>();
        let flux = (0..self.header.n_time_bins)
            .map(|epoch| block.rows().map(|row| row[epoch + 1]).collect())
            .collect();

        Some(SedTimeSeries {
            cos_theta: block.cos_theta,
            phases: self.phases(),
            wavelengths,
            flux,
        })
    }
}
