//! Per-angle SED extraction for kilonova radiative-transfer outputs.
//!
//! [`modules::naming`] decodes simulation filenames and encodes per-angle
//! output names; [`modules::sed`] slices a multi-angle simulation file into
//! one raw or SNANA-style SED per viewing angle.

pub mod domain;
pub mod modules;
pub mod numerics;

pub use modules::sed::{SedExtractor, extract};
