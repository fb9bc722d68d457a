//! Filename codec for simulation inputs and per-angle SED outputs.
//!
//! Input names look like `nph1.0e+06_mej0.01_phi15_T3.0e+03.txt`; the output
//! names mirror the same parameters behind a `sed_cos_theta_<cos>` prefix.
//! Three grammar families exist (see [`FilenameGrammar`]) and are tried in a
//! fixed order.

mod grammar;
mod model;

pub use grammar::FilenameGrammar;
pub use model::{EjectaMass, OutputSedName, SimulationFileName, SimulationIdentity};

use crate::domain::{KnError, ParserResult};
use regex::Captures;

pub fn matched_input_grammar(name: &str) -> Option<FilenameGrammar> {
    FilenameGrammar::TRIAL_ORDER
        .into_iter()
        .find(|grammar| grammar.matches_input(name))
}

pub fn parse_input_filename(name: &str) -> ParserResult<SimulationFileName> {
    for grammar in FilenameGrammar::TRIAL_ORDER {
        let Some(captures) = grammar.input_pattern().captures(name) else {
            continue;
        };

        let identity = match grammar {
            FilenameGrammar::WithTemperature => SimulationIdentity::WithTemperature {
                ejecta_mass: captures["mej"].to_string(),
                half_opening_angle: captures["phi"].to_string(),
                temperature: captures["temp"].to_string(),
            },
            FilenameGrammar::NoTemperature => SimulationIdentity::NoTemperature {
                ejecta_mass: captures["mej"].to_string(),
                half_opening_angle: captures["phi"].to_string(),
            },
            FilenameGrammar::BinaryMerger => SimulationIdentity::BinaryMerger {
                ejecta_mass_dynamical: captures["mejdyn"].to_string(),
                ejecta_mass_wind: captures["mejwind"].to_string(),
                half_opening_angle: captures["phi"].to_string(),
            },
        };

        return Ok(SimulationFileName {
            photon_count: captures["nph"].to_string(),
            identity,
        });
    }

    Err(KnError::parse(
        "INPUT.SIMULATION_FILENAME",
        format!(
            "'{}' does not match any simulation filename grammar \
             (expected nph<N>_mej<M>_phi<PHI>[_T<T>].txt or nph<N>_mejdyn<M>_mejwind<M>_phi<PHI>.txt)",
            name
        ),
    ))
}

pub fn format_output_filename(cos_theta: f64, identity: &SimulationIdentity) -> String {
    match identity {
        SimulationIdentity::WithTemperature {
            ejecta_mass,
            half_opening_angle,
            temperature,
        } => format!(
            "sed_cos_theta_{cos_theta:.1}_mej_{ejecta_mass}_phi_{half_opening_angle}_T_{temperature}.txt"
        ),
        SimulationIdentity::NoTemperature {
            ejecta_mass,
            half_opening_angle,
        } => format!("sed_cos_theta_{cos_theta:.1}_mej_{ejecta_mass}_phi_{half_opening_angle}.txt"),
        SimulationIdentity::BinaryMerger {
            ejecta_mass_dynamical,
            ejecta_mass_wind,
            half_opening_angle,
        } => format!(
            "sed_cos_theta_{cos_theta:.1}_mejdyn_{ejecta_mass_dynamical}_mejwind_{ejecta_mass_wind}_phi_{half_opening_angle}.txt"
        ),
    }
}

pub fn parse_output_filename(name: &str) -> ParserResult<OutputSedName> {
    for grammar in FilenameGrammar::TRIAL_ORDER {
        let Some(captures) = grammar.output_pattern().captures(name) else {
            continue;
        };

        let ejecta_mass = match grammar {
            FilenameGrammar::BinaryMerger => EjectaMass::Components {
                dynamical: capture_f64(&captures, "mejdyn", name)?,
                wind: capture_f64(&captures, "mejwind", name)?,
            },
            FilenameGrammar::WithTemperature | FilenameGrammar::NoTemperature => EjectaMass::Total {
                mass: capture_f64(&captures, "mej", name)?,
            },
        };
        let temperature = match grammar {
            FilenameGrammar::WithTemperature => Some(capture_f64(&captures, "temp", name)?),
            FilenameGrammar::NoTemperature | FilenameGrammar::BinaryMerger => None,
        };

        return Ok(OutputSedName {
            cos_theta: capture_f64(&captures, "cos", name)?,
            ejecta_mass,
            half_opening_angle: capture_f64(&captures, "phi", name)?,
            temperature,
        });
    }

    Err(KnError::parse(
        "INPUT.SED_FILENAME",
        format!("'{}' does not match any SED output filename template", name),
    ))
}

fn capture_f64(captures: &Captures<'_>, group: &str, name: &str) -> ParserResult<f64> {
    let token = &captures[group];
    token.parse::<f64>().map_err(|_| {
        KnError::parse(
            "INPUT.SED_FILENAME",
            format!("field '{}' of '{}' is not numeric: '{}'", group, name, token),
        )
    })
}
