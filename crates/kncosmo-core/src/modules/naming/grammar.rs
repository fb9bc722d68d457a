use regex::Regex;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

// Photon-count and mass tokens must open with a digit; no token may contain
// an underscore. Together these keep the three families disjoint: a name
// without `_T<...>` can only match the no-temperature grammar, and
// `_mejdyn` can never be read as `_mej<digit>`.
//
// `phi` and `temp` are otherwise free-form, but they stop at the next
// underscore. A greedy `.*` would let `phi15_T3000` match the no-temperature
// grammar as a phi token. Suffixed names such as `..._T3000_v2.txt` are
// rejected outright rather than read with `temp = 3000_v2`.
static INPUT_WITH_TEMPERATURE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^nph(?P<nph>\d[^_]*)_mej(?P<mej>\d[^_]*)_phi(?P<phi>[^_]+)_T(?P<temp>[^_]+)\.txt$")
});
static INPUT_NO_TEMPERATURE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^nph(?P<nph>\d[^_]*)_mej(?P<mej>\d[^_]*)_phi(?P<phi>[^_]+)\.txt$"));
static INPUT_BINARY_MERGER: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^nph(?P<nph>\d[^_]*)_mejdyn(?P<mejdyn>\d[^_]*)_mejwind(?P<mejwind>\d[^_]*)_phi(?P<phi>[^_]+)\.txt$",
    )
});

static OUTPUT_WITH_TEMPERATURE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^sed_cos_theta_(?P<cos>[^_]+)_mej_(?P<mej>[^_]+)_phi_(?P<phi>[^_]+)_T_(?P<temp>[^_]+)\.txt$")
});
static OUTPUT_NO_TEMPERATURE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^sed_cos_theta_(?P<cos>[^_]+)_mej_(?P<mej>[^_]+)_phi_(?P<phi>[^_]+)\.txt$")
});
static OUTPUT_BINARY_MERGER: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^sed_cos_theta_(?P<cos>[^_]+)_mejdyn_(?P<mejdyn>[^_]+)_mejwind_(?P<mejwind>[^_]+)_phi_(?P<phi>[^_]+)\.txt$",
    )
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("filename patterns are static and valid")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilenameGrammar {
    WithTemperature,
    NoTemperature,
    BinaryMerger,
}

impl FilenameGrammar {
    /// First match wins.
    pub const TRIAL_ORDER: [Self; 3] = [Self::WithTemperature, Self::NoTemperature, Self::BinaryMerger];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WithTemperature => "with_temperature",
            Self::NoTemperature => "no_temperature",
            Self::BinaryMerger => "binary_merger",
        }
    }

    pub fn input_pattern(self) -> &'static Regex {
        match self {
            Self::WithTemperature => &INPUT_WITH_TEMPERATURE,
            Self::NoTemperature => &INPUT_NO_TEMPERATURE,
            Self::BinaryMerger => &INPUT_BINARY_MERGER,
        }
    }

    pub fn output_pattern(self) -> &'static Regex {
        match self {
            Self::WithTemperature => &OUTPUT_WITH_TEMPERATURE,
            Self::NoTemperature => &OUTPUT_NO_TEMPERATURE,
            Self::BinaryMerger => &OUTPUT_BINARY_MERGER,
        }
    }

    pub fn matches_input(self, name: &str) -> bool {
        self.input_pattern().is_match(name)
    }

    pub fn matches_output(self, name: &str) -> bool {
        self.output_pattern().is_match(name)
    }
}

impl Display for FilenameGrammar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}
