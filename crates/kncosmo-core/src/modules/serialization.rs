use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFormat {
    /// `%.Nf`
    Fixed(usize),
    /// `%.Ne`
    Scientific(usize),
}

impl ColumnFormat {
    pub fn render(self, value: f64) -> String {
        match self {
            Self::Fixed(precision) => format_fixed_f64(value, 0, precision),
            Self::Scientific(precision) => format_scientific_f64(value, precision),
        }
    }
}

pub fn format_fixed_f64(value: f64, width: usize, precision: usize) -> String {
    format!(
        "{value:>width$.precision$}",
        width = width,
        precision = precision
    )
}

/// Renders `value` the way C's `%.Ne` does: a signed exponent of at least two
/// digits (`1.2340e+03`), which Rust's `{:e}` does not produce on its own.
pub fn format_scientific_f64(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }

    let rendered = format!("{value:.precision$e}", precision = precision);
    let Some((mantissa, exponent)) = rendered.split_once('e') else {
        return rendered;
    };

    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

pub fn render_table<'a, I>(rows: I, columns: &[ColumnFormat]) -> String
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut content = String::new();
    for row in rows {
        let line = row
            .iter()
            .enumerate()
            .map(|(index, value)| column_format(columns, index).render(*value))
            .collect::<Vec<_>>()
            .join(" ");
        content.push_str(&line);
        content.push('\n');
    }
    content
}

fn column_format(columns: &[ColumnFormat], index: usize) -> ColumnFormat {
    columns
        .get(index)
        .or_else(|| columns.last())
        .copied()
        .unwrap_or(ColumnFormat::Scientific(18))
}

/// Writes through a buffered handle that is flushed before it is dropped, so a
/// failed flush surfaces as an error instead of vanishing in `Drop`.
pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(content.as_bytes())?;
    writer.flush()
}
