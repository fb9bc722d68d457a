use super::CliError;
use super::logging::init_tracing;
use kncosmo_core::domain::{ExtractRequest, SedFormat};
use kncosmo_core::modules::sed::SedExtractor;
use std::path::PathBuf;
use tracing::info;

#[derive(clap::Args)]
pub(super) struct ExtractArgs {
    /// SED filename
    #[arg(short = 'd', long = "input")]
    input: PathBuf,

    /// Output directory; must already exist
    #[arg(short = 'o', long = "outdir")]
    outdir: PathBuf,

    /// Write three-column phase, wavelength, flux tables
    #[arg(long = "snana-sed-format")]
    snana_sed_format: bool,

    /// Print the output directory and log each written file
    #[arg(short, long)]
    verbose: bool,

    /// Write a JSON summary of the extraction to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

impl ExtractArgs {
    fn into_request(self) -> (ExtractRequest, Option<PathBuf>) {
        let request = ExtractRequest::new(
            self.input,
            self.outdir,
            SedFormat::from_snana_flag(self.snana_sed_format),
        );
        (request, self.report)
    }
}

pub(super) fn run_extract_command(args: ExtractArgs) -> Result<i32, CliError> {
    init_tracing(args.verbose)?;

    let verbose = args.verbose;
    let (request, report_path) = args.into_request();
    if verbose {
        println!("Output directory: {}", request.output_dir.display());
    }

    let report = SedExtractor.run(&request).map_err(CliError::Compute)?;
    println!(
        "Extracted {} {} SED file(s) from '{}'.",
        report.artifacts.len(),
        report.format,
        request.input_path.display()
    );

    if let Some(path) = report_path {
        report.write_json(&path).map_err(CliError::Compute)?;
        info!(path = %path.display(), "wrote extraction report");
        println!("JSON report: {}", path.display());
    }

    Ok(0)
}
