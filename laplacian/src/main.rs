use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use laplacian_filter as lf;
use log::{debug, error};

#[derive(Parser)]
#[clap(author = "laplacian_filter developers")]
#[clap(version, about, long_about = None)]
#[clap(disable_help_flag = true)]
struct Cli {
    #[clap(long, action = clap::ArgAction::HelpLong)]
    help: Option<bool>,

    /// Paths to source images in binary PPM format
    #[clap(value_parser, required = true)]
    files: Vec<PathBuf>,

    /// Count of worker threads used to filter every image
    #[clap(short, long, value_parser, default_value_t = lf::WorkerCount::DEFAULT)]
    workers: lf::WorkerCount,

    /// Directory for result images
    #[clap(short, long, value_parser, default_value = ".")]
    output_dir: PathBuf,

    /// Process remaining images if one of them has failed
    #[clap(short, long, action)]
    keep_going: bool,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<()> {
    let cli: Cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    filter_images(&cli)
}

fn filter_images(cli: &Cli) -> Result<()> {
    if !cli.output_dir.exists() {
        debug!("Create the output directory {:?}", cli.output_dir);
        std::fs::create_dir_all(&cli.output_dir).with_context(|| {
            format!("Failed to create output directory {:?}", cli.output_dir)
        })?;
    }

    let error_policy = if cli.keep_going {
        lf::ErrorPolicy::Continue
    } else {
        lf::ErrorPolicy::Abort
    };
    let options = lf::BatchOptions::new()
        .worker_count(cli.workers)
        .output_dir(&cli.output_dir)
        .error_policy(error_policy);

    let report = lf::BatchCoordinator::new(options)
        .process_images(cli.files.as_slice())
        .with_context(|| "Failed to filter images")?;

    println!("Total elapsed time: {:.4} s", report.total_elapsed_secs());

    let failed = report.failures.len();
    for failure in report.failures {
        error!(
            "Image #{} ({:?}): {:#}",
            failure.position,
            failure.source,
            anyhow::Error::new(failure.error)
        );
    }
    if failed > 0 {
        return Err(anyhow!(
            "{} of {} images have not been filtered",
            failed,
            cli.files.len()
        ));
    }
    Ok(())
}
