mod config;
mod grid;
mod keys;
mod pipeline;
mod readers;
mod sat_bands;
mod writers;

use std::path::PathBuf;

use config::Config;
use pipeline::{BtdError, BtdPipeline, RunReport};
use readers::GdalReader;
use writers::{FileSink, NetcdfWriter, PngRenderer};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Starting GOES BTD quicklook processing...");

    match run() {
        Ok((report, output_dir)) => {
            let arrays: Vec<String> = report
                .arrays
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();
            println!(
                "Saved {} images ({} -> {}) and {} in {}",
                report.images.len(),
                report.t1,
                report.t2,
                arrays.join(" and "),
                output_dir.display()
            );
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<(RunReport, PathBuf), BtdError> {
    let config = Config::new()?;
    let (width, height) = config.image_size();
    let output_dir = config.output_dir().to_path_buf();

    let reader = GdalReader::new(config.variable());
    let sink = FileSink::new(PngRenderer::new(width, height), NetcdfWriter::new("BTD"));
    let report = BtdPipeline::new(config, reader, sink).run()?;

    Ok((report, output_dir))
}
