use canny_pipeline::{run_file, PipelineParams};
use log::info;
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let (input, output) = match (args.next(), args.next()) {
        (Some(input), Some(output)) => (PathBuf::from(input), PathBuf::from(output)),
        _ => return Err(usage()),
    };

    let (report, written) =
        run_file(&input, &output, PipelineParams::default()).map_err(|e| e.to_string())?;

    info!("input file: {}", input.display());
    info!("output file: {}", written.display());
    info!(
        "{}x{} edge pixels={} total_ms={:.3}",
        report.input.width, report.input.height, report.edge_pixels, report.timings.total_ms
    );
    Ok(())
}

fn usage() -> String {
    "Usage: canny-pipeline <input-image> <output.{png,jpg,jpeg}>".to_string()
}
