use canny_pipeline::config::load_config;
use canny_pipeline::image::io::{export_to_target, load_color_image, write_json_file, OutputTarget};
use canny_pipeline::EdgePipeline;
use std::env;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;

    let edges_target = OutputTarget::from_path(&config.output.image).map_err(|e| e.to_string())?;
    let smoothed_target = config
        .output
        .smoothed_image
        .as_deref()
        .map(OutputTarget::from_path)
        .transpose()
        .map_err(|e| e.to_string())?;
    let pipeline = EdgePipeline::new(config.pipeline).map_err(|e| e.to_string())?;

    let image = load_color_image(&config.input).map_err(|e| e.to_string())?;
    let output = pipeline.process(&image).map_err(|e| e.to_string())?;

    let edges_path =
        export_to_target(&output.edges_image(), &edges_target).map_err(|e| e.to_string())?;
    println!(
        "Saved edge map to {} ({} edge pixels)",
        edges_path.display(),
        output.report.edge_pixels
    );

    if let Some(target) = smoothed_target {
        let path =
            export_to_target(&output.smoothed_image(), &target).map_err(|e| e.to_string())?;
        println!("Saved smoothed image to {}", path.display());
    }

    if let Some(report_path) = &config.output.report {
        write_json_file(report_path, &output.report).map_err(|e| e.to_string())?;
        println!("Saved report to {}", report_path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: edge_tool <config.json>".to_string()
}
