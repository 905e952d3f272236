//! JSON configuration for the `edge_tool` binary.
//!
//! ```json
//! {
//!   "input": "data/board.png",
//!   "pipeline": { "gaussian": { "size": 5, "sigma": 2.5 }, "gradient": { "threshold": 76.5 } },
//!   "output": { "image": "out/edges.png", "smoothedImage": "out/smoothed.png", "report": "out/report.json" }
//! }
//! ```
use crate::error::{PipelineError, Result};
use crate::pipeline::PipelineParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct EdgeToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub pipeline: PipelineParams,
    pub output: EdgeOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeOutputConfig {
    /// Edge map; the extension selects the encoder.
    pub image: PathBuf,
    #[serde(default)]
    pub smoothed_image: Option<PathBuf>,
    #[serde(default)]
    pub report: Option<PathBuf>,
}

pub fn parse_config(data: &str) -> Result<EdgeToolConfig> {
    serde_json::from_str(data).map_err(|e| PipelineError::Config(format!("invalid config: {e}")))
}

pub fn load_config(path: &Path) -> Result<EdgeToolConfig> {
    let data = fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data)
        .map_err(|e| PipelineError::Config(format!("failed to parse {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(r#"{ "input": "a.png", "output": { "image": "b.jpg" } }"#).unwrap();
        assert_eq!(cfg.input, PathBuf::from("a.png"));
        assert_eq!(cfg.pipeline, PipelineParams::default());
        assert!(cfg.output.report.is_none());
    }

    #[test]
    fn full_config_parses() {
        let cfg = parse_config(
            r#"{
                "input": "a.png",
                "pipeline": { "gaussian": { "size": 7, "sigma": 1.4 }, "gradient": { "threshold": 40 } },
                "output": { "image": "b.png", "smoothedImage": "s.png", "report": "r.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.pipeline.gaussian.size, 7);
        assert_eq!(cfg.pipeline.gradient.threshold, 40.0);
        assert_eq!(cfg.output.smoothed_image, Some(PathBuf::from("s.png")));
    }

    #[test]
    fn load_error_names_the_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, r#"{ "input": "a.png" }"#).unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        let msg = err.to_string();
        assert_eq!(msg.matches("configuration error").count(), 1, "{msg}");
        assert!(msg.contains("broken.json"), "{msg}");
        assert!(msg.contains("output"), "{msg}");
    }

    #[test]
    fn missing_output_is_rejected() {
        assert!(matches!(
            parse_config(r#"{ "input": "a.png" }"#),
            Err(PipelineError::Config(_))
        ));
    }
}
