//! Serializable run reports: input shape, kernel, threshold and per-stage timing.
use crate::convolve::Narrowing;
use serde::{Deserialize, Serialize};

/// Timing entry describing a single stage of the pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KernelDescriptor {
    pub size: usize,
    pub sigma: f64,
    /// Divisor applied to integer Gaussian sums.
    pub normalization: u32,
}

/// Summary of one pipeline run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub input: InputDescriptor,
    pub kernel: KernelDescriptor,
    pub threshold: f64,
    pub narrowing: Narrowing,
    pub thinning: String,
    /// Non-zero cells in the final edge map.
    pub edge_pixels: usize,
    pub timings: TimingBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_camel_case() {
        let mut timings = TimingBreakdown::default();
        timings.push("smooth", 1.5);
        let report = PipelineReport {
            input: InputDescriptor {
                width: 4,
                height: 3,
            },
            kernel: KernelDescriptor {
                size: 5,
                sigma: 2.5,
                normalization: 65526,
            },
            threshold: 76.5,
            narrowing: Narrowing::Wrap,
            thinning: "passthrough".to_string(),
            edge_pixels: 0,
            timings,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["edgePixels"], 0);
        assert_eq!(json["narrowing"], "wrap");
        assert_eq!(json["timings"]["stages"][0]["elapsedMs"], 1.5);
        assert_eq!(report.timings.stage_ms("smooth"), Some(1.5));
    }
}
