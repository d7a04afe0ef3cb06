use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall-clock time spent in one named stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Per-stage timings of a detection run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Record the time elapsed since `start` under `label` and add it to the total.
    pub fn record(&mut self, label: impl Into<String>, start: Instant) {
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.total_ms += elapsed_ms;
        self.stages.push(StageTiming {
            label: label.into(),
            elapsed_ms,
        });
    }

    pub fn stage(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}
