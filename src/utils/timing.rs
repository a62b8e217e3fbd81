use std::time::Instant;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use tracing::info;

#[derive(Debug)]
pub struct SimulationTimer {
    run_id: String,
    started_at: DateTime<Utc>,
    started_perf: Instant,
    completed: bool,
}

impl SimulationTimer {
    pub fn start(run_id: impl Into<String>, edit_instruction: &str) -> Self {
        let timer = SimulationTimer {
            run_id: run_id.into(),
            started_at: Utc::now(),
            started_perf: Instant::now(),
            completed: false,
        };
        info!(
            target: "simulator.timing",
            "event=simulation_started run_id={} started_at={} instruction={:?}",
            timer.run_id,
            timer.started_at.to_rfc3339(),
            edit_instruction
        );
        timer
    }

    pub fn complete(&mut self, status: &str, detail: Option<&str>) {
        if self.completed {
            return;
        }
        self.completed = true;
        let duration = self.started_perf.elapsed().as_secs_f64();
        info!(
            target: "simulator.timing",
            "event=simulation_completed run_id={} started_at={} completed_at={} duration_s={:.3} status={} detail={}",
            self.run_id,
            self.started_at.to_rfc3339(),
            Utc::now().to_rfc3339(),
            duration,
            status,
            detail.unwrap_or_default()
        );
    }
}

pub async fn log_llm_timing<T, E, F, Fut>(
    provider: &str,
    model: &str,
    operation: &str,
    metadata: Option<JsonValue>,
    call: F,
) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
{
    let started_at = Utc::now();
    let started_perf = Instant::now();
    let metadata_text = metadata
        .as_ref()
        .map(|value| value.to_string())
        .unwrap_or_else(|| "{}".to_string());
    info!(
        target: "simulator.timing",
        "event=llm_request provider={} model={} operation={} started_at={} metadata={}",
        provider,
        model,
        operation,
        started_at.to_rfc3339(),
        metadata_text
    );

    let result = call().await;
    let status = if result.is_ok() { "success" } else { "error" };

    let duration = started_perf.elapsed().as_secs_f64();
    info!(
        target: "simulator.timing",
        "event=llm_response provider={} model={} operation={} completed_at={} duration_s={:.3} status={} metadata={}",
        provider,
        model,
        operation,
        Utc::now().to_rfc3339(),
        duration,
        status,
        metadata_text
    );

    result
}
