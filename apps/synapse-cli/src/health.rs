use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use synapse_core::traits::Backend;
use synapse_core::types::SearchRequest;

/// Poll the health-check search until the backend answers.
///
/// Retries every `retry`; gives up after `max_attempts` when set.
/// Returns the number of attempts it took.
pub async fn wait_for_backend(backend: &dyn Backend, retry: Duration, max_attempts: Option<usize>) -> anyhow::Result<usize> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(120));

    let request = SearchRequest::health_check();
    let mut attempt = 0usize;
    loop {
        attempt += 1;
        spinner.set_message(format!("Waiting for backend (attempt {attempt})"));
        match backend.search(&request).await {
            Ok(_) => {
                debug!(attempt, "backend is up");
                spinner.finish_with_message("✅ Backend is up");
                return Ok(attempt);
            }
            Err(e) => {
                warn!(attempt, error = %e, "backend not ready");
                if max_attempts.is_some_and(|max| attempt >= max) {
                    spinner.abandon_with_message("❌ Backend unreachable");
                    anyhow::bail!("backend unreachable after {attempt} attempts: {e}");
                }
                tokio::time::sleep(retry).await;
            }
        }
    }
}
