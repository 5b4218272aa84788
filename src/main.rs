//! Cardiograph: heart-disease risk assessment from six patient vitals.
//!
//! CLI entry point. Takes the vitals as `KEY=VALUE` arguments, runs the
//! inference pipeline, and prints the structured assessment as JSON. This
//! is the process boundary a graphical front end talks to.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiograph::domain::{AdviceGenerator, RuleEngine};
use cardiograph::{AppConfig, FileModelProvider, InferenceService};

const USAGE: &str = "usage: cardiograph Age=45 Sex=1 CP=2 Chol=239 BP=130 HR=150";

fn main() -> Result<()> {
    // Model resolution and assessment steps log through tracing; keep the
    // assessment JSON alone on stdout so callers can parse it.
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    let raw = parse_args(std::env::args().skip(1))?;

    let config_path = AppConfig::path_from_env();
    let config = AppConfig::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let provider = Arc::new(FileModelProvider::new(
        config.model.artifact_path.clone(),
        config.model.dataset_path.clone(),
    ));
    let rules = RuleEngine::new(config.thresholds, config.emergency);
    let advice = match config.advice.seed {
        Some(seed) => AdviceGenerator::with_seed(seed, config.advice.tips_per_result),
        None => AdviceGenerator::new(config.advice.tips_per_result),
    };

    let service = InferenceService::new(provider, rules, advice);
    let assessment = service.predict(&raw)?;

    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}

/// Parse `KEY=VALUE` arguments into a raw input map. Values stay strings;
/// coercion is the validator's job.
fn parse_args(
    args: impl Iterator<Item = String>,
) -> Result<serde_json::Map<String, serde_json::Value>> {
    let mut raw = serde_json::Map::new();
    let mut seen_any = false;
    for arg in args {
        seen_any = true;
        let (key, value) = arg
            .split_once('=')
            .with_context(|| format!("argument '{arg}' is not KEY=VALUE\n{USAGE}"))?;
        raw.insert(
            key.trim().to_string(),
            serde_json::Value::String(value.trim().to_string()),
        );
    }
    if !seen_any {
        bail!("{USAGE}");
    }
    Ok(raw)
}
