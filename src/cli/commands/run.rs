//! Analysis run command.

use anyhow::{Context, Result};
use tracing::info;
use trading_broker::SimulatedExecutor;
use trading_chart::PlottersRenderer;
use trading_config::AppConfig;
use trading_data::{create_provider, MockFundamentalAnalyzer};
use trading_pipeline::{Collaborators, Orchestrator, PipelineConfig};
use trading_risk::RiskManager;
use trading_vision::{OpenAiConfig, OpenAiVisionAnalyzer};

use crate::cli::RunArgs;

pub async fn run(args: RunArgs, config: &AppConfig) -> Result<()> {
    let symbols = if args.symbols.is_empty() {
        config.symbols.clone()
    } else {
        args.symbols
    };

    let provider = create_provider(
        config.data.provider,
        &config.data.csv_dir,
        config.data.timeout(),
    )
    .with_context(|| format!("creating {} data provider", config.data.provider))?;

    let renderer = PlottersRenderer::new(config.charts.width, config.charts.height)
        .with_font(config.charts.font_path.as_deref());

    let vision_config = OpenAiConfig::from_env(&config.vision.api_key_env)?
        .with_model(config.vision.model.as_str())
        .with_max_tokens(config.vision.max_tokens)
        .with_base_url(config.vision.base_url.as_str())
        .with_timeout(config.vision.timeout());
    let vision = OpenAiVisionAnalyzer::new(vision_config)?;

    let executor = SimulatedExecutor::new()
        .with_broker_name(config.execution.broker_name.as_str())
        .with_latency(config.execution.latency());

    let pipeline_config = PipelineConfig {
        daily: config.charts.daily.clone(),
        intraday: config.charts.intraday.clone(),
        chart_dir: config.charts.output_dir.clone(),
    };
    let parts = Collaborators {
        provider,
        renderer: Box::new(renderer),
        vision: Box::new(vision),
        fundamentals: Box::new(MockFundamentalAnalyzer::new(config.fundamentals.clone())),
        executor: Box::new(executor),
    };
    let orchestrator =
        Orchestrator::new(&pipeline_config, parts, RiskManager::new(config.risk.clone()));

    info!("{} run started for {:?}", config.app.name, symbols);
    let report = orchestrator.run_batch(&symbols).await;

    println!("{}", report.summary());

    if let Some(path) = args.report {
        std::fs::write(&path, report.to_json()?)
            .with_context(|| format!("writing report to {}", path.display()))?;
        println!("Report saved to {}", path.display());
    }

    Ok(())
}
