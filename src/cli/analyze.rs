use crate::cli::AnalyzeArgs;
use marketpulse::config::Config;
use marketpulse::output::{render_report, write_output};
use marketpulse::runner::Analyzer;
use tracing::info;

pub async fn execute(args: AnalyzeArgs) -> anyhow::Result<()> {
    info!("Loading config from {:?}", args.config);
    let mut config = Config::load_or_default(&args.config)?;

    // Apply CLI overrides
    if let Some(agent_id) = args.agent_id {
        config.agent.agent_id = agent_id;
    }
    if let Some(timeout_sec) = args.timeout_sec {
        config.timeout_sec = timeout_sec;
    }

    config.validate()?;

    let analyzer = Analyzer::new(&config);
    let outcome = analyzer
        .analyze(&args.query, args.context.as_deref())
        .await?;

    info!(
        "Analysis {} completed in {:.1}s: {} competitors, {} risks, {} recommendations",
        outcome.request_id,
        outcome.duration.as_secs_f64(),
        outcome.report.market_landscape.competitors.len(),
        outcome.report.risks.len(),
        outcome.report.recommendations.len()
    );

    let rendered = render_report(&outcome.report, args.format)?;
    write_output(&rendered, args.output.as_deref())?;
    Ok(())
}
