use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use std::sync::Arc;
use std::time::Instant;

use prospector_core::agent::{AgentLoop, RunFailure, RunStatus, ToolRegistry};
use prospector_core::config::Config;
use prospector_core::enrich::EnrichClient;
use prospector_core::prompts;
use prospector_core::providers::AnthropicProvider;
use prospector_core::tools::{FetchProfileTool, HumanReviewTool};
use prospector_core::workflow::{ChainedOutreach, ReflectionWorkflow};

mod output;
mod verify;

#[derive(Parser)]
#[command(name = "prospector")]
#[command(about = "LinkedIn prospect research and outreach agent demos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fixed fetch-extract-generate pipeline with no self-correction
    Chained { url: String },
    /// Tool-use agent that self-corrects failed profile fetches
    Agent { url: String },
    /// The agent loop with verbose turn-by-turn output
    Raw { url: String },
    /// Reflection pattern: research, human feedback, improved research
    Research { url: String },
    /// Run the chained and agentic workflows side by side
    Compare { url: String },
    /// Check environment keys and API connectivity
    Verify,
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prospector_core=info,prospector_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn build_provider(config: &Config) -> Arc<AnthropicProvider> {
    Arc::new(
        AnthropicProvider::new(config.anthropic_api_key.clone())
            .with_model(config.model.clone())
            .with_max_tokens(config.max_tokens),
    )
}

fn report_failure(failure: RunFailure, model: &str) -> anyhow::Error {
    eprintln!("{} {}", style("Error:").red().bold(), failure);
    if failure.metrics.turns_taken > 0 {
        output::print_metrics(&failure.metrics, model);
    }
    failure.error
}

async fn run_chained(config: &Config, url: &str) -> Result<()> {
    output::banner("CHAINED WORKFLOW");
    println!("URL: {}", url);

    let workflow = ChainedOutreach::new(
        build_provider(config),
        EnrichClient::new(config.enrichlayer_api_key.clone()),
    );

    match workflow.run(url).await {
        Ok(message) => {
            output::rule();
            println!("{}", style("GENERATED MESSAGE:").bold());
            output::rule();
            println!("{}", message);
            output::rule();
            Ok(())
        }
        Err(e) => {
            println!("  {} {}", style("FAILED:").red().bold(), e);
            output::rule();
            Err(e)
        }
    }
}

async fn run_agent(config: &Config, url: &str, verbose: bool) -> Result<()> {
    let title = if verbose {
        "AGENT LOOP - TURN BY TURN"
    } else {
        "AGENTIC WORKFLOW"
    };
    output::banner(title);
    println!("URL: {}", url);

    let registry = Arc::new(ToolRegistry::new());
    registry.register(Arc::new(FetchProfileTool::new(EnrichClient::new(
        config.enrichlayer_api_key.clone(),
    ))));

    let (system_prompt, prompt, max_turns) = if verbose {
        (prompts::RESEARCH_SYSTEM_PROMPT, prompts::research_prompt(url), 5)
    } else {
        (
            prompts::OUTREACH_SYSTEM_PROMPT,
            prompts::outreach_prompt(url),
            config.max_turns,
        )
    };

    let observer = if verbose {
        Arc::new(output::ConsoleObserver::verbose())
    } else {
        Arc::new(output::ConsoleObserver::new())
    };

    let agent = AgentLoop::new(build_provider(config), registry)
        .with_system_prompt(system_prompt)
        .with_max_turns(max_turns)
        .with_observer(observer);

    let outcome = agent
        .run(&prompt)
        .await
        .map_err(|f| report_failure(f, &config.model))?;

    if outcome.status == RunStatus::BudgetExhausted {
        println!(
            "\n{}",
            style(format!(
                "Turn budget exhausted after {} turns; showing latest output.",
                outcome.metrics.turns_taken
            ))
            .yellow()
        );
    }

    output::section("FINAL RESPONSE");
    output::print_agent_text(&outcome.final_text);
    output::print_metrics(&outcome.metrics, &config.model);
    Ok(())
}

async fn run_research(config: &Config, url: &str) -> Result<()> {
    output::banner("RESEARCH AGENT - REFLECTION PATTERN");
    println!("URL: {}", url);

    let mut auto_feedback = config.auto_feedback;
    if !auto_feedback && console::user_attended() {
        auto_feedback = !dialoguer::Confirm::new()
            .with_prompt("Collect interactive human feedback during the review stage?")
            .default(true)
            .interact()?;
    }

    let registry = Arc::new(ToolRegistry::new());
    registry.register(Arc::new(FetchProfileTool::new(EnrichClient::new(
        config.enrichlayer_api_key.clone(),
    ))));
    registry.register(Arc::new(HumanReviewTool::new(auto_feedback)));

    let agent = AgentLoop::new(build_provider(config), registry)
        .with_system_prompt(prompts::REFLECTION_SYSTEM_PROMPT)
        .with_max_turns(15)
        .with_observer(Arc::new(output::ConsoleObserver::new()));

    let outcome = ReflectionWorkflow::new(agent)
        .run(url)
        .await
        .map_err(|f| report_failure(f, &config.model))?;

    output::section("V1 (Before External Feedback)");
    println!("{}", output::truncate(&outcome.v1, 1000));

    output::section("External Feedback Received");
    println!("{}", output::truncate(&outcome.feedback, 500));

    output::section("V2 (After Reflection)");
    println!("{}", outcome.v2);

    output::print_metrics(&outcome.metrics, &config.model);
    Ok(())
}

async fn run_compare(config: &Config, url: &str) -> Result<()> {
    output::banner("COMPARISON: CHAINED vs AGENTIC");

    let started = Instant::now();
    let chained_result = run_chained(config, url).await;
    let chained_elapsed = started.elapsed();

    let started = Instant::now();
    let agent_result = run_agent(config, url, false).await;
    let agent_elapsed = started.elapsed();

    output::section("COMPARISON SUMMARY");
    println!(
        "  Chained:  {} in {:.1}s",
        if chained_result.is_ok() {
            style("succeeded").green()
        } else {
            style("failed").red()
        },
        chained_elapsed.as_secs_f64()
    );
    println!(
        "  Agentic:  {} in {:.1}s",
        if agent_result.is_ok() {
            style("succeeded").green()
        } else {
            style("failed").red()
        },
        agent_elapsed.as_secs_f64()
    );
    println!(
        "\nThe chained workflow is fast and cheap but breaks on unexpected\n\
         inputs; the agent costs more turns and recovers from them."
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Verify => {
            let code = verify::run().await;
            std::process::exit(code);
        }
        command => {
            let config = Config::from_env()?;
            match command {
                Commands::Chained { url } => run_chained(&config, &url).await?,
                Commands::Agent { url } => run_agent(&config, &url, false).await?,
                Commands::Raw { url } => run_agent(&config, &url, true).await?,
                Commands::Research { url } => run_research(&config, &url).await?,
                Commands::Compare { url } => run_compare(&config, &url).await?,
                Commands::Verify => unreachable!(),
            }
        }
    }

    Ok(())
}
