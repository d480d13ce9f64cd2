use console::style;
use prospector_core::agent::{LoopObserver, RunMetrics};
use prospector_core::traits::{StopReason, Usage};
use prospector_core::workflow::{ReactStep, parse_trace};
use serde_json::Value;

pub fn banner(title: &str) {
    println!("\n{}", style("#".repeat(60)).dim());
    println!("{}", style(format!("# {}", title)).bold());
    println!("{}", style("#".repeat(60)).dim());
}

pub fn section(title: &str) {
    println!("\n{}", style("=".repeat(60)).dim());
    println!("{}", style(title).bold());
    println!("{}", style("=".repeat(60)).dim());
}

pub fn rule() {
    println!("{}", style("-".repeat(60)).dim());
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

/// Renders assistant text, styling Thought/Action lines when the model
/// produced a reasoning trace.
pub fn print_agent_text(text: &str) {
    let trace = parse_trace(text);
    if !trace.has_steps() {
        println!("{}", text);
        return;
    }

    if !trace.preamble.is_empty() {
        println!("{}", trace.preamble);
    }
    for step in &trace.steps {
        match step {
            ReactStep::Thought(body) => {
                println!("{} {}", style("Thought:").cyan().bold(), body)
            }
            ReactStep::Action(body) => {
                println!("{} {}", style("Action:").yellow().bold(), body)
            }
        }
    }
}

pub fn print_metrics(metrics: &RunMetrics, model: &str) {
    section("AGENT METRICS SUMMARY");
    println!("  Total turns: {}", metrics.turns_taken);
    println!("  Total input tokens: {}", metrics.usage.input_tokens);
    println!("  Total output tokens: {}", metrics.usage.output_tokens);
    println!("  Total tokens: {}", metrics.usage.total());
    println!("  Tool calls: {}", metrics.tool_calls.len());
    println!(
        "  Estimated cost: ${:.6}",
        metrics.usage.cost_usd(model)
    );

    if !metrics.turns.is_empty() {
        println!("\n{}", style("[TOKEN BREAKDOWN BY TURN]").bold());
        for record in &metrics.turns {
            println!(
                "  Turn {}: {} in / {} out",
                record.turn, record.input_tokens, record.output_tokens
            );
        }
    }
}

/// Prints turn boundaries and tool activity as the loop runs. The verbose
/// variant narrates everything the raw-API walkthrough wants visible.
pub struct ConsoleObserver {
    verbose: bool,
}

impl ConsoleObserver {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

impl Default for ConsoleObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopObserver for ConsoleObserver {
    fn on_turn_start(&self, turn: usize) {
        if self.verbose {
            println!("\n{}", style("-".repeat(60)).dim());
            println!("{}", style(format!("TURN {}", turn)).bold());
            println!("{}", style("-".repeat(60)).dim());
        }
    }

    fn on_tool_call(&self, _turn: usize, name: &str, input: &Value) {
        println!("\n  {} {}", style("Tool call:").yellow().bold(), name);
        println!(
            "  Input: {}",
            truncate(&input.to_string(), 100)
        );
    }

    fn on_tool_result(&self, _turn: usize, name: &str, output: &str, is_error: bool) {
        if is_error {
            println!(
                "  {} {}: {}",
                style("Tool error:").red().bold(),
                name,
                truncate(output, 200)
            );
        } else if self.verbose {
            println!("  Result: {}", truncate(output, 200));
        }
    }

    fn on_turn_end(&self, _turn: usize, stop_reason: StopReason, usage: &Usage) {
        if self.verbose {
            println!(
                "\n  Stop reason: {:?} | {} in / {} out",
                stop_reason, usage.input_tokens, usage.output_tokens
            );
        }
    }
}
