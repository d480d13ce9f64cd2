use console::style;
use prospector_core::providers::AnthropicProvider;
use prospector_core::traits::{ChatMessage, ChatRequest, Provider};

use crate::output;

fn check_mark(ok: bool) -> console::StyledObject<&'static str> {
    if ok {
        style("ok").green()
    } else {
        style("FAIL").red()
    }
}

fn mask(key: &str) -> String {
    if key.len() > 10 {
        format!("{}{}", &key[..10], "*".repeat(10))
    } else {
        format!("{}{}", &key[..key.len().min(3)], "*".repeat(5))
    }
}

fn check_env_key(name: &str, expected_prefix: Option<&str>) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => {
            if let Some(prefix) = expected_prefix {
                if !value.starts_with(prefix) {
                    println!(
                        "   [{}] {}: set but does not start with {}",
                        check_mark(false),
                        name,
                        prefix
                    );
                    return None;
                }
            }
            println!("   [{}] {}: {}", check_mark(true), name, mask(&value));
            Some(value)
        }
        _ => {
            println!("   [{}] {}: not set", check_mark(false), name);
            None
        }
    }
}

async fn check_connectivity(api_key: &str) -> bool {
    let provider = AnthropicProvider::new(api_key).with_max_tokens(16);
    let messages = [ChatMessage::user("Hi")];
    let request = ChatRequest {
        system: "",
        messages: &messages,
        tools: None,
    };

    match provider.chat(request).await {
        Ok(_) => {
            println!("   [{}] Anthropic API: connected", check_mark(true));
            true
        }
        Err(e) => {
            println!(
                "   [{}] Anthropic API: {}",
                check_mark(false),
                output::truncate(&e.to_string(), 80)
            );
            false
        }
    }
}

/// Checks every prerequisite for the demos and reports a pass/fail summary.
/// Returns a process exit code.
pub async fn run() -> i32 {
    dotenvy::dotenv().ok();

    output::section("Setup Verification");

    println!("\n1. Checking environment configuration...");
    let anthropic_key = check_env_key("ANTHROPIC_API_KEY", Some("sk-ant-"));
    let enrich_key = check_env_key("ENRICHLAYER_API_KEY", None);

    println!("\n2. Testing API connectivity...");
    let connected = match &anthropic_key {
        Some(key) => check_connectivity(key).await,
        None => {
            println!("   skipped (set ANTHROPIC_API_KEY first)");
            false
        }
    };

    let checks = [
        ("ANTHROPIC_API_KEY", anthropic_key.is_some()),
        ("ENRICHLAYER_API_KEY", enrich_key.is_some()),
        ("API connectivity", connected),
    ];

    output::section("SUMMARY");
    let passed = checks.iter().filter(|(_, ok)| *ok).count();
    for (name, ok) in &checks {
        println!("  [{}] {}", check_mark(*ok), name);
    }
    println!("\nPassed: {}/{}", passed, checks.len());

    if passed == checks.len() {
        println!("\n{}", style("All checks passed. Ready to run demos.").green());
        0
    } else {
        println!(
            "\n{}",
            style("Some checks failed. Fix the issues above and re-run.").red()
        );
        1
    }
}
