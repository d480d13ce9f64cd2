use crate::agent::{LoopObserver, ToolRegistry};
use crate::traits::{ChatMessage, ChatRequest, ContentBlock, Provider, StopReason, Usage};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

const DEFAULT_MAX_TURNS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    NaturalCompletion,
    BudgetExhausted,
}

#[derive(Debug, Clone)]
pub struct TurnRecord {
    pub turn: usize,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub stop_reason: StopReason,
}

#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    pub turn: usize,
    pub name: String,
    pub input: Value,
}

#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    pub turns_taken: usize,
    pub usage: Usage,
    pub turns: Vec<TurnRecord>,
    pub tool_calls: Vec<ToolCallRecord>,
}

impl RunMetrics {
    pub fn merge(&mut self, other: RunMetrics) {
        self.turns_taken += other.turns_taken;
        self.usage.add(&other.usage);
        self.turns.extend(other.turns);
        self.tool_calls.extend(other.tool_calls);
    }
}

#[derive(Debug)]
pub struct RunOutcome {
    pub status: RunStatus,
    pub final_text: String,
    pub history: Vec<ChatMessage>,
    pub metrics: RunMetrics,
}

/// Generation-service failure, carrying whatever history and metrics the
/// run had accumulated when the request failed.
#[derive(Debug)]
pub struct RunFailure {
    pub error: anyhow::Error,
    pub history: Vec<ChatMessage>,
    pub metrics: RunMetrics,
}

impl std::fmt::Display for RunFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "generation service failed after {} turn(s): {}",
            self.metrics.turns_taken, self.error
        )
    }
}

impl std::error::Error for RunFailure {}

pub struct AgentLoop {
    provider: Arc<dyn Provider>,
    tools: Arc<ToolRegistry>,
    system_prompt: String,
    max_turns: usize,
    observer: Option<Arc<dyn LoopObserver>>,
}

impl AgentLoop {
    pub fn new(provider: Arc<dyn Provider>, tools: Arc<ToolRegistry>) -> Self {
        Self {
            provider,
            tools,
            system_prompt: String::new(),
            max_turns: DEFAULT_MAX_TURNS,
            observer: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn LoopObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub async fn run(&self, prompt: &str) -> Result<RunOutcome, RunFailure> {
        self.run_with_history(Vec::new(), prompt).await
    }

    /// One bounded exchange: send the full history every turn, execute any
    /// requested tools, feed results back, stop on natural completion or
    /// when the turn budget runs out. The caller-supplied history is
    /// extended, never rewritten.
    pub async fn run_with_history(
        &self,
        mut history: Vec<ChatMessage>,
        prompt: &str,
    ) -> Result<RunOutcome, RunFailure> {
        history.push(ChatMessage::user(prompt));

        let mut metrics = RunMetrics::default();
        let mut final_text = String::new();
        let specs = self.tools.specs();

        while metrics.turns_taken < self.max_turns {
            let turn = metrics.turns_taken + 1;

            if let Some(observer) = &self.observer {
                observer.on_turn_start(turn);
            }

            let request = ChatRequest {
                system: &self.system_prompt,
                messages: &history,
                tools: if specs.is_empty() { None } else { Some(&specs) },
            };

            let response = match self.provider.chat(request).await {
                Ok(response) => response,
                Err(error) => {
                    return Err(RunFailure {
                        error,
                        history,
                        metrics,
                    });
                }
            };

            metrics.turns_taken = turn;
            metrics.usage.add(&response.usage);
            metrics.turns.push(TurnRecord {
                turn,
                input_tokens: response.usage.input_tokens,
                output_tokens: response.usage.output_tokens,
                stop_reason: response.stop_reason,
            });

            if let Some(text) = response.text() {
                final_text = text;
            }

            let requested: Vec<(String, String, Value)> = response
                .content
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::ToolUse { id, name, input } => {
                        Some((id.clone(), name.clone(), input.clone()))
                    }
                    _ => None,
                })
                .collect();

            let stop_reason = response.stop_reason;
            history.push(ChatMessage::assistant_blocks(response.content));

            if !stop_reason.needs_continuation() || requested.is_empty() {
                debug!(turn, ?stop_reason, "natural completion");
                if let Some(observer) = &self.observer {
                    observer.on_turn_end(turn, stop_reason, &response.usage);
                }
                return Ok(RunOutcome {
                    status: RunStatus::NaturalCompletion,
                    final_text,
                    history,
                    metrics,
                });
            }

            let mut results = Vec::with_capacity(requested.len());
            for (id, name, input) in requested {
                if let Some(observer) = &self.observer {
                    observer.on_tool_call(turn, &name, &input);
                }
                metrics.tool_calls.push(ToolCallRecord {
                    turn,
                    name: name.clone(),
                    input: input.clone(),
                });

                let result = self.tools.execute(&name, input).await;
                let content = if result.success {
                    result.output
                } else {
                    result
                        .error
                        .unwrap_or_else(|| "tool execution failed".to_string())
                };

                if let Some(observer) = &self.observer {
                    observer.on_tool_result(turn, &name, &content, !result.success);
                }

                results.push(ContentBlock::ToolResult {
                    tool_use_id: id,
                    content,
                    is_error: !result.success,
                });
            }

            history.push(ChatMessage::tool_results(results));

            if let Some(observer) = &self.observer {
                observer.on_turn_end(turn, stop_reason, &response.usage);
            }
        }

        debug!(max_turns = self.max_turns, "turn budget exhausted");
        Ok(RunOutcome {
            status: RunStatus::BudgetExhausted,
            final_text,
            history,
            metrics,
        })
    }
}
