use crate::agent::{AgentLoop, RunFailure, RunMetrics};
use crate::prompts;
use tracing::info;

#[derive(Debug)]
pub struct ReflectionOutcome {
    pub v1: String,
    pub feedback: String,
    pub v2: String,
    pub metrics: RunMetrics,
}

/// The reflection pattern: V1 research, external feedback, reflected V2.
/// Three sequential bounded exchanges over one shared conversation, so the
/// reflection stage sees everything the earlier stages produced.
pub struct ReflectionWorkflow {
    agent: AgentLoop,
}

impl ReflectionWorkflow {
    pub fn new(agent: AgentLoop) -> Self {
        Self { agent }
    }

    pub async fn run(&self, linkedin_url: &str) -> Result<ReflectionOutcome, RunFailure> {
        let mut metrics = RunMetrics::default();

        info!(linkedin_url, "reflection stage 1: initial research");
        let v1_outcome = self
            .agent
            .run(&prompts::v1_research_prompt(linkedin_url))
            .await?;
        let v1 = v1_outcome.final_text;
        metrics.merge(v1_outcome.metrics);

        info!("reflection stage 2: collecting external feedback");
        let feedback_outcome = self
            .agent
            .run_with_history(v1_outcome.history, prompts::VALIDATION_PROMPT)
            .await?;
        let feedback = feedback_outcome.final_text;
        metrics.merge(feedback_outcome.metrics);

        info!("reflection stage 3: reflecting on feedback");
        let v2_outcome = self
            .agent
            .run_with_history(
                feedback_outcome.history,
                &prompts::reflection_prompt(&feedback),
            )
            .await?;
        let v2 = v2_outcome.final_text;
        metrics.merge(v2_outcome.metrics);

        Ok(ReflectionOutcome {
            v1,
            feedback,
            v2,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ToolRegistry;
    use crate::traits::{
        ChatRequest, ChatResponse, ContentBlock, Provider, StopReason, Usage,
    };
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct StagedProvider {
        responses: Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl Provider for StagedProvider {
        async fn chat(&self, request: ChatRequest<'_>) -> anyhow::Result<ChatResponse> {
            // Each stage should see the full accumulated history.
            assert!(!request.messages.is_empty());
            let mut responses = self.responses.lock().unwrap();
            let text = responses.remove(0);
            Ok(ChatResponse {
                content: vec![ContentBlock::Text { text: text.into() }],
                stop_reason: StopReason::EndTurn,
                usage: Usage::new(100, 40),
            })
        }
    }

    #[tokio::test]
    async fn three_stages_share_one_conversation() {
        let provider = Arc::new(StagedProvider {
            responses: Mutex::new(vec![
                "V1: Jane leads Acme Corp.",
                "Feedback: rating 3/5, add pain points.",
                "V2: Jane leads Acme Corp; margin pressure from tariffs.",
            ]),
        });
        let agent = AgentLoop::new(provider, Arc::new(ToolRegistry::new())).with_max_turns(5);
        let workflow = ReflectionWorkflow::new(agent);

        let outcome = workflow
            .run("https://linkedin.com/in/janedoe")
            .await
            .unwrap();

        assert!(outcome.v1.starts_with("V1"));
        assert!(outcome.feedback.starts_with("Feedback"));
        assert!(outcome.v2.starts_with("V2"));
        assert_eq!(outcome.metrics.turns_taken, 3);
        assert_eq!(outcome.metrics.usage.input_tokens, 300);
    }
}
