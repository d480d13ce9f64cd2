pub mod agent;
pub mod config;
pub mod enrich;
pub mod prompts;
pub mod providers;
pub mod tools;
pub mod traits;
pub mod workflow;

pub use agent::{AgentLoop, LoopObserver, RunFailure, RunMetrics, RunOutcome, RunStatus, ToolRegistry};
pub use config::Config;
pub use enrich::{EnrichClient, Profile, ProfileQuality};
pub use providers::AnthropicProvider;
pub use traits::*;
pub use workflow::{ChainedOutreach, ReflectionWorkflow};
