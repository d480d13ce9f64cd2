pub mod loop_;
pub mod observer;
pub mod registry;

pub use loop_::{
    AgentLoop, RunFailure, RunMetrics, RunOutcome, RunStatus, ToolCallRecord, TurnRecord,
};
pub use observer::LoopObserver;
pub use registry::ToolRegistry;
