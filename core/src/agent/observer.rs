use crate::traits::{StopReason, Usage};
use serde_json::Value;

/// Turn-boundary hooks for tracing a loop run. All methods default to
/// no-ops; a loop without an observer behaves identically.
pub trait LoopObserver: Send + Sync {
    fn on_turn_start(&self, _turn: usize) {}

    fn on_tool_call(&self, _turn: usize, _name: &str, _input: &Value) {}

    fn on_tool_result(&self, _turn: usize, _name: &str, _output: &str, _is_error: bool) {}

    fn on_turn_end(&self, _turn: usize, _stop_reason: StopReason, _usage: &Usage) {}
}
