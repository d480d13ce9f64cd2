//! ReAct-style trace parsing: a linear splitter keyed on the literal
//! `Thought:` and `Action:` line prefixes the reasoning prompts elicit.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactStep {
    Thought(String),
    Action(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactTrace {
    pub preamble: String,
    pub steps: Vec<ReactStep>,
}

impl ReactTrace {
    pub fn has_steps(&self) -> bool {
        !self.steps.is_empty()
    }
}

const THOUGHT_PREFIX: &str = "Thought:";
const ACTION_PREFIX: &str = "Action:";

pub fn parse_trace(text: &str) -> ReactTrace {
    let mut trace = ReactTrace::default();
    let mut preamble_lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim_start();

        if let Some(rest) = trimmed.strip_prefix(THOUGHT_PREFIX) {
            trace.steps.push(ReactStep::Thought(rest.trim().to_string()));
        } else if let Some(rest) = trimmed.strip_prefix(ACTION_PREFIX) {
            trace.steps.push(ReactStep::Action(rest.trim().to_string()));
        } else if let Some(step) = trace.steps.last_mut() {
            // Continuation lines attach to the step they follow.
            let body = match step {
                ReactStep::Thought(body) | ReactStep::Action(body) => body,
            };
            if !line.trim().is_empty() {
                if !body.is_empty() {
                    body.push('\n');
                }
                body.push_str(line.trim());
            }
        } else if !line.trim().is_empty() {
            preamble_lines.push(line.trim());
        }
    }

    trace.preamble = preamble_lines.join("\n");
    trace
}
