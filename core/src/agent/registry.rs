use crate::traits::{Tool, ToolResult, ToolSpec};
use std::sync::{Arc, Mutex};

pub struct ToolRegistry {
    tools: Mutex<Vec<Arc<dyn Tool>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Mutex::new(Vec::new()),
        }
    }

    pub fn register(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.lock().unwrap();
        tools.push(tool);
    }

    pub fn specs(&self) -> Vec<ToolSpec> {
        let tools = self.tools.lock().unwrap();
        tools.iter().map(|t| t.spec()).collect()
    }

    /// Resolves every failure path to a `ToolResult`; never propagates.
    pub async fn execute(&self, name: &str, args: serde_json::Value) -> ToolResult {
        let tool = {
            let tools = self.tools.lock().unwrap();
            tools.iter().find(|t| t.name() == name).cloned()
        };

        match tool {
            Some(tool) => match tool.execute(args).await {
                Ok(result) => result,
                Err(e) => ToolResult::error(format!("Execution failed: {}", e)),
            },
            None => ToolResult::error(format!("Tool '{}' not found", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input back"
        }

        fn input_schema(&self) -> serde_json::Value {
            json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" }
                },
                "required": ["text"]
            })
        }

        async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
            match args.get("text").and_then(|v| v.as_str()) {
                Some(text) => Ok(ToolResult::success(text)),
                None => Err(anyhow::anyhow!("missing 'text'")),
            }
        }
    }

    #[tokio::test]
    async fn executes_registered_tool() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let result = registry.execute("echo", json!({"text": "hi"})).await;
        assert!(result.success);
        assert_eq!(result.output, "hi");
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error_result() {
        let registry = ToolRegistry::new();
        let result = registry.execute("missing", json!({})).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn executor_error_becomes_error_result() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let result = registry.execute("echo", json!({})).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Execution failed"));
    }

    #[test]
    fn specs_reflect_registered_tools() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let specs = registry.specs();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "echo");
        assert!(specs[0].input_schema.is_object());
    }
}
