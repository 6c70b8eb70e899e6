mod convert;
mod models;
mod pace;
mod sync;

use anyhow::Result;
use models::{ConversionGroup, FieldSnapshot, Quantity};
use rmcp::{
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tokio::io::{stdin, stdout};
use tokio::sync::Mutex;

// Longest sensible field input; anything beyond this is garbage, not a number
const MAX_INPUT_LEN: usize = 32;

#[derive(Clone)]
struct RunnerUnitsServer {
    snapshot: Arc<Mutex<FieldSnapshot>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl RunnerUnitsServer {
    fn new() -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(FieldSnapshot::default())),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Edit one converter field with raw text; all other fields in its conversion group are re-derived from it. Empty text clears the group; malformed text leaves other fields untouched."
    )]
    async fn edit_field(
        &self,
        params: rmcp::handler::server::wrapper::Parameters<EditFieldParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        if params.text.len() > MAX_INPUT_LEN {
            return Err(McpError::invalid_params_no_data(format!(
                "Input too long ({} characters max)",
                MAX_INPUT_LEN
            )));
        }

        let mut snapshot = self.snapshot.lock().await;
        let updated = sync::edit_field(&snapshot, params.field, &params.text);
        *snapshot = updated;

        Ok(CallToolResult::success(vec![Content::text(
            render_snapshot(&snapshot),
        )]))
    }

    #[tool(
        description = "Swap the text of two converter fields in the same conversion group, then re-derive the group from the swapped-in value."
    )]
    async fn swap_fields(
        &self,
        params: rmcp::handler::server::wrapper::Parameters<SwapFieldsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        if params.field_a == params.field_b {
            return Err(McpError::invalid_params_no_data(
                "Cannot swap a field with itself",
            ));
        }

        if params.field_a.group() != params.field_b.group() {
            return Err(McpError::invalid_params_no_data(format!(
                "Cannot swap across conversion groups: {} is {} and {} is {}",
                params.field_a.label(),
                params.field_a.group().title(),
                params.field_b.label(),
                params.field_b.group().title(),
            )));
        }

        let mut snapshot = self.snapshot.lock().await;
        let updated = sync::swap_fields(&snapshot, params.field_a, params.field_b);
        *snapshot = updated;

        Ok(CallToolResult::success(vec![Content::text(
            render_snapshot(&snapshot),
        )]))
    }

    #[tool(description = "Format a pace given as decimal minutes (e.g. 8.5) as M:SS (e.g. 8:30)")]
    async fn format_pace(
        &self,
        params: rmcp::handler::server::wrapper::Parameters<FormatPaceParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        if !params.minutes.is_finite() || params.minutes < 0.0 {
            return Err(McpError::invalid_params_no_data(format!(
                "minutes must be a non-negative number (got {})",
                params.minutes
            )));
        }

        Ok(CallToolResult::success(vec![Content::text(
            pace::format_pace(params.minutes),
        )]))
    }

    #[tool(description = "Parse pace text (M:SS or decimal minutes) into decimal minutes")]
    async fn parse_pace(
        &self,
        params: rmcp::handler::server::wrapper::Parameters<PaceTextParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        match pace::parse_pace(&params.text) {
            Ok(Some(minutes)) => Ok(CallToolResult::success(vec![Content::text(format!(
                "{} = {} decimal minutes",
                params.text.trim(),
                minutes
            ))])),
            Ok(None) => Ok(CallToolResult::success(vec![Content::text(
                "Empty input (cleared field)".to_string(),
            )])),
            Err(e) => Err(McpError::invalid_params_no_data(e.to_string())),
        }
    }

    #[tool(
        description = "Check whether pace text is valid (M:SS, decimal minutes, or empty) without parsing it"
    )]
    async fn validate_pace_format(
        &self,
        params: rmcp::handler::server::wrapper::Parameters<PaceTextParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let verdict = if pace::is_valid_pace_format(&params.text) {
            "valid"
        } else {
            "invalid"
        };
        Ok(CallToolResult::success(vec![Content::text(format!(
            "{:?} is {}",
            params.text, verdict
        ))]))
    }

    #[tool(description = "Show the current state of all converter fields")]
    async fn show_fields(&self) -> Result<CallToolResult, McpError> {
        let snapshot = self.snapshot.lock().await;

        let json = serde_json::to_string_pretty(&*snapshot).map_err(McpError::internal)?;
        let output = format!(
            "{}\n```json\n{}\n```\n",
            render_snapshot(&snapshot),
            json
        );

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    #[tool(description = "Clear every converter field")]
    async fn reset_fields(&self) -> Result<CallToolResult, McpError> {
        let mut snapshot = self.snapshot.lock().await;
        *snapshot = FieldSnapshot::default();

        Ok(CallToolResult::success(vec![Content::text(
            "All fields cleared".to_string(),
        )]))
    }
}

#[tool_handler]
impl ServerHandler for RunnerUnitsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "MCP server for runner unit conversions. Edit any distance, speed, or pace field \
                 and the other fields in its conversion group update automatically. Supported \
                 units: miles, kilometers, meters, feet, mph, km/h, min/mile, min/km."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Render the snapshot as markdown, one section per conversion group.
fn render_snapshot(snapshot: &FieldSnapshot) -> String {
    let mut output = String::from("# Converter Fields\n\n");

    for group in [
        ConversionGroup::Distance,
        ConversionGroup::Elevation,
        ConversionGroup::SpeedPace,
    ] {
        output.push_str(&format!("## {}\n", group.title()));
        for &quantity in group.members() {
            let field = snapshot.field(quantity);
            let shown = if field.text.is_empty() {
                "(empty)"
            } else {
                field.text.as_str()
            };
            output.push_str(&format!("- **{}:** {}\n", quantity.label(), shown));
        }
        output.push('\n');
    }

    output
}

// Tool parameter structs
#[derive(Debug, Deserialize, JsonSchema)]
struct EditFieldParams {
    #[schemars(description = "Field being edited (e.g. miles_per_hour, minutes_per_mile)")]
    field: Quantity,
    #[schemars(
        description = "Raw text for the field: a non-negative decimal, M:SS for pace fields, or empty to clear the group"
    )]
    text: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SwapFieldsParams {
    #[schemars(description = "Field that becomes authoritative after the swap")]
    field_a: Quantity,
    #[schemars(description = "Field whose value moves into field_a; must be in the same group")]
    field_b: Quantity,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FormatPaceParams {
    #[schemars(description = "Pace as decimal minutes, e.g. 8.5 for 8 minutes 30 seconds")]
    minutes: f64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct PaceTextParams {
    #[schemars(description = "Pace text, e.g. \"8:30\" or \"8.5\"")]
    text: String,
}

// Helper methods for McpError
trait McpErrorExt {
    fn internal<E: std::fmt::Display>(error: E) -> Self;
    fn invalid_params_no_data<S: Into<String>>(message: S) -> Self;
}

impl McpErrorExt for McpError {
    fn internal<E: std::fmt::Display>(error: E) -> Self {
        McpError::internal_error(format!("Internal error: {}", error), None)
    }

    fn invalid_params_no_data<S: Into<String>>(message: S) -> Self {
        McpError::invalid_params(message.into(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_snapshot_sections() {
        let snapshot = sync::edit_field(&FieldSnapshot::default(), Quantity::Miles, "5");
        let output = render_snapshot(&snapshot);

        assert!(output.contains("## Distance"));
        assert!(output.contains("- **miles:** 5\n"));
        assert!(output.contains("- **kilometers:** 8.05\n"));
        // Fields in other groups render as empty
        assert!(output.contains("- **mph:** (empty)"));
    }

    #[test]
    fn test_edit_field_tool_updates_session_state() {
        let server = RunnerUnitsServer::new();
        tokio_test::block_on(async {
            let params = rmcp::handler::server::wrapper::Parameters(EditFieldParams {
                field: Quantity::MilesPerHour,
                text: "6.0".to_string(),
            });
            server.edit_field(params).await.unwrap();

            let snapshot = server.snapshot.lock().await;
            assert_eq!(snapshot.kilometers_per_hour.text, "9.66");
            assert_eq!(snapshot.minutes_per_mile.text, "10:00");
        });
    }

    #[test]
    fn test_swap_fields_tool_rejects_cross_group_pairs() {
        let server = RunnerUnitsServer::new();
        tokio_test::block_on(async {
            let params = rmcp::handler::server::wrapper::Parameters(SwapFieldsParams {
                field_a: Quantity::Miles,
                field_b: Quantity::Feet,
            });
            assert!(server.swap_fields(params).await.is_err());
        });
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let server = RunnerUnitsServer::new();

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Serve
    eprintln!("Starting Runner Units MCP server...");
    let service = server.serve(transport).await.map_err(|e| {
        eprintln!("Error starting server: {}", e);
        e
    })?;

    service.waiting().await?;

    Ok(())
}
