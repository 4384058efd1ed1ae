use rmcp::{
    RoleServer, ServerHandler,
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
    },
    model::*,
    prompt, prompt_handler, prompt_router,
    service::RequestContext,
    tool, tool_handler, tool_router,
};

use crate::core::provider::TimeServer;
use crate::core::{
    error::{McpResult, TimeServerResult},
    models::{ConvertTimeRequest, GetCurrentTimeRequest, ParseNaturalTimeRequest},
};

/// Worldtime MCP Server with timezone operations
#[derive(Clone)]
pub struct TimeService {
    time_server: TimeServer,
    local_timezone_name: String, // Cache this
    tool_router: ToolRouter<TimeService>,
    prompt_router: PromptRouter<TimeService>,
}

impl TimeService {
    pub fn new() -> Self {
        Self::from_time_server(TimeServer::new())
    }

    /// Service whose local default zone is the given identifier rather than
    /// the detected host zone.
    pub fn with_local_timezone(timezone_name: &str) -> TimeServerResult<Self> {
        Ok(Self::from_time_server(TimeServer::with_local_timezone(
            timezone_name,
        )?))
    }

    fn from_time_server(time_server: TimeServer) -> Self {
        let local_timezone_name = time_server.local_timezone.name().to_string();

        Self {
            time_server,
            local_timezone_name,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    fn create_resource_text(&self, uri: &str, name: &str) -> Resource {
        RawResource::new(uri, name.to_string()).no_annotation()
    }

    pub(crate) fn get_local_timezone_name(&self) -> &str {
        &self.local_timezone_name
    }

    fn generate_status_content(&self) -> McpResult<String> {
        let current_time = self
            .time_server
            .get_current_time(&self.local_timezone_name)?;

        Ok(format!(
            r#"Worldtime MCP Server Status

Server: Running
Local Timezone: {}
Current Local Time: {}
DST Active: {}
Tools Available: 3
Prompts Available: 1
Resources Available: 3

Capabilities:
- Current time queries for any IANA timezone
- Time conversion between timezones
- Natural-language expressions resolved to absolute times
- Automatic DST handling
- Local timezone detection"#,
            current_time.timezone, current_time.datetime, current_time.is_dst
        ))
    }

    fn generate_help_content(&self) -> String {
        format!(
            r#"Worldtime MCP Server Help

TOOLS:
- get_current_time: Get the current time in a specific timezone
  - timezone: IANA timezone name (optional; empty uses the local timezone)
  - Example: {{"timezone": "America/New_York"}}

- convert_time: Convert a time between timezones
  - source_timezone: Source IANA timezone name (empty uses the local timezone)
  - time: Time in 24-hour format HH:MM (required)
  - target_timezone: Target IANA timezone name (empty uses the local timezone)
  - Example: {{"source_timezone": "America/New_York", "time": "14:30", "target_timezone": "Europe/London"}}

- parse_natural_time: Resolve a natural-language expression to an absolute time
  - expression: e.g. "next Friday at noon", "tomorrow at 8pm", "3 days from now"
  - timezone: IANA timezone the expression is interpreted in (optional)
  - Example: {{"expression": "tomorrow at 9:30am", "timezone": "UTC"}}

PROMPTS:
- timezone_guidance: Best practices for timezone usage

RESOURCES:
- time://status: Current server status and local time
- time://help: This help documentation
- time://timezones: List of common IANA timezone names

LOCAL TIMEZONE: {}

TIMEZONE FORMAT:
- Use full IANA names: 'America/New_York', 'Europe/London'
- Avoid abbreviations: 'EST', 'PST' (ambiguous)
- Time format: 24-hour HH:MM (e.g., '09:30', '14:45')

DST HANDLING:
- Transitions are handled automatically; the 'is_dst' field reports status
- Offset differences (e.g. "+17h", "+5.75h") account for DST offsets"#,
            self.local_timezone_name
        )
    }

    fn generate_timezone_list_content(&self) -> &'static str {
        r#"Common IANA Timezone Names

AMERICAS:
- America/New_York (Eastern Time)
- America/Chicago (Central Time)
- America/Denver (Mountain Time)
- America/Los_Angeles (Pacific Time)
- America/Sao_Paulo (Brazil Time)

EUROPE:
- Europe/London (Greenwich Mean Time)
- Europe/Paris (Central European Time)
- Europe/Berlin (Central European Time)
- Europe/Moscow (Moscow Time)

ASIA:
- Asia/Tokyo (Japan Standard Time)
- Asia/Shanghai (China Standard Time)
- Asia/Singapore (Singapore Time)
- Asia/Kolkata (India Standard Time)
- Asia/Kathmandu (Nepal Time, UTC+5:45)
- Asia/Dubai (Gulf Standard Time)

OCEANIA:
- Australia/Sydney (Australian Eastern Time)
- Pacific/Auckland (New Zealand Time)

AFRICA:
- Africa/Cairo (Eastern European Time)
- Africa/Johannesburg (South Africa Time)

SPECIAL:
- UTC (Coordinated Universal Time)

Note: Many timezones observe Daylight Saving Time (DST) and will
automatically adjust their offsets during DST periods."#
    }
}

impl Default for TimeService {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl TimeService {
    #[tool(description = "Get the current time in a specific timezone")]
    pub(crate) async fn get_current_time(
        &self,
        Parameters(req): Parameters<GetCurrentTimeRequest>,
    ) -> McpResult<CallToolResult> {
        let result = self.time_server.get_current_time(&req.timezone)?;
        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&result).unwrap(),
        )]))
    }

    #[tool(description = "Convert a 24-hour HH:MM time between timezones")]
    pub(crate) async fn convert_time(
        &self,
        Parameters(req): Parameters<ConvertTimeRequest>,
    ) -> McpResult<CallToolResult> {
        let result =
            self.time_server
                .convert_time(&req.source_timezone, &req.time, &req.target_timezone)?;
        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&result).unwrap(),
        )]))
    }

    #[tool(
        description = "Resolve a natural-language time expression (e.g. 'next Friday at noon') to an absolute time"
    )]
    pub(crate) async fn parse_natural_time(
        &self,
        Parameters(req): Parameters<ParseNaturalTimeRequest>,
    ) -> McpResult<CallToolResult> {
        let result = self
            .time_server
            .parse_natural_time(&req.expression, &req.timezone)?;
        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&result).unwrap(),
        )]))
    }
}

#[prompt_router]
impl TimeService {
    /// Generate guidance for effective timezone usage
    #[prompt(name = "timezone_guidance")]
    async fn timezone_guidance(
        &self,
        _ctx: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<Vec<PromptMessage>> {
        let local_tz = self.get_local_timezone_name();
        let guidance = format!(
            r#"Timezone Best Practices:

1. **IANA Timezone Names**
   - Use full IANA timezone names (e.g., 'America/New_York', 'Europe/London')
   - Avoid abbreviations like 'EST' or 'PST' as they can be ambiguous
   - Your local timezone is detected as: {}

2. **Time Format**
   - Use 24-hour format (HH:MM) for time conversion
   - Examples: '09:30', '14:45', '23:15'

3. **Natural-Language Expressions**
   - parse_natural_time accepts phrases like 'tomorrow at 8pm',
     'next Friday at noon', '3 days from now'
   - Relative phrases are resolved against the current time in the
     requested timezone

4. **Daylight Saving Time**
   - DST transitions are handled automatically
   - The 'is_dst' field indicates whether DST is active
   - Offset differences account for DST

5. **Error Handling**
   - Invalid timezone names are rejected with the offending name
   - Malformed HH:MM times are rejected, not clamped
   - Unparseable expressions are rejected with the original text"#,
            local_tz
        );

        Ok(vec![PromptMessage {
            role: PromptMessageRole::Assistant,
            content: PromptMessageContent::text(guidance),
        }])
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for TimeService {
    fn get_info(&self) -> ServerInfo {
        let local_tz = self.get_local_timezone_name();
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Worldtime MCP Server for timezone operations. Tools: get_current_time, convert_time, parse_natural_time. Local timezone: {}. Use IANA timezone names.",
                local_tz
            )),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<ListResourcesResult> {
        Ok(ListResourcesResult {
            resources: vec![
                self.create_resource_text("time://status", "server-status"),
                self.create_resource_text("time://help", "help-documentation"),
                self.create_resource_text("time://timezones", "timezone-list"),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<ReadResourceResult> {
        match uri.as_str() {
            "time://status" => {
                let status = self.generate_status_content()?;
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(status, uri)],
                })
            }
            "time://help" => {
                let help = self.generate_help_content();
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(help, uri)],
                })
            }
            "time://timezones" => {
                let common_timezones = self.generate_timezone_list_content();
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(common_timezones, uri)],
                })
            }
            _ => Err(crate::core::error::TimeServerError::ResourceNotFound {
                uri: uri.to_string(),
            }
            .into()),
        }
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<ListResourceTemplatesResult> {
        Ok(ListResourceTemplatesResult {
            next_cursor: None,
            resource_templates: Vec::new(),
        })
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> McpResult<InitializeResult> {
        tracing::info!("Worldtime MCP Server initialized successfully");
        Ok(self.get_info())
    }
}

pub async fn run(local_timezone: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    use rmcp::{ServiceExt, transport::stdio};

    let service = match local_timezone.as_deref() {
        Some(name) => TimeService::with_local_timezone(name)?,
        None => TimeService::new(),
    };

    let service = service.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("serving error: {:?}", e);
    })?;

    service.waiting().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_current_time() {
        let service = TimeService::new();

        println!(
            "Detected local timezone: {}",
            service.get_local_timezone_name()
        );

        let req = GetCurrentTimeRequest {
            timezone: "UTC".to_string(),
        };

        let result = service.get_current_time(Parameters(req)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_current_time_empty_timezone() {
        let service = TimeService::new();

        let req = GetCurrentTimeRequest {
            timezone: String::new(),
        };

        let result = service.get_current_time(Parameters(req)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_current_time_invalid_timezone() {
        let service = TimeService::new();

        let req = GetCurrentTimeRequest {
            timezone: "Invalid/Timezone".to_string(),
        };

        let result = service.get_current_time(Parameters(req)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_convert_time() {
        let service = TimeService::new();

        let req = ConvertTimeRequest {
            source_timezone: "UTC".to_string(),
            time: "12:00".to_string(),
            target_timezone: "America/New_York".to_string(),
        };

        let result = service.convert_time(Parameters(req)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_convert_time_invalid_format() {
        let service = TimeService::new();

        let req = ConvertTimeRequest {
            source_timezone: "UTC".to_string(),
            time: "25:00".to_string(), // Invalid hour
            target_timezone: "America/New_York".to_string(),
        };

        let result = service.convert_time(Parameters(req)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_convert_time_invalid_timezone() {
        let service = TimeService::new();

        let req = ConvertTimeRequest {
            source_timezone: "Invalid/Timezone".to_string(),
            time: "12:00".to_string(),
            target_timezone: "UTC".to_string(),
        };

        let result = service.convert_time(Parameters(req)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_parse_natural_time() {
        let service = TimeService::new();

        let req = ParseNaturalTimeRequest {
            expression: "tomorrow".to_string(),
            timezone: "UTC".to_string(),
        };

        let result = service.parse_natural_time(Parameters(req)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_parse_natural_time_unparseable() {
        let service = TimeService::new();

        let req = ParseNaturalTimeRequest {
            expression: "this is not a date at all".to_string(),
            timezone: "UTC".to_string(),
        };

        let result = service.parse_natural_time(Parameters(req)).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_local_timezone_override() {
        let service = TimeService::with_local_timezone("Asia/Tokyo").unwrap();
        assert_eq!(service.get_local_timezone_name(), "Asia/Tokyo");

        assert!(TimeService::with_local_timezone("Invalid/Timezone").is_err());
    }

    #[test]
    fn test_service_creation() {
        let service = TimeService::new();
        let info = service.get_info();

        assert_eq!(info.protocol_version, ProtocolVersion::V_2024_11_05);
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.instructions.is_some());
    }

    #[test]
    fn test_cached_timezone_name() {
        let service = TimeService::new();
        let name1 = service.get_local_timezone_name();
        let name2 = service.get_local_timezone_name();

        // Should return the same reference (cached)
        assert_eq!(name1, name2);
        assert!(!name1.is_empty());
    }
}
