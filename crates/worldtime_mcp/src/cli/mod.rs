use clap::Parser;

/// Worldtime MCP Server
///
/// A Model Context Protocol server answering timezone-aware time queries:
/// the current time in a zone, HH:MM conversion between zones, and
/// natural-language expressions like "next Friday at noon".
///
/// ## Development
/// ```bash
/// npx @modelcontextprotocol/inspector cargo run --bin mcp-server-worldtime
/// ```
///
/// ## Configuration
/// Add to your MCP client configuration:
/// ```json
/// {
///   "mcpServers": {
///     "worldtime": {
///       "command": "mcp-server-worldtime",
///       "args": ["--local-timezone", "Europe/Berlin"]
///     }
///   }
/// }
/// ```
///
/// ## Environment Variables
/// - `LOG_LEVEL`: enables stderr logging at the given level (trace, debug, info, warn, error)
#[derive(Parser, Debug, Clone)]
#[command(name = "mcp-server-worldtime")]
#[command(about = "An MCP server for timezone queries, conversions and natural-language time parsing")]
#[command(version)]
pub struct Cli {
    /// Local timezone used when a request omits one.
    ///
    /// Accepts an IANA name such as 'Europe/Berlin'. When absent, the
    /// server detects the host timezone and falls back to UTC.
    #[arg(
        short = 'l',
        long = "local-timezone",
        value_name = "IANA_NAME",
        help = "Override the detected local timezone"
    )]
    pub local_timezone: Option<String>,
}
