use rmcp::ErrorData as McpError;
use rmcp::serde_json::json;

// Error codes
const ERROR_INVALID_TIMEZONE: &str = "invalid_timezone";
const ERROR_INVALID_TIME_FORMAT: &str = "invalid_time_format";
const ERROR_UNPARSEABLE_EXPRESSION: &str = "unparseable_expression";
const ERROR_RESOURCE_NOT_FOUND: &str = "resource_not_found";

/// Error taxonomy for the three time operations.
///
/// Every variant carries the offending input verbatim; nothing is retried
/// or silently substituted.
#[derive(Debug, thiserror::Error)]
pub enum TimeServerError {
    #[error("unknown time zone: {timezone}")]
    InvalidTimezone { timezone: String },
    #[error("invalid time format: {time}. Expected HH:MM")]
    InvalidTimeFormat { time: String },
    #[error("could not parse expression '{expression}': {reason}")]
    UnparseableExpression { expression: String, reason: String },
    #[error("resource not found: {uri}")]
    ResourceNotFound { uri: String },
}

impl From<TimeServerError> for McpError {
    fn from(err: TimeServerError) -> Self {
        match err {
            TimeServerError::InvalidTimezone { timezone } => McpError::invalid_params(
                ERROR_INVALID_TIMEZONE,
                Some(json!({"timezone": timezone})),
            ),
            TimeServerError::InvalidTimeFormat { time } => {
                McpError::invalid_params(ERROR_INVALID_TIME_FORMAT, Some(json!({"time": time})))
            }
            TimeServerError::UnparseableExpression { expression, reason } => {
                McpError::invalid_params(
                    ERROR_UNPARSEABLE_EXPRESSION,
                    Some(json!({"expression": expression, "reason": reason})),
                )
            }
            TimeServerError::ResourceNotFound { uri } => McpError::resource_not_found(
                ERROR_RESOURCE_NOT_FOUND,
                Some(json!({
                    "uri": uri,
                    "available_resources": crate::core::utils::AVAILABLE_RESOURCES
                })),
            ),
        }
    }
}

pub type TimeServerResult<T> = Result<T, TimeServerError>;
pub type McpResult<T> = Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::TimeServerError;
    use crate::core::error::McpError;

    #[test]
    fn test_error_conversion() {
        let error = TimeServerError::InvalidTimezone {
            timezone: "Invalid/Zone".to_string(),
        };
        let mcp_error: McpError = error.into();

        // Should convert to proper MCP error format
        assert!(mcp_error.to_string().contains("invalid_timezone"));
    }

    #[test]
    fn messages_echo_the_offending_input() {
        let error = TimeServerError::InvalidTimezone {
            timezone: "Invalid/Timezone".to_string(),
        };
        assert!(error.to_string().contains("Invalid/Timezone"));

        let error = TimeServerError::InvalidTimeFormat {
            time: "25:00".to_string(),
        };
        assert!(error.to_string().contains("25:00"));

        let error = TimeServerError::UnparseableExpression {
            expression: "this is not a date at all".to_string(),
            reason: "no date found".to_string(),
        };
        assert!(error.to_string().contains("this is not a date at all"));
    }

    #[test]
    fn unparseable_expression_converts_with_its_code() {
        let error = TimeServerError::UnparseableExpression {
            expression: "gibberish".to_string(),
            reason: "no date found".to_string(),
        };
        let mcp_error: McpError = error.into();
        assert!(mcp_error.to_string().contains("unparseable_expression"));
    }
}
