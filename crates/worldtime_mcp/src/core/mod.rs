//! # Worldtime MCP Server Core
//!
//! Timezone-aware time resolution behind the MCP tool surface.
//!
//! ## Features
//! - Current time queries for any IANA timezone
//! - Wall-clock time conversion between timezones
//! - Natural-language time expressions resolved against an injectable "now"
//! - DST-aware offsets and offset-difference reporting
//!
//! ## Modules
//! - `clock`: swappable source of "now" (system clock or fixed instant)
//! - `error`: typed errors and their MCP conversions
//! - `models`: request and result types
//! - `provider`: zone resolution, time queries and natural-language parsing
//! - `utils`: offset/DST evaluation and difference formatting

pub mod clock;
pub mod error;
pub mod models;
pub mod provider;
pub mod utils;
