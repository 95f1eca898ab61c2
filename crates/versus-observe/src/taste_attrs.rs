//! Span and field names for the CLI and HTTP entry points.
//!
//! Field names are dotted and namespaced so they line up with the
//! `taste.*` fields recorded inside the pipeline and with the OTel export.
//! Use them in `tracing` macros as constant field names:
//! `info_span!("versus.cli", { CLI_COMMAND } = "vote")`.

/// Name of the CLI subcommand.
pub const CLI_COMMAND: &str = "cli.command";

/// HTTP method of an API request.
pub const HTTP_METHOD: &str = "http.request.method";

/// Path of an API request.
pub const HTTP_ROUTE: &str = "http.route";
