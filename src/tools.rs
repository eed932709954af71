//! Runtime tool path resolution
//!
//! For each external tool (e.g., `git`), we:
//! 1. Check for an environment variable `{TOOL}_BIN` (e.g., `GIT_BIN`)
//! 2. Fall back to PATH-based invocation if the envvar is not set
//!
//! This lets packaging environments provide explicit binary paths via
//! environment variables while keeping plain PATH lookup for development.

use std::env;

/// Get the path to an external tool
///
/// Checks for an environment variable `{TOOL}_BIN` (uppercase tool name with
/// dashes mapped to underscores, plus "_BIN"). Falls back to the tool name
/// itself if the envvar is not set, which relies on PATH.
pub fn get_tool_path(tool: &str) -> String {
    let env_var = format!("{}_BIN", tool.to_uppercase().replace('-', "_"));
    env::var(&env_var).unwrap_or_else(|_| tool.to_string())
}

/// Common tool names (for documentation and IDE autocomplete)
pub mod tools {
    pub const GIT: &str = "git";
}
