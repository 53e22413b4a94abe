//! Error types and handling for snipkit
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Only fatal conditions are errors. File conflicts, per-file write failures
//! and manifest range mismatches are data carried by the install report.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for snipkit operations
#[derive(Error, Diagnostic, Debug)]
pub enum SnipError {
    // Resolution errors
    #[error("Component '{name}' not found ({})", requester_label(.requested_by.as_deref()))]
    #[diagnostic(
        code(snipkit::resolve::missing_dependency),
        help("Check the component name, or run 'snipkit list' to see what the registry provides")
    )]
    MissingDependency {
        name: String,
        requested_by: Option<String>,
    },

    #[error("Circular dependency detected: {}", .cycle.join(" -> "))]
    #[diagnostic(
        code(snipkit::resolve::cycle),
        help("Remove one of the dependencies in the cycle from the registry")
    )]
    CyclicDependency { cycle: Vec<String> },

    // Registry errors
    #[error("No registry configured")]
    #[diagnostic(
        code(snipkit::registry::not_configured),
        help("Pass --registry <FILE>, set SNIPKIT_REGISTRY, or add 'registry:' to snipkit.yaml")
    )]
    RegistryNotConfigured,

    #[error("Registry file not found: {path}")]
    #[diagnostic(code(snipkit::registry::not_found))]
    RegistryNotFound { path: String },

    #[error("Failed to parse registry file: {path}: {reason}")]
    #[diagnostic(code(snipkit::registry::parse_failed))]
    RegistryParseFailed { path: String, reason: String },

    #[error("Component '{name}' is defined more than once")]
    #[diagnostic(
        code(snipkit::registry::duplicate),
        help("Component names must be unique within a registry")
    )]
    DuplicateComponent { name: String },

    #[error("Invalid component '{name}': {reason}")]
    #[diagnostic(code(snipkit::registry::invalid_component))]
    InvalidComponent { name: String, reason: String },

    #[error("Component '{name}' not found in registry")]
    #[diagnostic(
        code(snipkit::registry::component_not_found),
        help("Run 'snipkit list' to see available components")
    )]
    ComponentNotFound { name: String },

    #[error("No components requested")]
    #[diagnostic(
        code(snipkit::add::nothing_requested),
        help("Name one or more components, or pass --all to install the whole registry")
    )]
    NoComponentsRequested,

    #[error("{failed} file(s) could not be installed")]
    #[diagnostic(
        code(snipkit::add::incomplete),
        help("Fix the reported problems and run the same command again; completed files are skipped")
    )]
    InstallIncomplete { failed: usize },

    // Configuration errors
    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(snipkit::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(snipkit::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(snipkit::config::invalid))]
    ConfigInvalid { message: String },

    #[error("'{section}' in {path} is not an object")]
    #[diagnostic(
        code(snipkit::manifest::invalid_section),
        help("Change '{section}' to an object of package names and ranges, then run again")
    )]
    ManifestSectionInvalid { path: String, section: String },

    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(snipkit::completions::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnsupportedShell { shell: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(snipkit::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(snipkit::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(snipkit::fs::io_error))]
    IoError { message: String },
}

fn requester_label(requested_by: Option<&str>) -> String {
    match requested_by {
        Some(parent) => format!("required by '{parent}'"),
        None => "requested directly".to_string(),
    }
}

impl SnipError {
    /// Whether this error aborted dependency resolution
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            SnipError::MissingDependency { .. } | SnipError::CyclicDependency { .. }
        )
    }
}

impl From<std::io::Error> for SnipError {
    fn from(err: std::io::Error) -> Self {
        SnipError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for SnipError {
    fn from(err: serde_yaml::Error) -> Self {
        SnipError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SnipError {
    fn from(err: serde_json::Error) -> Self {
        SnipError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for SnipError {
    fn from(err: inquire::InquireError) -> Self {
        SnipError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SnipError>;
