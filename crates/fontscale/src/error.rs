pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("font manifest '{path}' not found")]
    ManifestNotFound { path: String },

    #[error("parsing manifest XML failed: {0}")]
    ManifestParse(#[from] roxmltree::Error),

    #[error("<jsonData id='{id}'> not found in manifest")]
    ConfigMissing { id: &'static str },

    #[error("invalid <jsonData id='{id}'> configuration: {message}")]
    ConfigInvalid {
        id: &'static str,
        message: String,
    },

    #[error("external configuration file '{path}' for <jsonData id='{id}'> not found")]
    ExternalConfigNotFound {
        id: &'static str,
        path: String,
    },

    #[error("missing {} source TTF files: {}", .names.len(), .names.join(", "))]
    MissingSourceFiles { names: Vec<String> },

    #[error("error preparing target manifest: {message}")]
    TargetPreparation { message: String },

    #[error("font processing tool '{tool}' not found")]
    ToolNotFound { tool: String },

    #[error("failed processing TTF file '{ttf}': {message}")]
    ToolInvocation {
        ttf: String,
        message: String,
    },

    #[error("failed to write report to {destination}: {source}")]
    ReportWrite {
        destination: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
