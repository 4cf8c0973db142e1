use thiserror::Error;

#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("no script element with id '{script_id}' and type application/json")]
    ScriptNotFound { script_id: String },

    #[error("{count} script elements with id '{script_id}'; expected exactly one")]
    AmbiguousScript { script_id: String, count: usize },

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Failed to parse embedded JSON: {0}")]
    EmbeddedJson(#[source] serde_json::Error),

    #[error("document has no 'lab' object")]
    MissingLab,

    #[error("unexpected 'lab' shape: {0}")]
    LabShape(#[source] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Pipeline stage an error belongs to. Everything but `Fatal` only skips the entry it happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Transport,
    Extraction,
    Mapping,
    Fatal,
}

impl FailureStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureStage::Transport => "transport",
            FailureStage::Extraction => "extraction",
            FailureStage::Mapping => "mapping",
            FailureStage::Fatal => "fatal",
        }
    }
}

impl RefreshError {
    pub fn stage(&self) -> FailureStage {
        match self {
            RefreshError::Http(_) | RefreshError::Status { .. } => FailureStage::Transport,
            RefreshError::ScriptNotFound { .. }
            | RefreshError::AmbiguousScript { .. }
            | RefreshError::InvalidSelector(_)
            | RefreshError::EmbeddedJson(_) => FailureStage::Extraction,
            RefreshError::MissingLab | RefreshError::LabShape(_) => FailureStage::Mapping,
            RefreshError::Config(_)
            | RefreshError::Toml(_)
            | RefreshError::Io(_)
            | RefreshError::Json(_) => FailureStage::Fatal,
        }
    }
}

pub type Result<T> = std::result::Result<T, RefreshError>;
