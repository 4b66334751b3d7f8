use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelpdeskError {
    #[error("ticket '{0}' not found")]
    TicketNotFound(String),

    #[error("invalid ticket format: {0}")]
    InvalidFormat(String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    #[error("invalid sort order '{0}' (expected newest, oldest or priority)")]
    InvalidSort(String),

    #[error("invalid role '{0}' (expected user, agent or admin)")]
    InvalidRole(String),

    #[error("invalid SLA tier '{0}'")]
    InvalidTier(String),

    #[error("invalid user id '{0}': {1}")]
    InvalidUserId(String, String),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("comment cannot be empty")]
    EmptyComment,

    #[error("title must be a single line")]
    MultilineTitle,

    // Access errors
    #[error("you must be logged in to {0}")]
    AuthRequired(&'static str),

    #[error("role '{role}' is not allowed to {action}")]
    Forbidden { role: String, action: &'static str },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("timestamp error: {0}")]
    Time(#[from] jiff::Error),

    #[error("{0}")]
    Other(String),
}

impl HelpdeskError {
    pub fn invalid_status(s: String) -> Self {
        HelpdeskError::InvalidStatus(s)
    }

    pub fn invalid_priority(s: String) -> Self {
        HelpdeskError::InvalidPriority(s)
    }

    pub fn invalid_sort(s: String) -> Self {
        HelpdeskError::InvalidSort(s)
    }

    pub fn invalid_role(s: String) -> Self {
        HelpdeskError::InvalidRole(s)
    }

    pub fn invalid_tier(s: String) -> Self {
        HelpdeskError::InvalidTier(s)
    }
}

pub type Result<T> = std::result::Result<T, HelpdeskError>;
