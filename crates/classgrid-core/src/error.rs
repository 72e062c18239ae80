pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid schedule JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid schedule YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid grid configuration: {message}")]
    InvalidGrid { message: String },

    #[error("Invalid color `{value}` (expected #rgb, #rgba, #rrggbb or #rrggbbaa)")]
    InvalidColor { value: String },
}
