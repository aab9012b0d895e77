use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("A template named '{0}' is already registered")]
    DuplicateTemplate(String),

    #[error("No template named '{0}' is registered")]
    UnknownTemplate(String),

    #[error("Invalid option tree: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template registry lock poisoned")]
    RegistryPoisoned,
}
