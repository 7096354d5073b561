use thiserror::Error;

#[derive(Error, Debug)]
pub enum FieldError {
    #[error("invalid field kind '{0}': must be one of \"text\", \"textarea\", \"html\"")]
    InvalidKind(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Generation(#[from] textfill_llm::Error),
}

pub type Result<T> = std::result::Result<T, FieldError>;
