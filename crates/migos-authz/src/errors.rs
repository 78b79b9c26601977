use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("permissions for role {0} not found")]
    UnrecognizedRole(String),
    #[error("invalid action: {0}")]
    InvalidAction(String),
}

pub type AuthzResult<T> = Result<T, AuthzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_variants() {
        let errors = vec![
            AuthzError::UnrecognizedRole("OWNER".to_string()),
            AuthzError::InvalidAction("bad".to_string()),
        ];

        for error in errors {
            let rendered = error.to_string();
            assert!(!rendered.is_empty());
        }
    }
}
