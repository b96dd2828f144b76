use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{subject} expects a {expected} value, found {found}")]
    TypeKind { subject: String, expected: &'static str, found: String },
    #[error("malformed {entity}: {reason}")]
    MalformedInput { entity: String, reason: String },
    #[error("internal fault: {0}")]
    Internal(String),
    #[error("failed to read {0}")]
    Io(String, #[source] std::io::Error),
    #[error("failed to parse yaml")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse json")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn type_kind(subject: impl Into<String>, expected: &'static str,
                     found: impl Into<String>) -> Self {
        Error::TypeKind { subject: subject.into(), expected, found: found.into() }
    }
    pub fn malformed(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedInput { entity: entity.into(), reason: reason.into() }
    }
    /// Whether the caller sent something unusable, as opposed to a fault on
    /// this side. A request layer maps the former to 4xx and the latter to 5xx.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::TypeKind { .. } | Error::MalformedInput { .. })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn it_classifies_rejections() {
        assert!(Error::type_kind("ownership", "string", "number 1").is_rejection());
        assert!(Error::malformed("link L1", "missing status").is_rejection());
        assert!(!Error::Internal("lock poisoned".into()).is_rejection());
    }
    #[test]
    fn it_names_metric_in_message() {
        let err = Error::type_kind("bandwidth", "number", "string \"fast\"");
        assert_eq!(err.to_string(), "bandwidth expects a number value, found string \"fast\"");
    }
}
