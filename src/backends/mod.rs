//! HTTP clients for the supported generation backends.

pub mod groq;
pub mod local;

use std::fmt;
use std::str::FromStr;

use crate::error::LensError;

pub use groq::Groq;
pub use local::LocalModel;

/// The selectable generation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Remote Groq chat-completion API
    Groq,
    /// Local text-generation runtime
    Local,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Groq => "groq",
            BackendKind::Local => "local",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parsing of a backend name.
impl FromStr for BackendKind {
    type Err = LensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(BackendKind::Groq),
            "local" => Ok(BackendKind::Local),
            other => Err(LensError::InvalidRequest(format!(
                "Unknown backend: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_kind_round_trips_through_strings() {
        assert_eq!("groq".parse::<BackendKind>().unwrap(), BackendKind::Groq);
        assert_eq!(" Local ".parse::<BackendKind>().unwrap(), BackendKind::Local);
        assert_eq!(BackendKind::Groq.to_string(), "groq");
    }

    #[test]
    fn unknown_backend_is_an_invalid_request() {
        let err = "huggingface".parse::<BackendKind>().unwrap_err();
        assert!(matches!(err, LensError::InvalidRequest(_)));
    }
}
