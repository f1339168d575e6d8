//! Errors reported while parsing key lists.

use thiserror::Error;

/// Error cases which may happen while classifying a key list.
///
/// Each variant carries the offending key (after quote and sigil stripping) so the caller can
/// point the user at it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// A `*` or `?` appears before a path separator, e.g. `*\file.exe`. Wildcards are only
    /// allowed in the last path component.
    #[error("wildcard in directory part of pattern `{key}`")]
    WildcardInDirectory { key: String },

    /// An absolute path was given as a search pattern. Only exceptions may be absolute.
    #[error("absolute path not allowed as search pattern: `{key}`")]
    AbsoluteSearchPath { key: String },
}

impl KeyError {
    /// The numeric status code of this error. `0` is reserved for success.
    pub fn code(&self) -> i32 {
        match self {
            KeyError::WildcardInDirectory { .. } => 1,
            KeyError::AbsoluteSearchPath { .. } => 2,
        }
    }

    /// The key which caused the error.
    pub fn key(&self) -> &str {
        match self {
            KeyError::WildcardInDirectory { key } | KeyError::AbsoluteSearchPath { key } => key,
        }
    }
}

/// Convert the result of a key operation to its numeric status code: `0` on success, otherwise
/// [`KeyError::code`].
pub fn error_code(result: &Result<(), KeyError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => err.code(),
    }
}

#[test]
fn test_error_codes() {
    let wild = KeyError::WildcardInDirectory {
        key: "a\\*\\b.txt".to_string(),
    };
    let abs = KeyError::AbsoluteSearchPath {
        key: "C:\\abs\\*.txt".to_string(),
    };
    assert_eq!(wild.code(), 1);
    assert_eq!(abs.code(), 2);
    assert_eq!(abs.key(), "C:\\abs\\*.txt");

    assert_eq!(error_code(&Ok(())), 0);
    assert_eq!(error_code(&Err(wild.clone())), 1);
    assert_eq!(error_code(&Err(abs)), 2);

    assert_eq!(
        wild.to_string(),
        "wildcard in directory part of pattern `a\\*\\b.txt`"
    );
}
