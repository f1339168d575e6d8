//! Classification of a single key: sigil, path kind, validation and bucket routing.

use crate::{BucketKind, KeyError};

/// The leading marker of a key in a combined key list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Sigil {
    /// No marker, a search pattern.
    None,

    /// `!`: exclude matching files.
    Negate,

    /// `#`: exclude matching folders.
    Hash,
}

impl Sigil {
    /// Split off the leading sigil. At most one character is consumed, so `!#x` is an
    /// except-file key `#x`.
    pub fn strip(key: &str) -> (Sigil, &str) {
        if let Some(rest) = key.strip_prefix('!') {
            (Sigil::Negate, rest)
        } else if let Some(rest) = key.strip_prefix('#') {
            (Sigil::Hash, rest)
        } else {
            (Sigil::None, key)
        }
    }
}

/// Whether a key is anchored at a filesystem root or drive, or relative to the search folder.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathKind {
    Relative,
    Absolute,
}

impl PathKind {
    /// A key is absolute if it starts with a path separator (`\foo`, `\\server\share`, `/foo`)
    /// or carries a drive designator (`C:\foo`, `C:foo`).
    pub fn of(key: &str) -> PathKind {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some('\\' | '/'), _) => PathKind::Absolute,
            (Some(_), Some(':')) => PathKind::Absolute,
            _ => PathKind::Relative,
        }
    }

    #[inline]
    pub fn is_absolute(self) -> bool {
        self == PathKind::Absolute
    }
}

#[inline]
pub(crate) fn is_wildcard(ch: char) -> bool {
    ch == '*' || ch == '?'
}

#[inline]
pub(crate) fn is_separator(ch: char) -> bool {
    ch == '\\' || ch == '/'
}

/// Reject keys with a wildcard in a directory component.
///
/// Separators are fine up to the first `*` or `?`, after that none may follow: `dir\*.txt` is
/// valid, `*\file.exe` and `a\*\b.txt` are not.
pub fn validate_key(key: &str) -> Result<(), KeyError> {
    let mut wildcard = false;
    for ch in key.chars() {
        if !wildcard && is_wildcard(ch) {
            wildcard = true;
        } else if wildcard && is_separator(ch) {
            return Err(KeyError::WildcardInDirectory {
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

/// Map a sigil and path kind to the bucket receiving the key.
///
/// Returns `None` for absolute search keys, which are not allowed.
pub fn route(sigil: Sigil, kind: PathKind) -> Option<BucketKind> {
    match (sigil, kind) {
        (Sigil::None, PathKind::Relative) => Some(BucketKind::SearchFile),
        (Sigil::None, PathKind::Absolute) => None,
        (Sigil::Negate, PathKind::Relative) => Some(BucketKind::ExceptFile),
        (Sigil::Negate, PathKind::Absolute) => Some(BucketKind::ExceptAbsFile),
        (Sigil::Hash, PathKind::Relative) => Some(BucketKind::ExceptFolder),
        (Sigil::Hash, PathKind::Absolute) => Some(BucketKind::ExceptAbsFolder),
    }
}

#[test]
fn test_sigil() {
    assert_eq!(Sigil::strip("*.cpp"), (Sigil::None, "*.cpp"));
    assert_eq!(Sigil::strip("!*.bak"), (Sigil::Negate, "*.bak"));
    assert_eq!(Sigil::strip("#node_modules"), (Sigil::Hash, "node_modules"));
    assert_eq!(Sigil::strip("!#x"), (Sigil::Negate, "#x"));
    assert_eq!(Sigil::strip("!"), (Sigil::Negate, ""));
    assert_eq!(Sigil::strip(""), (Sigil::None, ""));
}

#[test]
fn test_path_kind() {
    assert_eq!(PathKind::of("*.txt"), PathKind::Relative);
    assert_eq!(PathKind::of("sub\\*.txt"), PathKind::Relative);
    assert_eq!(PathKind::of(".\\x"), PathKind::Relative);
    assert_eq!(PathKind::of(""), PathKind::Relative);
    assert_eq!(PathKind::of("a"), PathKind::Relative);

    assert_eq!(PathKind::of("C:\\abs\\*.txt"), PathKind::Absolute);
    assert_eq!(PathKind::of("c:foo"), PathKind::Absolute);
    assert_eq!(PathKind::of("\\\\server\\share"), PathKind::Absolute);
    assert_eq!(PathKind::of("\\temp"), PathKind::Absolute);
    assert_eq!(PathKind::of("/usr/src"), PathKind::Absolute);
    assert!(PathKind::of("/").is_absolute());
}

#[test]
fn test_validate() {
    assert_eq!(validate_key("plain"), Ok(()));
    assert_eq!(validate_key("dir\\sub/file.txt"), Ok(()));
    assert_eq!(validate_key("C:\\abs\\*.txt"), Ok(()));
    assert_eq!(validate_key("a?b*c"), Ok(()));

    for bad in ["*\\file.exe", "a\\*\\b.txt", "?/x", "dir\\a*b/c"] {
        assert_eq!(
            validate_key(bad),
            Err(KeyError::WildcardInDirectory {
                key: bad.to_string()
            }),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn test_route_table() {
    use PathKind::*;
    assert_eq!(route(Sigil::None, Relative), Some(BucketKind::SearchFile));
    assert_eq!(route(Sigil::None, Absolute), None);
    assert_eq!(route(Sigil::Negate, Relative), Some(BucketKind::ExceptFile));
    assert_eq!(route(Sigil::Negate, Absolute), Some(BucketKind::ExceptAbsFile));
    assert_eq!(route(Sigil::Hash, Relative), Some(BucketKind::ExceptFolder));
    assert_eq!(route(Sigil::Hash, Absolute), Some(BucketKind::ExceptAbsFolder));
}
