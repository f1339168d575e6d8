//! The six key buckets and the operations filling them.

use std::ops::{Index, IndexMut};

use crate::key::{PathKind, Sigil, is_separator, route, validate_key};
use crate::wildcard::{Wildcard, WildcardFlag};
use crate::{KeyConfig, KeyError, split_pattern_with};

/// Names the buckets of an [`EnumKeys`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BucketKind {
    /// File names to search for.
    SearchFile,
    /// Folder names to descend into.
    SearchFolder,
    /// Relative file exceptions, matched against the end of a candidate path.
    ExceptFile,
    /// Relative folder exceptions, matched against the end of a candidate path.
    ExceptFolder,
    /// Absolute file exceptions, matched against the full candidate path.
    ExceptAbsFile,
    /// Absolute folder exceptions, matched against the full candidate path.
    ExceptAbsFolder,
}

impl BucketKind {
    pub const ALL: [BucketKind; 6] = [
        BucketKind::SearchFile,
        BucketKind::SearchFolder,
        BucketKind::ExceptFile,
        BucketKind::ExceptFolder,
        BucketKind::ExceptAbsFile,
        BucketKind::ExceptAbsFolder,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// An ordered list of unique keys, in the order they were first seen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyBucket {
    keys: Vec<String>,
}

impl KeyBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key` unless an equal key is already present. Returns whether it was added.
    ///
    /// Comparison is ordinal, `*.TXT` and `*.txt` are different keys.
    pub fn insert_unique<T: AsRef<str>>(&mut self, key: T) -> bool {
        let key = key.as_ref();
        if self.contains(key) {
            return false;
        }
        self.keys.push(key.to_string());
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.keys.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.keys
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

impl<'a> IntoIterator for &'a KeyBucket {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

/// The buckets indexed by [`BucketKind`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Buckets([KeyBucket; 6]);

impl Index<BucketKind> for Buckets {
    type Output = KeyBucket;

    fn index(&self, kind: BucketKind) -> &KeyBucket {
        &self.0[kind.index()]
    }
}

impl IndexMut<BucketKind> for Buckets {
    fn index_mut(&mut self, kind: BucketKind) -> &mut KeyBucket {
        &mut self.0[kind.index()]
    }
}

/// Search and exception keys of a GREP run.
///
/// Fill it with [`set_file_keys`](EnumKeys::set_file_keys) from a combined key list such as
/// `*.cpp;!*.bak,#node_modules`, optionally extend the exceptions with
/// [`add_except_file`](EnumKeys::add_except_file) and
/// [`add_except_folder`](EnumKeys::add_except_folder), then consult the buckets (or the
/// `accepts_*` helpers) while walking the tree.
///
/// None of the operations roll back on error: keys accepted before the failing one stay in
/// their buckets. Clone the value first if you need all-or-nothing behavior.
#[derive(Clone, Debug, Default)]
pub struct EnumKeys {
    buckets: Buckets,
    config: KeyConfig,
}

impl EnumKeys {
    /// Create an empty key set with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty key set with a custom configuration.
    pub fn with_config(config: KeyConfig) -> Self {
        Self {
            buckets: Buckets::default(),
            config,
        }
    }

    pub fn config(&self) -> &KeyConfig {
        &self.config
    }

    /// Empty all buckets.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets.0 {
            bucket.clear();
        }
    }

    /// Replace all keys with the ones parsed from `keys`.
    ///
    /// Keys prefixed with `!` are file exceptions, keys prefixed with `#` are folder exceptions,
    /// everything else is a search key. Exceptions go to the absolute or relative bucket
    /// depending on their form, absolute search keys are rejected with
    /// [`KeyError::AbsoluteSearchPath`].
    ///
    /// On success, empty search buckets receive the configured default pattern (`*.*`). The
    /// folder search bucket is never filled from `keys`, so it always ends up with the default.
    ///
    /// Keys that are empty after quote stripping (`""`) and lone sigils (`!`, `#`) are skipped
    /// rather than stored as empty keys, so a list made only of those gets the default pattern.
    ///
    /// All six buckets are cleared first, including absolute exceptions and exceptions added by
    /// [`add_except_file`](EnumKeys::add_except_file) or
    /// [`add_except_folder`](EnumKeys::add_except_folder). Processing stops at the first invalid
    /// key. Keys before it remain, and no default pattern is applied.
    pub fn set_file_keys(&mut self, keys: &str) -> Result<(), KeyError> {
        self.clear();

        for token in split_pattern_with(keys, &self.config) {
            let (sigil, key) = Sigil::strip(&token);
            if key.is_empty() {
                tracing::debug!("skipping lone sigil {:?}", token);
                continue;
            }

            let kind = PathKind::of(key);
            if let Err(err) = validate_key(key) {
                tracing::debug!("rejecting key {:?}: {}", key, err);
                return Err(err);
            }

            let Some(bucket) = route(sigil, kind) else {
                tracing::debug!("rejecting absolute search key {:?}", key);
                return Err(KeyError::AbsoluteSearchPath {
                    key: key.to_string(),
                });
            };

            self.insert(bucket, key);
        }

        for bucket in [BucketKind::SearchFile, BucketKind::SearchFolder] {
            if self.buckets[bucket].is_empty() {
                tracing::debug!(
                    "{:?} is empty, using default pattern {:?}",
                    bucket,
                    self.config.default_pattern
                );
                self.buckets[bucket].insert_unique(&self.config.default_pattern);
            }
        }

        Ok(())
    }

    /// Add file exceptions from `keys`.
    ///
    /// Sigils are not interpreted here, a leading `!` or `#` is part of the key. Keys already
    /// present are skipped. No default pattern is applied.
    pub fn add_except_file(&mut self, keys: &str) -> Result<(), KeyError> {
        self.add_exceptions(keys, BucketKind::ExceptFile, BucketKind::ExceptAbsFile)
    }

    /// Add folder exceptions from `keys`. See [`add_except_file`](EnumKeys::add_except_file).
    pub fn add_except_folder(&mut self, keys: &str) -> Result<(), KeyError> {
        self.add_exceptions(keys, BucketKind::ExceptFolder, BucketKind::ExceptAbsFolder)
    }

    fn add_exceptions(
        &mut self,
        keys: &str,
        relative: BucketKind,
        absolute: BucketKind,
    ) -> Result<(), KeyError> {
        for key in split_pattern_with(keys, &self.config) {
            let kind = PathKind::of(&key);
            if let Err(err) = validate_key(&key) {
                tracing::debug!("rejecting exception {:?}: {}", key, err);
                return Err(err);
            }

            let bucket = match kind {
                PathKind::Relative => relative,
                PathKind::Absolute => absolute,
            };
            self.insert(bucket, &key);
        }
        Ok(())
    }

    fn insert(&mut self, bucket: BucketKind, key: &str) {
        if self.buckets[bucket].insert_unique(key) {
            tracing::debug!("{:?} += {:?}", bucket, key);
        }
    }

    /// Access a bucket by kind.
    pub fn bucket(&self, kind: BucketKind) -> &KeyBucket {
        &self.buckets[kind]
    }

    pub fn search_files(&self) -> &KeyBucket {
        &self.buckets[BucketKind::SearchFile]
    }

    pub fn search_folders(&self) -> &KeyBucket {
        &self.buckets[BucketKind::SearchFolder]
    }

    pub fn except_files(&self) -> &KeyBucket {
        &self.buckets[BucketKind::ExceptFile]
    }

    pub fn except_folders(&self) -> &KeyBucket {
        &self.buckets[BucketKind::ExceptFolder]
    }

    pub fn except_abs_files(&self) -> &KeyBucket {
        &self.buckets[BucketKind::ExceptAbsFile]
    }

    pub fn except_abs_folders(&self) -> &KeyBucket {
        &self.buckets[BucketKind::ExceptAbsFolder]
    }

    fn wildcard_flags(&self) -> WildcardFlag {
        if self.config.ignore_case {
            WildcardFlag::PATH_NAME | WildcardFlag::IGNORE_CASE
        } else {
            WildcardFlag::PATH_NAME
        }
    }

    fn any_matches<F>(&self, kind: BucketKind, mut test: F) -> bool
    where
        F: FnMut(&Wildcard) -> bool,
    {
        let flags = self.wildcard_flags();
        self.buckets[kind]
            .iter()
            .any(|key| test(&Wildcard::new(key, flags)))
    }

    /// Check whether a file name matches one of the search keys.
    pub fn is_search_file(&self, name: &str) -> bool {
        self.any_matches(BucketKind::SearchFile, |w| w.matches(name))
    }

    /// Check whether a folder name matches one of the folder search keys.
    pub fn is_search_folder(&self, name: &str) -> bool {
        self.any_matches(BucketKind::SearchFolder, |w| w.matches(name))
    }

    /// Check whether the file at `path` is excluded, either by a relative exception matching
    /// the end of the path or by an absolute one matching all of it.
    pub fn is_except_file(&self, path: &str) -> bool {
        self.any_matches(BucketKind::ExceptFile, |w| w.matches_path_suffix(path))
            || self.any_matches(BucketKind::ExceptAbsFile, |w| w.matches(path))
    }

    /// Check whether the folder at `path` is excluded. See
    /// [`is_except_file`](EnumKeys::is_except_file).
    pub fn is_except_folder(&self, path: &str) -> bool {
        self.any_matches(BucketKind::ExceptFolder, |w| w.matches_path_suffix(path))
            || self.any_matches(BucketKind::ExceptAbsFolder, |w| w.matches(path))
    }

    /// Decide whether a file found during traversal should be searched.
    pub fn accepts_file(&self, path: &str) -> bool {
        self.is_search_file(leaf_name(path)) && !self.is_except_file(path)
    }

    /// Decide whether traversal should descend into a folder.
    pub fn accepts_folder(&self, path: &str) -> bool {
        self.is_search_folder(leaf_name(path)) && !self.is_except_folder(path)
    }
}

fn leaf_name(path: &str) -> &str {
    match path.rfind(is_separator) {
        Some(pos) => &path[(pos + 1)..],
        None => path,
    }
}

#[cfg(test)]
fn keys(bucket: &KeyBucket) -> Vec<&str> {
    bucket.iter().map(String::as_str).collect()
}

#[test]
fn test_insert_unique() {
    let mut bucket = KeyBucket::new();
    assert!(bucket.insert_unique("*.txt"));
    assert!(!bucket.insert_unique("*.txt"));
    assert!(bucket.insert_unique("*.TXT"));
    assert!(bucket.insert_unique("a"));
    assert_eq!(bucket.len(), 3);
    assert_eq!(bucket.as_slice(), ["*.txt", "*.TXT", "a"]);

    bucket.clear();
    assert!(bucket.is_empty());
}

#[test]
fn test_set_file_keys() {
    let mut enum_keys = EnumKeys::new();
    assert_eq!(enum_keys.set_file_keys("*.cpp"), Ok(()));
    assert_eq!(keys(enum_keys.search_files()), ["*.cpp"]);
    assert_eq!(keys(enum_keys.search_folders()), ["*.*"]);

    enum_keys
        .set_file_keys("*.cpp;!*.bak,#node_modules *.h *.cpp !C:\\tmp\\*.log #\\\\srv\\share")
        .unwrap();
    assert_eq!(keys(enum_keys.search_files()), ["*.cpp", "*.h"]);
    assert_eq!(keys(enum_keys.search_folders()), ["*.*"]);
    assert_eq!(keys(enum_keys.except_files()), ["*.bak"]);
    assert_eq!(keys(enum_keys.except_folders()), ["node_modules"]);
    assert_eq!(keys(enum_keys.except_abs_files()), ["C:\\tmp\\*.log"]);
    assert_eq!(keys(enum_keys.except_abs_folders()), ["\\\\srv\\share"]);

    // full replace
    enum_keys.set_file_keys("!*.obj").unwrap();
    assert_eq!(keys(enum_keys.search_files()), ["*.*"]);
    assert_eq!(keys(enum_keys.except_files()), ["*.obj"]);
    assert!(enum_keys.except_folders().is_empty());
    assert!(enum_keys.except_abs_files().is_empty());
    assert!(enum_keys.except_abs_folders().is_empty());

    // lone sigils are skipped
    enum_keys.set_file_keys("! # *.rs").unwrap();
    assert_eq!(keys(enum_keys.search_files()), ["*.rs"]);
    assert!(enum_keys.except_files().is_empty());
    assert!(enum_keys.except_folders().is_empty());

    // as are empty quotes, leaving the search bucket to the default
    enum_keys.set_file_keys("\"\" ! #").unwrap();
    assert_eq!(keys(enum_keys.search_files()), ["*.*"]);
    assert!(enum_keys.except_files().is_empty());

    // quoted keys keep their delimiters
    enum_keys.set_file_keys("\"my notes.txt\" !\"old, copy.txt\"").unwrap();
    assert_eq!(keys(enum_keys.search_files()), ["my notes.txt"]);
    assert_eq!(keys(enum_keys.except_files()), ["old, copy.txt"]);
}

#[test]
fn test_set_file_keys_failure() {
    let mut enum_keys = EnumKeys::new();
    assert_eq!(
        enum_keys.set_file_keys("*.c !*.o a\\*\\b.txt *.h"),
        Err(KeyError::WildcardInDirectory {
            key: "a\\*\\b.txt".to_string()
        })
    );
    // no rollback, no default pattern
    assert_eq!(keys(enum_keys.search_files()), ["*.c"]);
    assert_eq!(keys(enum_keys.except_files()), ["*.o"]);
    assert!(enum_keys.search_folders().is_empty());

    // validation runs before the absolute check
    let err = enum_keys.set_file_keys("C:\\*\\x.txt").unwrap_err();
    assert_eq!(err.code(), 1);

    let err = enum_keys.set_file_keys("#C:\\x /abs/*.txt").unwrap_err();
    assert_eq!(
        err,
        KeyError::AbsoluteSearchPath {
            key: "/abs/*.txt".to_string()
        }
    );
    assert!(enum_keys.search_files().is_empty());
    assert_eq!(keys(enum_keys.except_abs_folders()), ["C:\\x"]);
}

#[test]
fn test_add_exceptions() {
    let mut enum_keys = EnumKeys::new();
    enum_keys.add_except_file("*.bak;C:\\logs\\*.log").unwrap();
    enum_keys.add_except_file("*.bak *.tmp").unwrap();
    assert_eq!(keys(enum_keys.except_files()), ["*.bak", "*.tmp"]);
    assert_eq!(keys(enum_keys.except_abs_files()), ["C:\\logs\\*.log"]);
    assert!(enum_keys.search_files().is_empty());
    assert!(enum_keys.search_folders().is_empty());

    enum_keys.add_except_folder("#temp,.git,/var/tmp").unwrap();
    assert_eq!(keys(enum_keys.except_folders()), ["#temp", ".git"]);
    assert_eq!(keys(enum_keys.except_abs_folders()), ["/var/tmp"]);

    let err = enum_keys.add_except_folder("build *\\obj dist").unwrap_err();
    assert_eq!(err.code(), 1);
    assert_eq!(keys(enum_keys.except_folders()), ["#temp", ".git", "build"]);

    // set_file_keys replaces everything, including added and absolute exceptions
    enum_keys.set_file_keys("*.rs").unwrap();
    assert!(enum_keys.except_files().is_empty());
    assert!(enum_keys.except_folders().is_empty());
    assert!(enum_keys.except_abs_files().is_empty());
    assert!(enum_keys.except_abs_folders().is_empty());
}

#[test]
fn test_custom_default_pattern() {
    let mut enum_keys = EnumKeys::with_config(KeyConfig {
        default_pattern: "*".to_string(),
        ..Default::default()
    });
    enum_keys.set_file_keys("").unwrap();
    assert_eq!(keys(enum_keys.search_files()), ["*"]);
    assert_eq!(keys(enum_keys.search_folders()), ["*"]);
    assert_eq!(enum_keys.config().default_pattern, "*");
}

#[test]
fn test_accepts() {
    let mut enum_keys = EnumKeys::new();
    enum_keys
        .set_file_keys("*.cpp *.h !*_gen.cpp !C:\\src\\old.h #node_modules #C:\\src\\vendor")
        .unwrap();

    assert!(enum_keys.accepts_file("C:\\src\\main.cpp"));
    assert!(enum_keys.accepts_file("C:\\src\\Main.CPP"));
    assert!(enum_keys.accepts_file("C:\\src\\new.h"));
    assert!(!enum_keys.accepts_file("C:\\src\\readme.md"));
    assert!(!enum_keys.accepts_file("C:\\src\\parser_gen.cpp"));
    assert!(!enum_keys.accepts_file("C:\\src\\old.h"));
    assert!(enum_keys.accepts_file("C:\\src\\lib\\old.h"));

    assert!(enum_keys.accepts_folder("C:\\src\\lib"));
    assert!(!enum_keys.accepts_folder("C:\\src\\web\\node_modules"));
    assert!(!enum_keys.accepts_folder("C:\\src\\vendor"));
    assert!(enum_keys.accepts_folder("C:\\other\\vendor"));

    let mut enum_keys = EnumKeys::with_config(KeyConfig {
        ignore_case: false,
        ..Default::default()
    });
    enum_keys.set_file_keys("*.cpp").unwrap();
    assert!(enum_keys.accepts_file("/src/main.cpp"));
    assert!(!enum_keys.accepts_file("/src/MAIN.CPP"));
}

#[test]
fn test_bucket_index() {
    let mut enum_keys = EnumKeys::new();
    enum_keys.set_file_keys("*.a !*.b #c !/d #/e").unwrap();
    let sizes: Vec<usize> = BucketKind::ALL
        .iter()
        .map(|&kind| enum_keys.bucket(kind).len())
        .collect();
    assert_eq!(sizes, [1, 1, 1, 1, 1, 1]);
    assert_eq!(keys(enum_keys.bucket(BucketKind::ExceptAbsFolder)), ["/e"]);
}
