//! GREP style search and exception key lists.
//!
//! A key list is what a user types into the "file types" box of a GREP dialog: keys separated
//! by spaces, semicolons or commas, where a leading `!` marks a file exception and a leading `#`
//! a folder exception. This crate splits such a list, checks that wildcards only appear in the
//! last path component, and sorts the keys into the six buckets of an [`EnumKeys`]. The caller
//! walking the file system then consults the buckets (or the `accepts_*` helpers) for every
//! file and folder it finds.
//!
//! Here's a rather long example:
//!
//! ```
//! # use grepkeys::*;
//! # fn test() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
//! let mut keys = EnumKeys::new();
//! keys.set_file_keys("*.cpp *.h;!*.bak,#node_modules !C:\\src\\gen.h \"#.git\"")?;
//!
//! assert_eq!(keys.search_files().as_slice(), ["*.cpp", "*.h"]);
//! assert_eq!(keys.except_files().as_slice(), ["*.bak"]);
//! assert_eq!(keys.except_abs_files().as_slice(), ["C:\\src\\gen.h"]);
//! assert_eq!(keys.except_folders().as_slice(), ["node_modules", ".git"]);
//!
//! // folder search keys are never given explicitly, they default to everything:
//! assert_eq!(keys.search_folders().as_slice(), [DEFAULT_MATCH_ALL]);
//!
//! assert!(keys.accepts_file("C:\\src\\main.cpp"));
//! assert!(!keys.accepts_file("C:\\src\\main.cpp.bak"));
//! assert!(!keys.accepts_file("C:\\src\\gen.h"));
//! assert!(keys.accepts_file("C:\\src\\sub\\gen.h"));
//! assert!(!keys.accepts_file("C:\\src\\readme.txt"));
//!
//! assert!(keys.accepts_folder("C:\\src\\lib"));
//! assert!(!keys.accepts_folder("C:\\src\\web\\node_modules"));
//!
//! // more exceptions can be added later, sigils have no meaning there:
//! keys.add_except_folder("build;D:\\out")?;
//! assert_eq!(keys.except_folders().as_slice(), ["node_modules", ".git", "build"]);
//! assert_eq!(keys.except_abs_folders().as_slice(), ["D:\\out"]);
//!
//! // wildcards are not allowed in directory components:
//! let err = keys.set_file_keys("src\\*\\main.cpp").unwrap_err();
//! assert_eq!(err.code(), 1);
//!
//! // and search keys must be relative:
//! let err = keys.set_file_keys("C:\\src\\*.cpp").unwrap_err();
//! assert_eq!(err, KeyError::AbsoluteSearchPath { key: "C:\\src\\*.cpp".to_string() });
//! # Ok(())
//! # }
//! # test().unwrap()
//! ```

mod config;
mod error;
mod key;
mod key_set;
mod split;
mod wildcard;

#[doc(inline)]
pub use config::{DEFAULT_DELIMITERS, DEFAULT_MATCH_ALL, DEFAULT_QUOTE, KeyConfig};

#[doc(inline)]
pub use error::{KeyError, error_code};

#[doc(inline)]
pub use key::{PathKind, Sigil, route, validate_key};

#[doc(inline)]
pub use key_set::{BucketKind, EnumKeys, KeyBucket};

#[doc(inline)]
pub use split::{split_pattern, split_pattern_with};

#[doc(inline)]
pub use wildcard::{Wildcard, WildcardFlag};
