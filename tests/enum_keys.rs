//! Behavior of the public key list API as seen by a GREP front end.

use grepkeys::{
    BucketKind, DEFAULT_MATCH_ALL, EnumKeys, KeyError, error_code, split_pattern, validate_key,
};
use proptest::prelude::*;

fn keys(bucket: &grepkeys::KeyBucket) -> Vec<&str> {
    bucket.iter().map(String::as_str).collect()
}

#[test]
fn single_search_key_gets_default_folder_key() {
    let mut enum_keys = EnumKeys::new();
    let result = enum_keys.set_file_keys("*.cpp");
    assert_eq!(error_code(&result), 0);
    assert_eq!(keys(enum_keys.search_files()), ["*.cpp"]);
    assert_eq!(keys(enum_keys.search_folders()), [DEFAULT_MATCH_ALL]);
}

#[test]
fn empty_list_defaults_both_search_buckets() {
    let mut enum_keys = EnumKeys::new();
    assert_eq!(error_code(&enum_keys.set_file_keys("")), 0);
    assert_eq!(keys(enum_keys.search_files()), ["*.*"]);
    assert_eq!(keys(enum_keys.search_folders()), ["*.*"]);
    for kind in [
        BucketKind::ExceptFile,
        BucketKind::ExceptFolder,
        BucketKind::ExceptAbsFile,
        BucketKind::ExceptAbsFolder,
    ] {
        assert!(enum_keys.bucket(kind).is_empty(), "{kind:?} not empty");
    }
}

#[test]
fn except_only_list_still_searches_everything() {
    let mut enum_keys = EnumKeys::new();
    assert_eq!(error_code(&enum_keys.set_file_keys("!*.bak")), 0);
    assert_eq!(keys(enum_keys.except_files()), ["*.bak"]);
    assert_eq!(keys(enum_keys.search_files()), ["*.*"]);
}

#[test]
fn absolute_search_key_is_rejected() {
    let mut enum_keys = EnumKeys::new();
    let result = enum_keys.set_file_keys("C:\\abs\\*.txt");
    assert_eq!(error_code(&result), 2);
    assert!(enum_keys.search_files().is_empty());
    assert!(enum_keys.search_folders().is_empty());
}

#[test]
fn wildcard_in_directory_is_rejected() {
    let mut enum_keys = EnumKeys::new();
    let result = enum_keys.set_file_keys("a\\*\\b.txt");
    assert_eq!(error_code(&result), 1);
    assert_eq!(
        result,
        Err(KeyError::WildcardInDirectory {
            key: "a\\*\\b.txt".to_string()
        })
    );
}

#[test]
fn add_except_folder_keeps_sigil() {
    let mut enum_keys = EnumKeys::new();
    assert_eq!(error_code(&enum_keys.add_except_folder("#temp")), 0);
    assert_eq!(keys(enum_keys.except_folders()), ["#temp"]);
    assert!(enum_keys.except_abs_folders().is_empty());
    assert!(enum_keys.search_files().is_empty());
}

#[test]
fn add_except_file_is_idempotent() {
    let list = "*.obj;*.pdb \"C:\\build\\*.log\" *.obj";

    let mut once = EnumKeys::new();
    once.add_except_file(list).unwrap();

    let mut twice = EnumKeys::new();
    twice.add_except_file(list).unwrap();
    twice.add_except_file(list).unwrap();

    assert_eq!(keys(once.except_files()), ["*.obj", "*.pdb"]);
    assert_eq!(keys(once.except_abs_files()), ["C:\\build\\*.log"]);
    assert_eq!(once.except_files(), twice.except_files());
    assert_eq!(once.except_abs_files(), twice.except_abs_files());
}

#[test]
fn quoted_folder_exception_with_space() {
    let mut enum_keys = EnumKeys::new();
    enum_keys.set_file_keys("*.txt #\"Program Files\"").unwrap();
    assert_eq!(keys(enum_keys.search_files()), ["*.txt"]);
    assert_eq!(keys(enum_keys.except_folders()), ["Program Files"]);

    enum_keys.set_file_keys("#\"Program Files\"").unwrap();
    assert_eq!(keys(enum_keys.search_files()), ["*.*"]);
    assert_eq!(keys(enum_keys.except_folders()), ["Program Files"]);
    assert!(enum_keys.accepts_file("C:\\a\\b.txt"));
    assert!(!enum_keys.accepts_folder("C:\\Program Files"));
}

#[test]
fn snapshot_restores_after_failure() {
    let mut enum_keys = EnumKeys::new();
    enum_keys.set_file_keys("*.rs !*.bk").unwrap();

    let snapshot = enum_keys.clone();
    assert!(enum_keys.set_file_keys("*.c /abs/x.c").is_err());
    assert_eq!(keys(enum_keys.search_files()), ["*.c"]);

    enum_keys = snapshot;
    assert_eq!(keys(enum_keys.search_files()), ["*.rs"]);
    assert_eq!(keys(enum_keys.except_files()), ["*.bk"]);
}

#[test]
fn traversal_filtering() {
    let mut enum_keys = EnumKeys::new();
    enum_keys
        .set_file_keys("*.rs,Cargo.toml !*.generated.rs #target #/home/me/proj/vendor")
        .unwrap();
    enum_keys.add_except_file("/home/me/proj/src/skip.rs").unwrap();

    let files = [
        ("/home/me/proj/Cargo.toml", true),
        ("/home/me/proj/src/main.rs", true),
        ("/home/me/proj/src/skip.rs", false),
        ("/home/me/proj/src/api.generated.rs", false),
        ("/home/me/proj/README.md", false),
    ];
    for (path, expected) in files {
        assert_eq!(enum_keys.accepts_file(path), expected, "{path}");
    }

    let folders = [
        ("/home/me/proj/src", true),
        ("/home/me/proj/target", false),
        ("/home/me/proj/vendor", false),
        ("/home/me/other/vendor", true),
    ];
    for (path, expected) in folders {
        assert_eq!(enum_keys.accepts_folder(path), expected, "{path}");
    }
}

proptest! {
    #[test]
    fn split_without_delimiters_is_identity(token in "[A-Za-z0-9_.*?\\\\/!#-]{1,24}") {
        prop_assert_eq!(split_pattern(&token), vec![token.clone()]);
    }

    #[test]
    fn split_never_yields_empty_or_quoted_tokens(raw in "[ ;,\"a-c*]{0,32}") {
        for token in split_pattern(&raw) {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.contains('"'));
        }
    }

    #[test]
    fn unquoted_tokens_hold_no_delimiters(raw in "[ ;,a-c*]{0,32}") {
        for token in split_pattern(&raw) {
            prop_assert!(!token.contains(|ch: char| " ;,".contains(ch)));
        }
    }

    #[test]
    fn quoted_text_stays_one_token(inner in "[a-c ;,]{0,12}[a-c][a-c ;,]{0,12}") {
        prop_assert_eq!(split_pattern(&format!("\"{inner}\"")), vec![inner.clone()]);
    }

    #[test]
    fn wildcard_free_keys_are_valid(key in "[A-Za-z0-9_.:\\\\/]{0,24}") {
        prop_assert_eq!(validate_key(&key), Ok(()));
    }

    #[test]
    fn wildcard_before_separator_is_invalid(
        dir in "[a-z]{0,4}",
        wild in "[*?]",
        rest in "[a-z]{0,4}",
        sep in "[\\\\/]",
        leaf in "[a-z.]{1,8}"
    ) {
        let key = format!("{dir}{wild}{rest}{sep}{leaf}");
        prop_assert_eq!(validate_key(&key).map_err(|e| e.code()), Err(1));
    }

    #[test]
    fn buckets_stay_unique(raw in "([!#]?[a-c]{1,2}[ ;,]){0,16}") {
        let mut enum_keys = EnumKeys::new();
        enum_keys.set_file_keys(&raw).unwrap();
        for kind in BucketKind::ALL {
            let bucket = enum_keys.bucket(kind);
            for (i, key) in bucket.iter().enumerate() {
                prop_assert!(!bucket.as_slice()[..i].contains(key));
            }
        }
    }
}
