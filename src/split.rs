//! Splitting a raw key list into individual keys.

use crate::KeyConfig;

/// Split a key list using the default delimiters (space, `;` and `,`) and strip every `"`.
///
/// Delimiters between quotes do not split, so `"Program Files"` stays one key. An unbalanced
/// quote extends to the end of the list. Runs of delimiters collapse and keys which end up
/// empty are dropped, so the result never contains an empty string.
///
/// ```
/// # use grepkeys::split_pattern;
/// assert_eq!(split_pattern(" a ; b,c "), ["a", "b", "c"]);
/// assert_eq!(split_pattern("\"a*.b\""), ["a*.b"]);
/// assert_eq!(split_pattern("#\"Program Files\" *.txt"), ["#Program Files", "*.txt"]);
/// assert!(split_pattern("").is_empty());
/// ```
pub fn split_pattern(raw: &str) -> Vec<String> {
    split_pattern_with(raw, &KeyConfig::default())
}

/// Split a key list using the delimiters and quote character of `config`.
pub fn split_pattern_with(raw: &str, config: &KeyConfig) -> Vec<String> {
    let mut keys = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in raw.chars() {
        if ch == config.quote {
            quoted = !quoted;
        } else if !quoted && config.is_delimiter(ch) {
            push_key(&mut current, &mut keys);
        } else {
            current.push(ch);
        }
    }
    push_key(&mut current, &mut keys);

    keys
}

fn push_key(current: &mut String, keys: &mut Vec<String>) {
    if !current.is_empty() {
        keys.push(std::mem::take(current));
    }
}

#[test]
fn test_split() {
    assert_eq!(split_pattern("*.cpp"), ["*.cpp"]);
    assert_eq!(split_pattern(" a ; b,c "), ["a", "b", "c"]);
    assert_eq!(split_pattern(";;,, ,"), Vec::<String>::new());
    assert_eq!(
        split_pattern("*.cpp;!*.bak,#node_modules"),
        ["*.cpp", "!*.bak", "#node_modules"]
    );

    // quotes are removed anywhere and protect delimiters in between
    assert_eq!(split_pattern("\"a*.b\""), ["a*.b"]);
    assert_eq!(split_pattern("a\"b\"c"), ["abc"]);
    assert_eq!(split_pattern("\"my file.txt\""), ["my file.txt"]);
    assert_eq!(split_pattern("\"a;b,c\" d"), ["a;b,c", "d"]);
    assert_eq!(split_pattern("x\"y z\"w v"), ["xy zw", "v"]);
    assert_eq!(split_pattern("\"\" x"), ["x"]);

    // an unbalanced quote runs to the end
    assert_eq!(split_pattern("\"a b"), ["a b"]);
    assert_eq!(split_pattern("c \"a b"), ["c", "a b"]);

    // order and duplicates are preserved, deduplication happens in the buckets
    assert_eq!(split_pattern("b a b"), ["b", "a", "b"]);
}

#[test]
fn test_split_with_config() {
    let config = KeyConfig {
        delimiters: "|".to_string(),
        quote: '\'',
        ..Default::default()
    };
    assert_eq!(
        split_pattern_with("'a b'|c;d||", &config),
        ["a b", "c;d"]
    );
}
