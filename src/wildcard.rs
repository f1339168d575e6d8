//! DOS style wildcard matching of keys against candidate names and paths.
//!
//! Only `*` and `?` are special. There are no character classes and no escapes, as `\` is a path
//! separator in key lists.

use bitflags::bitflags;

use crate::key::is_separator;

/// One component of a wildcard.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Component {
    /// A literal match. The `a` and `.txt` in `a*.txt`.
    Literal(Vec<char>),

    /// Matches exactly one character.
    QuestionMark,

    /// Matches any run of characters, including none. Consecutive stars are folded into one.
    Star,
}

bitflags! {
    /// Flags affecting how a wildcard should match.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct WildcardFlag: u8 {
        /// Ignore upper/lower case. Only ascii characters are folded.
        const IGNORE_CASE = 0x01;

        /// `*` and `?` do not match path separators, only literal separators do.
        const PATH_NAME = 0x02;
    }
}

/// See `Wildcard::do_matches` for the algorithm.
enum MatchResult {
    Match,
    NoMatch,
    AbortAll,
}

/// A compiled key.
///
/// Follows the rules of the Windows shell: `\` and `/` compare equal, and a trailing `.*` also
/// matches names without any extension, so `*.*` matches everything.
#[derive(Clone, Debug)]
pub struct Wildcard {
    /// Original pattern the user provided.
    pattern: String,

    components: Vec<Component>,

    /// For patterns ending in `.*`: the components without it, tried against names which do not
    /// contain a dot.
    dos_stem: Option<Vec<Component>>,

    flags: WildcardFlag,
}

impl Wildcard {
    /// Compile a wildcard.
    pub fn new<T: AsRef<str>>(pattern: T, flags: WildcardFlag) -> Self {
        Self::new_do(pattern.as_ref(), flags)
    }

    /// Convenience shortcut for case insensitive path matching, the way file names compare on
    /// Windows.
    pub fn path<T: AsRef<str>>(pattern: T) -> Self {
        Self::new_do(
            pattern.as_ref(),
            WildcardFlag::PATH_NAME | WildcardFlag::IGNORE_CASE,
        )
    }

    fn new_do(pattern: &str, flags: WildcardFlag) -> Self {
        let mut components = Vec::<Component>::new();
        let mut literal = Vec::<char>::new();

        for ch in pattern.chars() {
            match ch {
                '?' => {
                    push_literal(&mut literal, &mut components);
                    components.push(Component::QuestionMark);
                }
                '*' => {
                    push_literal(&mut literal, &mut components);
                    if components.last() != Some(&Component::Star) {
                        components.push(Component::Star);
                    }
                }
                ch => literal.push(ch),
            }
        }
        push_literal(&mut literal, &mut components);

        let dos_stem = dos_stem(&components);

        Self {
            pattern: pattern.to_string(),
            components,
            dos_stem,
            flags,
        }
    }

    /// Get the original input pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn flags(&self) -> WildcardFlag {
        self.flags
    }

    /// Check whether the whole `text` is matched.
    pub fn matches<T: AsRef<str>>(&self, text: T) -> bool {
        let text: Vec<char> = text.as_ref().chars().collect();
        self.matches_chars(&text)
    }

    /// Test whether this wildcard matches any complete suffix of a path.
    ///
    /// For the path `C:\foo\bar\baz`, this tests whether `baz`, `bar\baz`, `foo\bar\baz` or the
    /// whole path is matched.
    pub fn matches_path_suffix<T: AsRef<str>>(&self, path: T) -> bool {
        let path: Vec<char> = path.as_ref().chars().collect();
        if path.is_empty() {
            return false;
        }

        for start in (0..path.len()).rev() {
            if is_separator(path[start]) && self.matches_chars(&path[(start + 1)..]) {
                return true;
            }
        }

        self.matches_chars(&path)
    }

    fn matches_chars(&self, text: &[char]) -> bool {
        if let MatchResult::Match = self.do_matches(&self.components, 0, text) {
            return true;
        }

        match &self.dos_stem {
            Some(stem) if !leaf_of(text).contains(&'.') => {
                matches!(self.do_matches(stem, 0, text), MatchResult::Match)
            }
            _ => false,
        }
    }

    /// Backtracking matcher.
    ///
    /// A star tries to match the rest of the components at every position of the text. Once
    /// the text is exhausted no later star can succeed either, so that case aborts the whole
    /// match instead of letting earlier stars retry.
    fn do_matches(
        &self,
        components: &[Component],
        mut ci: usize,
        mut text: &[char],
    ) -> MatchResult {
        let path_name = self.flags.intersects(WildcardFlag::PATH_NAME);

        while ci != components.len() {
            match &components[ci] {
                Component::Literal(literal) => {
                    if text.is_empty() {
                        return MatchResult::AbortAll;
                    }

                    if !self.starts_with(text, literal) {
                        return MatchResult::NoMatch;
                    }

                    text = &text[literal.len()..];
                }
                Component::QuestionMark => {
                    if text.is_empty() {
                        return MatchResult::AbortAll;
                    }

                    if path_name && is_separator(text[0]) {
                        return MatchResult::NoMatch;
                    }

                    text = &text[1..];
                }
                Component::Star => {
                    if (ci + 1) == components.len() {
                        if path_name && text.iter().copied().any(is_separator) {
                            return MatchResult::NoMatch;
                        }
                        return MatchResult::Match;
                    }

                    loop {
                        if text.is_empty() {
                            return MatchResult::AbortAll;
                        }

                        match self.do_matches(components, ci + 1, text) {
                            MatchResult::NoMatch => {
                                if path_name && is_separator(text[0]) {
                                    return MatchResult::AbortAll;
                                }
                            }
                            other => return other,
                        }

                        text = &text[1..];
                    }
                }
            }
            ci += 1;
        }

        if text.is_empty() {
            MatchResult::Match
        } else {
            MatchResult::NoMatch
        }
    }

    fn starts_with(&self, text: &[char], with: &[char]) -> bool {
        if text.len() < with.len() {
            return false;
        }

        let ignore_case = self.flags.intersects(WildcardFlag::IGNORE_CASE);
        text.iter().zip(with).all(|(&a, &b)| {
            a == b
                || (is_separator(a) && is_separator(b))
                || (ignore_case && a.eq_ignore_ascii_case(&b))
        })
    }
}

fn push_literal(literal: &mut Vec<char>, components: &mut Vec<Component>) {
    if !literal.is_empty() {
        components.push(Component::Literal(std::mem::take(literal)));
    }
}

/// Build the components for the "no extension" retry of a pattern ending in `.*`.
fn dos_stem(components: &[Component]) -> Option<Vec<Component>> {
    let [head @ .., Component::Literal(literal), Component::Star] = components else {
        return None;
    };
    let (&'.', rest) = literal.split_last()? else {
        return None;
    };

    let mut stem = head.to_vec();
    if !rest.is_empty() {
        stem.push(Component::Literal(rest.to_vec()));
    }
    Some(stem)
}

fn leaf_of(text: &[char]) -> &[char] {
    match text.iter().rposition(|&ch| is_separator(ch)) {
        Some(pos) => &text[(pos + 1)..],
        None => text,
    }
}

#[test]
fn test() {
    let wildcard = Wildcard::path("*.cpp");
    assert!(wildcard.matches("main.cpp"));
    assert!(wildcard.matches("MAIN.CPP"));
    assert!(wildcard.matches(".cpp"));
    assert!(!wildcard.matches("main.cpp.bak"));
    assert!(!wildcard.matches("main.c"));
    assert!(!wildcard.matches("sub\\main.cpp"));

    let wildcard = Wildcard::new("*.cpp", WildcardFlag::PATH_NAME);
    assert!(wildcard.matches("main.cpp"));
    assert!(!wildcard.matches("MAIN.CPP"));

    let wildcard = Wildcard::path("a?c");
    assert!(wildcard.matches("abc"));
    assert!(!wildcard.matches("ac"));
    assert!(!wildcard.matches("abbc"));
    assert!(!wildcard.matches("a\\c"));

    let wildcard = Wildcard::new("a?c", WildcardFlag::empty());
    assert!(wildcard.matches("a\\c"));

    let wildcard = Wildcard::path("a*b*c");
    assert!(wildcard.matches("axxbxxc"));
    assert!(!wildcard.matches("axxbxxcxx"));
    assert!(wildcard.matches("axxbxxbxxc"));
    assert!(wildcard.matches("axxbxxbxxcxxc"));
    assert!(!wildcard.matches("axxbxxbxxcxxcxx"));

    let wildcard = Wildcard::path("**x");
    assert!(wildcard.matches("x"));
    assert!(wildcard.matches("abx"));

    let wildcard = Wildcard::path("");
    assert!(wildcard.matches(""));
    assert!(!wildcard.matches("a"));
}

#[test]
fn test_separators() {
    let wildcard = Wildcard::path("sub\\*.txt");
    assert!(wildcard.matches("sub\\a.txt"));
    assert!(wildcard.matches("sub/a.txt"));
    assert!(wildcard.matches("SUB/A.TXT"));
    assert!(!wildcard.matches("sub\\x\\a.txt"));
    assert!(!wildcard.matches("sub"));
}

#[test]
fn test_dos_extension() {
    let wildcard = Wildcard::path("*.*");
    assert!(wildcard.matches("main.cpp"));
    assert!(wildcard.matches("Makefile"));
    assert!(wildcard.matches(".gitignore"));
    assert!(wildcard.matches(""));

    let wildcard = Wildcard::path("read*.*");
    assert!(wildcard.matches("README"));
    assert!(wildcard.matches("readme.md"));
    assert!(!wildcard.matches("license"));

    let wildcard = Wildcard::path("foo.*");
    assert!(wildcard.matches("foo"));
    assert!(wildcard.matches("foo.rs"));
    assert!(!wildcard.matches("foobar"));

    // only a trailing `.*` gets the special treatment
    let wildcard = Wildcard::path("*.c*");
    assert!(wildcard.matches("a.cpp"));
    assert!(!wildcard.matches("Makefile"));
}

#[test]
fn test_path_suffix() {
    let wildcard = Wildcard::path("*.bak");
    assert!(wildcard.matches_path_suffix("C:\\src\\old.bak"));
    assert!(wildcard.matches_path_suffix("old.bak"));
    assert!(!wildcard.matches_path_suffix("C:\\src.bak\\old.txt"));
    assert!(!wildcard.matches_path_suffix(""));

    let wildcard = Wildcard::path("node_modules");
    assert!(wildcard.matches_path_suffix("/home/me/project/node_modules"));
    assert!(!wildcard.matches_path_suffix("/home/me/project/node_modules2"));

    let wildcard = Wildcard::path("out\\*.o");
    assert!(wildcard.matches_path_suffix("D:\\build\\out\\main.o"));
    assert!(!wildcard.matches_path_suffix("D:\\build\\obj\\main.o"));

    let wildcard = Wildcard::path("C:\\src\\*.bak");
    assert!(wildcard.matches("c:/src/old.bak"));
    assert!(!wildcard.matches("C:\\src\\deep\\old.bak"));
}
