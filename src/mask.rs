//! Hostmask matching.
//!
//! The permission index never decides what "matches" means by itself; it
//! calls a [`MaskMatcher`]. The default, [`IrcMaskMatcher`], is the usual
//! IRC glob over `nick!user@host`: `*` matches any run of characters, `?`
//! matches exactly one, and comparison uses RFC 1459 case mapping.

/// Decides whether an identity mask is covered by a mask-pattern.
pub trait MaskMatcher: Send + Sync {
    /// `identity` is a concrete `nick!user@host`; `pattern` may contain wildcards.
    fn matches(&self, identity: &str, pattern: &str) -> bool;
}

impl<F> MaskMatcher for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn matches(&self, identity: &str, pattern: &str) -> bool {
        self(identity, pattern)
    }
}

/// Glob matcher with RFC 1459 case mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct IrcMaskMatcher;

impl MaskMatcher for IrcMaskMatcher {
    #[inline]
    fn matches(&self, identity: &str, pattern: &str) -> bool {
        wildcard_match(pattern, identity)
    }
}

/// Fold one character using RFC 1459 case mapping.
///
/// Besides ASCII letters, `[]\~` are the upper-case forms of `{}|^`.
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        'A'..='Z' => c.to_ascii_lowercase(),
        _ => c,
    }
}

/// Match `text` against a `*`/`?` glob, case-insensitively.
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().map(irc_lower_char).collect();
    let text: Vec<char> = text.chars().map(irc_lower_char).collect();

    let (mut p, mut t) = (0, 0);
    // Last '*' seen and the text position it is currently absorbing up to.
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, absorbed)) => {
                    p = star + 1;
                    t = absorbed + 1;
                    backtrack = Some((star, t));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}
