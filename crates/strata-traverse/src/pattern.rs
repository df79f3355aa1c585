//! Container-name patterns.
//!
//! Patterns use shell-style wildcards and match the whole name,
//! case-sensitively:
//!
//! - `*` matches any run of characters other than `/`; `**` is the same as `*`
//! - `?` matches one character other than `/`
//! - `[abc]`, `[a-z]` match one character from a class; `[^...]` negates it
//! - `\c` matches `c` literally, both outside and inside a class
//!
//! `!` has no special meaning, so `[!a]` is the class of `!` and `a`.
//! A class may not open with `]` or `-` unless it is escaped, and `[^]` is
//! malformed. A range whose bounds are reversed is accepted but matches
//! nothing.
//!
//! A [`ContainerPattern`] is compiled to an anchored [`regex::Regex`].

use regex::Regex;

/// Why a pattern was rejected.
///
/// Positions are character offsets into the pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("unterminated character class opened at position {0}")]
    UnclosedClass(usize),

    #[error("malformed character class opened at position {0}")]
    MalformedClass(usize),

    #[error("pattern ends with an unpaired escape")]
    TrailingEscape,

    #[error("pattern could not be compiled: {0}")]
    Compile(String),
}

/// A compiled container-name pattern.
#[derive(Debug, Clone)]
pub struct ContainerPattern {
    source: String,
    // `None` when some class can never match, so no name matches.
    regex: Option<Regex>,
}

impl ContainerPattern {
    /// Parse and compile `pattern`.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut out = String::with_capacity(pattern.len() * 2 + 2);
        let mut satisfiable = true;
        let mut i = 0;

        out.push('^');
        while i < chars.len() {
            match chars[i] {
                '*' => {
                    while chars.get(i) == Some(&'*') {
                        i += 1;
                    }
                    out.push_str("[^/]*");
                    continue;
                }
                '?' => out.push_str("[^/]"),
                '\\' => {
                    i += 1;
                    let c = chars.get(i).ok_or(PatternError::TrailingEscape)?;
                    push_literal(&mut out, *c);
                }
                '[' => {
                    let (class, next) = parse_class(&chars, i)?;
                    match class {
                        Some(class) => out.push_str(&class),
                        None => satisfiable = false,
                    }
                    i = next;
                    continue;
                }
                c => push_literal(&mut out, c),
            }
            i += 1;
        }
        out.push('$');

        let regex = if satisfiable {
            Some(Regex::new(&out).map_err(|e| PatternError::Compile(e.to_string()))?)
        } else {
            None
        };
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `true` if `name` matches the whole pattern.
    pub fn matches(&self, name: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(name))
    }
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

/// Parse the class opening at `start` and return its regex form plus the
/// index just past the closing `]`.
///
/// The regex form is `None` for a non-negated class with no usable member.
fn parse_class(chars: &[char], start: usize) -> Result<(Option<String>, usize), PatternError> {
    let mut i = start + 1;
    let negated = chars.get(i) == Some(&'^');
    if negated {
        i += 1;
    }

    let mut ranges: Vec<(char, char)> = Vec::new();
    let mut members = 0usize;
    loop {
        match chars.get(i) {
            None => return Err(PatternError::UnclosedClass(start)),
            Some(']') if members > 0 => {
                i += 1;
                break;
            }
            _ => {}
        }
        let (lo, next) = class_char(chars, i, start)?;
        i = next;
        let mut hi = lo;
        if chars.get(i) == Some(&'-') {
            let (upper, next) = class_char(chars, i + 1, start)?;
            hi = upper;
            i = next;
        }
        members += 1;
        if lo <= hi {
            ranges.push((lo, hi));
        }
    }

    let class = match (negated, ranges.is_empty()) {
        (false, true) => None,
        (true, true) => Some("(?s:.)".to_string()),
        (negated, false) => {
            let mut class = String::from(if negated { "[^" } else { "[" });
            for (lo, hi) in ranges {
                if lo == hi {
                    class.push_str(&format!("\\x{{{:X}}}", lo as u32));
                } else {
                    class.push_str(&format!("\\x{{{:X}}}-\\x{{{:X}}}", lo as u32, hi as u32));
                }
            }
            class.push(']');
            Some(class)
        }
    };
    Ok((class, i))
}

/// Read one class member at `i`, honouring `\` escapes.
fn class_char(chars: &[char], i: usize, start: usize) -> Result<(char, usize), PatternError> {
    match chars.get(i) {
        None => Err(PatternError::UnclosedClass(start)),
        Some('-') | Some(']') => Err(PatternError::MalformedClass(start)),
        Some('\\') => match chars.get(i + 1) {
            Some(c) => Ok((*c, i + 2)),
            None => Err(PatternError::UnclosedClass(start)),
        },
        Some(c) => Ok((*c, i + 1)),
    }
}
