//! Cell templates.
//!
//! A [`Template`] is a format string parsed into literal text and value
//! slots. `{}` marks a slot; `{{` and `}}` are literal braces. Literal text
//! may not contain the escape byte, because any escape sequence in a cell
//! must come from a styled value for overhead accounting to hold. Tabs and
//! line breaks are rejected too: a rendered cell is one field of one
//! tab-separated line.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Slot,
}

/// A parsed cell format string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    parts: Vec<Part>,
}

impl Template {
    /// Parse a template.
    ///
    /// ```
    /// use tablecloth::template::Template;
    ///
    /// let t = Template::parse("Hello, {}! It's {} degrees {{outside}}.").unwrap();
    /// assert_eq!(t.slot_count(), 2);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] for unbalanced braces, a placeholder with
    /// content such as `{0}`, or an escape byte, tab or line break in
    /// literal text.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' => match chars.next() {
                    Some((_, '{')) => literal.push('{'),
                    Some((_, '}')) => {
                        if !literal.is_empty() {
                            parts.push(Part::Literal(std::mem::take(&mut literal)));
                        }
                        parts.push(Part::Slot);
                    }
                    Some(_) => return Err(TemplateError::InvalidPlaceholder(pos)),
                    None => return Err(TemplateError::UnmatchedBrace(pos)),
                },
                '}' => {
                    if chars.next_if(|&(_, next)| next == '}').is_some() {
                        literal.push('}');
                    } else {
                        return Err(TemplateError::UnmatchedBrace(pos));
                    }
                }
                '\x1b' => return Err(TemplateError::EscapeInLiteral(pos)),
                '\t' | '\n' | '\r' => return Err(TemplateError::SeparatorInLiteral(pos)),
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }
        Ok(Self { parts })
    }

    /// The template `{}`: one slot and nothing else.
    #[must_use]
    pub fn single_slot() -> Self {
        Self {
            parts: vec![Part::Slot],
        }
    }

    /// Number of value slots.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.parts.iter().filter(|p| matches!(p, Part::Slot)).count()
    }

    /// Substitute `values` into the slots in order.
    ///
    /// Slots without a value render empty; extra values are ignored. Cells
    /// validate the count on construction.
    pub(crate) fn fill<S: AsRef<str>>(&self, values: &[S]) -> String {
        let mut values = values.iter();
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Slot => {
                    if let Some(value) = values.next() {
                        out.push_str(value.as_ref());
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                Part::Literal(text) => write!(f, "{}", text.replace('{', "{{").replace('}', "}}"))?,
                Part::Slot => write!(f, "{{}}")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for malformed templates and cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A `{` or `}` at this byte offset has no partner.
    UnmatchedBrace(usize),
    /// A placeholder at this byte offset has content, like `{0}` or `{:>4}`.
    InvalidPlaceholder(usize),
    /// Literal text contains an escape byte at this offset.
    EscapeInLiteral(usize),
    /// Literal text contains a tab or line break at this offset.
    SeparatorInLiteral(usize),
    /// The number of values does not match the template's slots.
    SlotCountMismatch { expected: usize, found: usize },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedBrace(pos) => write!(f, "Unmatched brace at offset {pos}"),
            Self::InvalidPlaceholder(pos) => {
                write!(f, "Placeholder at offset {pos} must be empty: {{}}")
            }
            Self::EscapeInLiteral(pos) => {
                write!(f, "Escape byte in template literal at offset {pos}")
            }
            Self::SeparatorInLiteral(pos) => {
                write!(f, "Tab or line break in template literal at offset {pos}")
            }
            Self::SlotCountMismatch { expected, found } => {
                write!(f, "Template has {expected} slots but {found} values were given")
            }
        }
    }
}

impl std::error::Error for TemplateError {}
