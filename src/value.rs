//! Styled scalar values.
//!
//! A [`StyledValue`] is the unit of styling inside a cell. Its plain text is
//! produced once, when the value is created, and rendering is a pure function
//! of that text and the value's [`Style`].

use std::fmt;

use crate::style::Style;

/// One scalar with a style, substituted into a cell template slot.
///
/// The plain text must be a single line of visible characters. Tabs and
/// line breaks split the table's row, and an escape byte is counted as
/// visible width, so any of them misaligns the column. Styling belongs in
/// the [`Style`], never in the text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledValue {
    plain: String,
    style: Style,
}

impl StyledValue {
    /// Create an unstyled value from anything that implements `Display`.
    ///
    /// The displayed text must not contain tabs, line breaks or escape
    /// sequences.
    ///
    /// ```
    /// use tablecloth::value::StyledValue;
    ///
    /// let v = StyledValue::new(75);
    /// assert_eq!(v.plain(), "75");
    /// ```
    #[must_use]
    pub fn new(value: impl fmt::Display) -> Self {
        Self {
            plain: value.to_string(),
            style: Style::new(),
        }
    }

    /// Create a value stringified by a custom formatter. The same text
    /// restrictions as [`StyledValue::new`] apply.
    ///
    /// ```
    /// use tablecloth::value::StyledValue;
    ///
    /// let v = StyledValue::with_formatter(0.5_f64, |p| format!("{:.0}%", p * 100.0));
    /// assert_eq!(v.plain(), "50%");
    /// ```
    #[must_use]
    pub fn with_formatter<T>(value: T, format: impl FnOnce(&T) -> String) -> Self {
        Self {
            plain: format(&value),
            style: Style::new(),
        }
    }

    /// Set the style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The value's text without any styling.
    #[must_use]
    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// The value's style.
    #[must_use]
    pub fn get_style(&self) -> &Style {
        &self.style
    }

    /// Render the value, dropping `trim` characters from the end of its
    /// plain text first.
    ///
    /// Returns the styled text and its overhead: the number of bytes the
    /// escape sequences add. An unstyled value is still wrapped in reset
    /// sequences, so the overhead is never zero.
    #[must_use]
    pub fn render(&self, trim: usize) -> (String, usize) {
        let plain = trim_end_chars(&self.plain, trim);
        let styled = self.style.render(plain);
        let overhead = styled.len() - plain.len();
        (styled, overhead)
    }

    /// Render without any escape sequences. The overhead is always zero.
    #[must_use]
    pub fn render_plain(&self, trim: usize) -> (String, usize) {
        (trim_end_chars(&self.plain, trim).to_string(), 0)
    }
}

impl From<&str> for StyledValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StyledValue {
    fn from(plain: String) -> Self {
        Self {
            plain,
            style: Style::new(),
        }
    }
}

/// Drop up to `count` characters from the end of `text`.
fn trim_end_chars(text: &str, count: usize) -> &str {
    if count == 0 {
        return text;
    }
    let keep = text.chars().count().saturating_sub(count);
    let end = text.char_indices().nth(keep).map_or(text.len(), |(i, _)| i);
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_unstyled_value_carries_reset_sequence() {
        let (text, overhead) = StyledValue::new("hello").render(0);
        assert_eq!(text, "\x1b[0mhello\x1b[0m");
        assert_eq!(overhead, 8);
    }

    #[test]
    fn test_styled_value_overhead() {
        let value = StyledValue::new("hi").style(Style::new().bold().color(Color::Standard(1)));
        let (text, overhead) = value.render(0);
        assert_eq!(text, "\x1b[1;31mhi\x1b[0m");
        assert_eq!(overhead, text.len() - "hi".len());
        assert_eq!(overhead, 11);
    }

    #[test]
    fn test_trim_shortens_plain_text_before_styling() {
        let value = StyledValue::new("abcdef").style(Style::new().bold());
        let (text, overhead) = value.render(2);
        assert_eq!(text, "\x1b[1mabcd\x1b[0m");
        assert_eq!(overhead, 8);
    }

    #[test]
    fn test_trim_beyond_length_empties_value() {
        let (text, overhead) = StyledValue::new("abc").render(10);
        assert_eq!(text, "\x1b[0m\x1b[0m");
        assert_eq!(overhead, 8);
    }

    #[test]
    fn test_trim_respects_char_boundaries() {
        assert_eq!(trim_end_chars("héllo", 4), "h");
        assert_eq!(trim_end_chars("日本語", 1), "日本");
        assert_eq!(trim_end_chars("", 3), "");
    }

    #[test]
    fn test_escapes_belong_in_the_style() {
        // escapes inside the text are not overhead
        let (_, overhead) = StyledValue::new("\x1b[31mred\x1b[0m").render(0);
        assert_eq!(overhead, 8);

        let value = StyledValue::new("red").style(Style::new().color(Color::Standard(1)));
        let (text, overhead) = value.render(0);
        assert_eq!(text.len() - overhead, "red".len());
    }

    #[test]
    fn test_render_plain_has_no_overhead() {
        let value = StyledValue::new(42).style(Style::new().underline());
        assert_eq!(value.render_plain(0), ("42".to_string(), 0));
        assert_eq!(value.render_plain(1), ("4".to_string(), 0));
    }

    #[test]
    fn test_render_is_deterministic() {
        let value = StyledValue::new("x").style(Style::new().italic().bgcolor(Color::Rgb(9, 8, 7)));
        assert_eq!(value.render(0), value.render(0));
    }
}
