//! Style system for terminal text attributes.
//!
//! A [`Style`] is an ordered set of SGR parameters: text attributes in flag
//! order, then the foreground color, then the background color. Rendering
//! always goes through an escape sequence. A style with nothing set renders
//! with the reset code `0`, so every styled value carries at least one
//! sequence that overhead equalization can pad.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::{LazyLock, Mutex};

use bitflags::bitflags;
use lru::LruCache;
use smallvec::SmallVec;

use crate::color::{Color, ColorParseError};
use crate::sync::lock_recover;

/// Control Sequence Introducer opening every SGR sequence.
pub const CSI: &str = "\x1b[";

/// The sequence closing every styled value.
pub const RESET: &str = "\x1b[0m";

bitflags! {
    /// Text attribute flags.
    ///
    /// Each flag corresponds to an ANSI SGR (Select Graphic Rendition) code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u16 {
        /// Bold/bright text (SGR 1).
        const BOLD      = 1 << 0;
        /// Dim/faint text (SGR 2).
        const DIM       = 1 << 1;
        /// Italic text (SGR 3).
        const ITALIC    = 1 << 2;
        /// Single underline (SGR 4).
        const UNDERLINE = 1 << 3;
        /// Slow blinking text (SGR 5).
        const BLINK     = 1 << 4;
        /// Fast blinking text (SGR 6).
        const BLINK2    = 1 << 5;
        /// Reverse video (SGR 7).
        const REVERSE   = 1 << 6;
        /// Concealed/hidden text (SGR 8).
        const CONCEAL   = 1 << 7;
        /// Strikethrough text (SGR 9).
        const STRIKE    = 1 << 8;
    }
}

impl Attributes {
    const SGR_CODES: [(Self, u8); 9] = [
        (Self::BOLD, 1),
        (Self::DIM, 2),
        (Self::ITALIC, 3),
        (Self::UNDERLINE, 4),
        (Self::BLINK, 5),
        (Self::BLINK2, 6),
        (Self::REVERSE, 7),
        (Self::CONCEAL, 8),
        (Self::STRIKE, 9),
    ];

    /// Get the ANSI SGR codes for enabled attributes, in flag order.
    #[must_use]
    pub fn to_sgr_codes(&self) -> SmallVec<[u8; 4]> {
        Self::SGR_CODES
            .iter()
            .filter(|(attr, _)| self.contains(*attr))
            .map(|&(_, code)| code)
            .collect()
    }
}

/// Visual style for a table value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub color: Option<Color>,
    /// Background color.
    pub bgcolor: Option<Color>,
    /// Enabled attributes.
    pub attributes: Attributes,
}

impl Style {
    /// Create an empty style. It still renders with a reset sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no attribute or color is set.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.color.is_none() && self.bgcolor.is_none() && self.attributes.is_empty()
    }

    /// Set the foreground color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn bgcolor(mut self, color: Color) -> Self {
        self.bgcolor = Some(color);
        self
    }

    /// Enable the given attributes.
    #[must_use]
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes.insert(attributes);
        self
    }

    /// Enable bold text.
    #[must_use]
    pub fn bold(self) -> Self {
        self.attributes(Attributes::BOLD)
    }

    /// Enable dim/faint text.
    #[must_use]
    pub fn dim(self) -> Self {
        self.attributes(Attributes::DIM)
    }

    /// Enable italic text.
    #[must_use]
    pub fn italic(self) -> Self {
        self.attributes(Attributes::ITALIC)
    }

    /// Enable underlined text.
    #[must_use]
    pub fn underline(self) -> Self {
        self.attributes(Attributes::UNDERLINE)
    }

    /// Enable reverse video.
    #[must_use]
    pub fn reverse(self) -> Self {
        self.attributes(Attributes::REVERSE)
    }

    /// Enable strikethrough text.
    #[must_use]
    pub fn strike(self) -> Self {
        self.attributes(Attributes::STRIKE)
    }

    /// Combine this style with another, with the other style taking precedence.
    #[must_use]
    pub fn combine(&self, other: &Style) -> Style {
        Style {
            color: other.color.or(self.color),
            bgcolor: other.bgcolor.or(self.bgcolor),
            attributes: self.attributes | other.attributes,
        }
    }

    /// The SGR parameter list of this style, `"0"` when nothing is set.
    ///
    /// ```
    /// use tablecloth::style::Style;
    /// use tablecloth::color::Color;
    ///
    /// assert_eq!(Style::new().sgr_params(), "0");
    /// assert_eq!(Style::new().bold().color(Color::Standard(1)).sgr_params(), "1;31");
    /// ```
    #[must_use]
    pub fn sgr_params(&self) -> String {
        let mut codes: SmallVec<[String; 6]> = self
            .attributes
            .to_sgr_codes()
            .iter()
            .map(ToString::to_string)
            .collect();

        if let Some(color) = &self.color {
            codes.extend(color.ansi_codes(true));
        }
        if let Some(bgcolor) = &self.bgcolor {
            codes.extend(bgcolor.ansi_codes(false));
        }

        if codes.is_empty() {
            return String::from("0");
        }
        codes.join(";")
    }

    /// The opening escape sequence of this style.
    #[must_use]
    pub fn escape_sequence(&self) -> String {
        format!("{CSI}{}m", self.sgr_params())
    }

    /// Render text with this style applied, followed by a reset.
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        let prefix = self.escape_sequence();
        let mut result = String::with_capacity(prefix.len() + text.len() + RESET.len());
        result.push_str(&prefix);
        result.push_str(text);
        result.push_str(RESET);
        result
    }

    /// Parse a style from a string (cached).
    ///
    /// Supported formats:
    /// - Empty/none: `""`, `"none"` -> empty style
    /// - Attribute: `"bold"`, `"italic"`, `"underline"`
    /// - Color: `"red"`, `"#ff0000"`
    /// - Background: `"on red"`, `"on #ff0000"`
    /// - Combined: `"bold red on white"`
    ///
    /// # Errors
    ///
    /// Returns a [`StyleParseError`] for unknown words or bad colors.
    pub fn parse(style: &str) -> Result<Self, StyleParseError> {
        static CACHE: LazyLock<Mutex<LruCache<String, Style>>> = LazyLock::new(|| {
            Mutex::new(LruCache::new(NonZeroUsize::new(512).expect("non-zero")))
        });

        let normalized = style.trim().to_lowercase();

        if let Some(cached) = lock_recover(&CACHE).get(&normalized) {
            return Ok(*cached);
        }

        let result = Self::parse_uncached(&normalized)?;
        lock_recover(&CACHE).put(normalized, result);
        Ok(result)
    }

    fn parse_uncached(style: &str) -> Result<Self, StyleParseError> {
        if style.is_empty() || style == "none" {
            return Ok(Self::new());
        }

        let mut result = Style::new();
        let mut words = style.split_whitespace();

        while let Some(word) = words.next() {
            if word == "on" {
                let color_name = words.next().ok_or_else(|| {
                    StyleParseError::InvalidFormat("'on' requires a color".to_string())
                })?;
                result = result.bgcolor(Color::parse(color_name)?);
                continue;
            }

            if let Some(attr) = parse_attribute(word) {
                result = result.attributes(attr);
                continue;
            }

            match Color::parse(word) {
                Ok(color) => result = result.color(color),
                Err(ColorParseError::UnknownColor(_)) => {
                    return Err(StyleParseError::UnknownToken(word.to_string()));
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(result)
    }
}

impl std::ops::Add for Style {
    type Output = Style;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(&rhs)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_plain() {
            return write!(f, "none");
        }

        let mut parts = Vec::new();
        for (attr, name) in [
            (Attributes::BOLD, "bold"),
            (Attributes::DIM, "dim"),
            (Attributes::ITALIC, "italic"),
            (Attributes::UNDERLINE, "underline"),
            (Attributes::BLINK, "blink"),
            (Attributes::BLINK2, "blink2"),
            (Attributes::REVERSE, "reverse"),
            (Attributes::CONCEAL, "conceal"),
            (Attributes::STRIKE, "strike"),
        ] {
            if self.attributes.contains(attr) {
                parts.push(name.to_string());
            }
        }
        if let Some(color) = &self.color {
            parts.push(color.to_string());
        }
        if let Some(bgcolor) = &self.bgcolor {
            parts.push(format!("on {bgcolor}"));
        }

        write!(f, "{}", parts.join(" "))
    }
}

impl FromStr for Style {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse an attribute name to its flag.
fn parse_attribute(name: &str) -> Option<Attributes> {
    match name {
        "bold" | "b" => Some(Attributes::BOLD),
        "dim" | "d" => Some(Attributes::DIM),
        "italic" | "i" => Some(Attributes::ITALIC),
        "underline" | "u" => Some(Attributes::UNDERLINE),
        "blink" => Some(Attributes::BLINK),
        "blink2" => Some(Attributes::BLINK2),
        "reverse" | "r" => Some(Attributes::REVERSE),
        "conceal" | "c" => Some(Attributes::CONCEAL),
        "strike" | "s" => Some(Attributes::STRIKE),
        _ => None,
    }
}

/// Error type for style parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleParseError {
    InvalidFormat(String),
    UnknownToken(String),
    ColorError(ColorParseError),
}

impl fmt::Display for StyleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid style format: {s}"),
            Self::UnknownToken(s) => write!(f, "Unknown token: {s}"),
            Self::ColorError(e) => write!(f, "Color error: {e}"),
        }
    }
}

impl std::error::Error for StyleParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ColorError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ColorParseError> for StyleParseError {
    fn from(err: ColorParseError) -> Self {
        Self::ColorError(err)
    }
}
