//! Terminal colors and their SGR parameter codes.
//!
//! # Examples
//!
//! ```
//! use tablecloth::color::Color;
//!
//! let red = Color::parse("red").unwrap();
//! assert_eq!(red.ansi_codes(true), vec!["31".to_string()]);
//!
//! let orange = Color::parse("#ff8800").unwrap();
//! assert_eq!(orange.ansi_codes(false).join(";"), "48;2;255;136;0");
//!
//! let indexed = Color::parse("color(196)").unwrap();
//! assert_eq!(indexed.ansi_codes(true).join(";"), "38;5;196");
//! ```

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Standard color names mapped to their 4-bit ANSI numbers.
const NAMED_COLORS: [(&str, u8); 16] = [
    ("black", 0),
    ("red", 1),
    ("green", 2),
    ("yellow", 3),
    ("blue", 4),
    ("magenta", 5),
    ("cyan", 6),
    ("white", 7),
    ("bright_black", 8),
    ("bright_red", 9),
    ("bright_green", 10),
    ("bright_yellow", 11),
    ("bright_blue", 12),
    ("bright_magenta", 13),
    ("bright_cyan", 14),
    ("bright_white", 15),
];

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's default color (SGR 39/49).
    #[default]
    Default,
    /// 4-bit ANSI color, `0..16`.
    Standard(u8),
    /// 8-bit indexed color.
    Indexed(u8),
    /// 24-bit color.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Create a color from an 8-bit ANSI number.
    ///
    /// Numbers below 16 map to the standard palette.
    #[must_use]
    pub const fn from_ansi(number: u8) -> Self {
        if number < 16 {
            Self::Standard(number)
        } else {
            Self::Indexed(number)
        }
    }

    /// Create a 24-bit color.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::Rgb(red, green, blue)
    }

    /// SGR parameters selecting this color as foreground or background.
    #[must_use]
    pub fn ansi_codes(&self, foreground: bool) -> Vec<String> {
        match *self {
            Self::Default => vec![if foreground { "39" } else { "49" }.to_string()],
            Self::Standard(number) => {
                let code = match (number < 8, foreground) {
                    (true, true) => 30 + u16::from(number),
                    (true, false) => 40 + u16::from(number),
                    (false, true) => 82 + u16::from(number),
                    (false, false) => 92 + u16::from(number),
                };
                vec![code.to_string()]
            }
            Self::Indexed(number) => vec![
                if foreground { "38" } else { "48" }.to_string(),
                "5".to_string(),
                number.to_string(),
            ],
            Self::Rgb(r, g, b) => vec![
                if foreground { "38" } else { "48" }.to_string(),
                "2".to_string(),
                r.to_string(),
                g.to_string(),
                b.to_string(),
            ],
        }
    }

    /// Parse a color from a string.
    ///
    /// Accepts `default`, standard names (`red`, `bright_blue`), `color(N)`,
    /// `#rrggbb`, `#rgb` and `rgb(r, g, b)`.
    ///
    /// # Errors
    ///
    /// Returns a [`ColorParseError`] describing the rejected input.
    pub fn parse(color: &str) -> Result<Self, ColorParseError> {
        static COLOR_NUM_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^color\((\d{1,3})\)$").expect("valid regex"));
        static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
                .expect("valid regex")
        });

        let color = color.trim().to_lowercase();
        if color.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if color == "default" {
            return Ok(Self::Default);
        }

        if let Some(hex) = color.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(color.clone()));
        }

        if let Some(caps) = COLOR_NUM_RE.captures(&color) {
            return caps[1]
                .parse::<u8>()
                .map(Self::from_ansi)
                .map_err(|_| ColorParseError::InvalidColorNumber(color.clone()));
        }

        if let Some(caps) = RGB_RE.captures(&color) {
            return match (
                caps[1].parse::<u8>(),
                caps[2].parse::<u8>(),
                caps[3].parse::<u8>(),
            ) {
                (Ok(r), Ok(g), Ok(b)) => Ok(Self::Rgb(r, g, b)),
                _ => Err(ColorParseError::InvalidRgb(color.clone())),
            };
        }

        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == color)
            .map(|&(_, number)| Self::Standard(number))
            .ok_or(ColorParseError::UnknownColor(color))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        3 => {
            let mut digits = hex.chars().map(|c| channel(&format!("{c}{c}")));
            Some(Color::Rgb(digits.next()??, digits.next()??, digits.next()??))
        }
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Default => write!(f, "default"),
            Self::Standard(number) => match NAMED_COLORS.get(usize::from(number)) {
                Some((name, _)) => write!(f, "{name}"),
                None => write!(f, "color({number})"),
            },
            Self::Indexed(number) => write!(f, "color({number})"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidHex(String),
    InvalidColorNumber(String),
    InvalidRgb(String),
    UnknownColor(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::InvalidHex(s) => write!(f, "Invalid hex color: {s}"),
            Self::InvalidColorNumber(s) => write!(f, "Invalid color number: {s}"),
            Self::InvalidRgb(s) => write!(f, "Invalid RGB color: {s}"),
            Self::UnknownColor(s) => write!(f, "Unknown color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}
