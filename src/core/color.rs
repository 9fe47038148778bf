//! ANSI colour wrapper for chart strokes and pie slices.

use std::fmt;

use crate::core::error::ColorError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnsiCode {
    /// No escape at all: plain text output.
    Plain,
    Static(&'static str),
    /// True-colour escape `ESC[38;2;R;G;Bm`.
    Rgb(u8, u8, u8),
}

impl AnsiCode {
    pub const fn black() -> Self {
        Self::Static("\x1b[30m")
    }
    pub const fn red() -> Self {
        Self::Static("\x1b[31m")
    }
    pub const fn green() -> Self {
        Self::Static("\x1b[32m")
    }
    pub const fn yellow() -> Self {
        Self::Static("\x1b[33m")
    }
    pub const fn blue() -> Self {
        Self::Static("\x1b[34m")
    }
    pub const fn magenta() -> Self {
        Self::Static("\x1b[35m")
    }
    pub const fn cyan() -> Self {
        Self::Static("\x1b[36m")
    }
    pub const fn white() -> Self {
        Self::Static("\x1b[37m")
    }
    pub const fn industrial_orange() -> Self {
        Self::Rgb(210, 135, 10)
    }
    #[inline]
    pub const fn reset() -> Self {
        Self::Static("\x1b[0m")
    }

    #[inline]
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        matches!(self, Self::Plain)
    }

    /// Parse colour names, `none`, or `#rrggbb`.
    pub fn from_name(s: &str) -> Result<Self, ColorError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "plain" => Ok(Self::Plain),
            "black" => Ok(Self::black()),
            "red" => Ok(Self::red()),
            "green" => Ok(Self::green()),
            "yellow" => Ok(Self::yellow()),
            "blue" => Ok(Self::blue()),
            "magenta" => Ok(Self::magenta()),
            "cyan" => Ok(Self::cyan()),
            "white" => Ok(Self::white()),
            "orange" | "industrial" => Ok(Self::industrial_orange()),
            _ => Self::from_hex(s),
        }
    }

    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let h = hex.trim().trim_start_matches('#');
        if h.len() != 6 || !h.is_ascii() {
            return Err(ColorError::InvalidHexLength);
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHexDigit);
        Ok(Self::Rgb(byte(&h[..2])?, byte(&h[2..4])?, byte(&h[4..])?))
    }

    /// Slice colours for the pie legend, starting from the chart colour and
    /// cycling a fixed palette. Plain stays plain.
    #[must_use]
    pub fn palette(self, n: usize) -> Vec<Self> {
        const CYCLE: [AnsiCode; 5] = [
            AnsiCode::cyan(),
            AnsiCode::green(),
            AnsiCode::magenta(),
            AnsiCode::yellow(),
            AnsiCode::blue(),
        ];
        if self.is_plain() {
            return vec![Self::Plain; n];
        }
        std::iter::once(self)
            .chain(CYCLE.into_iter().filter(move |c| *c != self).cycle())
            .take(n)
            .collect()
    }
}

impl std::str::FromStr for AnsiCode {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for AnsiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => Ok(()),
            Self::Static(s) => f.write_str(s),
            Self::Rgb(r, g, b) => write!(f, "\x1b[38;2;{r};{g};{b}m"),
        }
    }
}

/// Wrap `text` in colour + reset sequence.
#[inline]
#[must_use]
pub fn colorize(c: &AnsiCode, text: &str) -> String {
    if c.is_plain() {
        text.to_owned()
    } else {
        format!("{c}{text}{}", AnsiCode::reset())
    }
}
