//! Color palettes
//!
//! A palette is an ordered list of (start code, reset code) pairs. It is
//! built once at startup from the highlight mode and never changes.

use serde::Deserialize;

use crate::error::{ColorexpError, Result};

/// Foreground start codes (black and white left out on purpose)
pub const FOREGROUND_COLORS: [&str; 6] = [
    "\x1b[31m", // Red
    "\x1b[32m", // Green
    "\x1b[33m", // Yellow
    "\x1b[34m", // Blue
    "\x1b[35m", // Magenta
    "\x1b[36m", // Cyan
];

/// Background start codes
pub const BACKGROUND_COLORS: [&str; 6] = [
    "\x1b[41m", // Red
    "\x1b[44m", // Blue
    "\x1b[45m", // Magenta
    "\x1b[42m", // Green
    "\x1b[43m", // Yellow
    "\x1b[46m", // Cyan
];

pub const FOREGROUND_RESET: &str = "\x1b[0m";
pub const BACKGROUND_RESET: &str = "\x1b[49m";

/// Which color tables make up the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMode {
    /// Change the text color
    #[default]
    Foreground,
    /// Change the background color
    Background,
    /// Foreground colors followed by background colors
    Both,
}

/// A single palette entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub start: String,
    pub reset: String,
}

/// Start codes sharing one reset code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    pub colors: Vec<String>,
    pub reset: String,
}

impl ColorTable {
    pub fn new(colors: &[&str], reset: &str) -> Self {
        Self {
            colors: colors.iter().map(|c| c.to_string()).collect(),
            reset: reset.to_string(),
        }
    }

    /// The built-in foreground table
    pub fn foreground() -> Self {
        Self::new(&FOREGROUND_COLORS, FOREGROUND_RESET)
    }

    /// The built-in background table
    pub fn background() -> Self {
        Self::new(&BACKGROUND_COLORS, BACKGROUND_RESET)
    }

    fn entries(&self) -> impl Iterator<Item = PaletteEntry> + '_ {
        self.colors.iter().map(|start| PaletteEntry {
            start: start.clone(),
            reset: self.reset.clone(),
        })
    }
}

/// The resolved, non-empty palette for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Build a palette from explicit (start, reset) pairs
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self> {
        let entries: Vec<PaletteEntry> = pairs
            .iter()
            .map(|&(start, reset)| PaletteEntry {
                start: start.to_string(),
                reset: reset.to_string(),
            })
            .collect();
        if entries.is_empty() {
            return Err(ColorexpError::EmptyPalette("custom"));
        }
        Ok(Self { entries })
    }

    /// Compose the palette for a highlight mode
    pub fn for_mode(mode: HighlightMode, foreground: &ColorTable, background: &ColorTable) -> Result<Self> {
        if matches!(mode, HighlightMode::Foreground | HighlightMode::Both) && foreground.colors.is_empty() {
            return Err(ColorexpError::EmptyPalette("foreground"));
        }
        if matches!(mode, HighlightMode::Background | HighlightMode::Both) && background.colors.is_empty() {
            return Err(ColorexpError::EmptyPalette("background"));
        }

        let entries = match mode {
            HighlightMode::Foreground => foreground.entries().collect(),
            HighlightMode::Background => background.entries().collect(),
            HighlightMode::Both => foreground.entries().chain(background.entries()).collect(),
        };
        Ok(Self { entries })
    }

    /// Number of colors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Palette entry for a color identity
    ///
    /// The identity is reversed against the total number of identities in
    /// use, so the pattern the user typed first always gets the first
    /// palette color no matter how many patterns follow it.
    pub fn resolve(&self, color_id: usize, total_colors: usize) -> &PaletteEntry {
        let size = self.entries.len() as i64;
        let index = (total_colors as i64 - color_id as i64 - 1).rem_euclid(size);
        &self.entries[index as usize]
    }
}
