//! Configuration file support
//!
//! Loads settings from ~/.colorexp.toml (or %USERPROFILE%\.colorexp.toml on
//! Windows). Command-line flags take precedence over the file.
//!
//! Example:
//! ```text
//! # colorexp configuration
//! ignore-case = true
//! mode = "background"
//! group-colors = false
//!
//! [palette]
//! foreground = ["\u001b[91m", "\u001b[92m"]
//! foreground-reset = "\u001b[0m"
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::cli::Cli;
use crate::error::{ColorexpError, Result};
use crate::highlighter::DEFAULT_MAX_LINE_LENGTH;
use crate::matcher::{CompileOptions, MatchOptions};
use crate::palette::{ColorTable, HighlightMode, Palette};

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Patterns are literal strings
    pub fixed_strings: bool,
    /// Case insensitive matching
    pub ignore_case: bool,
    /// Palette composition
    pub mode: HighlightMode,
    /// Per-group colors; `None` picks automatically
    pub group_colors: Option<bool>,
    /// Color whole matches even when patterns have groups
    pub whole_match: bool,
    /// Only print lines with a match
    pub matching_lines: bool,
    /// Cap on a single input line in bytes
    pub max_line_length: usize,
    pub foreground: ColorTable,
    pub background: ColorTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fixed_strings: false,
            ignore_case: false,
            mode: HighlightMode::Foreground,
            group_colors: None,
            whole_match: false,
            matching_lines: false,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            foreground: ColorTable::foreground(),
            background: ColorTable::background(),
        }
    }
}

/// On-disk layout of the configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigFile {
    fixed_strings: Option<bool>,
    ignore_case: Option<bool>,
    mode: Option<HighlightMode>,
    group_colors: Option<bool>,
    whole_match: Option<bool>,
    matching_lines: Option<bool>,
    max_line_length: Option<usize>,
    palette: Option<PaletteFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PaletteFile {
    foreground: Option<Vec<String>>,
    foreground_reset: Option<String>,
    background: Option<Vec<String>>,
    background_reset: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".colorexp.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".colorexp.toml"))
        }
    }

    /// Load configuration for a run
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::config_path() {
                Some(path) => (path, false),
                None => return Ok(config),
            },
        };

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound && !required => {
                debug!(path = %path.display(), "no configuration file");
                return Ok(config);
            }
            Err(e) => {
                return Err(ColorexpError::Config {
                    path,
                    message: e.to_string(),
                })
            }
        };

        let settings = Self::parse(&contents).map_err(|message| ColorexpError::Config {
            path: path.clone(),
            message,
        })?;
        config
            .apply(settings)
            .map_err(|message| ColorexpError::Config {
                path: path.clone(),
                message,
            })?;

        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse config file contents
    fn parse(contents: &str) -> std::result::Result<ConfigFile, String> {
        toml::from_str(contents).map_err(|e| e.message().to_string())
    }

    /// Apply settings from a parsed config file
    fn apply(&mut self, settings: ConfigFile) -> std::result::Result<(), String> {
        if let Some(value) = settings.fixed_strings {
            self.fixed_strings = value;
        }
        if let Some(value) = settings.ignore_case {
            self.ignore_case = value;
        }
        if let Some(value) = settings.mode {
            self.mode = value;
        }
        if settings.group_colors.is_some() {
            self.group_colors = settings.group_colors;
        }
        if let Some(value) = settings.whole_match {
            self.whole_match = value;
        }
        if let Some(value) = settings.matching_lines {
            self.matching_lines = value;
        }
        if let Some(value) = settings.max_line_length {
            if value == 0 {
                return Err("max-line-length must be greater than zero".to_string());
            }
            self.max_line_length = value;
        }

        if let Some(palette) = settings.palette {
            if let Some(colors) = palette.foreground {
                if colors.is_empty() {
                    return Err("palette.foreground must list at least one color".to_string());
                }
                self.foreground.colors = colors;
            }
            if let Some(reset) = palette.foreground_reset {
                self.foreground.reset = reset;
            }
            if let Some(colors) = palette.background {
                if colors.is_empty() {
                    return Err("palette.background must list at least one color".to_string());
                }
                self.background.colors = colors;
            }
            if let Some(reset) = palette.background_reset {
                self.background.reset = reset;
            }
        }

        Ok(())
    }

    /// Apply command-line flags on top of the file settings
    ///
    /// Every boolean setting has a `--no-*` flag, so any file value can be
    /// turned off for a single run.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(value) = cli.fixed_strings_override() {
            self.fixed_strings = value;
        }
        if let Some(value) = cli.ignore_case_override() {
            self.ignore_case = value;
        }
        if let Some(value) = cli.whole_match_override() {
            self.whole_match = value;
        }
        if let Some(value) = cli.matching_lines_override() {
            self.matching_lines = value;
        }

        if cli.highlight {
            self.mode = HighlightMode::Background;
        } else if cli.both {
            self.mode = HighlightMode::Both;
        } else if cli.foreground {
            self.mode = HighlightMode::Foreground;
        }
        if let Some(value) = cli.group_colors_override() {
            self.group_colors = Some(value);
        }
        if let Some(value) = cli.max_line_length {
            self.max_line_length = value.get();
        }
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            fixed_strings: self.fixed_strings,
            ignore_case: self.ignore_case,
        }
    }

    /// Resolve match options for the given number of patterns
    ///
    /// Group colors default to on for a single pattern and off otherwise.
    pub fn match_options(&self, pattern_count: usize) -> Result<MatchOptions> {
        if self.group_colors == Some(true) && self.whole_match {
            return Err(ColorexpError::ConflictingOptions(
                "group colors and whole-match highlighting cannot be used together".to_string(),
            ));
        }

        let vary_group_colors = match self.group_colors {
            Some(value) => value,
            None => pattern_count == 1 && !self.whole_match,
        };

        Ok(MatchOptions {
            vary_group_colors,
            whole_match: self.whole_match,
        })
    }

    pub fn palette(&self) -> Result<Palette> {
        Palette::for_mode(self.mode, &self.foreground, &self.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn from_str(contents: &str) -> std::result::Result<Config, String> {
        let mut config = Config::default();
        config.apply(Config::parse(contents)?)?;
        Ok(config)
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("colorexp").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_config() {
        let config = from_str(
            r#"
# Comment
ignore-case = true
fixed-strings = true
mode = "both"
group-colors = false
matching-lines = true
max-line-length = 1024
            "#,
        )
        .unwrap();

        assert!(config.ignore_case);
        assert!(config.fixed_strings);
        assert_eq!(config.mode, HighlightMode::Both);
        assert_eq!(config.group_colors, Some(false));
        assert!(config.matching_lines);
        assert!(!config.whole_match);
        assert_eq!(config.max_line_length, 1024);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(from_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_palette_override() {
        let config = from_str(
            r#"
[palette]
foreground = ["\u001b[91m", "\u001b[92m"]
background-reset = "\u001b[0m"
            "#,
        )
        .unwrap();

        assert_eq!(config.foreground.colors, vec!["\x1b[91m", "\x1b[92m"]);
        assert_eq!(config.foreground.reset, "\x1b[0m");
        assert_eq!(config.background.reset, "\x1b[0m");
        assert_eq!(config.palette().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_config() {
        assert!(from_str("unknown-key = 1").is_err());
        assert!(from_str("mode = \"sideways\"").is_err());
        assert!(from_str("max-line-length = 0").is_err());
        assert!(from_str("[palette]\nbackground = []").is_err());
        assert!(from_str("ignore-case = ").is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = from_str("mode = \"background\"\ngroup-colors = true").unwrap();
        config.apply_cli(&cli(&["-b", "-G", "--max-line-length", "10", "x"]));
        assert_eq!(config.mode, HighlightMode::Both);
        assert_eq!(config.group_colors, Some(false));
        assert_eq!(config.max_line_length, 10);
    }

    #[test]
    fn test_cli_turns_off_file_settings() {
        let mut config = from_str(
            "ignore-case = true\nfixed-strings = true\nwhole-match = true\nmatching-lines = true\nmode = \"both\"",
        )
        .unwrap();
        config.apply_cli(&cli(&[
            "--no-ignore-case",
            "--no-fixed-strings",
            "--no-whole-match",
            "--no-matching-lines",
            "--foreground",
            "x",
        ]));
        assert!(!config.ignore_case);
        assert!(!config.fixed_strings);
        assert!(!config.whole_match);
        assert!(!config.matching_lines);
        assert_eq!(config.mode, HighlightMode::Foreground);
    }

    #[test]
    fn test_cli_without_flags_keeps_file_settings() {
        let mut config = from_str("ignore-case = true\nmatching-lines = true").unwrap();
        config.apply_cli(&cli(&["x"]));
        assert!(config.ignore_case);
        assert!(config.matching_lines);
    }

    #[test]
    fn test_group_colors_after_file_whole_match_turned_off() {
        let mut config = from_str("whole-match = true").unwrap();
        config.apply_cli(&cli(&["-g", "--no-whole-match", "x"]));
        let options = config.match_options(2).unwrap();
        assert!(options.vary_group_colors);
        assert!(!options.whole_match);
    }

    #[test]
    fn test_group_colors_default() {
        let config = Config::default();
        assert!(config.match_options(1).unwrap().vary_group_colors);
        assert!(!config.match_options(2).unwrap().vary_group_colors);

        let mut forced = Config::default();
        forced.group_colors = Some(true);
        assert!(forced.match_options(3).unwrap().vary_group_colors);

        let mut disabled = Config::default();
        disabled.group_colors = Some(false);
        assert!(!disabled.match_options(1).unwrap().vary_group_colors);
    }

    #[test]
    fn test_whole_match_disables_automatic_group_colors() {
        let mut config = Config::default();
        config.whole_match = true;
        let options = config.match_options(1).unwrap();
        assert!(!options.vary_group_colors);
        assert!(options.whole_match);
    }

    #[test]
    fn test_group_colors_conflict_with_whole_match() {
        let mut config = from_str("group-colors = true").unwrap();
        config.apply_cli(&cli(&["-w", "x"]));
        assert!(matches!(
            config.match_options(1),
            Err(ColorexpError::ConflictingOptions(_))
        ));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let path = std::env::temp_dir().join("colorexp-test-does-not-exist.toml");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ColorexpError::Config { .. })
        ));
    }

    #[test]
    fn test_load_explicit_file() {
        let path = std::env::temp_dir().join(format!("colorexp-test-{}.toml", std::process::id()));
        fs::write(&path, "ignore-case = true\n").unwrap();
        let config = Config::load(Some(&path));
        fs::remove_file(&path).unwrap();
        assert!(config.unwrap().ignore_case);
    }
}
