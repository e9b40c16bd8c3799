//! Command-line interface for colorexp

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

/// colorexp - colorize regular expression matches in text read from stdin
#[derive(Parser, Debug, Default)]
#[command(name = "colorexp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Patterns to highlight; later patterns win where matches overlap
    #[arg(value_name = "PATTERN", required = true)]
    pub patterns: Vec<String>,

    /// Do not interpret regular expression metacharacters
    #[arg(short = 'F', long)]
    pub fixed_strings: bool,

    /// Interpret patterns as regular expressions
    #[arg(long, conflicts_with = "fixed_strings")]
    pub no_fixed_strings: bool,

    /// Perform case insensitive matching
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Perform case sensitive matching
    #[arg(long, conflicts_with = "ignore_case")]
    pub no_ignore_case: bool,

    /// Color by changing the background color instead of the foreground
    #[arg(short = 'H', long)]
    pub highlight: bool,

    /// Use foreground colors, then background colors once those run out
    #[arg(short, long, conflicts_with = "highlight")]
    pub both: bool,

    /// Color by changing the foreground color
    #[arg(long, conflicts_with_all = ["highlight", "both"])]
    pub foreground: bool,

    /// Give each capturing group its own color (default with a single pattern)
    #[arg(short, long, conflicts_with_all = ["no_group_colors", "whole_match"])]
    pub group_colors: bool,

    /// Color all capturing groups of a pattern the same
    #[arg(short = 'G', long)]
    pub no_group_colors: bool,

    /// Color the whole match even when the pattern has capturing groups
    #[arg(short, long)]
    pub whole_match: bool,

    /// Color only the capturing groups of patterns that have them
    #[arg(long, conflicts_with = "whole_match")]
    pub no_whole_match: bool,

    /// Only print lines that contain at least one match
    #[arg(short, long)]
    pub matching_lines: bool,

    /// Print every line, matching or not
    #[arg(long, conflicts_with = "matching_lines")]
    pub no_matching_lines: bool,

    /// Maximum length of an input line in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_line_length: Option<NonZeroUsize>,

    /// Read settings from this file instead of ~/.colorexp.toml
    #[arg(short, long, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore the configuration file
    #[arg(long)]
    pub no_config: bool,
}

impl Cli {
    /// Explicit group color choice, if any
    pub fn group_colors_override(&self) -> Option<bool> {
        switch(self.group_colors, self.no_group_colors)
    }

    pub fn fixed_strings_override(&self) -> Option<bool> {
        switch(self.fixed_strings, self.no_fixed_strings)
    }

    pub fn ignore_case_override(&self) -> Option<bool> {
        switch(self.ignore_case, self.no_ignore_case)
    }

    pub fn whole_match_override(&self) -> Option<bool> {
        switch(self.whole_match, self.no_whole_match)
    }

    pub fn matching_lines_override(&self) -> Option<bool> {
        switch(self.matching_lines, self.no_matching_lines)
    }
}

/// Fold a `--flag` / `--no-flag` pair into an optional setting
fn switch(on: bool, off: bool) -> Option<bool> {
    if on {
        Some(true)
    } else if off {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("colorexp").chain(args.iter().copied()))
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_patterns_required() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["-i"]).is_err());
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&["-F", "-i", "-H", "-m", "-w", "foo", "bar"]).unwrap();
        assert!(cli.fixed_strings);
        assert!(cli.ignore_case);
        assert!(cli.highlight);
        assert!(cli.matching_lines);
        assert!(cli.whole_match);
        assert_eq!(cli.patterns, vec!["foo", "bar"]);
        assert_eq!(cli.group_colors_override(), None);
    }

    #[test]
    fn test_group_color_overrides() {
        assert_eq!(parse(&["-g", "x"]).unwrap().group_colors_override(), Some(true));
        assert_eq!(parse(&["-G", "x"]).unwrap().group_colors_override(), Some(false));
    }

    #[test]
    fn test_conflicts() {
        assert!(parse(&["-g", "-G", "x"]).is_err());
        assert!(parse(&["-g", "-w", "x"]).is_err());
        assert!(parse(&["-H", "-b", "x"]).is_err());
        assert!(parse(&["--config", "a.toml", "--no-config", "x"]).is_err());
    }

    #[test]
    fn test_negated_flags() {
        let cli = parse(&["--no-ignore-case", "--no-whole-match", "--no-matching-lines", "x"]).unwrap();
        assert_eq!(cli.ignore_case_override(), Some(false));
        assert_eq!(cli.whole_match_override(), Some(false));
        assert_eq!(cli.matching_lines_override(), Some(false));
        assert_eq!(cli.fixed_strings_override(), None);

        let cli = parse(&["--no-fixed-strings", "x"]).unwrap();
        assert_eq!(cli.fixed_strings_override(), Some(false));

        assert!(parse(&["-i", "--no-ignore-case", "x"]).is_err());
        assert!(parse(&["-w", "--no-whole-match", "x"]).is_err());
        assert!(parse(&["--foreground", "-H", "x"]).is_err());
        assert!(parse(&["-g", "--no-whole-match", "x"]).is_ok());
    }

    #[test]
    fn test_max_line_length() {
        let cli = parse(&["--max-line-length", "128", "x"]).unwrap();
        assert_eq!(cli.max_line_length.map(NonZeroUsize::get), Some(128));
        assert!(parse(&["--max-line-length", "0", "x"]).is_err());
        assert!(parse(&["--max-line-length", "lots", "x"]).is_err());
    }

    #[test]
    fn test_pattern_starting_with_dash() {
        let cli = parse(&["--", "-x"]).unwrap();
        assert_eq!(cli.patterns, vec!["-x"]);
    }
}
