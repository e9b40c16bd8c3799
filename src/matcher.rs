//! Pattern compilation and match collection
//!
//! Patterns are kept in reverse of the order the user gave them. Since
//! the interval set lets the first span on a byte keep it, feeding the
//! last user pattern first makes the last pattern win overlaps.

use regex::bytes::Regex;
use tracing::debug;

use crate::error::{ColorexpError, Result};
use crate::span::{ColorSpan, IntervalSet};

/// How pattern text is turned into a regex
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Treat patterns as literal strings
    pub fixed_strings: bool,
    /// Match case-insensitively
    pub ignore_case: bool,
}

/// How matches are turned into colored spans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Give every capturing group its own color
    pub vary_group_colors: bool,
    /// Color the whole match even when the pattern has groups
    pub whole_match: bool,
}

/// A single compiled pattern
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Pattern text as the user typed it
    pub source: String,
    /// Compiled regex
    pub regex: Regex,
}

impl PatternRule {
    /// Compile a pattern
    pub fn new(source: &str, options: CompileOptions) -> Result<Self> {
        let mut expr = if options.fixed_strings {
            regex::escape(source)
        } else {
            source.to_string()
        };
        if options.ignore_case {
            expr.insert_str(0, "(?i)");
        }

        let regex = Regex::new(&expr).map_err(|source_err| ColorexpError::InvalidPattern {
            pattern: source.to_string(),
            source: source_err,
        })?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Number of capturing groups, not counting the whole match
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }
}

/// All patterns for a run, in precedence order
#[derive(Debug, Clone)]
pub struct PatternSet {
    /// Reverse of user order: the first rule wins overlaps
    rules: Vec<PatternRule>,
    options: MatchOptions,
    total_colors: usize,
}

impl PatternSet {
    /// Compile user patterns, given in the order the user typed them
    pub fn compile<S: AsRef<str>>(
        patterns: &[S],
        compile: CompileOptions,
        options: MatchOptions,
    ) -> Result<Self> {
        let mut rules = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let rule = PatternRule::new(pattern.as_ref(), compile)?;
            debug!(pattern = %rule.source, groups = rule.group_count(), "compiled pattern");
            rules.push(rule);
        }
        rules.reverse();

        Ok(Self::from_rules(rules, options))
    }

    /// Build a set from rules already in precedence order
    pub fn from_rules(rules: Vec<PatternRule>, options: MatchOptions) -> Self {
        let total_colors = rules
            .iter()
            .map(|rule| colors_for(rule, options))
            .sum();
        Self {
            rules,
            options,
            total_colors,
        }
    }

    /// Number of distinct color identities handed out
    pub fn total_colors(&self) -> usize {
        self.total_colors
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Run every pattern over the line and collect the resulting spans
    pub fn collect(&self, line: &[u8]) -> IntervalSet {
        let mut set = IntervalSet::new();
        let mut next_id = 0;

        for rule in &self.rules {
            let groups = rule.group_count();

            if groups == 0 || self.options.whole_match {
                for m in rule.regex.find_iter(line) {
                    if m.start() < m.end() {
                        set.add(ColorSpan::new(m.start(), m.end(), next_id));
                    }
                }
            } else {
                for caps in rule.regex.captures_iter(line) {
                    for group in 1..=groups {
                        let Some(m) = caps.get(group) else {
                            continue;
                        };
                        if m.start() == m.end() {
                            continue;
                        }
                        // Last group gets the lowest identity of this rule's block
                        let id = if self.options.vary_group_colors {
                            next_id + groups - group
                        } else {
                            next_id
                        };
                        set.add(ColorSpan::new(m.start(), m.end(), id));
                    }
                }
            }

            next_id += colors_for(rule, self.options);
        }

        set
    }
}

fn colors_for(rule: &PatternRule, options: MatchOptions) -> usize {
    let groups = rule.group_count();
    if groups == 0 || options.whole_match || !options.vary_group_colors {
        1
    } else {
        groups
    }
}
