//! Diff output for `fmt --diff`
//!
//! This module provides:
//! - A line diff based on the longest common subsequence
//! - Unified diff display with three lines of context

use colored::Colorize;
use std::io::Write;
use std::path::Path;

const CONTEXT_LINES: usize = 3;

/// One line of a line diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLine<'a> {
    /// Present in both versions
    Equal(&'a str),
    /// Only in the original
    Removed(&'a str),
    /// Only in the new version
    Added(&'a str),
}

impl DiffLine<'_> {
    fn is_change(&self) -> bool {
        !matches!(self, DiffLine::Equal(_))
    }
}

/// Compute a line diff between two texts
pub fn line_diff<'a>(old: &'a str, new: &'a str) -> Vec<DiffLine<'a>> {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();
    let (n, m) = (old_lines.len(), new_lines.len());

    // lcs[i][j]: length of the LCS of old_lines[i..] and new_lines[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if old_lines[i] == new_lines[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut result = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old_lines[i] == new_lines[j] {
            result.push(DiffLine::Equal(old_lines[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            result.push(DiffLine::Removed(old_lines[i]));
            i += 1;
        } else {
            result.push(DiffLine::Added(new_lines[j]));
            j += 1;
        }
    }
    result.extend(old_lines[i..].iter().copied().map(DiffLine::Removed));
    result.extend(new_lines[j..].iter().copied().map(DiffLine::Added));
    result
}

/// Diff formatter for showing formatting changes
pub struct DiffFormatter {
    /// Whether to use colors
    color: bool,
}

impl DiffFormatter {
    /// Create a new diff formatter
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Write a unified diff; writes nothing when the texts are equal
    pub fn format_diff(
        &self,
        path: &Path,
        original: &str,
        updated: &str,
        writer: &mut dyn Write,
    ) -> std::io::Result<bool> {
        let lines = line_diff(original, updated);
        if !lines.iter().any(DiffLine::is_change) {
            return Ok(false);
        }

        writeln!(writer, "--- a/{}", path.display())?;
        writeln!(writer, "+++ b/{}", path.display())?;

        // Line counts consumed before each diff entry
        let mut positions = Vec::with_capacity(lines.len());
        let (mut old_pos, mut new_pos) = (0, 0);
        for line in &lines {
            positions.push((old_pos, new_pos));
            match line {
                DiffLine::Equal(_) => {
                    old_pos += 1;
                    new_pos += 1;
                }
                DiffLine::Removed(_) => old_pos += 1,
                DiffLine::Added(_) => new_pos += 1,
            }
        }

        for (start, end) in hunk_ranges(&lines) {
            let hunk = &lines[start..end];
            let old_count = hunk
                .iter()
                .filter(|l| !matches!(l, DiffLine::Added(_)))
                .count();
            let new_count = hunk
                .iter()
                .filter(|l| !matches!(l, DiffLine::Removed(_)))
                .count();
            let (old_before, new_before) = positions[start];
            let old_start = if old_count > 0 { old_before + 1 } else { old_before };
            let new_start = if new_count > 0 { new_before + 1 } else { new_before };

            let header = format!(
                "@@ -{},{} +{},{} @@",
                old_start, old_count, new_start, new_count
            );
            if self.color {
                writeln!(writer, "{}", header.cyan())?;
            } else {
                writeln!(writer, "{}", header)?;
            }

            for line in hunk {
                self.write_line(line, writer)?;
            }
        }

        Ok(true)
    }

    fn write_line(&self, line: &DiffLine<'_>, writer: &mut dyn Write) -> std::io::Result<()> {
        match (line, self.color) {
            (DiffLine::Equal(text), _) => writeln!(writer, " {}", text),
            (DiffLine::Removed(text), true) => {
                writeln!(writer, "{}", format!("-{}", text).red())
            }
            (DiffLine::Removed(text), false) => writeln!(writer, "-{}", text),
            (DiffLine::Added(text), true) => {
                writeln!(writer, "{}", format!("+{}", text).green())
            }
            (DiffLine::Added(text), false) => writeln!(writer, "+{}", text),
        }
    }
}

/// Index ranges of the diff entries to show, changes plus surrounding context
fn hunk_ranges(lines: &[DiffLine<'_>]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if !line.is_change() {
            continue;
        }
        let start = index.saturating_sub(CONTEXT_LINES);
        let end = (index + 1 + CONTEXT_LINES).min(lines.len());
        match ranges.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => ranges.push((start, end)),
        }
    }
    ranges
}
