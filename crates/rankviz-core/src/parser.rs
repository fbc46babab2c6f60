use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use crate::config::InputConfig;
use crate::error::ReportError;
use crate::types::ClassifierResult;

/// `<rank>. <name>  <accuracy>%`, with the name matched lazily so trailing
/// padding is left to the separator.
const ENTRY_PATTERN: &str = r"^\s*(\d+)\.\s+(.+?)\s+(\d+\.\d+)%";

/// Compiled patterns for pulling rankings out of an experiment report.
pub struct RankingParser {
    section: Regex,
    entry: Regex,
}

impl RankingParser {
    pub fn new(input: &InputConfig) -> Result<Self> {
        let section_pattern = format!(
            r"(?s){}(.*?)={{{},}}",
            regex::escape(&input.section_header),
            input.separator_min_len.max(1)
        );
        let section = Regex::new(&section_pattern)
            .with_context(|| format!("invalid section header '{}'", input.section_header))?;
        let entry = Regex::new(ENTRY_PATTERN).context("invalid ranking entry pattern")?;
        Ok(Self { section, entry })
    }

    /// Read `path` and parse its rankings section.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<ClassifierResult>, ReportError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ReportError::FileUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        self.parse(&content)
    }

    /// Parse the rankings section of a report, in file order.
    ///
    /// Lines inside the section that do not look like a ranking entry are
    /// skipped. Fails only when the section itself cannot be found.
    pub fn parse(&self, content: &str) -> Result<Vec<ClassifierResult>, ReportError> {
        let section = self
            .section
            .captures(content)
            .and_then(|caps| caps.get(1))
            .ok_or(ReportError::SectionNotFound)?;

        Ok(section
            .as_str()
            .trim()
            .lines()
            .filter_map(|line| self.parse_line(line))
            .collect())
    }

    fn parse_line(&self, line: &str) -> Option<ClassifierResult> {
        let caps = self.entry.captures(line)?;
        let rank = caps[1].parse().ok()?;
        let name = caps[2].trim();
        let accuracy = caps[3].parse().ok()?;
        Some(ClassifierResult::new(rank, name, accuracy))
    }
}
