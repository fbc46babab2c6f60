use std::path::PathBuf;

use thiserror::Error;

/// Ways locating or reading a rankings report can fail.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("'{}' directory not found.", .0.display())]
    MissingDirectory(PathBuf),

    #[error("No results files found in '{}' directory.", .0.display())]
    NoMatchingFiles(PathBuf),

    #[error("Could not read file {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not find summary section in results file.")]
    SectionNotFound,
}

impl ReportError {
    /// Follow-up advice printed under the error, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ReportError::MissingDirectory(_) => Some(
                "Please run the experiments first using run_experiments.sh or run_experiments.bat",
            ),
            ReportError::NoMatchingFiles(_) => Some("Please run the experiments first."),
            ReportError::FileUnreadable { .. } | ReportError::SectionNotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_message() {
        let err = ReportError::MissingDirectory(PathBuf::from("results"));
        assert_eq!(err.to_string(), "'results' directory not found.");
        assert!(err.hint().unwrap().contains("run_experiments.sh"));
    }

    #[test]
    fn test_section_not_found_has_no_hint() {
        assert!(ReportError::SectionNotFound.hint().is_none());
    }
}
