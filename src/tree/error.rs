//! Error types for tree materialization

use ariadne::{Config, Report, ReportKind, Source};
use thiserror::Error;

use crate::error::Span;

/// Errors that can occur while building a component tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A component sits deeper than the configured maximum
    #[error("component at {path} is nested deeper than the maximum of {limit} levels")]
    DepthExceeded { path: String, limit: usize },
}

impl TreeError {
    pub fn depth_exceeded(path: impl Into<String>, limit: usize) -> Self {
        Self::DepthExceeded {
            path: path.into(),
            limit,
        }
    }

    /// JSON path of the component that tripped the guard
    pub fn path(&self) -> &str {
        match self {
            Self::DepthExceeded { path, .. } => path,
        }
    }

    /// Format the error as an ariadne report
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let Self::DepthExceeded { path, limit } = self;
        let report = Report::<(&str, Span)>::build(ReportKind::Error, filename, 0)
            .with_config(Config::default().with_color(false))
            .with_message(format!("component tree deeper than {} levels", limit))
            .with_note(format!("at {}", path))
            .finish();
        let _ = report.write((filename, Source::from(source)), &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
