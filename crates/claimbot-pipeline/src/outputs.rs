//! Run outputs for the calling workflow
//!
//! Outputs are `name=value` lines. In GitHub Actions they are appended to the
//! file named by `GITHUB_OUTPUT`; elsewhere they go to stdout.

use claimbot_core::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::run::RunResult;

/// Where run outputs are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Append to a workflow output file
    File(PathBuf),
    Stdout,
}

impl OutputTarget {
    /// File target when a path is given, stdout otherwise
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) if !path.as_os_str().is_empty() => OutputTarget::File(path),
            _ => OutputTarget::Stdout,
        }
    }
}

/// The three values a run reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutputs {
    pub matched_count: usize,
    pub claimed_count: usize,
    /// JSON array of claimed ids, `[]` when none
    pub claimed_ids: String,
}

impl RunOutputs {
    pub fn from_result(result: &RunResult) -> Result<Self> {
        Ok(Self {
            matched_count: result.matched_count,
            claimed_count: result.claimed_count(),
            claimed_ids: serde_json::to_string(&result.claimed_ids)?,
        })
    }

    /// Render as `name=value` lines
    pub fn render(&self) -> String {
        format!(
            "matched_count={}\nclaimed_count={}\nclaimed_ids={}\n",
            self.matched_count, self.claimed_count, self.claimed_ids
        )
    }

    pub fn write(&self, target: &OutputTarget) -> Result<()> {
        match target {
            OutputTarget::File(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(self.render().as_bytes())?;
            }
            OutputTarget::Stdout => {
                print!("{}", self.render());
            }
        }
        Ok(())
    }
}
