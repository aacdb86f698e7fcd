use anyhow::{Context, Result};
use git2::{DescribeFormatOptions, DescribeOptions, Repository};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DIRTY_SUFFIX: &str = "-dirty";

pub struct GitAnalyzer {
    repo: Repository,
    path: PathBuf,
}

impl GitAnalyzer {
    pub fn new(path: &Path) -> Result<Self> {
        let repo = Repository::open(path).with_context(|| {
            format!(
                "Failed to open repository at {}\n Is it really a git repo?",
                path.display()
            )
        })?;

        info!("Opened Git repository at {}", path.display());

        Ok(Self {
            repo,
            path: path.to_path_buf(),
        })
    }

    /// Directory history commands are run from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Describe HEAD like `git describe --always --tags --dirty`.
    pub fn describe_version(&self) -> Result<String> {
        let mut options = DescribeOptions::new();
        options.describe_tags().show_commit_oid_as_fallback(true);

        let describe = self
            .repo
            .describe(&options)
            .with_context(|| format!("Failed to describe HEAD in {}", self.path.display()))?;

        let mut format = DescribeFormatOptions::new();
        format.dirty_suffix(DIRTY_SUFFIX);

        let version = describe
            .format(Some(&format))
            .context("Failed to format repository description")?;

        debug!("Described repository version as {}", version);
        Ok(version)
    }
}
