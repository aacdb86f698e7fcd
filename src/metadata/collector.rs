use super::command::run_command;
use super::BuildMetadata;
use crate::config::{CommandConfig, OutputConfig};
use crate::git::{ContributorAggregator, GitAnalyzer};
use anyhow::Result;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, info};

/// Gathers version, host, toolchain and contributor data for one build.
pub struct MetadataCollector {
    aggregator: ContributorAggregator,
    commands: CommandConfig,
    output: OutputConfig,
}

impl MetadataCollector {
    pub fn new(commands: CommandConfig, output: OutputConfig) -> Result<Self> {
        Ok(Self {
            aggregator: ContributorAggregator::new()?,
            commands,
            output,
        })
    }

    pub async fn collect(&self, git: &GitAnalyzer) -> Result<BuildMetadata> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Collecting build metadata...");

        let version = git.describe_version()?;
        let dir = git.path().to_path_buf();
        let toolchain = self
            .commands
            .toolchain_command(&self.output.output_format());

        let result = tokio::try_join!(
            run_command(&self.commands.log, &dir),
            run_command(&self.commands.hostname, &dir),
            run_command(&toolchain, &dir),
        );
        pb.finish_and_clear();
        let (history, build_host, toolchain_version) = result?;

        debug!("Read {} bytes of history", history.len());
        let contributors = self.aggregator.aggregate(&history);

        info!(
            "Collected metadata: version {}, {} contributors, {} lines",
            version,
            contributors.len(),
            contributors.total_lines()
        );

        Ok(BuildMetadata {
            app_name: self.output.app_name.clone(),
            package: self.output.package.clone(),
            version,
            build_host,
            toolchain_version,
            timestamp: Local::now(),
            contributors,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::git::Contributor;
    use git2::{Repository, Signature};
    use std::path::Path;
    use tempfile::TempDir;

    fn repo_with_commit() -> TempDir {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("README.md"), "hello\n").unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let signature = Signature::now("Test", "test@example.com").unwrap();
        let oid = repo
            .commit(Some("HEAD"), &signature, &signature, "Initial", &tree, &[])
            .unwrap();
        let target = repo.find_object(oid, None).unwrap();
        repo.tag_lightweight("v2.0.0", &target, false).unwrap();

        dir
    }

    #[tokio::test]
    async fn test_collects_metadata_from_commands() {
        let repo_dir = repo_with_commit();
        let scratch = TempDir::new().unwrap();
        let log_path = scratch.path().join("history.log");
        std::fs::write(
            &log_path,
            "Author: A <a@x>\n 2 insertions(+)\nAuthor: B <b@x>\n 5 insertions(+)\nAuthor: A <a@x>\n 1 insertion(+)\n",
        )
        .unwrap();

        let commands = CommandConfig {
            log: format!("cat {}", log_path.display()),
            hostname: "echo build-host".to_string(),
            toolchain: Some("echo rustc 1.80.0".to_string()),
        };
        let output = OutputConfig {
            app_name: "demo".to_string(),
            ..OutputConfig::default()
        };

        let git = GitAnalyzer::new(repo_dir.path()).unwrap();
        let collector = MetadataCollector::new(commands, output).unwrap();
        let metadata = collector.collect(&git).await.unwrap();

        assert_eq!(metadata.app_name, "demo");
        assert_eq!(metadata.package, "main");
        assert_eq!(metadata.version, "v2.0.0");
        assert_eq!(metadata.build_host, "build-host");
        assert_eq!(metadata.toolchain_version, "rustc 1.80.0");
        assert_eq!(
            metadata.contributors.as_slice(),
            &[Contributor::new("B <b@x>", 5), Contributor::new("A <a@x>", 3)]
        );
    }

    #[tokio::test]
    async fn test_failing_command_aborts_collection() {
        let repo_dir = repo_with_commit();
        let commands = CommandConfig {
            log: "false".to_string(),
            hostname: "echo host".to_string(),
            toolchain: Some("echo toolchain".to_string()),
        };

        let git = GitAnalyzer::new(repo_dir.path()).unwrap();
        let collector = MetadataCollector::new(commands, OutputConfig::default()).unwrap();
        assert!(collector.collect(&git).await.is_err());
    }
}
