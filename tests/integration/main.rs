//! Integration tests for git-bonsai
//!
//! These build real Git repositories in temporary directories and run the
//! whole pipeline over them: repository reading, graph building, layout and
//! rendering.

mod layout_properties;
mod repository;

/// Test utilities for integration tests
pub mod test_utils {
    use std::path::{Path, PathBuf};
    use std::process::Command;
    use tempfile::TempDir;

    pub fn git(repo_path: &Path, args: &[&str]) -> anyhow::Result<()> {
        let output = Command::new("git").args(args).current_dir(repo_path).output()?;
        if !output.status.success() {
            anyhow::bail!(
                "git {:?} failed: {}",
                args,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Ok(())
    }

    /// Create an empty repository whose unborn branch is `main`
    pub fn create_test_repo() -> anyhow::Result<(TempDir, PathBuf)> {
        let temp_dir = TempDir::new()?;
        let repo_path = temp_dir.path().to_path_buf();

        git(&repo_path, &["init"])?;
        git(&repo_path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
        git(&repo_path, &["config", "user.name", "Test User"])?;
        git(&repo_path, &["config", "user.email", "test@example.com"])?;
        git(&repo_path, &["config", "commit.gpgsign", "false"])?;

        Ok((temp_dir, repo_path))
    }

    /// Create a commit touching a file named after the message
    pub fn create_test_commit(repo_path: &Path, message: &str) -> anyhow::Result<()> {
        let file_name = format!("{}.txt", message.replace(' ', "_"));
        std::fs::write(repo_path.join(&file_name), format!("Test content for {}", message))?;

        git(repo_path, &["add", &file_name])?;
        git(repo_path, &["commit", "-m", message])?;
        Ok(())
    }

    /// main: initial - main update - merge; feature/test: two commits merged back
    pub fn create_complex_test_repo() -> anyhow::Result<(TempDir, PathBuf)> {
        let (temp_dir, repo_path) = create_test_repo()?;

        create_test_commit(&repo_path, "Initial commit")?;

        git(&repo_path, &["checkout", "-b", "feature/test"])?;
        create_test_commit(&repo_path, "Add feature functionality")?;
        create_test_commit(&repo_path, "Fix feature bug")?;

        git(&repo_path, &["checkout", "main"])?;
        create_test_commit(&repo_path, "Main branch update")?;

        git(
            &repo_path,
            &["merge", "feature/test", "--no-ff", "-m", "Merge feature branch"],
        )?;

        Ok((temp_dir, repo_path))
    }
}
