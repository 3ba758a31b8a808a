use git_bonsai::git::{BonsaiError, GitRepository};
use git_bonsai::layout::BonsaiLayout;
use git_bonsai::models::{Commit, NodeRole};
use git_bonsai::state::{BonsaiConfig, GitSettings};
use pretty_assertions::assert_eq;

use crate::test_utils::*;

fn by_message<'a>(commits: impl IntoIterator<Item = &'a Commit>, message: &str) -> &'a Commit {
    commits
        .into_iter()
        .find(|c| c.message == message)
        .unwrap_or_else(|| panic!("no commit '{message}'"))
}

#[test]
fn test_repository_discovery_from_subdirectory() -> anyhow::Result<()> {
    let (_temp_dir, repo_path) = create_test_repo()?;
    create_test_commit(&repo_path, "Test commit")?;
    let nested = repo_path.join("nested").join("dir");
    std::fs::create_dir_all(&nested)?;

    let repo = GitRepository::discover(&nested)?;
    assert!(repo.path().exists());
    assert_eq!(repo.info().head_branch.as_deref(), Some("main"));

    Ok(())
}

#[test]
fn test_load_graph_links_history() -> anyhow::Result<()> {
    let (_temp_dir, repo_path) = create_complex_test_repo()?;
    let repo = GitRepository::discover(&repo_path)?;

    let graph = repo.load_graph(&GitSettings::default())?;
    let commits = graph.commits.values();

    assert_eq!(graph.commits.len(), 5);
    let merge = by_message(commits.clone(), "Merge feature branch");
    let initial = by_message(commits.clone(), "Initial commit");
    let fix = by_message(commits.clone(), "Fix feature bug");

    assert!(merge.is_merge);
    assert_eq!(merge.parents.len(), 2);
    assert!(initial.parents.is_empty());
    assert_eq!(initial.depth, 0);
    assert_eq!(initial.children.len(), 2);
    assert_eq!(fix.children, vec![merge.id.clone()]);

    assert_eq!(graph.branches.len(), 2);
    assert!(graph.branches["main"].is_main);
    assert!(!graph.branches["feature/test"].is_main);
    assert_eq!(graph.branches["main"].head, merge.id);
    assert_eq!(graph.main_branch().map(|b| b.name.as_str()), Some("main"));

    Ok(())
}

#[test]
fn test_branch_names_are_estimated() -> anyhow::Result<()> {
    let (_temp_dir, repo_path) = create_complex_test_repo()?;
    let graph = GitRepository::discover(&repo_path)?.load_graph(&GitSettings::default())?;
    let commits = graph.commits.values();

    let branch_of = |message: &str| by_message(commits.clone(), message).branch_name.clone();

    assert_eq!(branch_of("Initial commit").as_deref(), Some("main"));
    assert_eq!(branch_of("Main branch update").as_deref(), Some("main"));
    assert_eq!(branch_of("Merge feature branch").as_deref(), Some("main"));
    assert_eq!(branch_of("Add feature functionality").as_deref(), Some("feature/test"));
    assert_eq!(branch_of("Fix feature bug").as_deref(), Some("feature/test"));

    Ok(())
}

#[test]
fn test_layout_of_real_history() -> anyhow::Result<()> {
    let (_temp_dir, repo_path) = create_complex_test_repo()?;
    let config = BonsaiConfig::default();
    let graph = GitRepository::discover(&repo_path)?.load_graph(&config.git)?;

    let nodes = BonsaiLayout::new(config).generate_layout(&graph.commits, &graph.branches)?;
    let role_of = |message: &str| {
        nodes
            .iter()
            .find(|n| n.commit.message == message)
            .map(|n| n.role)
            .unwrap()
    };

    assert_eq!(nodes.len(), 5);
    assert_eq!(role_of("Initial commit"), NodeRole::Root);
    assert_eq!(role_of("Merge feature branch"), NodeRole::Merge);
    assert_eq!(role_of("Fix feature bug"), NodeRole::Leaf);
    assert_eq!(role_of("Main branch update"), NodeRole::Leaf);
    assert_eq!(role_of("Add feature functionality"), NodeRole::Trunk);

    Ok(())
}

#[test]
fn test_commit_window_is_bounded() -> anyhow::Result<()> {
    let (_temp_dir, repo_path) = create_complex_test_repo()?;
    let repo = GitRepository::discover(&repo_path)?;
    let settings = GitSettings {
        max_commits: 2,
        ..GitSettings::default()
    };

    let graph = repo.load_graph(&settings)?;
    assert_eq!(graph.commits.len(), 2);

    // the true root is outside the window; the oldest loaded commit stands in
    let nodes = BonsaiLayout::default().generate_layout(&graph.commits, &graph.branches)?;
    assert_eq!(nodes.iter().filter(|n| n.role == NodeRole::Root).count(), 1);

    Ok(())
}

#[test]
fn test_empty_repository_has_no_history() -> anyhow::Result<()> {
    let (_temp_dir, repo_path) = create_test_repo()?;
    let repo = GitRepository::open(&repo_path)?;

    let err = repo.load_graph(&GitSettings::default()).unwrap_err();
    assert!(matches!(err, BonsaiError::EmptyHistory { .. }));

    Ok(())
}

#[test]
fn test_zero_commit_window_is_rejected() -> anyhow::Result<()> {
    let (_temp_dir, repo_path) = create_complex_test_repo()?;
    let repo = GitRepository::open(&repo_path)?;
    let settings = GitSettings {
        max_commits: 0,
        ..GitSettings::default()
    };

    let err = repo.load_graph(&settings).unwrap_err();
    assert!(matches!(err, BonsaiError::Configuration { .. }));

    Ok(())
}

#[test]
fn test_missing_repository_is_reported() -> anyhow::Result<()> {
    let temp_dir = tempfile::TempDir::new()?;

    let err = GitRepository::open(temp_dir.path()).unwrap_err();
    assert!(matches!(err, BonsaiError::Repository { .. }));
    assert!(err.to_string().contains("no Git repository"));

    Ok(())
}
