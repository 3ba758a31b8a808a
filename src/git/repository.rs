use crate::git::graph::{build_commit_graph, estimate_branches};
use crate::git::BonsaiError;
use crate::models::{Branch, BranchMap, Commit, CommitGraph, RepositoryInfo};
use crate::state::GitSettings;
use git2::{ErrorCode, Repository, RepositoryOpenFlags};
use std::path::Path;
use tracing::{debug, info, warn};

pub struct GitRepository {
    repo: Repository,
    info: RepositoryInfo,
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("info", &self.info)
            .finish()
    }
}

impl GitRepository {
    /// Open the repository at exactly `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BonsaiError> {
        Self::open_with(path.as_ref(), RepositoryOpenFlags::NO_SEARCH)
    }

    /// Open the repository containing `path`, searching parent directories.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self, BonsaiError> {
        Self::open_with(path.as_ref(), RepositoryOpenFlags::empty())
    }

    fn open_with(path: &Path, flags: RepositoryOpenFlags) -> Result<Self, BonsaiError> {
        let repo = Repository::open_ext(path, flags, &[] as &[&std::ffi::OsStr]).map_err(|e| {
            match e.code() {
                ErrorCode::NotFound => {
                    BonsaiError::repository(format!("no Git repository at {}", path.display()))
                }
                _ => BonsaiError::from(e),
            }
        })?;

        let info = RepositoryInfo::from_repo(&repo);
        Ok(GitRepository { repo, info })
    }

    pub fn info(&self) -> &RepositoryInfo {
        &self.info
    }

    pub fn path(&self) -> &Path {
        &self.info.path
    }

    /// Up to `max_count` commits reachable from HEAD, newest first.
    pub fn get_commits(&self, max_count: usize) -> Result<Vec<Commit>, BonsaiError> {
        if self.repo.head().is_err() {
            return Err(BonsaiError::empty_history("HEAD"));
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(git2::Sort::TIME)?;
        revwalk.push_head()?;

        let mut commits = Vec::new();
        for oid in revwalk.take(max_count) {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(Commit::from_git2(&commit));
        }

        if commits.is_empty() {
            return Err(BonsaiError::empty_history("HEAD"));
        }

        Ok(commits)
    }

    /// Local branches and the commits they point at.
    pub fn get_branches(&self, main_branch_names: &[String]) -> Result<BranchMap, BonsaiError> {
        let mut branches = BranchMap::new();
        let branch_iter = self.repo.branches(Some(git2::BranchType::Local))?;

        for branch in branch_iter {
            let (branch, _) = branch?;
            let Some(name) = branch.name()? else {
                continue;
            };

            match branch.get().peel_to_commit() {
                Ok(head) => {
                    let is_main = main_branch_names.iter().any(|n| n == name);
                    branches.insert(
                        name.to_string(),
                        Branch::new(name, head.id().to_string(), is_main),
                    );
                }
                Err(e) => warn!("Failed to resolve branch {}: {}", name, e),
            }
        }

        Ok(branches)
    }

    /// Read the bounded history and branches and derive the full commit graph.
    pub fn load_graph(&self, settings: &GitSettings) -> Result<CommitGraph, BonsaiError> {
        if settings.max_commits == 0 {
            return Err(BonsaiError::configuration("max_commits", "must be at least 1"));
        }

        debug!("Loading at most {} commits from {:?}", settings.max_commits, self.path());
        let entries = self.get_commits(settings.max_commits)?;
        info!("Loaded {} commits", entries.len());

        let branches = self.get_branches(&settings.main_branch_names)?;
        info!(
            "Found {} branches: {:?}",
            branches.len(),
            branches.keys().collect::<Vec<_>>()
        );

        let mut commits = build_commit_graph(entries);
        estimate_branches(&mut commits, &branches);

        Ok(CommitGraph { commits, branches })
    }
}
