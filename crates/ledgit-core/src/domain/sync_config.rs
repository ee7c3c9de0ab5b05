//! Remote repository configuration
//!
//! A [`SyncConfig`] identifies the GitHub repository that backs the local
//! expense store: a personal access token, an `owner/name` slug, and a
//! branch. Instances can only be built through [`SyncConfig::new`], which
//! validates every field; a malformed config is rejected at the edge and
//! never reaches the settings store.
//!
//! Absence of a configuration is always `Option::<SyncConfig>::None`,
//! never a struct with empty fields.

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Branch used to pre-fill the settings form when nothing is configured
pub const DEFAULT_BRANCH: &str = "main";

/// Identity of the remote repository used as the durable backing store
///
/// Captured once at the start of a sync run; the run never observes a
/// mid-flight settings change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Personal access token (secret, non-empty)
    token: String,
    /// Repository slug in `owner/name` form
    repo: String,
    /// Branch to sync against
    branch: String,
}

impl SyncConfig {
    /// Creates a validated `SyncConfig`
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidToken`] if the token is empty or blank
    /// - [`DomainError::InvalidRepo`] if the repo is not `owner/name`
    /// - [`DomainError::InvalidBranch`] if the branch is empty or contains `//`
    pub fn new(
        token: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let token = token.into();
        let repo = repo.into();
        let branch = branch.into();

        if token.trim().is_empty() {
            return Err(DomainError::InvalidToken);
        }

        let valid_repo = match repo.split_once('/') {
            Some((owner, name)) => {
                !owner.is_empty() && !name.is_empty() && !name.contains('/')
            }
            None => false,
        };
        if !valid_repo {
            return Err(DomainError::InvalidRepo(repo));
        }

        if branch.is_empty() || branch.contains("//") {
            return Err(DomainError::InvalidBranch(branch));
        }

        Ok(Self { token, repo, branch })
    }

    /// Returns the access token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the repository slug (`owner/name`)
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the repository owner
    pub fn repo_owner(&self) -> &str {
        self.repo.split_once('/').map(|(owner, _)| owner).unwrap_or("")
    }

    /// Returns the repository name
    pub fn repo_name(&self) -> &str {
        self.repo.split_once('/').map(|(_, name)| name).unwrap_or("")
    }

    /// Returns the branch
    pub fn branch(&self) -> &str {
        &self.branch
    }
}

/// Editable settings-form state derived from the stored configuration
///
/// Pure derivation: evaluating it repeatedly on the same input yields an
/// identical result. Missing fields fall back to the literal defaults
/// (`""`, `""`, [`DEFAULT_BRANCH`]) and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfigForm {
    /// Token field, empty when unconfigured
    pub token: String,
    /// Repository field, empty when unconfigured
    pub repo: String,
    /// Branch field, [`DEFAULT_BRANCH`] when unconfigured
    pub branch: String,
    /// Whether a configuration was loaded
    pub is_configured: bool,
}

impl SyncConfigForm {
    /// Derives the initial form state from an optionally-loaded config
    pub fn prefill(config: Option<&SyncConfig>) -> Self {
        match config {
            Some(cfg) => Self {
                token: cfg.token.clone(),
                repo: cfg.repo.clone(),
                branch: cfg.branch.clone(),
                is_configured: true,
            },
            None => Self {
                token: String::new(),
                repo: String::new(),
                branch: DEFAULT_BRANCH.to_string(),
                is_configured: false,
            },
        }
    }
}
