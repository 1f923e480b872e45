//! Dependency source abstraction and registry
//!
//! This module provides:
//! - The `DependencyKind` trait every URL dependency source implements
//! - The shared `ResolvedDependency` envelope all kinds populate
//! - `SourceRegistry`, which dispatches a raw URL to the kind that claims it

mod client;
mod github;

pub use client::HttpClient;
pub use github::GithubCommit;

use crate::error::SourceError;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// Trait for pluggable dependency sources
///
/// Adding a new source means implementing this trait and registering it in
/// [`SourceRegistry::new`]; nothing else in the registry changes.
#[async_trait]
pub trait DependencyKind: Send + Sync {
    /// Short identifier used in diagnostics
    fn name(&self) -> &'static str;

    /// Whether the raw URL matches this kind's pattern
    fn recognize(&self, url: &str) -> bool;

    /// Resolve a recognized URL into a dependency record
    ///
    /// Performs the upstream lookup for the latest revision, so this blocks
    /// on the network. Callers must only pass URLs this kind recognizes; a
    /// non-matching URL is a contract violation reported as
    /// [`SourceError::PatternMismatch`].
    async fn resolve(&self, url: &str) -> Result<ResolvedDependency, SourceError>;
}

/// A dependency resolved against its upstream
///
/// Shared result envelope populated by every dependency kind, so registry
/// output is uniform regardless of which kind matched. Immutable once built;
/// `pinned_to` and `latest` are non-empty revision identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDependency {
    /// User-facing identity, `owner/repo` for forge-hosted sources
    pub name: String,
    /// Canonical URL prefix for pinning, without revision
    #[serde(skip)]
    pin_base: String,
    /// Revision currently targeted by the declaration
    pub pinned_to: String,
    /// Most recent revision found upstream at resolution time
    pub latest: String,
}

impl ResolvedDependency {
    /// Create a resolved dependency record
    pub fn new(
        name: impl Into<String>,
        pin_base: impl Into<String>,
        pinned_to: impl Into<String>,
        latest: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pin_base: pin_base.into(),
            pinned_to: pinned_to.into(),
            latest: latest.into(),
        }
    }

    /// Whether the pinned revision is the latest one
    ///
    /// Plain string equality is the sole criterion; revisions carry no
    /// ordering.
    pub fn is_up_to_date(&self) -> bool {
        self.pinned_to == self.latest
    }

    /// Canonical URL pinning this dependency to the given revision
    pub fn url_for(&self, revision: &str) -> String {
        format!("{}#{}", self.pin_base, revision)
    }
}

impl fmt::Display for ResolvedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Ordered registry of dependency kinds
///
/// Kinds are tried in registration order, fixed at construction. If two kinds
/// ever claim the same URL the earlier registration wins; at most one kind is
/// invoked per URL.
pub struct SourceRegistry {
    kinds: Vec<Box<dyn DependencyKind>>,
}

impl SourceRegistry {
    /// Create a registry with all known dependency kinds
    pub fn new(client: HttpClient) -> Self {
        Self {
            kinds: vec![Box::new(GithubCommit::new(client))],
        }
    }

    /// Whether any registered kind recognizes the URL
    pub fn recognizes(&self, url: &str) -> bool {
        self.kinds.iter().any(|kind| kind.recognize(url))
    }

    /// Dispatch a raw URL to the kind that recognizes it and resolve it
    ///
    /// Fails with [`SourceError::UnrecognizedDependency`] carrying the exact
    /// input string when no kind matches; no partial parsing is attempted.
    pub async fn resolve(&self, url: &str) -> Result<ResolvedDependency, SourceError> {
        for kind in &self.kinds {
            if kind.recognize(url) {
                return kind.resolve(url).await;
            }
        }

        Err(SourceError::unrecognized(url))
    }
}
