//! Per-path level thresholds.
//!
//! A [`FilterTree`] maps logger paths to levels. The effective level of a
//! logger is found by walking the tree along the logger's path: every matching
//! node overrides the level found so far, and the walk stops at the first path
//! part without a matching child. When not even the first part matches, the
//! dispatcher's default level applies.
//!
//! ```rust
//! use enxlog::{FilterTree, LogLevel};
//!
//! let mut tree = FilterTree::new();
//! tree.insert("one", LogLevel::Info)?;
//! tree.insert("one.two.three", LogLevel::Error)?;
//!
//! assert_eq!(tree.resolve(&["one"], LogLevel::Warn), LogLevel::Info);
//! // Intermediate nodes created on the way carry `None`.
//! assert_eq!(tree.resolve(&["one", "two"], LogLevel::Warn), LogLevel::None);
//! assert_eq!(tree.resolve(&["one", "two", "three", "four"], LogLevel::Warn), LogLevel::Error);
//! assert_eq!(tree.resolve(&["other"], LogLevel::Warn), LogLevel::Warn);
//! # Ok::<(), enxlog::LogError>(())
//! ```

use crate::error::LogError;
use crate::level::LogLevel;
use std::fmt;

/// One node of a [`FilterTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    name: String,
    level: LogLevel,
    children: Vec<FilterEntry>,
}

impl FilterEntry {
    fn new(name: &str, level: LogLevel) -> Self {
        Self { name: name.to_owned(), level, children: Vec::new() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// Tree of [`FilterEntry`] nodes keyed by logger path parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterTree {
    entries: Vec<FilterEntry>,
}

impl FilterTree {
    /// An empty tree: every logger resolves to the default level.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Builder form of [`FilterTree::insert`] for static setups.
    ///
    /// # Panics
    /// If `path` contains an empty part, like [`FilterTree::insert`] would reject.
    #[must_use]
    #[track_caller]
    pub fn with(mut self, path: &str, level: LogLevel) -> Self {
        if let Err(e) = self.insert(path, level) {
            panic!("{e}");
        }
        self
    }

    /// Sets the level of the node at the dotted `path`.
    ///
    /// Missing intermediate nodes are created with [`LogLevel::None`]. An
    /// existing node keeps its children and only has its level replaced.
    ///
    /// # Errors
    /// Returns [`LogError::InvalidFilterPath`] if `path` is empty or has an
    /// empty part.
    pub fn insert(&mut self, path: &str, level: LogLevel) -> Result<(), LogError> {
        if path.split('.').any(str::is_empty) {
            return Err(LogError::InvalidFilterPath { path: path.to_owned().into(), context: None });
        }

        let mut parts = path.split('.').peekable();
        let mut siblings = &mut self.entries;

        while let Some(part) = parts.next() {
            let last = parts.peek().is_none();
            let index = match siblings.iter().position(|e| e.name == part) {
                Some(index) => index,
                None => {
                    siblings.push(FilterEntry::new(part, LogLevel::None));
                    siblings.len() - 1
                },
            };

            let entry = &mut siblings[index];
            if last {
                entry.level = level;
                return Ok(());
            }
            siblings = &mut entry.children;
        }

        Ok(())
    }

    /// Effective level for a logger `path`, falling back to `default`.
    #[must_use]
    pub fn resolve(&self, path: &[&str], default: LogLevel) -> LogLevel {
        let mut level = default;
        let mut siblings = self.entries.as_slice();

        for part in path {
            let Some(entry) = siblings.iter().find(|e| e.name == *part) else {
                break;
            };
            level = entry.level;
            siblings = &entry.children;
        }

        level
    }

    /// Looks up the node at the dotted `path`.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&FilterEntry> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut entry = self.entries.iter().find(|e| e.name == first)?;
        for part in parts {
            entry = entry.child(part)?;
        }
        Some(entry)
    }

    /// Top-level nodes.
    #[must_use]
    pub fn entries(&self) -> &[FilterEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for FilterTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_level(
            f: &mut fmt::Formatter<'_>,
            entries: &[FilterEntry],
            depth: usize,
        ) -> fmt::Result {
            for entry in entries {
                writeln!(f, "{:indent$}{}: {}", "", entry.name, entry.level, indent = depth * 2)?;
                write_level(f, &entry.children, depth + 1)?;
            }
            Ok(())
        }

        write_level(f, &self.entries, 0)
    }
}
