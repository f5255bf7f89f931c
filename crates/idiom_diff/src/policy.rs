//! Which leaves are left out of a comparison.
//!
//! Converted documents carry freshly minted identifiers and timestamps, so
//! those fields can never match a stored master. An [`ExclusionPolicy`]
//! names them, plus the subtrees (such as marking references) that are made
//! of identifiers throughout and are skipped as a whole.

use std::collections::BTreeSet;

use crate::path::Path;

/// Field names whose values vary between conversion runs.
pub const STIX_IGNORED_FIELDS: &[&str] = &[
    "id",
    "idref",
    "created_by_ref",
    "object_refs",
    "marking_ref",
    "object_marking_refs",
    "target_ref",
    "source_ref",
    "valid_until",
    "sighting_of_ref",
    "observed_data_refs",
    "where_sighted_refs",
    "created",
    "modified",
    "first_seen",
    "valid_from",
    "last_seen",
    "first_observed",
    "last_observed",
    "published",
    "external_references",
];

/// Keys whose whole subtree is skipped.
pub const STIX_IGNORED_ANCESTORS: &[&str] = &["object_marking_refs", "granular_markings"];

/// An immutable set of exclusion rules, applied the same way to both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionPolicy {
    ignored_fields: BTreeSet<String>,
    ignored_ancestors: BTreeSet<String>,
    list_elements: bool,
}

impl ExclusionPolicy {
    /// A policy that excludes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a policy from field names and ancestor names.
    pub fn new<F, A>(ignored_fields: F, ignored_ancestors: A) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            ignored_fields: ignored_fields.into_iter().map(Into::into).collect(),
            ignored_ancestors: ignored_ancestors.into_iter().map(Into::into).collect(),
            list_elements: false,
        }
    }

    /// The rules used for STIX idiom conversions.
    #[must_use]
    pub fn stix_defaults() -> Self {
        Self::new(
            STIX_IGNORED_FIELDS.iter().copied(),
            STIX_IGNORED_ANCESTORS.iter().copied(),
        )
    }

    /// Also ignore leaves whose field name is `name`.
    #[must_use]
    pub fn ignore_field(mut self, name: impl Into<String>) -> Self {
        self.ignored_fields.insert(name.into());
        self
    }

    /// Also skip every subtree under a key named `name`.
    #[must_use]
    pub fn ignore_ancestor(mut self, name: impl Into<String>) -> Self {
        self.ignored_ancestors.insert(name.into());
        self
    }

    /// Also ignore the elements of a list held by an ignored field, so
    /// `object_refs[2]` is governed by `object_refs`. Off by default: a path
    /// ending in an index has no field name.
    #[must_use]
    pub fn with_list_elements(mut self, enabled: bool) -> Self {
        self.list_elements = enabled;
        self
    }

    /// True if list elements follow their field's rule.
    #[must_use]
    pub fn covers_list_elements(&self) -> bool {
        self.list_elements
    }

    /// Ignored field names, sorted.
    pub fn ignored_fields(&self) -> impl Iterator<Item = &str> {
        self.ignored_fields.iter().map(String::as_str)
    }

    /// Ignored ancestor names, sorted.
    pub fn ignored_ancestors(&self) -> impl Iterator<Item = &str> {
        self.ignored_ancestors.iter().map(String::as_str)
    }

    /// True if the leaf at `path` must not be compared.
    #[must_use]
    pub fn excluded(&self, path: &Path) -> bool {
        let name = if self.list_elements {
            path.enclosing_key()
        } else {
            path.field_name()
        };
        if name.is_some_and(|name| self.ignored_fields.contains(name)) {
            return true;
        }
        if self.ignored_ancestors.is_empty() {
            return false;
        }
        path.steps()
            .iter()
            .filter_map(|step| step.as_key())
            .any(|key| self.ignored_ancestors.contains(key))
    }
}
