//! Name matching between a target filter and a world object.
//!
//! This predicate is the single source of truth for "is this the
//! block/item/entity the caller meant". Every find, dig, drop, and craft
//! operation routes its name comparisons through [`NameFilter`] so matching
//! semantics stay consistent across the whole surface.

use crate::item::Item;
use crate::world::Candidate;

/// A set of acceptable names plus a partial/exact match mode.
///
/// Matching is case-insensitive on both sides. In exact mode a candidate
/// field must equal a filter name after lowercasing; in partial mode it must
/// contain the filter name as a substring (`"log"` matches `"spruce_log"`).
/// An empty name set accepts any candidate.
#[derive(Clone, Debug, Default)]
pub struct NameFilter {
    /// Lowercased at construction.
    names: Vec<String>,
    partial: bool,
}

impl NameFilter {
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>, partial: bool) -> Self {
        Self {
            names: names
                .into_iter()
                .map(|n| n.into().to_lowercase())
                .collect(),
            partial,
        }
    }

    /// Accept any candidate.
    pub fn any() -> Self {
        Self::default()
    }

    /// Match a single name exactly.
    pub fn exact(name: impl Into<String>) -> Self {
        Self::new([name], false)
    }

    /// Match a single name as a substring.
    pub fn partial(name: impl Into<String>) -> Self {
        Self::new([name], true)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }

    /// Core predicate over the three name fields a world object may carry.
    ///
    /// `username`, when present, is checked first and independently (player
    /// entities). Returns true if *any* populated field satisfies the match;
    /// false when no field is populated or none match.
    pub fn matches_fields(
        &self,
        name: Option<&str>,
        display_name: Option<&str>,
        username: Option<&str>,
    ) -> bool {
        if self.names.is_empty() {
            return true;
        }
        for target in &self.names {
            if let Some(username) = username {
                if self.field_matches(target, username) {
                    return true;
                }
            }
            if let Some(name) = name {
                if self.field_matches(target, name) {
                    return true;
                }
            }
            if let Some(display_name) = display_name {
                if self.field_matches(target, display_name) {
                    return true;
                }
            }
        }
        false
    }

    /// Match any world-object variant through its [`Candidate`] fields.
    pub fn matches<T: Candidate + ?Sized>(&self, candidate: &T) -> bool {
        self.matches_fields(
            candidate.name(),
            candidate.display_name(),
            candidate.username(),
        )
    }

    /// Match an inventory stack.
    pub fn matches_item(&self, item: &Item) -> bool {
        self.matches_fields(Some(&item.name), item.display_name.as_deref(), None)
    }

    fn field_matches(&self, target_lower: &str, field: &str) -> bool {
        let field = field.to_lowercase();
        if self.partial {
            field.contains(target_lower)
        } else {
            field == target_lower
        }
    }
}
