//! Generic candidate ranking under pluggable scoring and tie-breaking.
//!
//! One routine serves all three world-object variants; only the caller's
//! predicate and default sort-value function differ. The caller supplies a
//! *value function* mapping an object's name to its intrinsic worth (score
//! per kill, score per block) and a *sort function* blending distance, value,
//! and variant-specific cost into a single ranking key. Lower keys are
//! better. A negative value is a hard exclusion signal: the object is
//! dropped as if it had not matched the filter at all.

pub mod sort;

use crate::matcher::NameFilter;
use crate::position::Vec3;
use crate::world::Candidate;

/// A ranked candidate paired with the intrinsic value the scoring pipeline
/// computed for it. Created fresh per search call and never mutated.
#[derive(Clone, Debug)]
pub struct FindResult<T> {
    pub object: T,
    /// Intrinsic value from the caller's value function.
    pub value: f64,
    sort_key: f64,
}

impl<T> FindResult<T> {
    /// The blended ranking key this result was ordered by. Lower is better.
    pub fn sort_key(&self) -> f64 {
        self.sort_key
    }
}

/// Bounds applied before scoring.
#[derive(Clone, Debug)]
pub struct RankOptions {
    /// Candidates farther than this from the agent are not considered.
    pub max_distance: Option<f64>,
    /// Number of top results to keep. The common case is 1: single-target
    /// callers take the first result or nothing.
    pub max_count: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            max_distance: None,
            max_count: 1,
        }
    }
}

/// Rank `objects` against the agent position `origin`.
///
/// Pipeline: distance cutoff, name filter, variant `predicate`,
/// `value_fn` lookup (negative value excludes), `sort_fn` key computation,
/// stable ascending sort, truncate to `max_count`.
///
/// Zero matching objects yields an empty vec, never an error.
pub fn rank<T, P, V, S>(
    origin: Vec3,
    objects: impl IntoIterator<Item = T>,
    filter: &NameFilter,
    options: &RankOptions,
    predicate: P,
    value_fn: V,
    sort_fn: S,
) -> Vec<FindResult<T>>
where
    T: Candidate,
    P: Fn(&T) -> bool,
    V: Fn(&str) -> f64,
    S: Fn(f64, f64, &T) -> f64,
{
    let mut results: Vec<FindResult<T>> = objects
        .into_iter()
        .filter_map(|object| {
            let distance = origin.distance_to(object.position());
            if let Some(max_distance) = options.max_distance {
                if distance > max_distance {
                    return None;
                }
            }
            if !filter.matches(&object) || !predicate(&object) {
                return None;
            }
            let value = object.value_key().map(&value_fn).unwrap_or(0.0);
            if value < 0.0 {
                return None;
            }
            let sort_key = sort_fn(distance, value, &object);
            Some(FindResult {
                object,
                value,
                sort_key,
            })
        })
        .collect();

    // sort_by is stable, so equal keys keep query order.
    results.sort_by(|a, b| a.sort_key.total_cmp(&b.sort_key));
    results.truncate(options.max_count);
    results
}
