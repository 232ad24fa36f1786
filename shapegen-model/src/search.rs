//! "Did you mean" suggestions for unknown shape ids

use crate::shape_id::ShapeId;
use strsim::levenshtein;

/// A known shape id close to the one that was looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub candidate: String,
    pub distance: usize,
}

/// Distance between two shape ids.
///
/// Ids that differ only in letter case are distance 0. Ids in the same
/// namespace with the same member part are compared by shape name alone,
/// so a typo in a long namespace does not drown out the name.
fn shape_distance(wanted: &ShapeId, candidate: &ShapeId) -> usize {
    let (wanted_full, candidate_full) = (wanted.to_string(), candidate.to_string());
    if wanted_full.eq_ignore_ascii_case(&candidate_full) {
        return 0;
    }
    if wanted.namespace() == candidate.namespace() && wanted.member() == candidate.member() {
        return levenshtein(wanted.name(), candidate.name());
    }
    levenshtein(&wanted_full, &candidate_full)
}

/// Known ids within `max_distance` of `wanted`, closest first.
///
/// `wanted` itself is never suggested. Ties are ordered by id.
pub fn suggest_shape_ids<'a>(
    wanted: &ShapeId,
    known: impl IntoIterator<Item = &'a ShapeId>,
    max_distance: usize,
) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = known
        .into_iter()
        .filter(|candidate| *candidate != wanted)
        .filter_map(|candidate| {
            let distance = shape_distance(wanted, candidate);
            (distance <= max_distance).then(|| Suggestion {
                candidate: candidate.to_string(),
                distance,
            })
        })
        .collect();
    suggestions.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.candidate.cmp(&b.candidate)));
    suggestions
}
