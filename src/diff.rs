//! URL set difference between fetched candidates and the remote store.

use crate::contribution::Contribution;
use crate::stars::KnownContribution;

/// Returns the candidates whose `url` does not appear in `known`.
///
/// Exact, case-sensitive string comparison with no normalization; the
/// output preserves candidate order. Linear scan per candidate is fine at
/// feed scale (tens of entries).
pub fn new_contributions(
    candidates: Vec<Contribution>,
    known: &[KnownContribution],
) -> Vec<Contribution> {
    candidates
        .into_iter()
        .filter(|candidate| !known.iter().any(|k| k.url == candidate.url))
        .collect()
}
