//! Metadata selection: filter → sort → cap.
//!
//! The three steps are independent pure functions; [`select`] is the only
//! composition used for output, so the cap always sees the ranked list.

use std::cmp::Reverse;

use super::Metadata;

/// Keep records valid for publication (non-empty title and source).
pub fn filter_valid(metadata: Vec<Metadata>) -> Vec<Metadata> {
    metadata.into_iter().filter(Metadata::is_valid).collect()
}

/// Order by `created`, newest first. Stable: ties keep input order.
///
/// Records without a timestamp sort after every dated record.
pub fn sort_by_created(metadata: &mut [Metadata]) {
    metadata.sort_by_key(|meta| Reverse(meta.created));
}

/// Truncate to `max_items` when positive; `0` means unlimited.
pub fn limit_items(mut metadata: Vec<Metadata>, max_items: usize) -> Vec<Metadata> {
    if max_items > 0 {
        metadata.truncate(max_items);
    }
    metadata
}

/// The selected metadata list shared by every output of a regeneration.
pub fn select(metadata: Vec<Metadata>, max_items: usize) -> Vec<Metadata> {
    let mut selected = filter_valid(metadata);
    sort_by_created(&mut selected);
    limit_items(selected, max_items)
}
