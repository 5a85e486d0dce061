//! Client-side pagination helpers

use std::collections::HashSet;
use std::hash::Hash;

/// Appends a fetched page onto an accumulated list, dropping items
/// whose key is already present.
///
/// List screens keep every loaded page in one vector; a page boundary
/// shifting under insertion can hand back an item that was already
/// appended, so the merge dedups by key rather than trusting the
/// server's paging.
pub fn merge_page<T, K, F>(existing: &mut Vec<T>, fetched: Vec<T>, key: F)
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let seen: HashSet<K> = existing.iter().map(&key).collect();
    existing.extend(fetched.into_iter().filter(|item| !seen.contains(&key(item))));
}

/// Whether another page is worth requesting: a short page means the
/// listing is exhausted.
#[must_use]
pub const fn page_has_more(fetched_len: usize, page_size: usize) -> bool {
    fetched_len == page_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_drops_duplicates() {
        let mut items = vec![(1, "a"), (2, "b")];
        merge_page(&mut items, vec![(2, "b-again"), (3, "c")], |item| item.0);
        assert_eq!(items, vec![(1, "a"), (2, "b"), (3, "c")]);
    }

    #[test]
    fn test_merge_preserves_fetch_order() {
        let mut items: Vec<i64> = vec![];
        merge_page(&mut items, vec![5, 3, 4], |item| *item);
        assert_eq!(items, vec![5, 3, 4]);
    }

    #[test]
    fn test_has_more() {
        assert!(page_has_more(20, 20));
        assert!(!page_has_more(7, 20));
        assert!(!page_has_more(0, 20));
    }
}
