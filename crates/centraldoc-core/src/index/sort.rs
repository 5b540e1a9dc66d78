// Decorate-sort-undecorate ordering.

/// Positions of `items` in ascending `key` order.
///
/// Each item is decorated with `(key, original_position)` so equal keys
/// keep their input order.
pub fn ordered_positions<T, K, F>(items: &[T], key: F) -> Vec<usize>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut decorated: Vec<(K, usize)> = items
        .iter()
        .enumerate()
        .map(|(idx, item)| (key(item), idx))
        .collect();
    decorated.sort();
    decorated.into_iter().map(|(_, idx)| idx).collect()
}
