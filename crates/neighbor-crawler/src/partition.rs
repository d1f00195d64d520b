//! Static work partitioning for a level

/// Split `nodes` into `min(max_workers, nodes.len())` contiguous chunks.
///
/// Every chunk has `len / workers` elements except the last, which also takes
/// the remainder. Concatenating the chunks in order yields `nodes` exactly.
/// An empty input produces no chunks. A `max_workers` of 0 is treated as 1.
///
/// # Example
///
/// ```rust
/// use neighbor_crawler::partition;
///
/// let nodes = [1, 2, 3, 4, 5, 6, 7];
/// let chunks = partition(&nodes, 3);
/// assert_eq!(chunks, vec![&[1, 2][..], &[3, 4][..], &[5, 6, 7][..]]);
/// ```
pub fn partition<T>(nodes: &[T], max_workers: usize) -> Vec<&[T]> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let workers = max_workers.max(1).min(nodes.len());
    let base = nodes.len() / workers;

    let mut chunks = Vec::with_capacity(workers);
    let mut rest = nodes;
    for _ in 0..workers - 1 {
        let (chunk, tail) = rest.split_at(base);
        chunks.push(chunk);
        rest = tail;
    }
    chunks.push(rest);
    chunks
}
