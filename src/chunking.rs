use crate::models::Chunk;

/// Split `total_lines` into `workers` contiguous ranges covering `[0, total_lines)`
///
/// Every chunk gets `total_lines / workers` lines and the first
/// `total_lines % workers` chunks get one extra. Chunks keep input order,
/// so chunk `i` is owned by worker `i`. When there are fewer lines than
/// workers the trailing chunks are empty.
///
/// # Example
///
/// ```
/// use shipping_discounts::chunking::plan_chunks;
///
/// let chunks = plan_chunks(10, 4);
/// let sizes: Vec<usize> = chunks.iter().map(|chunk| chunk.len()).collect();
/// assert_eq!(sizes, vec![3, 3, 2, 2]);
/// assert_eq!((chunks[1].start_line, chunks[1].end_line), (3, 6));
///
/// assert!(plan_chunks(2, 3)[2].is_empty());
/// ```
pub fn plan_chunks(total_lines: usize, workers: usize) -> Vec<Chunk> {
    if workers == 0 {
        return Vec::new();
    }

    let base = total_lines / workers;
    let remainder = total_lines % workers;

    let mut chunks = Vec::with_capacity(workers);
    let mut start = 0;
    for worker_id in 0..workers {
        let len = base + usize::from(worker_id < remainder);
        chunks.push(Chunk::new(start, start + len, worker_id));
        start += len;
    }

    chunks
}
