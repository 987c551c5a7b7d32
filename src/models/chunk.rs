/// Contiguous range of input lines `[start_line, end_line)` owned by one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start_line: usize,
    pub end_line: usize,
    pub worker_id: usize,
}

impl Chunk {
    pub fn new(start_line: usize, end_line: usize, worker_id: usize) -> Self {
        Self {
            start_line,
            end_line,
            worker_id,
        }
    }

    pub fn len(&self) -> usize {
        self.end_line - self.start_line
    }

    pub fn is_empty(&self) -> bool {
        self.start_line == self.end_line
    }
}
