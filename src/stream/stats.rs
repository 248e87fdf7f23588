//! Byte accounting for the parse stream.

/// Monotonically increasing counters attached to every emitted batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Total bytes handed to the flattener so far.
    pub processed_bytes: u64,
    /// Number of chunks read so far.
    pub chunk_index: u32,
}

impl StreamStats {
    /// Record one consumed chunk.
    pub fn record_chunk(&mut self, len: usize) {
        self.processed_bytes += len as u64;
        self.chunk_index += 1;
    }

    /// Fraction of the file consumed, clamped to `0.0..=1.0`.
    pub fn progress(&self, file_size: u64) -> f64 {
        if file_size == 0 {
            return 1.0;
        }
        (self.processed_bytes as f64 / file_size as f64).clamp(0.0, 1.0)
    }

    /// Estimate the total line count by linear extrapolation over the bytes
    /// consumed so far. This assumes uniform byte-to-line density, so it is
    /// an approximation, never an exact count.
    pub fn estimate_total_lines(&self, lines_so_far: usize, file_size: u64) -> Option<usize> {
        if self.processed_bytes == 0 || file_size == 0 {
            return None;
        }
        let fraction = self.processed_bytes as f64 / file_size as f64;
        Some(((lines_so_far as f64 / fraction).round() as usize).max(lines_so_far))
    }
}
