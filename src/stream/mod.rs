//! Producer side of the pipeline: chunked reading, flattening, and the
//! single-slot backpressure protocol between the parse task and the UI.

mod stats;
mod transport;

pub use stats::StreamStats;
pub use transport::{run_parser, spawn_file_parser, AckToken, LineBatch, MAX_CHUNK_SIZE};
