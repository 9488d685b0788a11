#![forbid(unsafe_code)]

mod error;
mod format;
mod io;
mod path;
mod sink;
mod tags;
mod version;
mod walk;

pub use error::{WadError, WadResult};
pub use format::{align16, next_record_offset, Record, WadVersion, NAME_SIZE, RECORD_SIZE};
pub use sink::{DirSink, MemorySink, NullSink, PayloadSink};
pub use tags::{Phase, TagAction, TagTables};
pub use version::detect_version;
pub use walk::{unpack, walk, Duplicate, RecordEntry, WalkState, WalkSummary};
