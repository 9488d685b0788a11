#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::io::{Read, Seek, SeekFrom};

use crate::wad::error::{WadError, WadResult};
use crate::wad::format::{next_record_offset, Record, WadVersion, RECORD_SIZE};
use crate::wad::io::{read_full, read_payload};
use crate::wad::sink::PayloadSink;
use crate::wad::tags::{Phase, TagAction, TagTables};
use crate::wad::version::detect_version;

/// One record as seen by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    pub offset: u64,
    pub record: Record,
    /// Nesting level the record sits at (a group start sits outside its group).
    pub depth: u32,
    pub action: TagAction,
    /// Payload length the walker used; 0 for `EntityCount` records.
    pub size: u32,
}

/// A payload name that showed up more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub name: String,
    pub offset: u64,
    /// Checksum of the first payload with this name; it stays recorded.
    pub first: blake3::Hash,
    pub checksum: blake3::Hash,
}

impl Duplicate {
    pub fn same_content(&self) -> bool {
        self.first == self.checksum
    }
}

#[derive(Debug, Clone)]
pub struct WalkSummary {
    pub version: WadVersion,
    pub records: Vec<RecordEntry>,
    pub duplicates: Vec<Duplicate>,
    /// Number of payloads handed to the sink.
    pub extracted: usize,
    pub phase: Phase,
    pub depth: u32,
}

/// Phase/depth state machine plus the name → checksum table of one walk.
#[derive(Debug)]
pub struct WalkState {
    version: WadVersion,
    tables: TagTables,
    phase: Phase,
    depth: u32,
    seen: HashMap<String, blake3::Hash>,
}

impl WalkState {
    pub fn new(version: WadVersion) -> Self {
        Self {
            version,
            tables: TagTables::for_version(version),
            phase: Phase::Header,
            depth: 0,
            seen: HashMap::new(),
        }
    }

    pub fn version(&self) -> WadVersion {
        self.version
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn classify(&self, tag: u16) -> TagAction {
        self.tables.classify(self.phase, tag)
    }

    pub fn enter_data(&mut self) {
        self.phase = Phase::Data;
    }

    pub fn open_group(&mut self) {
        self.depth += 1;
    }

    pub fn close_group(&mut self, offset: u64, tag: u16) -> WadResult<()> {
        self.depth = self
            .depth
            .checked_sub(1)
            .ok_or(WadError::GroupUnderflow { offset, tag })?;
        Ok(())
    }

    /// Records `name → checksum`; returns the earlier checksum if the name was
    /// already taken. The earlier one is never overwritten.
    pub fn note_payload(&mut self, name: &str, checksum: blake3::Hash) -> Option<blake3::Hash> {
        match self.seen.get(name) {
            Some(first) => Some(*first),
            None => {
                self.seen.insert(name.to_string(), checksum);
                None
            }
        }
    }
}

/// Walks a WAD, detecting the version from the first tag unless one is given.
///
/// After detection the stream is put back where it was, so the first record
/// is part of the walk.
pub fn unpack<R: Read + Seek>(
    r: &mut R,
    version: Option<WadVersion>,
    sink: &mut dyn PayloadSink,
) -> WadResult<WalkSummary> {
    let version = match version {
        Some(v) => v,
        None => {
            let start = r.stream_position()?;
            let v = detect_version(r)?;
            r.seek(SeekFrom::Start(start))?;
            v
        }
    };
    walk(r, version, sink)
}

fn io_at(offset: u64) -> impl FnOnce(std::io::Error) -> WadError {
    move |source| WadError::IoAt { offset, source }
}

/// Walks records from the current position to a clean end of stream.
pub fn walk<R: Read + Seek>(
    r: &mut R,
    version: WadVersion,
    sink: &mut dyn PayloadSink,
) -> WadResult<WalkSummary> {
    let mut state = WalkState::new(version);
    let mut records = Vec::new();
    let mut duplicates = Vec::new();
    let mut extracted = 0usize;

    let mut offset = r.stream_position()?;

    loop {
        let mut buf = [0u8; RECORD_SIZE];
        let got = read_full(r, &mut buf).map_err(io_at(offset))?;
        if got == 0 {
            break;
        }
        if got != RECORD_SIZE {
            return Err(WadError::TruncatedRecord { offset, got });
        }

        let record = Record::parse(&buf);
        let action = state.classify(record.tag);
        let mut size = record.size;
        let mut checked = true;
        let mut depth = state.depth();

        match action {
            TagAction::EnterData => state.enter_data(),
            TagAction::GroupStart => {
                state.open_group();
                checked = false;
            }
            TagAction::GroupEnd => {
                state.close_group(offset, record.tag)?;
                depth = state.depth();
                checked = false;
            }
            TagAction::EntityCount => size = 0,
            TagAction::Extract | TagAction::Ignore => {}
        }

        tracing::debug!(
            "{}{:08x}:{:04x}:{:04x}:{:08x} {:?} {}",
            "- ".repeat(depth as usize),
            offset,
            record.tag,
            record.param,
            size,
            action,
            record.name
        );

        if checked && size > 0 {
            let data = read_payload(r, size).map_err(io_at(offset + RECORD_SIZE as u64))?;
            if data.len() != size as usize {
                return Err(WadError::TruncatedPayload {
                    offset,
                    name: record.name,
                    expected: size,
                    got: data.len() as u64,
                });
            }

            if action == TagAction::Extract && !record.name.is_empty() {
                sink.accept(&record.name, &data)?;
                extracted += 1;
            }

            let checksum = blake3::hash(&data);
            if let Some(first) = state.note_payload(&record.name, checksum) {
                tracing::warn!(
                    "duplicate of '{}' at {:#010x}: first {} now {}",
                    record.name,
                    offset,
                    first.to_hex(),
                    checksum.to_hex()
                );
                duplicates.push(Duplicate {
                    name: record.name.clone(),
                    offset,
                    first,
                    checksum,
                });
            }
        }

        records.push(RecordEntry {
            offset,
            record,
            depth,
            action,
            size,
        });

        let next = next_record_offset(offset, size);
        offset = r.seek(SeekFrom::Start(next)).map_err(io_at(next))?;
    }

    Ok(WalkSummary {
        version,
        records,
        duplicates,
        extracted,
        phase: state.phase(),
        depth: state.depth(),
    })
}
