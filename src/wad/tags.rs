#![forbid(unsafe_code)]

use crate::wad::format::WadVersion;

/// What the walker does with a record, decided by its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    /// Switch from header records to data records.
    EnterData,
    GroupStart,
    GroupEnd,
    /// Payload is a named file to hand to the sink.
    Extract,
    /// The size field holds a count, not a payload length.
    EntityCount,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Header,
    Data,
}

type Table = &'static [(u16, TagAction)];

const GOW1_HEADER: Table = &[
    (0x378, TagAction::Ignore), // header start
    (0x028, TagAction::GroupStart),
    (0x032, TagAction::GroupEnd),
    (0x3e7, TagAction::Ignore), // pop heap
    (0x29a, TagAction::EnterData),
];

const GOW1_DATA: Table = &[
    (0x018, TagAction::EntityCount),
    (0x028, TagAction::GroupStart),
    (0x032, TagAction::GroupEnd),
    (0x070, TagAction::Extract), // camera
    (0x071, TagAction::Extract), // TWK_
    (0x072, TagAction::Extract), // TWK_
    (0x01e, TagAction::Extract),
];

const GOW2_HEADER: Table = &[
    (0x015, TagAction::Ignore), // header start
    (0x002, TagAction::GroupStart),
    (0x003, TagAction::GroupEnd),
    (0x016, TagAction::Ignore), // pop heap
    (0x013, TagAction::EnterData),
];

const GOW2_DATA: Table = &[
    (0x002, TagAction::GroupStart),
    (0x003, TagAction::GroupEnd),
    (0x009, TagAction::Extract), // mesh
    (0x001, TagAction::Extract),
];

/// Header and data tag tables for one version, picked once per walk.
#[derive(Debug, Clone, Copy)]
pub struct TagTables {
    header: Table,
    data: Table,
}

impl TagTables {
    pub fn for_version(version: WadVersion) -> Self {
        match version {
            WadVersion::Gow1 => Self {
                header: GOW1_HEADER,
                data: GOW1_DATA,
            },
            WadVersion::Gow2 => Self {
                header: GOW2_HEADER,
                data: GOW2_DATA,
            },
        }
    }

    /// Unknown tags are `Ignore`.
    pub fn classify(&self, phase: Phase, tag: u16) -> TagAction {
        let table = match phase {
            Phase::Header => self.header,
            Phase::Data => self.data,
        };
        table
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|&(_, action)| action)
            .unwrap_or(TagAction::Ignore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gow1_tables() {
        let t = TagTables::for_version(WadVersion::Gow1);
        assert_eq!(t.classify(Phase::Header, 0x29a), TagAction::EnterData);
        assert_eq!(t.classify(Phase::Header, 0x28), TagAction::GroupStart);
        assert_eq!(t.classify(Phase::Data, 0x32), TagAction::GroupEnd);
        assert_eq!(t.classify(Phase::Data, 0x18), TagAction::EntityCount);
        assert_eq!(t.classify(Phase::Data, 0x1e), TagAction::Extract);
        assert_eq!(t.classify(Phase::Data, 0x71), TagAction::Extract);
    }

    #[test]
    fn test_tables_are_phase_specific() {
        let t = TagTables::for_version(WadVersion::Gow1);
        // Payload tags mean nothing before the data start record.
        assert_eq!(t.classify(Phase::Header, 0x1e), TagAction::Ignore);
        assert_eq!(t.classify(Phase::Header, 0x18), TagAction::Ignore);
        // No way back to the header phase.
        assert_eq!(t.classify(Phase::Data, 0x29a), TagAction::Ignore);
    }

    #[test]
    fn test_gow2_tables() {
        let t = TagTables::for_version(WadVersion::Gow2);
        assert_eq!(t.classify(Phase::Header, 0x13), TagAction::EnterData);
        assert_eq!(t.classify(Phase::Header, 0x02), TagAction::GroupStart);
        assert_eq!(t.classify(Phase::Data, 0x03), TagAction::GroupEnd);
        assert_eq!(t.classify(Phase::Data, 0x01), TagAction::Extract);
        assert_eq!(t.classify(Phase::Data, 0x09), TagAction::Extract);
        assert_eq!(t.classify(Phase::Data, 0x1e), TagAction::Ignore);
    }

    #[test]
    fn test_unknown_tag_is_ignored() {
        for v in [WadVersion::Gow1, WadVersion::Gow2] {
            let t = TagTables::for_version(v);
            assert_eq!(t.classify(Phase::Header, 0xbeef), TagAction::Ignore);
            assert_eq!(t.classify(Phase::Data, 0xbeef), TagAction::Ignore);
        }
    }
}
