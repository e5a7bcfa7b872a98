// Tue Jan 20 2026 - Alex

use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Where a signature's pattern must sit in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Anchor {
    /// Offset counted forward from the first byte of the stream.
    FromStart(u64),
    /// Offset counted backward from the total stream size.
    FromEnd(u64),
}

impl Anchor {
    pub fn class(&self) -> AnchorClass {
        match self {
            Anchor::FromStart(_) => AnchorClass::FromStart,
            Anchor::FromEnd(_) => AnchorClass::FromEnd,
        }
    }

    pub fn offset(&self) -> u64 {
        match *self {
            Anchor::FromStart(offset) | Anchor::FromEnd(offset) => offset,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::FromStart(offset) => write!(f, "+{}", offset),
            Anchor::FromEnd(offset) => write!(f, "-{}", offset),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnchorClass {
    FromStart,
    FromEnd,
}

impl AnchorClass {
    pub const ALL: [AnchorClass; 2] = [AnchorClass::FromStart, AnchorClass::FromEnd];

    pub(crate) fn slot(self) -> usize {
        match self {
            AnchorClass::FromStart => 0,
            AnchorClass::FromEnd => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    identifier: String,
    anchor: Anchor,
    pattern: Vec<u8>,
    index: usize,
    arena_start: usize,
}

impl Signature {
    pub(crate) fn new(
        identifier: String,
        anchor: Anchor,
        pattern: Vec<u8>,
        index: usize,
        arena_start: usize,
    ) -> Result<Self> {
        if pattern.is_empty() {
            return Err(ScanError::InvalidPattern(format!(
                "Signature '{}' has an empty pattern",
                identifier
            )));
        }
        Ok(Self {
            identifier,
            anchor,
            pattern,
            index,
            arena_start,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// Pattern length in bytes, never zero.
    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Registration index inside the owning table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Slot of this signature's accumulator in a session arena.
    pub(crate) fn arena_range(&self) -> Range<usize> {
        self.arena_start..self.arena_start + self.pattern.len()
    }

    pub fn to_hex_string(&self) -> String {
        self.pattern
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}: {}", self.identifier, self.anchor, self.to_hex_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pattern_rejected() {
        let result = Signature::new("empty".to_string(), Anchor::FromStart(0), Vec::new(), 0, 0);
        assert!(matches!(result, Err(ScanError::InvalidPattern(_))));
    }

    #[test]
    fn test_anchor_class_and_offset() {
        assert_eq!(Anchor::FromStart(4).class(), AnchorClass::FromStart);
        assert_eq!(Anchor::FromEnd(512).class(), AnchorClass::FromEnd);
        assert_eq!(Anchor::FromEnd(512).offset(), 512);
    }

    #[test]
    fn test_arena_range() {
        let sig = Signature::new("regf".to_string(), Anchor::FromStart(0), b"regf".to_vec(), 3, 12).unwrap();
        assert_eq!(sig.arena_range(), 12..16);
        assert_eq!(sig.index(), 3);
    }

    #[test]
    fn test_display() {
        let sig = Signature::new("qcow".to_string(), Anchor::FromEnd(8), b"QFI\xfb".to_vec(), 0, 0).unwrap();
        assert_eq!(sig.to_string(), "qcow @ -8: 51 46 49 FB");
    }
}
