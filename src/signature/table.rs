// Tue Jan 20 2026 - Alex

use crate::error::Result;
use crate::signature::{Anchor, AnchorClass, Signature};
use std::ops::Index;

/// Append-only set of signatures, indexed by anchor class.
///
/// A table is built once and then shared read-only (usually behind an `Arc`)
/// by any number of scan sessions.
#[derive(Debug, Clone, Default)]
pub struct SignatureTable {
    signatures: Vec<Signature>,
    by_anchor: [Vec<usize>; 2],
    arena_len: usize,
}

impl SignatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a signature. Identical registrations are kept as separate
    /// records and report independently.
    pub fn register(&mut self, identifier: &str, anchor: Anchor, pattern: &[u8]) -> Result<usize> {
        let index = self.signatures.len();
        let signature = Signature::new(
            identifier.to_string(),
            anchor,
            pattern.to_vec(),
            index,
            self.arena_len,
        )?;

        log::debug!("Registered signature {}", signature);

        self.arena_len += signature.len();
        self.by_anchor[anchor.class().slot()].push(index);
        self.signatures.push(signature);
        Ok(index)
    }

    pub fn register_from_start(&mut self, identifier: &str, offset: u64, pattern: &[u8]) -> Result<usize> {
        self.register(identifier, Anchor::FromStart(offset), pattern)
    }

    pub fn register_from_end(&mut self, identifier: &str, offset: u64, pattern: &[u8]) -> Result<usize> {
        self.register(identifier, Anchor::FromEnd(offset), pattern)
    }

    pub fn signatures_for_anchor(&self, class: AnchorClass) -> impl Iterator<Item = &Signature> + '_ {
        self.by_anchor[class.slot()]
            .iter()
            .map(move |&index| &self.signatures[index])
    }

    pub fn count_for_anchor(&self, class: AnchorClass) -> usize {
        self.by_anchor[class.slot()].len()
    }

    /// True when sessions over this table must declare a total size.
    pub fn requires_total_size(&self) -> bool {
        self.count_for_anchor(AnchorClass::FromEnd) > 0
    }

    /// Bytes needed to hold one accumulator per signature.
    pub fn arena_len(&self) -> usize {
        self.arena_len
    }

    pub fn get(&self, index: usize) -> Option<&Signature> {
        self.signatures.get(index)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signature> {
        self.signatures.iter()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.signatures.iter().map(|s| s.identifier())
    }
}

impl Index<usize> for SignatureTable {
    type Output = Signature;

    fn index(&self, index: usize) -> &Signature {
        &self.signatures[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;

    #[test]
    fn test_register_keeps_order_and_duplicates() {
        let mut table = SignatureTable::new();
        table.register_from_start("regf", 0, b"regf").unwrap();
        table.register_from_start("regf", 0, b"regf").unwrap();
        table.register_from_end("vhdi_footer", 512, b"conectix").unwrap();

        assert_eq!(table.len(), 3);
        let ids: Vec<_> = table.identifiers().collect();
        assert_eq!(ids, vec!["regf", "regf", "vhdi_footer"]);
        assert_eq!(table.arena_len(), 16);
        assert_eq!(table[2].arena_range(), 8..16);
    }

    #[test]
    fn test_invalid_pattern_leaves_table_untouched() {
        let mut table = SignatureTable::new();
        table.register_from_start("7z", 0, b"7z\xbc\xaf\x27\x1c").unwrap();

        let err = table.register_from_start("broken", 0, b"").unwrap_err();
        assert!(matches!(err, ScanError::InvalidPattern(_)));
        assert_eq!(table.len(), 1);
        assert_eq!(table.arena_len(), 6);
        assert_eq!(table.count_for_anchor(AnchorClass::FromStart), 1);

        let index = table.register_from_start("pff", 0, b"!BDN").unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn test_signatures_for_anchor() {
        let mut table = SignatureTable::new();
        table.register_from_start("vhdi_header", 0, b"conectix").unwrap();
        table.register_from_end("vhdi_footer", 512, b"conectix").unwrap();
        table.register_from_start("esedb", 4, b"\xef\xcd\xab\x89").unwrap();

        let starts: Vec<_> = table
            .signatures_for_anchor(AnchorClass::FromStart)
            .map(|s| s.identifier())
            .collect();
        assert_eq!(starts, vec!["vhdi_header", "esedb"]);

        let ends: Vec<_> = table
            .signatures_for_anchor(AnchorClass::FromEnd)
            .map(|s| s.index())
            .collect();
        assert_eq!(ends, vec![1]);
        assert!(table.requires_total_size());
    }

    #[test]
    fn test_start_only_table_needs_no_size() {
        let mut table = SignatureTable::new();
        table.register_from_start("regf", 0, b"regf").unwrap();
        assert!(!table.requires_total_size());
    }
}
