// Tue Jan 20 2026 - Alex

use crate::error::{Result, ScanError};
use crate::scan::window::{self, Resolution, Window};
use crate::scan::ScanResult;
use crate::signature::{AnchorClass, SignatureTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Pending { window: Window, observed: usize },
    Matched,
    Rejected,
}

/// Per-session buffers the engine advances.
///
/// `arena` holds one fixed-size accumulator per signature, laid out by
/// [`SignatureTable::arena_len`]. `live` lists the signatures still pending,
/// in registration order.
#[derive(Debug, Default)]
pub(crate) struct ScanState {
    pub cursor: u64,
    pub arena: Vec<u8>,
    pub slots: Vec<Slot>,
    pub live: Vec<usize>,
    pub results: Vec<ScanResult>,
}

impl ScanState {
    #[cfg(test)]
    pub fn slot(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied()
    }
}

/// Anchored streaming matcher. Holds no state of its own.
pub(crate) struct ScanEngine;

impl ScanEngine {
    /// Resolves every signature's window against `total_size` and allocates
    /// the accumulator arena.
    pub(crate) fn prepare(table: &SignatureTable, total_size: Option<u64>) -> Result<ScanState> {
        if total_size.is_none() && table.requires_total_size() {
            return Err(ScanError::MissingTotalSize(
                table.count_for_anchor(AnchorClass::FromEnd),
            ));
        }

        let mut slots = vec![Slot::Rejected; table.len()];
        for class in AnchorClass::ALL {
            for signature in table.signatures_for_anchor(class) {
                slots[signature.index()] = match window::resolve(signature, total_size)? {
                    Resolution::Window(window) => Slot::Pending { window, observed: 0 },
                    Resolution::OutOfRange => {
                        log::trace!("Signature {} out of range for size {:?}", signature.identifier(), total_size);
                        Slot::Rejected
                    }
                };
            }
        }

        let live: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| matches!(slot, Slot::Pending { .. }))
            .map(|(index, _)| index)
            .collect();

        log::debug!(
            "Prepared scan: {} of {} signature(s) live, {} arena byte(s)",
            live.len(),
            table.len(),
            table.arena_len()
        );

        Ok(ScanState {
            cursor: 0,
            arena: vec![0; table.arena_len()],
            slots,
            live,
            results: Vec::new(),
        })
    }

    /// Consumes the next chunk of the stream and returns how many signatures
    /// matched in it.
    pub(crate) fn feed(table: &SignatureTable, state: &mut ScanState, chunk: &[u8]) -> usize {
        let chunk_start = state.cursor;
        let chunk_end = chunk_start.saturating_add(chunk.len() as u64);
        state.cursor = chunk_end;

        if chunk.is_empty() {
            return 0;
        }

        let ScanState {
            arena,
            slots,
            live,
            results,
            ..
        } = state;
        let matched_before = results.len();

        live.retain(|&index| {
            let signature = &table[index];
            let (window, observed) = match &mut slots[index] {
                Slot::Pending { window, observed } => (*window, observed),
                _ => return false,
            };
            let overlap = match window.intersect(chunk_start, chunk_end) {
                Some(overlap) => overlap,
                None => return true,
            };

            let count = overlap.len() as usize;
            let source = (overlap.start - chunk_start) as usize;
            let target = (overlap.start - window.start) as usize;
            let accumulator = &mut arena[signature.arena_range()];
            accumulator[target..target + count].copy_from_slice(&chunk[source..source + count]);

            *observed += count;
            if *observed < signature.len() {
                return true;
            }

            if &accumulator[..] == signature.pattern() {
                log::debug!("Matched {} at offset {}", signature.identifier(), window.start);
                results.push(ScanResult::new(signature.identifier(), window.start));
                slots[index] = Slot::Matched;
            } else {
                slots[index] = Slot::Rejected;
            }
            false
        });

        log::trace!(
            "Fed [{}, {}): {} live, {} new match(es)",
            chunk_start,
            chunk_end,
            live.len(),
            results.len() - matched_before
        );

        results.len() - matched_before
    }
}
