// Tue Jan 20 2026 - Alex

use crate::error::{Result, ScanError};
use crate::signature::{Anchor, Signature};

/// Absolute half-open byte range a pattern must occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: u64,
    pub end: u64,
}

impl Window {
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Overlap with `[start, end)`, if any.
    pub fn intersect(&self, start: u64, end: u64) -> Option<Window> {
        let from = self.start.max(start);
        let to = self.end.min(end);
        if from < to {
            Some(Window::new(from, to))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Window(Window),
    /// The window can never be observed in a stream of the declared size.
    OutOfRange,
}

pub fn resolve(signature: &Signature, total_size: Option<u64>) -> Result<Resolution> {
    let len = signature.len() as u64;

    let start = match signature.anchor() {
        Anchor::FromStart(offset) => offset,
        Anchor::FromEnd(offset) => {
            let total = total_size.ok_or(ScanError::MissingTotalSize(1))?;
            match total.checked_sub(offset) {
                Some(start) => start,
                None => return Ok(Resolution::OutOfRange),
            }
        }
    };

    let end = match start.checked_add(len) {
        Some(end) => end,
        None => return Ok(Resolution::OutOfRange),
    };

    if total_size.map_or(false, |total| end > total) {
        return Ok(Resolution::OutOfRange);
    }

    Ok(Resolution::Window(Window::new(start, end)))
}
