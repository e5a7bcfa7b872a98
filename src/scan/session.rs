// Tue Jan 20 2026 - Alex

use crate::error::{Result, ScanError};
use crate::scan::engine::{ScanEngine, ScanState};
use crate::scan::ScanResult;
use crate::signature::SignatureTable;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Created,
    Started,
    Stopped,
}

/// One single-use scan of one stream against a shared signature table.
///
/// Lifecycle: `Created -> start() -> Started -> feed()* -> stop() -> Stopped`.
/// A session is owned by a single writer; run independent sessions to scan
/// several streams concurrently over the same table.
#[derive(Debug)]
pub struct ScanSession {
    table: Arc<SignatureTable>,
    phase: ScanPhase,
    total_size: Option<u64>,
    state: ScanState,
    overrun_reported: bool,
}

impl ScanSession {
    pub fn new(table: Arc<SignatureTable>) -> Self {
        Self {
            table,
            phase: ScanPhase::Created,
            total_size: None,
            state: ScanState::default(),
            overrun_reported: false,
        }
    }

    pub fn with_total_size(table: Arc<SignatureTable>, total_size: u64) -> Self {
        let mut session = Self::new(table);
        session.total_size = Some(total_size);
        session
    }

    /// Declares the total stream size. Allowed once, before `start`.
    pub fn set_total_size(&mut self, total_size: u64) -> Result<()> {
        if self.phase != ScanPhase::Created {
            return Err(ScanError::AlreadyStarted);
        }
        if let Some(existing) = self.total_size {
            return Err(ScanError::TotalSizeAlreadySet(existing));
        }
        self.total_size = Some(total_size);
        Ok(())
    }

    pub fn start(&mut self) -> Result<()> {
        if self.phase != ScanPhase::Created {
            return Err(ScanError::AlreadyStarted);
        }

        self.state = ScanEngine::prepare(&self.table, self.total_size)?;
        self.phase = ScanPhase::Started;

        log::debug!(
            "Scan started: {} signature(s), total size {:?}",
            self.table.len(),
            self.total_size
        );
        Ok(())
    }

    /// Feeds the next contiguous chunk of the stream.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<()> {
        match self.phase {
            ScanPhase::Created => return Err(ScanError::NotStarted),
            ScanPhase::Stopped => return Err(ScanError::SessionClosed),
            ScanPhase::Started => {}
        }

        ScanEngine::feed(&self.table, &mut self.state, chunk);

        if let Some(total) = self.total_size {
            if self.state.cursor > total && !self.overrun_reported {
                log::warn!(
                    "Scanned {} byte(s), past the declared total size of {}",
                    self.state.cursor,
                    total
                );
                self.overrun_reported = true;
            }
        }
        Ok(())
    }

    pub fn stop(&mut self) -> Result<()> {
        match self.phase {
            ScanPhase::Created => return Err(ScanError::NotStarted),
            ScanPhase::Stopped => return Err(ScanError::SessionClosed),
            ScanPhase::Started => {}
        }

        if !self.state.live.is_empty() {
            log::debug!(
                "Discarding {} incomplete signature window(s)",
                self.state.live.len()
            );
            self.state.live.clear();
        }
        self.state.arena = Vec::new();
        self.phase = ScanPhase::Stopped;

        log::debug!(
            "Scan stopped after {} byte(s): {} result(s)",
            self.state.cursor,
            self.state.results.len()
        );
        Ok(())
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn total_size(&self) -> Option<u64> {
        self.total_size
    }

    /// Bytes delivered so far.
    pub fn cursor(&self) -> u64 {
        self.state.cursor
    }

    /// Signatures whose windows are not yet resolved to a match or a mismatch.
    pub fn pending_count(&self) -> usize {
        self.state.live.len()
    }

    pub fn table(&self) -> &Arc<SignatureTable> {
        &self.table
    }

    /// Matches so far, in completion order. Treat as unordered.
    pub fn results(&self) -> &[ScanResult] {
        &self.state.results
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.state.results.iter().map(|r| r.identifier())
    }

    pub fn has_match(&self, identifier: &str) -> bool {
        self.identifiers().any(|id| id == identifier)
    }

    pub fn into_results(self) -> Vec<ScanResult> {
        self.state.results
    }
}
