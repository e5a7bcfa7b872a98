// Tue Jan 20 2026 - Alex

//! Anchored, streaming file-format signature scanner.
//!
//! ```no_run
//! use sigscan::{Scanner, SignatureTable};
//!
//! let mut table = SignatureTable::new();
//! table.register_from_start("regf", 0, b"regf")?;
//! table.register_from_end("vhdi_footer", 512, b"conectix")?;
//!
//! let scanner = Scanner::new(table);
//! let mut session = scanner.open_session(Some(1024));
//! session.start()?;
//! session.feed(&[0u8; 512])?;
//! session.feed(&[0u8; 512])?;
//! session.stop()?;
//! for result in session.results() {
//!     println!("{}", result);
//! }
//! # Ok::<(), sigscan::ScanError>(())
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod scan;
pub mod signature;
pub mod utils;

pub use config::ScannerConfig;
pub use error::{Result, ScanError};
pub use scan::{ScanPhase, ScanResult, ScanSession, Scanner};
pub use signature::{Anchor, AnchorClass, Signature, SignatureTable};
