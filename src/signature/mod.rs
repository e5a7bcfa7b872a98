// Tue Jan 20 2026 - Alex

pub mod definitions;
pub mod record;
pub mod table;

pub use definitions::{parse_definitions, read_definitions_file, SignatureDefinition};
pub use record::{Anchor, AnchorClass, Signature};
pub use table::SignatureTable;
