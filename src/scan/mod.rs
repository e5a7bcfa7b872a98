// Tue Jan 20 2026 - Alex

pub(crate) mod engine;
pub mod result;
pub mod scanner;
pub mod session;
pub mod window;

pub use result::ScanResult;
pub use scanner::Scanner;
pub use session::{ScanPhase, ScanSession};
pub use window::{Resolution, Window};
