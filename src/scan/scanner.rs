// Tue Jan 20 2026 - Alex

use crate::config::ScannerConfig;
use crate::error::{Result, ScanError};
use crate::scan::ScanSession;
use crate::signature::SignatureTable;
use crate::utils::logging::scoped_timer;
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Opens scan sessions over a shared signature table and drives them from
/// byte sources.
pub struct Scanner {
    table: Arc<SignatureTable>,
    scan_buffer_size: usize,
    abort: Arc<AtomicBool>,
}

impl Scanner {
    pub fn new(table: SignatureTable) -> Self {
        Self::from_shared(Arc::new(table))
    }

    pub fn from_shared(table: Arc<SignatureTable>) -> Self {
        Self {
            table,
            scan_buffer_size: crate::config::DEFAULT_SCAN_BUFFER_SIZE,
            abort: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_config(table: Arc<SignatureTable>, config: &ScannerConfig) -> Result<Self> {
        config.validate()?;
        let mut scanner = Self::from_shared(table);
        scanner.scan_buffer_size = config.scan_buffer_size;
        Ok(scanner)
    }

    pub fn set_scan_buffer_size(&mut self, size: usize) -> Result<()> {
        if size == 0 || size > isize::MAX as usize {
            return Err(ScanError::InvalidBufferSize(size));
        }
        self.scan_buffer_size = size;
        Ok(())
    }

    pub fn scan_buffer_size(&self) -> usize {
        self.scan_buffer_size
    }

    pub fn table(&self) -> &Arc<SignatureTable> {
        &self.table
    }

    pub fn open_session(&self, total_size: Option<u64>) -> ScanSession {
        match total_size {
            Some(size) => ScanSession::with_total_size(self.table.clone(), size),
            None => ScanSession::new(self.table.clone()),
        }
    }

    /// Requests that running reader scans stop at the next chunk boundary.
    /// The flag stays raised for the lifetime of the scanner.
    pub fn signal_abort(&self) {
        self.abort.store(true, Ordering::SeqCst);
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.load(Ordering::SeqCst)
    }

    /// Scans an in-memory buffer as a complete stream.
    pub fn scan_buffer(&self, data: &[u8]) -> Result<ScanSession> {
        let mut session = self.open_session(Some(data.len() as u64));
        session.start()?;
        session.feed(data)?;
        session.stop()?;
        Ok(session)
    }

    pub fn scan_reader<R: Read>(&self, mut reader: R, total_size: Option<u64>) -> Result<ScanSession> {
        let _timer = scoped_timer("scan_reader");
        let mut session = self.open_session(total_size);
        session.start()?;

        let mut buffer = vec![0u8; self.scan_buffer_size];
        loop {
            if self.is_aborted() {
                log::info!("Scan aborted after {} byte(s)", session.cursor());
                return Err(ScanError::Aborted);
            }
            if session.pending_count() == 0 {
                log::trace!("All signatures resolved at {} byte(s)", session.cursor());
                break;
            }
            let read_count = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(count) => count,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            session.feed(&buffer[..read_count])?;
        }

        session.stop()?;
        Ok(session)
    }

    /// Scans a regular file or a device. The total size comes from the file
    /// metadata, or from seeking to the end for devices. A size that cannot
    /// be determined is left unset, which only fails when end-anchored
    /// signatures are registered.
    pub fn scan_file<P: AsRef<Path>>(&self, path: P) -> Result<ScanSession> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        let size = stream_size(&mut file)?;
        match size {
            Some(size) => log::debug!("Scanning {} ({} bytes)", path.display(), size),
            None => log::debug!("Scanning {} (size unknown)", path.display()),
        }
        self.scan_reader(file, size)
    }
}

fn stream_size(file: &mut File) -> Result<Option<u64>> {
    let metadata = file.metadata()?;
    if metadata.is_file() {
        return Ok(Some(metadata.len()));
    }

    // character devices report 0, pipes fail to seek
    let size = match file.seek(SeekFrom::End(0)) {
        Ok(size) => {
            file.seek(SeekFrom::Start(0))?;
            size
        }
        Err(_) => 0,
    };
    Ok(if size > 0 { Some(size) } else { None })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scanner() -> Scanner {
        let mut table = SignatureTable::new();
        table.register_from_start("regf", 0, b"regf").unwrap();
        table.register_from_start("esedb", 4, b"\xef\xcd\xab\x89").unwrap();
        table.register_from_end("vhdi_footer", 512, b"conectix").unwrap();
        Scanner::new(table)
    }

    fn image() -> Vec<u8> {
        let mut data = vec![0u8; 4096];
        data[..4].copy_from_slice(b"regf");
        data[3584..3592].copy_from_slice(b"conectix");
        data
    }

    fn sorted(session: &ScanSession) -> Vec<String> {
        let mut ids: Vec<String> = session.identifiers().map(String::from).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_scan_reader_small_buffers() {
        let data = image();
        let expected = sorted(&scanner().scan_buffer(&data).unwrap());
        assert_eq!(expected, vec!["regf", "vhdi_footer"]);

        for size in [1, 3, 7, 512, 4096, 10_000] {
            let mut scanner = scanner();
            scanner.set_scan_buffer_size(size).unwrap();
            let session = scanner.scan_reader(Cursor::new(&data), Some(data.len() as u64)).unwrap();
            assert_eq!(sorted(&session), expected);
        }
    }

    #[test]
    fn test_scan_reader_stops_when_all_resolved() {
        let data = image();
        let mut scanner = scanner();
        scanner.set_scan_buffer_size(16).unwrap();
        let session = scanner.scan_reader(Cursor::new(&data), Some(data.len() as u64)).unwrap();
        assert_eq!(session.cursor(), 3600);
    }

    #[test]
    fn test_scan_reader_requires_size_for_end_anchors() {
        let result = scanner().scan_reader(Cursor::new(image()), None);
        assert!(matches!(result, Err(ScanError::MissingTotalSize(1))));
    }

    #[test]
    fn test_abort() {
        let scanner = scanner();
        scanner.signal_abort();
        assert!(scanner.is_aborted());
        let result = scanner.scan_reader(Cursor::new(image()), Some(4096));
        assert!(matches!(result, Err(ScanError::Aborted)));
    }

    #[test]
    fn test_invalid_buffer_size() {
        let mut scanner = scanner();
        assert!(matches!(scanner.set_scan_buffer_size(0), Err(ScanError::InvalidBufferSize(0))));
        assert_eq!(scanner.scan_buffer_size(), 0x10000);
    }

    #[test]
    fn test_with_config() {
        let config = ScannerConfig::new().with_scan_buffer_size(128);
        let scanner = Scanner::with_config(scanner().table().clone(), &config).unwrap();
        assert_eq!(scanner.scan_buffer_size(), 128);
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("sigscan_scanner_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_scan_file_end_anchored_match() {
        let path = temp_path("image.vhd");
        std::fs::write(&path, image()).unwrap();
        let session = scanner().scan_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(session.total_size(), Some(4096));
        assert_eq!(sorted(&session), vec!["regf", "vhdi_footer"]);
        let footer = session.results().iter().find(|r| r.identifier() == "vhdi_footer").unwrap();
        assert_eq!(footer.offset(), 3584);
    }

    #[test]
    fn test_scan_file_missing() {
        let result = scanner().scan_file(temp_path("does_not_exist.bin"));
        assert!(matches!(result, Err(ScanError::Io(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_file_device_without_size() {
        let mut table = SignatureTable::new();
        table.register_from_start("zeros", 0, b"\0\0\0\0").unwrap();
        table.register_from_start("zeros_deep", 70_000, b"\0\0").unwrap();
        let session = Scanner::new(table).scan_file("/dev/zero").unwrap();
        assert_eq!(session.total_size(), None);
        assert_eq!(sorted(&session), vec!["zeros", "zeros_deep"]);
        assert!(session.cursor() >= 70_002);

        let result = scanner().scan_file("/dev/zero");
        assert!(matches!(result, Err(ScanError::MissingTotalSize(1))));
    }

    #[test]
    fn test_concurrent_sessions_share_table() {
        let scanner = Arc::new(scanner());
        let data = Arc::new(image());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let scanner = scanner.clone();
                let data = data.clone();
                std::thread::spawn(move || sorted(&scanner.scan_buffer(&data).unwrap()))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), vec!["regf", "vhdi_footer"]);
        }
    }
}
