// PartLedger - platform/fs.rs
//
// Ledger file access. The file is opened, read to completion, and closed
// inside `read_ledger`; the handle is dropped on every return path.

use crate::util::error::LedgerError;
use std::io::Read;
use std::path::Path;

/// Read the full ledger file as a string.
///
/// Fails with `FileAccess` when the file is missing or unreadable and with
/// `FileTooLarge` when it exceeds `max_size` bytes. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn read_ledger(path: &Path, max_size: u64) -> Result<String, LedgerError> {
    let file_access = |source| LedgerError::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    let mut file = std::fs::File::open(path).map_err(file_access)?;
    let size = file.metadata().map_err(file_access)?.len();
    if size > max_size {
        return Err(LedgerError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size,
        });
    }

    let mut bytes = Vec::with_capacity(size as usize);
    file.read_to_end(&mut bytes).map_err(file_access)?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Ledger file read");

    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                "Ledger is not valid UTF-8; invalid sequences replaced"
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parts.log");
        std::fs::write(&path, "H1, P1, Widget, 10, Acme\n").unwrap();

        let content = read_ledger(&path, 1024).unwrap();
        assert_eq!(content, "H1, P1, Widget, 10, Acme\n");
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_ledger(&dir.path().join("missing.log"), 1024);
        assert!(
            matches!(result, Err(LedgerError::FileAccess { .. })),
            "expected FileAccess, got {result:?}"
        );
    }

    #[test]
    fn test_oversized_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.log");
        std::fs::write(&path, "x".repeat(100)).unwrap();

        let result = read_ledger(&path, 10);
        assert!(matches!(
            result,
            Err(LedgerError::FileTooLarge {
                size: 100,
                max_size: 10,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.log");
        std::fs::write(&path, b"H1, P1, Caf\xe9, 1, Acme\n").unwrap();

        let content = read_ledger(&path, 1024).unwrap();
        assert!(content.contains('\u{FFFD}'));
    }
}
