//! # File I/O Module
//!
//! Reading quote requests and writing rendered artifacts.
//!
//! Artifacts are written atomically: the bytes go to a `.tmp` sibling,
//! are synced to disk and then renamed over the final name, so a reader
//! never sees a half-written document.
//!
//! ## Example
//!
//! ```rust,no_run
//! use quote_core::file_io::{load_request, write_artifact};
//! use std::path::Path;
//!
//! let request = load_request(Path::new("request.json"))?;
//! println!("Loaded request {}", request.quote_no);
//!
//! write_artifact(Path::new("out/Quotation-Q-1.pdf"), b"%PDF-1.7")?;
//! # Ok::<(), quote_core::errors::QuoteError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::errors::{QuoteError, QuoteResult};
use crate::quote::QuoteRequest;

/// Temp file path used while writing `path`.
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp_path = path.to_path_buf();
    let extension = tmp_path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    tmp_path.set_extension(extension);
    tmp_path
}

/// Write `bytes` to `path` with atomic write semantics.
///
/// The parent directory must already exist. Any failure is reported as
/// [`QuoteError::FileError`] naming the step that failed.
pub fn write_artifact(path: &Path, bytes: &[u8]) -> QuoteResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        QuoteError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        QuoteError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        QuoteError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(&tmp_path);
        QuoteError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load a quote request from a JSON file.
///
/// # Returns
///
/// * `Ok(QuoteRequest)` - Parsed request (not yet validated; the engine validates)
/// * `Err(QuoteError::FileError)` - I/O error
/// * `Err(QuoteError::SerializationError)` - Invalid JSON or missing fields
pub fn load_request(path: &Path) -> QuoteResult<QuoteRequest> {
    let mut file = File::open(path).map_err(|e| {
        QuoteError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        QuoteError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| QuoteError::SerializationError {
        reason: format!("Invalid quote request in {}: {}", path.display(), e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("quote_core_test_{}", name))
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(
            tmp_path_for(Path::new("/out/Quotation-Q-1.pdf")),
            Path::new("/out/Quotation-Q-1.pdf.tmp")
        );
        assert_eq!(tmp_path_for(Path::new("/out/artifact")), Path::new("/out/artifact.tmp"));
    }

    #[test]
    fn test_atomic_write_creates_no_tmp_file() {
        let path = temp_path("atomic.pdf");
        write_artifact(&path, b"%PDF-test").unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-test");

        // Overwrites an existing artifact
        write_artifact(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let path = temp_path("no_such_dir").join("nested").join("out.pdf");
        let err = write_artifact(&path, b"x").unwrap_err();
        match err {
            QuoteError::FileError { operation, .. } => assert_eq!(operation, "create temp file"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_load_request() {
        let path = temp_path("request.json");
        fs::write(
            &path,
            r#"{
                "quote_no": "Q-2024-001",
                "issue_date": "2024-01-01",
                "form": { "mode_of_service": "Sea Freight", "type_of_goods": "Personal Goods" },
                "items": [
                    { "description": "Boxes", "length_cm": 50, "breadth_cm": 40, "height_cm": 30,
                      "actual_weight_kg": 12, "quantity": 3, "rate_per_kg": 4.5 }
                ]
            }"#,
        )
        .unwrap();

        let request = load_request(&path).unwrap();
        assert_eq!(request.quote_no, "Q-2024-001");
        assert_eq!(request.items.len(), 1);
        assert!(request.adjustments.is_empty());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_request() {
        let path = temp_path("bad_request.json");
        fs::write(&path, "{ \"quote_no\": 5 }").unwrap();
        let err = load_request(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }
}
