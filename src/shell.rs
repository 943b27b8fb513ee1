//! Save operations behind the desktop front end.
//!
//! The window itself is not modelled; whatever hosts the web view hands a
//! [`SaveDialog`] to a [`Session`] and routes the two save calls to it.

use crate::error::{CompressionError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_SAVE_EXTENSION: &str = "png";

/// Native file pickers. `None` means the user dismissed the dialog.
pub trait SaveDialog {
    fn choose_file(&self, suggested_name: &str, extension: &str) -> Option<PathBuf>;
    fn choose_folder(&self) -> Option<PathBuf>;
}

/// A compressed file handed over by the front end as a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePayload {
    pub filename: String,
    pub data_url: String,
}

impl SavePayload {
    pub fn new(filename: impl Into<String>, data_url: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            data_url: data_url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { path: PathBuf },
    SavedAll { count: usize, folder: PathBuf },
    Cancelled,
    Failed { reason: String },
}

impl SaveOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SaveOutcome::Saved { .. } | SaveOutcome::SavedAll { .. })
    }
}

/// Per-window state for the save handlers.
pub struct Session<D: SaveDialog> {
    dialog: D,
}

impl<D: SaveDialog> Session<D> {
    pub fn new(dialog: D) -> Self {
        Self { dialog }
    }

    pub fn dialog(&self) -> &D {
        &self.dialog
    }

    /// Asks for a destination and writes one payload there.
    pub fn save_file(&self, filename: &str, data_url: &str) -> SaveOutcome {
        let data = match decode_data_url(data_url) {
            Ok(data) => data,
            Err(e) => return failed(e),
        };

        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or(DEFAULT_SAVE_EXTENSION);

        let Some(path) = self.dialog.choose_file(filename, extension) else {
            return SaveOutcome::Cancelled;
        };

        match fs::write(&path, data) {
            Ok(()) => {
                log::info!("Saved {}", path.display());
                SaveOutcome::Saved { path }
            }
            Err(e) => failed(e.into()),
        }
    }

    /// Asks for a folder and writes every payload into it under its own name.
    pub fn save_all_files(&self, files: &[SavePayload]) -> SaveOutcome {
        let Some(folder) = self.dialog.choose_folder() else {
            return SaveOutcome::Cancelled;
        };

        match write_all(&folder, files) {
            Ok(count) => {
                log::info!("Saved {} files to {}", count, folder.display());
                SaveOutcome::SavedAll { count, folder }
            }
            Err(e) => failed(e),
        }
    }
}

fn write_all(folder: &Path, files: &[SavePayload]) -> Result<usize> {
    for file in files {
        let data = decode_data_url(&file.data_url)?;
        fs::write(folder.join(&file.filename), data)?;
    }
    Ok(files.len())
}

fn failed(e: CompressionError) -> SaveOutcome {
    log::warn!("Save failed: {}", e);
    SaveOutcome::Failed {
        reason: e.to_string(),
    }
}

/// Extracts the bytes of a base64 `data:` URL (`data:image/png;base64,...`).
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let (_, encoded) = data_url
        .split_once(',')
        .ok_or_else(|| CompressionError::InvalidDataUrl("missing ',' separator".to_string()))?;

    STANDARD
        .decode(encoded.trim())
        .map_err(|e| CompressionError::InvalidDataUrl(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    struct FakeDialog {
        file: Option<PathBuf>,
        folder: Option<PathBuf>,
        asked_extension: RefCell<Option<String>>,
    }

    impl SaveDialog for FakeDialog {
        fn choose_file(&self, _suggested_name: &str, extension: &str) -> Option<PathBuf> {
            *self.asked_extension.borrow_mut() = Some(extension.to_string());
            self.file.clone()
        }

        fn choose_folder(&self) -> Option<PathBuf> {
            self.folder.clone()
        }
    }

    fn dialog(file: Option<PathBuf>, folder: Option<PathBuf>) -> FakeDialog {
        FakeDialog {
            file,
            folder,
            asked_extension: RefCell::new(None),
        }
    }

    fn data_url(bytes: &[u8]) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(bytes))
    }

    #[test]
    fn test_decode_data_url() {
        assert_eq!(decode_data_url(&data_url(b"hello")).unwrap(), b"hello");
        assert!(matches!(
            decode_data_url("no separator"),
            Err(CompressionError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64,@@@"),
            Err(CompressionError::InvalidDataUrl(_))
        ));
    }

    #[test]
    fn test_save_file_writes_payload() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("picked.webp");
        let session = Session::new(dialog(Some(target.clone()), None));

        let outcome = session.save_file("photo.webp", &data_url(b"RIFF...."));

        assert_eq!(outcome, SaveOutcome::Saved { path: target.clone() });
        assert_eq!(std::fs::read(&target).unwrap(), b"RIFF....");
        assert_eq!(
            session.dialog().asked_extension.borrow().as_deref(),
            Some("webp")
        );
    }

    #[test]
    fn test_save_file_defaults_extension() {
        let session = Session::new(dialog(None, None));
        let outcome = session.save_file("untitled", &data_url(b"x"));

        assert_eq!(outcome, SaveOutcome::Cancelled);
        assert_eq!(
            session.dialog().asked_extension.borrow().as_deref(),
            Some("png")
        );
    }

    #[test]
    fn test_save_file_bad_payload() {
        let session = Session::new(dialog(None, None));
        let outcome = session.save_file("a.png", "garbage");
        assert!(matches!(outcome, SaveOutcome::Failed { .. }));
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_save_all_files() {
        let temp_dir = TempDir::new().unwrap();
        let session = Session::new(dialog(None, Some(temp_dir.path().to_path_buf())));
        let files = vec![
            SavePayload::new("a.png", data_url(b"one")),
            SavePayload::new("b.jpg", data_url(b"two")),
        ];

        let outcome = session.save_all_files(&files);

        assert_eq!(
            outcome,
            SaveOutcome::SavedAll {
                count: 2,
                folder: temp_dir.path().to_path_buf()
            }
        );
        assert_eq!(std::fs::read(temp_dir.path().join("b.jpg")).unwrap(), b"two");
    }

    #[test]
    fn test_save_all_files_cancelled() {
        let session = Session::new(dialog(None, None));
        let outcome = session.save_all_files(&[SavePayload::new("a.png", data_url(b"x"))]);
        assert_eq!(outcome, SaveOutcome::Cancelled);
    }

    #[test]
    fn test_save_all_files_missing_folder_fails() {
        let session = Session::new(dialog(None, Some(PathBuf::from("/nonexistent/folder"))));
        let outcome = session.save_all_files(&[SavePayload::new("a.png", data_url(b"x"))]);
        assert!(matches!(outcome, SaveOutcome::Failed { .. }));
    }
}
