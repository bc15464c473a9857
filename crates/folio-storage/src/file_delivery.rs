//! Delivery of export payloads to the file system

use folio_core::error::{FolioError, Result};
use folio_core::export::{Delivery, ExportPayload};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes payloads into an output directory
#[derive(Debug, Clone)]
pub struct FileSystemDelivery {
    output_dir: PathBuf,
    overwrite: bool,
}

impl FileSystemDelivery {
    /// Deliver into `output_dir`, created on first save
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            overwrite: true,
        }
    }

    /// Refuse to replace existing files
    pub fn no_overwrite(mut self) -> Self {
        self.overwrite = false;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Final path for a payload filename
    pub fn target_path(&self, filename: &str) -> Result<PathBuf> {
        let name = Path::new(filename)
            .file_name()
            .filter(|name| *name == std::ffi::OsStr::new(filename))
            .ok_or_else(|| FolioError::Delivery(format!("Invalid file name '{}'", filename)))?;
        Ok(self.output_dir.join(name))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir).map_err(|e| {
                FolioError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create output directory: {}", e),
                ))
            })?;
            debug!("Created output directory: {:?}", self.output_dir);
        }
        Ok(())
    }
}

impl Delivery for FileSystemDelivery {
    fn save(&mut self, payload: &ExportPayload) -> Result<PathBuf> {
        let final_path = self.target_path(&payload.filename)?;
        if !self.overwrite && final_path.exists() {
            return Err(FolioError::Delivery(format!(
                "{} already exists",
                final_path.display()
            )));
        }
        self.ensure_dir()?;

        let temp_path = self.output_dir.join(format!(".{}.tmp", payload.filename));
        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            FolioError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        writer.write_all(&payload.body)?;
        writer.flush()?;
        drop(writer);

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            FolioError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        info!(
            "Wrote {} ({} bytes, {}) to {:?}",
            payload.filename,
            payload.size(),
            payload.media_type,
            final_path
        );
        Ok(final_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn payload(name: &str, body: &str) -> ExportPayload {
        ExportPayload::text_body(body.to_string(), "text/plain", name)
    }

    #[test]
    fn test_save_creates_directory() {
        let temp = TempDir::new().unwrap();
        let mut delivery = FileSystemDelivery::new(temp.path().join("out/nested"));

        let path = delivery.save(&payload("notes.txt", "Hello")).unwrap();
        assert_eq!(path, temp.path().join("out/nested/notes.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "Hello");
    }

    #[test]
    fn test_no_temp_file_left() {
        let temp = TempDir::new().unwrap();
        let mut delivery = FileSystemDelivery::new(temp.path());
        delivery.save(&payload("a.txt", "x")).unwrap();

        let names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt".to_string()]);
    }

    #[test]
    fn test_overwrite() {
        let temp = TempDir::new().unwrap();
        let mut delivery = FileSystemDelivery::new(temp.path());
        delivery.save(&payload("a.txt", "first")).unwrap();
        let path = delivery.save(&payload("a.txt", "second")).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "second");

        let mut strict = FileSystemDelivery::new(temp.path()).no_overwrite();
        let err = strict.save(&payload("a.txt", "third")).unwrap_err();
        assert!(matches!(err, FolioError::Delivery(_)));
    }

    #[test]
    fn test_rejects_path_components() {
        let temp = TempDir::new().unwrap();
        let mut delivery = FileSystemDelivery::new(temp.path());
        assert!(delivery.save(&payload("../escape.txt", "x")).is_err());
        assert!(delivery.save(&payload("", "x")).is_err());
    }

    #[test]
    fn test_binary_body() {
        let temp = TempDir::new().unwrap();
        let mut delivery = FileSystemDelivery::new(temp.path());
        let bytes = vec![0x25, 0x50, 0x44, 0x46, 0xE2, 0xE3];
        let path = delivery
            .save(&ExportPayload::new(bytes.clone(), "application/pdf", "doc.pdf"))
            .unwrap();
        assert_eq!(fs::read(path).unwrap(), bytes);
    }
}
