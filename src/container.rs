//! ZIP container access for the spreadsheet package.

use crate::error::{Error, Result};
use crate::limits::ZIP_MAGIC;
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// Read access to the XML parts packaged inside an XLSX container.
///
/// Opening verifies the container signature before ZIP parsing, so a
/// truncated or non-ZIP file is rejected with a corruption error rather than
/// a confusing archive failure. Entry names use forward-slash paths
/// mirroring the packaged layout (e.g. `xl/worksheets/sheet1.xml`).
pub struct PackageReader {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl PackageReader {
    /// Open a spreadsheet container from a file path.
    ///
    /// Fails with [`Error::NotFound`] when the path does not resolve to a
    /// readable file, and with [`Error::CorruptArchive`] when the first four
    /// bytes are not the ZIP magic or the archive index cannot be parsed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sheetvet::container::PackageReader;
    ///
    /// let pkg = PackageReader::open("workbook.xlsx")?;
    /// # Ok::<(), sheetvet::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(path.display().to_string())
            } else {
                Error::Io(e)
            }
        })?;

        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create a reader over an in-memory container.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.len() < 4 || data[..4] != ZIP_MAGIC {
            return Err(Error::CorruptArchive("invalid header".to_string()));
        }

        let cursor = Cursor::new(data);
        let archive = zip::ZipArchive::new(cursor)
            .map_err(|_| Error::CorruptArchive("zip structure corrupted".to_string()))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// List all entry names in archive order.
    pub fn entry_names(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        archive.file_names().map(String::from).collect()
    }

    /// Check whether a named entry exists.
    pub fn has_entry(&self, name: &str) -> bool {
        self.archive.borrow().file_names().any(|n| n == name)
    }

    /// Read the raw bytes of a named entry.
    pub fn read_entry(&self, name: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(name)
            .map_err(|_| Error::EntryMissing(name.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Read a named entry as XML text.
    ///
    /// Strips a UTF-8 BOM if present; otherwise decodes lossily so that a
    /// malformed part degrades to an XML parse failure downstream instead of
    /// aborting the whole run.
    pub fn read_xml(&self, name: &str) -> Result<String> {
        let bytes = self.read_entry(name)?;
        let bytes = match bytes.strip_prefix(&[0xEF, 0xBB, 0xBF][..]) {
            Some(rest) => rest,
            None => &bytes[..],
        };
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

impl std::fmt::Debug for PackageReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageReader")
            .field("entries", &self.entry_names().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            let options = SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Stored);
            for (name, content) in entries {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content.as_bytes()).unwrap();
            }
            writer.finish().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_rejects_invalid_header() {
        let result = PackageReader::from_bytes(b"not a zip file".to_vec());
        assert!(matches!(result, Err(Error::CorruptArchive(msg)) if msg == "invalid header"));
    }

    #[test]
    fn test_rejects_corrupted_zip_structure() {
        // Valid magic, garbage index.
        let result = PackageReader::from_bytes(b"PK\x03\x04corrupted".to_vec());
        assert!(
            matches!(result, Err(Error::CorruptArchive(msg)) if msg == "zip structure corrupted")
        );
    }

    #[test]
    fn test_entry_lookup() {
        let data = zip_bytes(&[
            ("xl/workbook.xml", "<workbook/>"),
            ("xl/worksheets/sheet1.xml", "<worksheet/>"),
        ]);
        let pkg = PackageReader::from_bytes(data).unwrap();

        assert!(pkg.has_entry("xl/workbook.xml"));
        assert!(!pkg.has_entry("xl/sharedStrings.xml"));
        assert_eq!(pkg.entry_names().len(), 2);

        let bytes = pkg.read_entry("xl/workbook.xml").unwrap();
        assert_eq!(bytes, b"<workbook/>");

        let result = pkg.read_entry("missing.xml");
        assert!(matches!(result, Err(Error::EntryMissing(name)) if name == "missing.xml"));
    }

    #[test]
    fn test_read_xml_strips_bom() {
        let content = "\u{FEFF}<workbook/>";
        let data = zip_bytes(&[("xl/workbook.xml", content)]);
        let pkg = PackageReader::from_bytes(data).unwrap();

        let xml = pkg.read_xml("xl/workbook.xml").unwrap();
        assert_eq!(xml, "<workbook/>");
    }

    #[test]
    fn test_open_missing_file() {
        let result = PackageReader::open("no-such-file.xlsx");
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
