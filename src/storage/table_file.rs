//! Table File
//!
//! Whole-file I/O for one table: create, append, read, atomic rewrite.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::config::SyncStrategy;
use crate::error::{FlatError, Result};

/// Raw contents of a table file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableContents {
    /// First line, terminator removed
    pub header: String,

    /// Remaining lines in file order, terminators removed
    pub lines: Vec<String>,
}

/// Handle on the backing file of one table
///
/// Holds no open file descriptor; each call opens and closes the file.
#[derive(Debug, Clone)]
pub struct TableFile {
    /// Table name, used in errors
    name: String,
    path: PathBuf,
    sync_strategy: SyncStrategy,
}

impl TableFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, sync_strategy: SyncStrategy) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            sync_strategy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create or truncate the file and write the header line
    ///
    /// Returns true if an existing file was replaced.
    pub fn create(&self, header: &str) -> Result<bool> {
        let existed = self.exists();

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        writer.write_all(header.as_bytes())?;
        writer.write_all(b"\n")?;
        self.finish(writer)?;

        Ok(existed)
    }

    /// Append one line to an existing file
    ///
    /// If the file does not end with a line terminator (written by another
    /// tool), one is added first so the new line stays separate.
    pub fn append_line(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.map_open_error(e))?;

        let mut buf = Vec::with_capacity(line.len() + 2);
        if !Self::ends_with_newline(&mut file)? {
            buf.push(b'\n');
        }
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');

        // Single write call in append mode: the line lands whole at EOF
        file.write_all(&buf)?;
        if self.sync_strategy == SyncStrategy::EveryWrite {
            file.sync_data()?;
        }

        Ok(())
    }

    /// Read only the header line
    pub fn read_header(&self) -> Result<String> {
        let file = File::open(&self.path).map_err(|e| self.map_open_error(e))?;
        let mut reader = BufReader::new(file);

        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            return Err(FlatError::CorruptHeader(format!(
                "table '{}' has no header line",
                self.name
            )));
        }

        Ok(header.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Read the header and every record line
    pub fn read_all(&self) -> Result<TableContents> {
        let file = File::open(&self.path).map_err(|e| self.map_open_error(e))?;
        let mut lines = BufReader::new(file).lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(FlatError::CorruptHeader(format!(
                    "table '{}' has no header line",
                    self.name
                )))
            }
        };

        let lines = lines.collect::<io::Result<Vec<String>>>()?;

        Ok(TableContents { header, lines })
    }

    /// Replace the whole file with a header and the given lines
    ///
    /// Writes to a sibling temp file and renames it over the table file, so
    /// a crash leaves either the old or the new contents.
    pub fn rewrite<'a, I>(&self, header: &str, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let tmp_path = self.tmp_path();

        let result = (|| -> Result<()> {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(header.as_bytes())?;
            writer.write_all(b"\n")?;
            for line in lines {
                writer.write_all(line.as_bytes())?;
                writer.write_all(b"\n")?;
            }
            self.finish(writer)?;
            fs::rename(&tmp_path, &self.path)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
            return result;
        }

        if self.sync_strategy == SyncStrategy::EveryWrite {
            self.sync_parent_dir()?;
        }

        Ok(())
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Flush a writer and fsync per the sync strategy
    fn finish(&self, mut writer: BufWriter<File>) -> Result<()> {
        writer.flush()?;
        let file = writer
            .into_inner()
            .map_err(|e| FlatError::Io(e.into_error()))?;
        if self.sync_strategy == SyncStrategy::EveryWrite {
            file.sync_all()?;
        }
        Ok(())
    }

    fn ends_with_newline(file: &mut File) -> Result<bool> {
        let len = file.metadata()?.len();
        if len == 0 {
            return Ok(true);
        }
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        Ok(last[0] == b'\n')
    }

    /// "users.csv" → "users.csv.tmp"
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    #[cfg(unix)]
    fn sync_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
            File::open(dir)?.sync_all()?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_parent_dir(&self) -> Result<()> {
        Ok(())
    }

    fn map_open_error(&self, e: io::Error) -> FlatError {
        if e.kind() == ErrorKind::NotFound {
            FlatError::TableNotFound(self.name.clone())
        } else {
            FlatError::Io(e)
        }
    }
}
