use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const WRITE_BUFFER: usize = 8192;

/// Size based rotating file writer.
///
/// The active file lives at `base_path`, backups at `base_path.1` up to
/// `base_path.<backup_count>` where `.1` is the most recent one. Every call to
/// [`LogRotator::write_record`] (and [`Write::write`]) is treated as one
/// record that always lands whole in a single file.
pub struct LogRotator {
    base_path: PathBuf,
    max_bytes: u64,
    backup_count: usize,
    current_writer: BufWriter<File>,
    current_size: u64,
}

impl LogRotator {
    pub fn new<P: AsRef<Path>>(base_path: P, max_bytes: u64, backup_count: usize) -> io::Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&base_path)?;

        let current_size = file.metadata()?.len();
        let writer = BufWriter::with_capacity(WRITE_BUFFER, file);

        Ok(LogRotator {
            base_path,
            max_bytes,
            backup_count,
            current_writer: writer,
            current_size,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn backup_count(&self) -> usize {
        self.backup_count
    }

    /// Bytes in the active file, including data still sitting in the buffer.
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    pub fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.base_path.clone().into_os_string();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    fn should_rotate(&self, incoming: usize) -> bool {
        self.max_bytes > 0
            && self.current_size > 0
            && self.current_size + incoming as u64 > self.max_bytes
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.current_writer.flush()?;

        if self.backup_count > 0 {
            let oldest = self.backup_path(self.backup_count);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }

            for i in (1..self.backup_count).rev() {
                let current = self.backup_path(i);
                if current.exists() {
                    fs::rename(current, self.backup_path(i + 1))?;
                }
            }

            fs::rename(&self.base_path, self.backup_path(1))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.base_path)?;

        self.current_writer = BufWriter::with_capacity(WRITE_BUFFER, file);
        self.current_size = 0;
        log::debug!("rotated {}", self.base_path.display());
        Ok(())
    }

    /// Writes one record, rotating first when it would push the active file
    /// past `max_bytes`.
    pub fn write_record(&mut self, data: &[u8]) -> io::Result<()> {
        if self.should_rotate(data.len()) {
            self.rotate()?;
        }
        self.current_writer.write_all(data)?;
        self.current_size += data.len() as u64;
        Ok(())
    }

    /// Active file first, then backups from newest to oldest.
    pub fn existing_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        if self.base_path.exists() {
            files.push(self.base_path.clone());
        }
        for i in 1..=self.backup_count {
            let path = self.backup_path(i);
            if path.exists() {
                files.push(path);
            }
        }
        files
    }

    /// Content of every retained file in write order, oldest first.
    pub fn read_all(&mut self) -> io::Result<Vec<u8>> {
        self.current_writer.flush()?;
        let mut buffer = Vec::new();
        for path in self.existing_files().iter().rev() {
            buffer.extend(fs::read(path)?);
        }
        Ok(buffer)
    }
}

impl Write for LogRotator {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.write_record(data)?;
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.current_writer.flush()
    }
}

impl Drop for LogRotator {
    fn drop(&mut self) {
        let _ = self.current_writer.flush();
    }
}
