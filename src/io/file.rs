use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Stdout, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use tempfile::NamedTempFile;

/// `-` stands for stdin/stdout.
pub fn is_std_stream(path: &Path) -> bool { path == Path::new("-") }

pub fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Open the input as a buffered stream, stdin if `path` is `None` or `-`.
/// `.gz` files are decompressed.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    let Some(path) = path.filter(|p| !is_std_stream(p)) else {
        return Ok(Box::new(io::stdin().lock()));
    };

    let file = File::open(path)
        .with_context(|| format!("[io::file] Failed to open input: {}", path.display()))?;
    Ok(if is_gzip(path) { Box::new(BufReader::new(GzDecoder::new(file))) } else { Box::new(BufReader::new(file)) })
}

/// Read the whole input, see [`open_input`].
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    open_input(path)?.read_to_end(&mut bytes)
        .with_context(|| format!("[io::file] Failed to read input: {}", path.map_or("stdin".into(), |p| p.display().to_string())))?;
    Ok(bytes)
}

/// Write-then-rename wrapper so a failed run never leaves a partial output file.
pub struct PendingWrite {
    target: PathBuf,
    tmp: NamedTempFile,
}

pub fn open_for_write(target: &Path, force: bool) -> Result<PendingWrite> {
    let dir = target.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    fs::create_dir_all(dir)
        .with_context(|| format!("[io::file] Failed to create directory {}", dir.display()))?;
    if !force && target.exists() {
        bail!("[io::file] Refusing to overwrite existing file: {} (use --force)", target.display());
    }
    let tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("[io::file] Failed to create temp file in {}", dir.display()))?;

    Ok(PendingWrite { target: target.to_path_buf(), tmp })
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.tmp.write(buf) }
    fn flush(&mut self) -> io::Result<()> { self.tmp.flush() }
}

impl PendingWrite {
    /// Move the finished temp file into place.
    pub fn finalize(self) -> Result<()> {
        self.tmp.as_file().sync_all().ok(); // best-effort fsync
        self.tmp.persist(&self.target)
            .with_context(|| format!("[io::file] Failed to rename output to {}", self.target.display()))?;
        Ok(())
    }
}

/// Output endpoint chosen from the output path.
pub enum Sink {
    Stdout(BufWriter<Stdout>),
    File(BufWriter<PendingWrite>),
    Gzip(GzEncoder<BufWriter<PendingWrite>>),
}

impl Sink {
    /// Stdout for `None` or `-`, otherwise an atomic file write, gzipped for `.gz`.
    pub fn open(path: Option<&Path>, force: bool) -> Result<Self> {
        let Some(path) = path.filter(|p| !is_std_stream(p)) else {
            return Ok(Sink::Stdout(BufWriter::new(io::stdout())));
        };
        let pending = BufWriter::new(open_for_write(path, force)?);
        Ok(if is_gzip(path) { Sink::Gzip(GzEncoder::new(pending, Compression::default())) } else { Sink::File(pending) })
    }

    #[inline] pub fn is_stdout(&self) -> bool { matches!(self, Sink::Stdout(_)) }

    /// Flush everything and, for files, move the output into place.
    pub fn finish(self) -> Result<()> {
        let pending = match self {
            Sink::Stdout(mut out) => return out.flush().context("[io::file] Failed to flush stdout"),
            Sink::File(pending) => pending,
            Sink::Gzip(encoder) => encoder.finish().context("[io::file] Failed to finish gzip stream")?,
        };
        pending.into_inner()
            .map_err(|e| anyhow::anyhow!("[io::file] Failed to flush output: {}", e.error()))?
            .finalize()
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout(w) => w.write(buf),
            Sink::File(w) => w.write(buf),
            Sink::Gzip(w) => w.write(buf),
        }
    }
    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout(w) => w.flush(),
            Sink::File(w) => w.flush(),
            Sink::Gzip(w) => w.flush(),
        }
    }
}
