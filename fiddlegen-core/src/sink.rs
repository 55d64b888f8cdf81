//! Artifact sinks: atomic, scoped output files.
//!
//! A sink writes to `<target>.tmp` and only replaces the target on `commit`.
//! Dropping an uncommitted sink removes the temporary file, so a failed run
//! never leaves a half-written artifact behind.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::emit::Artifact;

/// An I/O failure on one artifact path.
#[derive(Debug, Error)]
#[error("failed to write artifact {}", path.display())]
pub struct SinkError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl SinkError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug)]
pub struct ArtifactSink {
    target: PathBuf,
    tmp_path: PathBuf,
    writer: Option<BufWriter<File>>,
    committed: bool,
}

impl ArtifactSink {
    /// Create (truncating) the temporary file next to `target`.
    pub fn create(target: impl Into<PathBuf>) -> io::Result<Self> {
        let target = target.into();
        let mut tmp_name = target.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = target.with_file_name(tmp_name);
        let file = File::create(&tmp_path)?;
        Ok(Self {
            target,
            tmp_path,
            writer: Some(BufWriter::new(file)),
            committed: false,
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn tmp_path(&self) -> &Path {
        &self.tmp_path
    }

    /// Flush and sync the temporary file and close it. The target is untouched.
    pub fn finish(&mut self) -> io::Result<()> {
        if let Some(writer) = self.writer.take() {
            let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
            file.sync_all()?;
        }
        Ok(())
    }

    /// Finish and atomically rename into place.
    pub fn commit(mut self) -> io::Result<PathBuf> {
        self.finish()?;
        fs::rename(&self.tmp_path, &self.target)?;
        self.committed = true;
        Ok(self.target.clone())
    }

    fn writer(&mut self) -> io::Result<&mut BufWriter<File>> {
        self.writer
            .as_mut()
            .ok_or_else(|| io::Error::other("artifact sink already closed"))
    }
}

impl Write for ArtifactSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer()?.flush()
    }
}

impl Drop for ArtifactSink {
    fn drop(&mut self) {
        if !self.committed {
            self.writer = None;
            let _ = fs::remove_file(&self.tmp_path);
        }
    }
}

/// One open sink per artifact, committed together.
#[derive(Debug)]
pub struct ArtifactSinks {
    sinks: Vec<(Artifact, ArtifactSink)>,
}

impl ArtifactSinks {
    /// Open every artifact's sink under `dir`. On error, the sinks opened so far
    /// are dropped and their temporary files removed.
    pub fn open(dir: &Path) -> Result<Self, SinkError> {
        let mut sinks = Vec::with_capacity(Artifact::ALL.len());
        for artifact in Artifact::ALL {
            let target = dir.join(artifact.file_name());
            let sink = ArtifactSink::create(&target).map_err(|e| SinkError::new(target, e))?;
            sinks.push((artifact, sink));
        }
        Ok(Self { sinks })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Artifact, &mut ArtifactSink)> {
        self.sinks.iter_mut().map(|(artifact, sink)| (*artifact, sink))
    }

    /// Finish every sink, then rename each into place in emission order.
    ///
    /// A write or sync failure on any artifact leaves every target untouched.
    /// Each rename is atomic for its own file only: a rename failure part way
    /// through leaves the earlier targets replaced.
    pub fn commit_all(mut self) -> Result<Vec<PathBuf>, SinkError> {
        for (_, sink) in &mut self.sinks {
            sink.finish()
                .map_err(|e| SinkError::new(sink.target().to_path_buf(), e))?;
        }
        let mut committed = Vec::with_capacity(self.sinks.len());
        for (_, sink) in self.sinks {
            let target = sink.target().to_path_buf();
            committed.push(sink.commit().map_err(|e| SinkError::new(target, e))?);
        }
        Ok(committed)
    }
}
