#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use crate::wad::error::{WadError, WadResult};
use crate::wad::path::output_path;

/// Receives the payloads of `Extract` records.
///
/// `data` is exactly the declared payload length; alignment padding is never
/// passed on.
pub trait PayloadSink {
    fn accept(&mut self, name: &str, data: &[u8]) -> WadResult<()>;
}

fn write_err(path: &Path) -> impl FnOnce(std::io::Error) -> WadError + '_ {
    move |source| WadError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes every payload to `root/name`.
#[derive(Debug)]
pub struct DirSink {
    root: PathBuf,
    created: bool,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            created: false,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PayloadSink for DirSink {
    fn accept(&mut self, name: &str, data: &[u8]) -> WadResult<()> {
        if !self.created {
            std::fs::create_dir_all(&self.root).map_err(write_err(&self.root))?;
            self.created = true;
        }

        let path = output_path(&self.root, name)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err(parent))?;
        }
        tracing::info!("creating file {}", path.display());
        std::fs::write(&path, data).map_err(write_err(&path))?;
        Ok(())
    }
}

/// Keeps payloads in memory, in walk order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<(String, Vec<u8>)>,
}

impl PayloadSink for MemorySink {
    fn accept(&mut self, name: &str, data: &[u8]) -> WadResult<()> {
        self.files.push((name.to_string(), data.to_vec()));
        Ok(())
    }
}

/// Drops every payload; used for listing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PayloadSink for NullSink {
    fn accept(&mut self, _name: &str, _data: &[u8]) -> WadResult<()> {
        Ok(())
    }
}
