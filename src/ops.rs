#![forbid(unsafe_code)]

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::gfx::{Gfx, GfxError};
use crate::wad::{self, DirSink, NullSink, WadError, WadVersion, WalkSummary};

#[derive(Debug, Error)]
pub enum OpsError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("{path}: {source}")]
    Wad { path: PathBuf, source: WadError },

    #[error("{path}: {source}")]
    Gfx { path: PathBuf, source: GfxError },

    #[error("{failed} of {total} wads failed")]
    Batch { failed: usize, total: usize },
}

pub type OpsResult<T> = Result<T, OpsError>;

fn open(path: &Path) -> OpsResult<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

fn wad_err(path: &Path) -> impl FnOnce(WadError) -> OpsError + '_ {
    move |source| OpsError::Wad {
        path: path.to_path_buf(),
        source,
    }
}

pub fn detect(path: &Path) -> OpsResult<WadVersion> {
    let mut f = open(path)?;
    let v = wad::detect_version(&mut f).map_err(wad_err(path))?;
    println!("{}: {v}", path.display());
    Ok(v)
}

/// Walks a wad without extracting and prints its record tree.
pub fn list(path: &Path, version: Option<WadVersion>) -> OpsResult<WalkSummary> {
    let mut f = open(path)?;
    let summary = wad::unpack(&mut f, version, &mut NullSink).map_err(wad_err(path))?;

    for e in &summary.records {
        println!(
            "{}{:08x}:{:04x}:{:04x}:{:08x} {:?} {}",
            "- ".repeat(e.depth as usize),
            e.offset,
            e.record.tag,
            e.record.param,
            e.size,
            e.action,
            e.record.name
        );
    }
    for d in &summary.duplicates {
        println!(
            "duplicate {} at {:08x} ({})",
            d.name,
            d.offset,
            if d.same_content() { "same data" } else { "different data" }
        );
    }
    println!("{} records, version {}", summary.records.len(), summary.version);
    Ok(summary)
}

/// Extracts one wad into `output`.
pub fn extract_one(
    path: &Path,
    output: &Path,
    version: Option<WadVersion>,
) -> OpsResult<WalkSummary> {
    let mut f = open(path)?;
    let mut sink = DirSink::new(output);
    let summary = wad::unpack(&mut f, version, &mut sink).map_err(wad_err(path))?;
    tracing::info!(
        "{}: {} files -> {} ({} duplicates)",
        path.display(),
        summary.extracted,
        sink.root().display(),
        summary.duplicates.len()
    );
    Ok(summary)
}

fn is_wad(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wad"))
}

/// Extracts a wad, or every `*.wad` under a directory into
/// `output/<file stem>/`. A broken wad does not stop the others.
pub fn extract(input: &Path, output: &Path, version: Option<WadVersion>) -> OpsResult<usize> {
    if !input.is_dir() {
        return extract_one(input, output, version).map(|s| s.extracted);
    }

    let mut wads: Vec<PathBuf> = Vec::new();
    for ent in WalkDir::new(input).follow_links(false).into_iter() {
        let ent = ent.map_err(|e| {
            let msg = e.to_string();
            e.into_io_error()
                .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, msg))
        })?;
        if ent.file_type().is_file() && is_wad(ent.path()) {
            wads.push(ent.path().to_path_buf());
        }
    }
    wads.sort();

    let mut extracted = 0;
    let mut failed = 0;
    for w in &wads {
        let stem = w.file_stem().unwrap_or(w.as_os_str());
        match extract_one(w, &output.join(stem), version) {
            Ok(s) => extracted += s.extracted,
            Err(e) => {
                tracing::error!("{e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(OpsError::Batch {
            failed,
            total: wads.len(),
        });
    }
    Ok(extracted)
}

/// Prints a gfx summary and, optionally, one plane decoded as a palette.
pub fn gfx(path: &Path, palette: Option<usize>) -> OpsResult<Gfx> {
    let gfx_err = |source| OpsError::Gfx {
        path: path.to_path_buf(),
        source,
    };

    let mut f = open(path)?;
    let gfx = Gfx::decode(&mut f).map_err(gfx_err)?;
    println!("{gfx}");

    if let Some(idx) = palette {
        let pal = gfx.palette(idx).map_err(gfx_err)?;
        for (i, c) in pal.colors.iter().enumerate() {
            println!("{i:4}: #{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a);
        }
    }
    Ok(gfx)
}
