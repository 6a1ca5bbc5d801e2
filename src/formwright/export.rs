//! Writing generated artifacts somewhere.
//!
//! [`export`] produces the full artifact set and hands each file to an
//! [`ArtifactSink`]: a directory, a `.tar.gz` bundle or memory. A form with
//! no real elements exports nothing.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::generate;
use crate::model::Document;
use crate::settings::ConfirmationSettings;
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const EMPTY_FORM_MESSAGE: &str = "Your form is empty. Add rows and elements to export.";
pub const BUNDLE_DIR: &str = "form";

pub const HTML_FILE: &str = "form.html";
pub const CSS_FILE: &str = "form.css";
pub const JS_FILE: &str = "form.js";
pub const CONFIRMATION_FILE: &str = "confirmation.php";
pub const PAGE_FILE: &str = "index.html";

pub trait ArtifactSink {
    fn write_artifact(&mut self, name: &str, contents: &str) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes artifacts as files in a directory, creating it if needed.
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirSink {
    fn write_artifact(&mut self, name: &str, contents: &str) -> Result<()> {
        fs::write(self.dir.join(name), contents)?;
        Ok(())
    }
}

/// Writes artifacts into a gzipped tarball under a `form/` directory.
pub struct TarGzSink<W: Write> {
    builder: Option<tar::Builder<GzEncoder<W>>>,
    mtime: u64,
}

impl<W: Write> TarGzSink<W> {
    pub fn new(writer: W) -> Self {
        let enc = GzEncoder::new(writer, Compression::default());
        Self {
            builder: Some(tar::Builder::new(enc)),
            mtime: Utc::now().timestamp().max(0) as u64,
        }
    }
}

impl<W: Write> ArtifactSink for TarGzSink<W> {
    fn write_artifact(&mut self, name: &str, contents: &str) -> Result<()> {
        let Some(tar) = self.builder.as_mut() else {
            return Err(crate::error::FormError::Api(
                "bundle already finished".to_string(),
            ));
        };
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(self.mtime);
        header.set_cksum();
        tar.append_data(
            &mut header,
            format!("{}/{}", BUNDLE_DIR, name),
            contents.as_bytes(),
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(tar) = self.builder.take() {
            let enc = tar.into_inner()?;
            enc.finish()?.flush()?;
        }
        Ok(())
    }
}

/// Keeps artifacts in memory, keyed by file name.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: BTreeMap<String, String>,
}

impl ArtifactSink for MemorySink {
    fn write_artifact(&mut self, name: &str, contents: &str) -> Result<()> {
        self.files.insert(name.to_string(), contents.to_string());
        Ok(())
    }
}

/// Generates every artifact and writes it to `sink`.
pub fn export(
    document: &Document,
    settings: &ConfirmationSettings,
    sink: &mut dyn ArtifactSink,
) -> Result<CmdResult> {
    if !document.has_real_elements() {
        return Ok(CmdResult::unchanged(document.clone())
            .with_message(CmdMessage::info(EMPTY_FORM_MESSAGE)));
    }

    let artifacts = generate::generate(document, settings)?;
    let files = [
        (HTML_FILE, artifacts.html),
        (CSS_FILE, artifacts.css),
        (JS_FILE, artifacts.js),
        (
            CONFIRMATION_FILE,
            generate::generate_confirmation_snippet(settings)?,
        ),
        (PAGE_FILE, generate::generate_page(document, settings)?),
    ];

    let mut result = CmdResult::unchanged(document.clone());
    for (name, contents) in &files {
        sink.write_artifact(name, contents)?;
        log::debug!("wrote {} ({} bytes)", name, contents.len());
    }
    sink.finish()?;

    result.add_message(CmdMessage::success(format!(
        "Exported {} files: {}",
        files.len(),
        files
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    )));
    Ok(result)
}

/// Exports into the directory `dir`. The directory is only created when
/// there is something to write.
pub fn export_to_dir(
    document: &Document,
    settings: &ConfirmationSettings,
    dir: &Path,
) -> Result<CmdResult> {
    if !document.has_real_elements() {
        return export(document, settings, &mut MemorySink::default());
    }
    let mut sink = DirSink::new(dir)?;
    let mut result = export(document, settings, &mut sink)?;
    result.add_message(CmdMessage::info(format!("Written to {}", sink.dir().display())));
    Ok(result)
}

/// Exports into a `.tar.gz` at `path`. Nothing is created for an empty form.
pub fn bundle(
    document: &Document,
    settings: &ConfirmationSettings,
    path: &Path,
) -> Result<CmdResult> {
    let mut rendered = MemorySink::default();
    let mut result = export(document, settings, &mut rendered)?;
    if rendered.files.is_empty() {
        return Ok(result);
    }
    if let Err(e) = write_bundle(&rendered, path) {
        let _ = fs::remove_file(path);
        return Err(e);
    }
    result.add_message(CmdMessage::success(format!(
        "Bundle written to {}",
        path.display()
    )));
    Ok(result)
}

// Runs only after every artifact has rendered.
fn write_bundle(rendered: &MemorySink, path: &Path) -> Result<()> {
    let mut sink = TarGzSink::new(File::create(path)?);
    for (name, contents) in &rendered.files {
        sink.write_artifact(name, contents)?;
    }
    sink.finish()
}
