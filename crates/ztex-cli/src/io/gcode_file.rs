// crates/ztex-cli/src/io/gcode_file.rs

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use ztex_core::Document;

pub fn read_document(path: &str) -> anyhow::Result<Document> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
    Ok(Document::parse(&text))
}

/// Write through a temp file in the destination directory, then rename over
/// `path`, so an in-place rewrite never leaves a truncated program behind.
pub fn write_document(path: &str, doc: &Document) -> anyhow::Result<()> {
    let dest = Path::new(path);
    let dir = match dest.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    tmp.write_all(doc.render().as_bytes())
        .with_context(|| format!("write {path}"))?;
    tmp.persist(dest)
        .map_err(|e| e.error)
        .with_context(|| format!("replace {path}"))?;
    Ok(())
}
