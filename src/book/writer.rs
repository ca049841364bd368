use crate::book::tune::Tune;
use crate::AbcError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Blank line between two tunes
pub const TUNE_SEPARATOR: &str = "\n\n";

/// Concatenate the tunes' raw text in order.
pub fn render_tunes(tunes: &[Tune]) -> String {
    tunes
        .iter()
        .map(Tune::raw_text)
        .collect::<Vec<_>>()
        .join(TUNE_SEPARATOR)
}

/// Write `abc` as UTF-8 to `path`.
///
/// The content goes to a temporary file next to the target first, which is
/// then renamed over it: the target is either fully replaced or left alone.
/// An existing target keeps its permissions.
pub fn write_atomically(path: &Path, abc: &str) -> Result<(), AbcError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(directory)?;
    file.write_all(abc.as_bytes())?;
    file.as_file().sync_all()?;
    if let Ok(metadata) = std::fs::metadata(path) {
        file.as_file().set_permissions(metadata.permissions())?;
    }
    file.persist(path)?;
    log::info!("Wrote {} bytes to {path:?}", abc.len());
    Ok(())
}
