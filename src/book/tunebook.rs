use crate::book::renumber::{check_reference_line, renumber};
use crate::book::tune::Tune;
use crate::book::writer::{render_tunes, write_atomically};
use crate::parser::encoding::{decode_with_fallback, TextEncoding};
use crate::parser::tunebook_parser::parse_tunebook;
use crate::AbcError;
use std::path::{Path, PathBuf};

/// An ordered collection of tunes backed by an ABC file.
///
/// Reference numbers always run from 1 to `len()` in container order after a
/// load, an append, a remove and before every write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tunebook {
    path: Option<PathBuf>,
    encoding: Option<TextEncoding>,
    tunes: Vec<Tune>,
}

impl Tunebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a tunebook, trying every candidate encoding in turn.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AbcError> {
        Self::load_with_encodings(path, &TextEncoding::CANDIDATES)
    }

    pub fn load_with_encodings(
        path: impl AsRef<Path>,
        candidates: &[TextEncoding],
    ) -> Result<Self, AbcError> {
        let path = path.as_ref();
        log::info!("Loading tunebook {path:?}");
        let bytes = std::fs::read(path)?;
        Self::from_bytes(path, &bytes, candidates)
    }

    /// Same as `load` with the file read through tokio.
    pub async fn load_async(path: impl AsRef<Path>) -> Result<Self, AbcError> {
        let path = path.as_ref();
        log::info!("Loading tunebook {path:?}");
        let bytes = tokio::fs::read(path).await?;
        Self::from_bytes(path, &bytes, &TextEncoding::CANDIDATES)
    }

    fn from_bytes(
        path: &Path,
        bytes: &[u8],
        candidates: &[TextEncoding],
    ) -> Result<Self, AbcError> {
        let (abc, encoding) = decode_with_fallback(bytes, candidates)?;
        let mut tunebook = Self::from_abc(&abc)?;
        log::info!(
            "Loaded {} tunes from {path:?} decoded as {encoding}",
            tunebook.len()
        );
        tunebook.path = Some(path.to_path_buf());
        tunebook.encoding = Some(encoding);
        Ok(tunebook)
    }

    /// Build a tunebook out of already decoded ABC text.
    pub fn from_abc(abc: &str) -> Result<Self, AbcError> {
        let mut tunebook = Self {
            tunes: parse_tunebook(abc),
            ..Self::default()
        };
        tunebook.renumber()?;
        Ok(tunebook)
    }

    /// File the tunebook was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Encoding the source file was decoded with.
    pub const fn encoding(&self) -> Option<TextEncoding> {
        self.encoding
    }

    pub fn tunes(&self) -> &[Tune] {
        &self.tunes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tune> {
        self.tunes.iter()
    }

    pub fn len(&self) -> usize {
        self.tunes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tunes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tune> {
        self.tunes.get(index)
    }

    /// Mutable access to a single tune, e.g. to transpose it.
    ///
    /// Call `renumber` afterwards if the tune's reference number may have changed.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tune> {
        self.tunes.get_mut(index)
    }

    pub fn titles(&self) -> Vec<&str> {
        self.tunes.iter().map(Tune::title).collect()
    }

    pub fn renumber(&mut self) -> Result<(), AbcError> {
        renumber(&mut self.tunes)
    }

    /// Add a tune at the end and renumber.
    ///
    /// A tune without any `X:` line is rejected and the tunebook left unchanged.
    pub fn append(&mut self, tune: Tune) -> Result<(), AbcError> {
        check_reference_line(self.tunes.len() + 1, &tune)?;
        self.tunes.push(tune);
        if let Err(err) = self.renumber() {
            self.tunes.pop();
            return Err(err);
        }
        Ok(())
    }

    /// Remove the first tune equal to `tune` and renumber.
    ///
    /// Equality covers the whole tune as stored, reference number included, so
    /// pass a tune obtained from `get` or `iter`: the copy handed to `append`
    /// no longer matches once it has been renumbered.
    pub fn remove(&mut self, tune: &Tune) -> Result<Option<Tune>, AbcError> {
        match self.tunes.iter().position(|t| t == tune) {
            Some(index) => self.remove_at(index),
            None => Ok(None),
        }
    }

    /// Remove the tune at `index` and renumber.
    pub fn remove_at(&mut self, index: usize) -> Result<Option<Tune>, AbcError> {
        if index >= self.tunes.len() {
            return Ok(None);
        }
        let removed = self.tunes.remove(index);
        if let Err(err) = self.renumber() {
            self.tunes.insert(index, removed);
            return Err(err);
        }
        Ok(Some(removed))
    }

    /// Renumber and serialize the whole tunebook.
    pub fn to_abc(&mut self) -> Result<String, AbcError> {
        self.renumber()?;
        Ok(render_tunes(&self.tunes))
    }

    /// Renumber and write the tunebook to `path` as UTF-8.
    pub fn write(&mut self, path: impl AsRef<Path>) -> Result<(), AbcError> {
        let abc = self.to_abc()?;
        write_atomically(path.as_ref(), &abc)
    }

    /// Write the tunebook back to the file it was loaded from.
    pub fn save(&mut self) -> Result<(), AbcError> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| AbcError::IoError("tunebook has no file path".to_string()))?;
        self.write(path)
    }
}

impl<'a> IntoIterator for &'a Tunebook {
    type Item = &'a Tune;
    type IntoIter = std::slice::Iter<'a, Tune>;

    fn into_iter(self) -> Self::IntoIter {
        self.tunes.iter()
    }
}
