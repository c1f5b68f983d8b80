use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{CardError, CardResult};

/// Weight class requested by the card layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Body text.
    Regular,
    /// Title line.
    Semibold,
    /// Name.
    Bold,
}

impl FontWeight {
    /// All weight classes, in resolution order.
    pub const ALL: [Self; 3] = [Self::Regular, Self::Semibold, Self::Bold];

    fn own_candidates(self) -> &'static [&'static str] {
        match self {
            Self::Regular => &[
                "Inter-Regular.ttf",
                "Montserrat-Regular.ttf",
                "DejaVuSans.ttf",
                "arial.ttf",
            ],
            Self::Semibold => &[
                "Inter-SemiBold.ttf",
                "Montserrat-SemiBold.ttf",
                "DejaVuSans-Bold.ttf",
                "arialbd.ttf",
            ],
            Self::Bold => &[
                "Inter-Bold.ttf",
                "Montserrat-Bold.ttf",
                "DejaVuSans-Bold.ttf",
                "arialbd.ttf",
            ],
        }
    }

    /// File names tried for this weight: its own list, then the regular list.
    pub fn candidates(self) -> impl Iterator<Item = &'static str> {
        self.own_candidates()
            .iter()
            .chain(Self::Regular.own_candidates().iter())
            .copied()
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Regular => "regular",
            Self::Semibold => "semibold",
            Self::Bold => "bold",
        })
    }
}

/// A parsed outline font file.
pub struct OutlineFace {
    path: PathBuf,
    bytes: Arc<Vec<u8>>,
    font: vello_cpu::peniko::FontData,
}

impl OutlineFace {
    /// Read and validate a font file.
    pub fn load(path: &Path) -> CardResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        Self::from_bytes(path.to_path_buf(), bytes)
    }

    /// Validate in-memory font bytes. `path` is only used for diagnostics.
    pub fn from_bytes(path: PathBuf, bytes: Vec<u8>) -> CardResult<Self> {
        let mut ctx = parley::FontContext::default();
        let families = ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        if families.is_empty() {
            return Err(CardError::validation(format!(
                "'{}' contains no usable font",
                path.display()
            )));
        }
        let bytes = Arc::new(bytes);
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
            0,
        );
        Ok(Self { path, bytes, font })
    }

    /// Source file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn bytes(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }
}

impl fmt::Debug for OutlineFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlineFace")
            .field("path", &self.path)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The face chosen for one weight class.
#[derive(Clone, Debug)]
pub enum FontFace {
    /// A font file from disk.
    Outline(Arc<OutlineFace>),
    /// The built-in bitmap face.
    Builtin,
}

impl FontFace {
    /// Whether this is the built-in bitmap face.
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }
}

/// Faces for every weight class, resolved once and shared read-only by renders.
#[derive(Clone, Debug)]
pub struct FontLibrary {
    regular: FontFace,
    semibold: FontFace,
    bold: FontFace,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FontLibrary {
    /// A library that uses the built-in face for every weight.
    pub fn builtin() -> Self {
        Self {
            regular: FontFace::Builtin,
            semibold: FontFace::Builtin,
            bold: FontFace::Builtin,
        }
    }

    /// Resolve every weight against the font files found in `dirs`.
    ///
    /// Each directory is searched recursively, up to eight levels down, without following
    /// symlinked directories. File names match case-insensitively. The first directory in
    /// `dirs` containing a name wins, and within one directory tree the shallowest file wins.
    /// Candidates that fail to parse are skipped.
    #[tracing::instrument(skip(dirs), fields(dirs = dirs.len()))]
    pub fn discover(dirs: &[PathBuf]) -> Self {
        let index = index_font_files(dirs);
        let mut loaded: HashMap<PathBuf, Option<Arc<OutlineFace>>> = HashMap::new();
        let mut resolve = |weight: FontWeight| -> FontFace {
            for name in weight.candidates() {
                let Some(path) = index.get(&name.to_ascii_lowercase()) else {
                    continue;
                };
                let face = loaded
                    .entry(path.clone())
                    .or_insert_with(|| match OutlineFace::load(path) {
                        Ok(face) => Some(Arc::new(face)),
                        Err(err) => {
                            tracing::debug!(path = %path.display(), error = %err, "skipping font candidate");
                            None
                        }
                    })
                    .clone();
                if let Some(face) = face {
                    tracing::debug!(%weight, path = %path.display(), "resolved font");
                    return FontFace::Outline(face);
                }
            }
            tracing::warn!(%weight, "no font candidate found, using built-in bitmap face");
            FontFace::Builtin
        };

        Self {
            regular: resolve(FontWeight::Regular),
            semibold: resolve(FontWeight::Semibold),
            bold: resolve(FontWeight::Bold),
        }
    }

    /// Face for `weight`.
    pub fn face(&self, weight: FontWeight) -> &FontFace {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Semibold => &self.semibold,
            FontWeight::Bold => &self.bold,
        }
    }
}

/// Subdirectory levels searched below each font directory.
const MAX_FONT_DIR_DEPTH: usize = 8;

// Breadth-first per root so shallower files shadow deeper ones. Entries are visited in
// sorted order and symlinked directories are not followed.
fn index_font_files(dirs: &[PathBuf]) -> HashMap<String, PathBuf> {
    let mut index = HashMap::new();
    for root in dirs {
        let mut queue = VecDeque::from([(root.clone(), 0usize)]);
        while let Some((dir, depth)) = queue.pop_front() {
            let subdirs = add_fonts_from_dir(&mut index, &dir);
            if depth < MAX_FONT_DIR_DEPTH {
                queue.extend(subdirs.into_iter().map(|sub| (sub, depth + 1)));
            }
        }
    }
    index
}

// Indexes the font files directly in `dir` and returns its subdirectories, sorted.
fn add_fonts_from_dir(index: &mut HashMap<String, PathBuf>, dir: &Path) -> Vec<PathBuf> {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut entries: Vec<(PathBuf, std::fs::FileType)> = rd
        .flatten()
        .filter_map(|e| Some((e.path(), e.file_type().ok()?)))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut subdirs = Vec::new();
    for (path, kind) in entries {
        if kind.is_dir() {
            subdirs.push(path);
            continue;
        }
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        index.entry(name.to_ascii_lowercase()).or_insert(path);
    }
    subdirs
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
