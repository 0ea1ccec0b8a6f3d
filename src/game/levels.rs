use super::board::ParseError;
use super::level::Level;
use std::borrow::Cow;
use std::path::PathBuf;
use thiserror::Error;

/// Maps compiled into the binary, played when no level files are given
static BUILTIN_LEVELS: [(&str, &str); 2] = [
    ("level0", include_str!("../../levels/level0.txt")),
    ("level1", include_str!("../../levels/level1.txt")),
];

/// Where to read a level's map from
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum LevelSource {
    Builtin {
        name: &'static str,
        map: &'static str,
    },
    File(PathBuf),
}

impl LevelSource {
    /// Return a short name for the level, for display
    pub(crate) fn name(&self) -> Cow<'_, str> {
        match self {
            LevelSource::Builtin { name, .. } => Cow::Borrowed(*name),
            LevelSource::File(path) => path
                .file_stem()
                .unwrap_or_else(|| path.as_os_str())
                .to_string_lossy(),
        }
    }

    /// Read and parse the level's map
    pub(crate) fn load(&self) -> Result<Level, LoadError> {
        let map = match self {
            LevelSource::Builtin { map, .. } => Cow::Borrowed(*map),
            LevelSource::File(path) => Cow::Owned(fs_err::read_to_string(path)?),
        };
        Level::parse(&map).map_err(|source| LoadError::Parse {
            name: self.name().into_owned(),
            source,
        })
    }
}

/// The fixed, ordered list of levels to cycle through.  Never empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct LevelSet(Vec<LevelSource>);

impl LevelSet {
    /// Return the built-in levels
    pub(crate) fn builtin() -> LevelSet {
        LevelSet(
            BUILTIN_LEVELS
                .iter()
                .map(|&(name, map)| LevelSource::Builtin { name, map })
                .collect(),
        )
    }

    /// Return a set of the given level files, or the built-in levels if
    /// `paths` is empty
    pub(crate) fn from_paths(paths: Vec<PathBuf>) -> LevelSet {
        if paths.is_empty() {
            LevelSet::builtin()
        } else {
            LevelSet(paths.into_iter().map(LevelSource::File).collect())
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Return the level at `index`, wrapping around past the end
    pub(crate) fn get(&self, index: usize) -> Option<&LevelSource> {
        self.0.get(index.checked_rem(self.0.len())?)
    }

    /// Return the index of the level after the one at `index`, wrapping
    /// around to the first
    pub(crate) fn next_index(&self, index: usize) -> usize {
        index
            .saturating_add(1)
            .checked_rem(self.0.len())
            .unwrap_or_default()
    }
}

#[derive(Debug, Error)]
pub(crate) enum LoadError {
    #[error("failed to read level file")]
    Read(#[from] std::io::Error),
    #[error("level {name:?} is not a valid map")]
    Parse {
        name: String,
        #[source]
        source: ParseError,
    },
}
