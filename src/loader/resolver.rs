use crate::domain::ports::ConfigProvider;
use crate::loader::resource;
use crate::utils::error::{DexError, Result};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

/// Where a data set was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOrigin {
    Packaged,
    DefaultPath,
    Discovered,
    Manual,
}

/// A readable data set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Packaged {
        file_name: String,
        contents: &'static str,
    },
    File {
        path: PathBuf,
        origin: SourceOrigin,
    },
}

impl DataSource {
    pub fn manual<P: Into<PathBuf>>(path: P) -> Self {
        DataSource::File {
            path: path.into(),
            origin: SourceOrigin::Manual,
        }
    }

    pub fn origin(&self) -> SourceOrigin {
        match self {
            DataSource::Packaged { .. } => SourceOrigin::Packaged,
            DataSource::File { origin, .. } => origin.clone(),
        }
    }

    pub fn open(&self) -> Result<Box<dyn Read + Send>> {
        match self {
            DataSource::Packaged { contents, .. } => Ok(Box::new(Cursor::new(contents.as_bytes()))),
            DataSource::File { path, .. } => Ok(Box::new(BufReader::new(File::open(path)?))),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Packaged { file_name, .. } => write!(f, "bundled resource {}", file_name),
            DataSource::File { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

/// Finds the data file: bundled resource, default path, then a recursive
/// search beneath the search root.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    file_name: String,
    default_path: PathBuf,
    search_root: PathBuf,
}

impl SourceResolver {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            file_name: config.data_file_name().to_string(),
            default_path: PathBuf::from(config.default_path()),
            search_root: PathBuf::from(config.search_root()),
        }
    }

    pub fn resolve(&self) -> Result<DataSource> {
        if let Some(contents) = resource::packaged_resource(&self.file_name) {
            tracing::debug!("Using bundled resource {}", self.file_name);
            return Ok(DataSource::Packaged {
                file_name: self.file_name.clone(),
                contents,
            });
        }

        if self.default_path.is_file() {
            tracing::debug!("Using default path {}", self.default_path.display());
            return Ok(DataSource::File {
                path: self.default_path.clone(),
                origin: SourceOrigin::DefaultPath,
            });
        }

        tracing::debug!(
            "Searching {} for {}",
            self.search_root.display(),
            self.file_name
        );
        if let Some(path) = find_file(&self.search_root, &self.file_name) {
            return Ok(DataSource::File {
                path,
                origin: SourceOrigin::Discovered,
            });
        }

        Err(DexError::SourceNotFound {
            file_name: self.file_name.clone(),
        })
    }
}

/// Depth-first search for a file named `file_name`. Entries are visited in
/// name order; symlinks are not followed.
pub fn find_file(dir: &Path, file_name: &str) -> Option<PathBuf> {
    let mut entries: Vec<_> = match fs::read_dir(dir) {
        Ok(entries) => entries.filter_map(|e| e.ok()).collect(),
        Err(e) => {
            tracing::debug!("Cannot read {}: {}", dir.display(), e);
            return None;
        }
    };
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_file() && entry.file_name() == file_name {
            return Some(entry.path());
        }

        if file_type.is_dir() {
            if let Some(found) = find_file(&entry.path(), file_name) {
                return Some(found);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct MockConfig {
        file_name: String,
        default_path: String,
        search_root: String,
    }

    impl ConfigProvider for MockConfig {
        fn data_file_name(&self) -> &str {
            &self.file_name
        }

        fn default_path(&self) -> &str {
            &self.default_path
        }

        fn search_root(&self) -> &str {
            &self.search_root
        }
    }

    fn config(file_name: &str, default_path: &Path, search_root: &Path) -> MockConfig {
        MockConfig {
            file_name: file_name.to_string(),
            default_path: default_path.to_string_lossy().to_string(),
            search_root: search_root.to_string_lossy().to_string(),
        }
    }

    #[test]
    fn test_packaged_resource_wins() {
        let temp_dir = TempDir::new().unwrap();
        let resolver = SourceResolver::new(&config(
            resource::BUNDLED_FILE_NAME,
            &temp_dir.path().join("missing.csv"),
            temp_dir.path(),
        ));

        let source = resolver.resolve().unwrap();
        assert_eq!(source.origin(), SourceOrigin::Packaged);
        assert!(source.to_string().contains("bundled"));
    }

    #[test]
    fn test_default_path_before_search() {
        let temp_dir = TempDir::new().unwrap();
        let default_path = temp_dir.path().join("creatures.csv");
        fs::write(&default_path, "header\n").unwrap();
        fs::create_dir_all(temp_dir.path().join("a")).unwrap();
        fs::write(temp_dir.path().join("a/creatures.csv"), "header\n").unwrap();

        let resolver = SourceResolver::new(&config("creatures.csv", &default_path, temp_dir.path()));
        let source = resolver.resolve().unwrap();

        assert_eq!(
            source,
            DataSource::File {
                path: default_path,
                origin: SourceOrigin::DefaultPath
            }
        );
    }

    #[test]
    fn test_recursive_search() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("b/deeper");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(temp_dir.path().join("a")).unwrap();
        fs::write(nested.join("creatures.csv"), "header\n").unwrap();

        let resolver = SourceResolver::new(&config(
            "creatures.csv",
            &temp_dir.path().join("nope.csv"),
            temp_dir.path(),
        ));
        let source = resolver.resolve().unwrap();

        assert_eq!(source.origin(), SourceOrigin::Discovered);
        assert_eq!(
            source,
            DataSource::File {
                path: nested.join("creatures.csv"),
                origin: SourceOrigin::Discovered
            }
        );
    }

    #[test]
    fn test_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let resolver = SourceResolver::new(&config(
            "creatures.csv",
            &temp_dir.path().join("nope.csv"),
            temp_dir.path(),
        ));

        match resolver.resolve() {
            Err(DexError::SourceNotFound { file_name }) => assert_eq!(file_name, "creatures.csv"),
            other => panic!("expected SourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_open_manual_source() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mine.csv");
        fs::write(&path, "abc").unwrap();

        let mut contents = String::new();
        DataSource::manual(&path)
            .open()
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "abc");

        assert!(DataSource::manual(temp_dir.path().join("gone.csv")).open().is_err());
    }
}
