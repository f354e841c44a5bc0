//! Page directories
//!
//! A page directory holds one file per page, named after the page plus the configured
//! extension. Sub pages live in a directory named after their parent page:
//!
//! ```text
//! pages
//! ├── FrontPage.txt
//! ├── Projects.txt
//! └── Projects
//!     └── Alpha.txt           # the page "Projects/Alpha"
//! ```
//!
//! Converted pages are written over the originals, or below a separate output
//! directory with the same layout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use moin_babel::{ConvertError, PageStore};

#[derive(Debug, Clone)]
pub struct DirPageStore {
    root: PathBuf,
    output: Option<PathBuf>,
    extension: String,
}

impl DirPageStore {
    /// Open the page directory at `root`. Page files end in `.<extension>`.
    pub fn open(root: impl Into<PathBuf>, extension: &str) -> Result<Self, ConvertError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ConvertError::Store(format!(
                "'{}' is not a directory",
                root.display()
            )));
        }
        Ok(DirPageStore {
            root,
            output: None,
            extension: extension.trim_start_matches('.').to_string(),
        })
    }

    /// Write pages below `output` instead of over the originals
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File of page `name` below `base`, or `None` when the name cannot be a file path
    fn page_path(&self, base: &Path, name: &str) -> Option<PathBuf> {
        let mut path = base.to_path_buf();
        let mut segments = name.split('/').peekable();
        while let Some(segment) = segments.next() {
            if segment.is_empty() || segment == "." || segment == ".." {
                return None;
            }
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{segment}.{}", self.extension));
            }
        }
        Some(path)
    }

    fn collect(&self, dir: &Path, prefix: &str, names: &mut Vec<String>) -> io::Result<()> {
        let suffix = format!(".{}", self.extension);
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            // page names are text; anything else is not a page
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if entry.file_type()?.is_dir() {
                self.collect(&entry.path(), &format!("{prefix}{file_name}/"), names)?;
            } else if let Some(stem) = file_name.strip_suffix(&suffix) {
                if !stem.is_empty() {
                    names.push(format!("{prefix}{stem}"));
                }
            }
        }
        Ok(())
    }

    fn path_or_error(&self, base: &Path, name: &str) -> Result<PathBuf, ConvertError> {
        self.page_path(base, name)
            .ok_or_else(|| ConvertError::Store(format!("invalid page name '{name}'")))
    }
}

fn io_error(path: &Path, err: io::Error) -> ConvertError {
    ConvertError::Store(format!("{}: {err}", path.display()))
}

impl PageStore for DirPageStore {
    fn exists(&self, name: &str) -> bool {
        self.page_path(&self.root, name)
            .is_some_and(|path| path.is_file())
    }

    fn page_names(&self) -> Result<Vec<String>, ConvertError> {
        let mut names = Vec::new();
        self.collect(&self.root, "", &mut names)
            .map_err(|err| io_error(&self.root, err))?;
        names.sort();
        Ok(names)
    }

    fn read_page(&self, name: &str) -> Result<String, ConvertError> {
        let path = self.path_or_error(&self.root, name)?;
        fs::read_to_string(&path).map_err(|err| io_error(&path, err))
    }

    fn write_page(&mut self, name: &str, text: &str) -> Result<(), ConvertError> {
        let base = self.output.as_deref().unwrap_or(&self.root);
        let path = self.path_or_error(base, name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| io_error(parent, err))?;
        }
        fs::write(&path, text).map_err(|err| io_error(&path, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_dir() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("FrontPage.txt"), "front").unwrap();
        fs::write(dir.path().join("notes.md"), "not a page").unwrap();
        fs::create_dir(dir.path().join("Projects")).unwrap();
        fs::write(dir.path().join("Projects.txt"), "projects").unwrap();
        fs::write(dir.path().join("Projects").join("Alpha.txt"), "alpha").unwrap();
        dir
    }

    #[test]
    fn lists_pages_and_sub_pages() {
        let dir = sample_dir();
        let store = DirPageStore::open(dir.path(), "txt").unwrap();
        assert_eq!(
            store.page_names().unwrap(),
            vec!["FrontPage", "Projects", "Projects/Alpha"]
        );
    }

    #[test]
    fn leading_dot_in_extension_is_ignored() {
        let dir = sample_dir();
        let store = DirPageStore::open(dir.path(), ".md").unwrap();
        assert_eq!(store.page_names().unwrap(), vec!["notes"]);
    }

    #[test]
    fn reads_and_checks_pages() {
        let dir = sample_dir();
        let store = DirPageStore::open(dir.path(), "txt").unwrap();
        assert!(store.exists("Projects/Alpha"));
        assert!(!store.exists("Projects/Beta"));
        assert!(!store.exists("../FrontPage"));
        assert_eq!(store.read_page("Projects/Alpha").unwrap(), "alpha");
        assert!(matches!(
            store.read_page("Missing"),
            Err(ConvertError::Store(_))
        ));
    }

    #[test]
    fn writes_below_output_directory() {
        let dir = sample_dir();
        let out = tempdir().unwrap();
        let mut store = DirPageStore::open(dir.path(), "txt")
            .unwrap()
            .with_output(out.path());
        store.write_page("Projects/Alpha", "converted").unwrap();
        assert_eq!(
            fs::read_to_string(out.path().join("Projects").join("Alpha.txt")).unwrap(),
            "converted"
        );
        assert_eq!(store.read_page("Projects/Alpha").unwrap(), "alpha");
    }

    #[test]
    fn rejects_escaping_names() {
        let dir = sample_dir();
        let mut store = DirPageStore::open(dir.path(), "txt").unwrap();
        assert!(store.write_page("../Outside", "x").is_err());
        assert!(store.write_page("a//b", "x").is_err());
    }

    #[test]
    fn root_must_be_a_directory() {
        let dir = sample_dir();
        assert!(DirPageStore::open(dir.path().join("FrontPage.txt"), "txt").is_err());
    }
}
