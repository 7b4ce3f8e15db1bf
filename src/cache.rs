use std::fs;
use std::io;
use std::path::PathBuf;

pub const DEFAULT_INPUT_DIR: &str = "inputs";

/// Puzzle inputs stored as `<root>/<year>/<day:02>.txt`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InputCache {
    root: PathBuf,
}

impl InputCache {
    pub fn new<P: Into<PathBuf>>(root: P) -> InputCache {
        InputCache { root: root.into() }
    }

    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        self.root.join(year.to_string()).join(format!("{:02}.txt", day))
    }

    /// The cached text, or `None` if nothing is cached for that day.
    pub fn read(&self, year: u16, day: u8) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(year, day)) {
            Ok(text) => Ok(Some(text)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Stores `text` for that day, creating the year directory if needed.
    pub fn write(&self, year: u16, day: u8, text: &str) -> io::Result<()> {
        let path = self.path(year, day);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, text)
    }
}

impl Default for InputCache {
    fn default() -> InputCache {
        InputCache::new(DEFAULT_INPUT_DIR)
    }
}
