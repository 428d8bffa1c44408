use std::fmt::{Display, Formatter};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// A JSON document supplied by the user, e.g. a form, a patch or a catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsonSource(PathBuf);

impl FromStr for JsonSource {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(JsonSource(PathBuf::from(s)))
    }
}

impl JsonSource {
    pub fn try_from_path(path: PathBuf) -> Result<JsonSource, SourceError> {
        if !path.exists() {
            return Err(SourceError::PathDoesNotExist(path));
        }
        if !path.is_file() {
            return Err(SourceError::PathIsNotAFile(path));
        }
        Ok(JsonSource(path))
    }

    pub fn path(&self) -> &PathBuf {
        &self.0
    }

    pub fn load<T: DeserializeOwned>(&self) -> Result<T, SourceError> {
        let source = Self::try_from_path(self.0.clone())?;
        let content = fs::read_to_string(&source.0).map_err(|error| SourceError::Read(source.0.clone(), error))?;

        serde_json::from_str(&content).map_err(|error| SourceError::Deserialize(source.0, error))
    }
}

impl Display for JsonSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.display().to_string().as_str())
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Path does not exist. path: {0}")]
    PathDoesNotExist(PathBuf),
    #[error("Path is not a file. path: {0}")]
    PathIsNotAFile(PathBuf),
    #[error("Unable to read file. path: {0}, cause: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("Invalid JSON. path: {0}, cause: {1}")]
    Deserialize(PathBuf, serde_json::Error),
}
