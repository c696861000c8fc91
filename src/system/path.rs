use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::ast::FieldCallParams;
use crate::error::{Error, Result};
use crate::field::{Field, FieldPtr, FieldResult};
use crate::range::FieldRange;
use crate::system::{SqBool, SqDataSize, SqString, cached, invalid_field};
use crate::value::Primitive;

/// A filesystem path.
///
/// Only `children`, `canonical`, `exists` and `size` touch the filesystem;
/// the other fields work on the path text alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqPath {
    path: PathBuf,
}

impl SqPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SqPath { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn fs_error(&self, source: io::Error) -> Error {
        Error::Filesystem {
            path: self.path.clone(),
            source,
        }
    }

    fn string(value: impl Into<String>) -> FieldResult {
        FieldResult::Single(Rc::new(SqString::new(value)))
    }

    fn with_path(path: PathBuf) -> FieldResult {
        FieldResult::Single(cached(SqPath::new(path)))
    }

    fn lossy(value: Option<&std::ffi::OsStr>) -> String {
        value
            .map(|v| v.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory entries, read lazily in directory order.
    fn children(&self) -> Result<FieldRange> {
        let dir = self.path.clone();
        let entries = fs::read_dir(&self.path).map_err(|e| self.fs_error(e))?;
        Ok(FieldRange::try_input(entries.map(move |entry| {
            entry
                .map(|entry| cached(SqPath::new(entry.path())))
                .map_err(|source| Error::Filesystem {
                    path: dir.clone(),
                    source,
                })
        })))
    }

    fn parts(&self) -> FieldRange {
        self.path
            .components()
            .map(|part| {
                Rc::new(SqString::new(part.as_os_str().to_string_lossy().into_owned())) as FieldPtr
            })
            .collect()
    }
}

impl Field for SqPath {
    fn get(&self, member: &str, _params: &FieldCallParams) -> Result<FieldResult> {
        let result = match member {
            "string" => Self::string(self.path.to_string_lossy().into_owned()),
            "parent" => {
                let parent = self.path.parent().unwrap_or(&self.path).to_path_buf();
                Self::with_path(parent)
            }
            "filename" => Self::string(Self::lossy(self.path.file_name())),
            "extension" => {
                let extension = match self.path.extension() {
                    Some(ext) => format!(".{}", ext.to_string_lossy()),
                    None => String::new(),
                };
                Self::string(extension)
            }
            "stem" => Self::string(Self::lossy(self.path.file_stem())),
            "children" => FieldResult::Sequence(self.children()?),
            "parts" => FieldResult::Sequence(self.parts()),
            "absolute" => {
                let absolute = std::path::absolute(&self.path).map_err(|e| self.fs_error(e))?;
                Self::with_path(absolute)
            }
            "canonical" => {
                let canonical = fs::canonicalize(&self.path).map_err(|e| self.fs_error(e))?;
                Self::with_path(canonical)
            }
            "is_absolute" => FieldResult::Single(Rc::new(SqBool::new(self.path.is_absolute()))),
            "exists" => {
                let exists = self.path.try_exists().map_err(|e| self.fs_error(e))?;
                FieldResult::Single(Rc::new(SqBool::new(exists)))
            }
            "size" => {
                let metadata = fs::metadata(&self.path).map_err(|e| self.fs_error(e))?;
                FieldResult::Single(cached(SqDataSize::new(metadata.len())))
            }
            _ => return Err(invalid_field("SqPath", member)),
        };
        Ok(result)
    }

    fn to_primitive(&self) -> Result<Primitive> {
        Ok(Primitive::String(self.path.to_string_lossy().into_owned()))
    }
}
