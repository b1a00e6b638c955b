//! `SKILL.md` loading.
//!
//! Reads the file from a skill directory, splits off the frontmatter and maps
//! the YAML block onto a [`SkillDocument`].

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::frontmatter::{self, FrontmatterError};
use crate::models::SkillDocument;

/// File name looked up inside each skill directory.
pub const SKILL_FILE_NAME: &str = "SKILL.md";

/// Reasons a skill directory could not be turned into a document.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("{file} not found in {}", .dir.display())]
    NotFound { file: &'static str, dir: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to extract frontmatter: {0}")]
    Frontmatter(#[from] FrontmatterError),

    #[error("failed to parse YAML frontmatter: {0}")]
    MetadataParse(String),
}

impl SkillError {
    /// True when the file itself was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SkillError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, SkillError>;

/// Read a file, mapping a missing file to [`SkillError::NotFound`].
pub(crate) fn read_file(path: &Path, file: &'static str) -> Result<String> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => SkillError::NotFound {
            file,
            dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
        },
        _ => SkillError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Parse `SKILL.md` from `dir`.
pub fn parse(dir: &Path) -> Result<SkillDocument> {
    let content = read_file(&dir.join(SKILL_FILE_NAME), SKILL_FILE_NAME)?;
    let mut document = parse_str(&content)?;
    document.source_location = dir.to_path_buf();
    debug!("Parsed skill '{}' from {:?}", document.name, dir);
    Ok(document)
}

/// Parse `SKILL.md` content that was already read. `source_location` is left
/// empty.
pub fn parse_str(content: &str) -> Result<SkillDocument> {
    let fm = frontmatter::extract(content)?;
    let mut mapping = parse_mapping(&fm.block)?;

    let mut document = SkillDocument {
        name: take_string(&mut mapping, "name")?.unwrap_or_default(),
        description: take_string(&mut mapping, "description")?.unwrap_or_default(),
        license: take_string(&mut mapping, "license")?,
        compatibility: take_string(&mut mapping, "compatibility")?,
        allowed_tools: take_string(&mut mapping, "allowed-tools")?,
        metadata: BTreeMap::new(),
        body: fm.body,
        source_location: PathBuf::new(),
    };

    if let Some(nested) = mapping.remove("metadata") {
        match nested {
            Value::Mapping(entries) => {
                for (key, value) in entries {
                    document
                        .metadata
                        .insert(key_string(&key)?, scalar_string("metadata", value)?);
                }
            }
            Value::Null => {}
            _ => {
                return Err(SkillError::MetadataParse(
                    "field 'metadata' must be a mapping".to_string(),
                ))
            }
        }
    }

    // Unknown top-level keys are kept rather than rejected.
    for (key, value) in mapping {
        let key = key_string(&key)?;
        let value = match value {
            Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => {
                serde_yaml::to_string(&value)
                    .map_err(|e| SkillError::MetadataParse(e.to_string()))?
                    .trim_end()
                    .to_string()
            }
            scalar => scalar_string(&key, scalar)?,
        };
        document.metadata.entry(key).or_insert(value);
    }

    Ok(document)
}

/// Parse each directory independently.
///
/// Returns the documents that parsed and the failures paired with their
/// directory. Never stops at the first failure.
pub fn parse_many<P: AsRef<Path>>(dirs: &[P]) -> (Vec<SkillDocument>, Vec<(PathBuf, SkillError)>) {
    let mut documents = Vec::new();
    let mut failures = Vec::new();

    for dir in dirs {
        let dir = dir.as_ref();
        match parse(dir) {
            Ok(document) => documents.push(document),
            Err(e) => {
                debug!("Failed to parse skill in {:?}: {}", dir, e);
                failures.push((dir.to_path_buf(), e));
            }
        }
    }

    (documents, failures)
}

pub(crate) fn parse_mapping(block: &str) -> Result<Mapping> {
    if block.trim().is_empty() {
        return Ok(Mapping::new());
    }
    let value: Value =
        serde_yaml::from_str(block).map_err(|e| SkillError::MetadataParse(e.to_string()))?;
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(SkillError::MetadataParse(
            "frontmatter must be a key-value mapping".to_string(),
        )),
    }
}

fn take_string(mapping: &mut Mapping, field: &str) -> Result<Option<String>> {
    match mapping.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_string(field, value).map(Some),
    }
}

fn key_string(key: &Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(SkillError::MetadataParse(
            "frontmatter keys must be scalars".to_string(),
        )),
    }
}

fn scalar_string(field: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        _ => Err(SkillError::MetadataParse(format!(
            "field '{}' must be a string",
            field
        ))),
    }
}
