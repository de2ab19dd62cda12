use crate::domain::errors::EnrichError;
use crate::domain::models::{ArtifactKind, VerdictRecord};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};

/// Content of one artifact; the variant decides the artifact kind.
pub enum ArtifactBody<'a> {
    Raw(&'a VerdictRecord),
    Rendered(&'a str),
}

impl ArtifactBody<'_> {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            ArtifactBody::Raw(_) => ArtifactKind::Raw,
            ArtifactBody::Rendered(_) => ArtifactKind::Rendered,
        }
    }
}

/// Two flat directories, one file per hash and kind.
///
/// The hash is used verbatim as the file stem. Writes always replace the
/// previous file; nothing is appended or merged.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    raw_dir: PathBuf,
    rendered_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(raw_dir: impl Into<PathBuf>, rendered_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            rendered_dir: rendered_dir.into(),
        }
    }

    pub fn dir(&self, kind: ArtifactKind) -> &Path {
        match kind {
            ArtifactKind::Raw => &self.raw_dir,
            ArtifactKind::Rendered => &self.rendered_dir,
        }
    }

    pub fn ensure_dirs(&self) -> Result<(), EnrichError> {
        for dir in [&self.raw_dir, &self.rendered_dir] {
            std::fs::create_dir_all(dir).map_err(|e| {
                EnrichError::Config(format!("cannot create {}: {e}", dir.display()))
            })?;
        }
        Ok(())
    }

    pub fn path_for(&self, kind: ArtifactKind, hash: &str) -> PathBuf {
        self.dir(kind).join(format!("{}.{}", hash, kind.extension()))
    }

    pub fn put(&self, hash: &str, body: ArtifactBody<'_>) -> Result<PathBuf, EnrichError> {
        let path = self.path_for(body.kind(), hash);
        let bytes = match body {
            ArtifactBody::Raw(record) => {
                encode_canonical(record).map_err(|e| EnrichError::Serialization {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?
            }
            ArtifactBody::Rendered(text) => text.as_bytes().to_vec(),
        };
        std::fs::write(&path, bytes).map_err(|e| EnrichError::Persistence {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(path)
    }

    pub fn read(&self, kind: ArtifactKind, hash: &str) -> Result<String, EnrichError> {
        let path = self.path_for(kind, hash);
        std::fs::read_to_string(&path).map_err(|e| EnrichError::Persistence {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Pretty JSON with four-space indentation and a trailing newline.
///
/// Struct fields keep declaration order and map keys come out sorted, since
/// `serde_json::Map` is a `BTreeMap` without the `preserve_order` feature.
pub fn encode_canonical<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    out.push(b'\n');
    Ok(out)
}
