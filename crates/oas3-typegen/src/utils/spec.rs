use std::{
  collections::{BTreeSet, VecDeque},
  ffi::OsStr,
  path::{Path, PathBuf},
};

use anyhow::{Context, anyhow, bail};
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use serde::Deserialize;
use serde_json::Value;

use crate::generator::document::{DocumentSet, join_document_path, normalize_document_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }
}

pub struct SpecLoader {
  file: AsyncMmapFile,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let format = path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(SpecFormat::default(), SpecFormat::from_extension);

    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open {}", path.display()))?;

    Ok(Self { file, format })
  }

  #[must_use]
  pub fn format(&self) -> SpecFormat {
    self.format
  }

  /// Parses the file into a plain JSON tree. YAML keys such as `200` become strings.
  pub fn parse(&self) -> anyhow::Result<Value> {
    match self.format {
      SpecFormat::Json => Ok(serde_json::from_slice(self.file.as_slice())?),
      SpecFormat::Yaml => {
        let yaml = serde_yaml::from_slice::<serde_yaml::Value>(self.file.as_slice())?;
        Ok(serde_json::to_value(yaml)?)
      }
    }
  }
}

/// The part of the entry document checked before generation starts.
#[derive(Debug, Deserialize)]
struct DocumentHeader {
  openapi: String,
  info: DocumentInfo,
}

#[derive(Debug, Deserialize)]
struct DocumentInfo {
  title: String,
  version: String,
}

fn validate_header(document: &Value) -> anyhow::Result<()> {
  let header: DocumentHeader = serde_path_to_error::deserialize(document)
    .map_err(|err| anyhow!("invalid OpenAPI document at '{}': {}", err.path(), err.inner()))?;

  if !header.openapi.starts_with("3.") {
    bail!("unsupported OpenAPI version '{}', expected 3.x", header.openapi);
  }
  if header.info.title.trim().is_empty() {
    bail!("info.title must not be empty");
  }
  if header.info.version.trim().is_empty() {
    bail!("info.version must not be empty");
  }
  Ok(())
}

/// Loads the entry document and, breadth first, every document its `$ref`s reach.
///
/// External documents are only required to parse; the header check applies to
/// the entry document alone.
pub async fn load_documents(path: &Path) -> anyhow::Result<DocumentSet> {
  let entry = normalize_document_path(&path.to_string_lossy());
  let root = SpecLoader::open(path).await?.parse()?;
  validate_header(&root).with_context(|| format!("failed to read {entry}"))?;

  let mut pending = VecDeque::new();
  let mut seen = BTreeSet::from([entry.clone()]);
  queue_references(&entry, &root, &mut seen, &mut pending)?;
  let mut documents = DocumentSet::new(entry, root);

  while let Some(key) = pending.pop_front() {
    let document = SpecLoader::open(&PathBuf::from(&key))
      .await?
      .parse()
      .with_context(|| format!("failed to parse {key}"))?;
    queue_references(&key, &document, &mut seen, &mut pending)?;
    documents.insert(key, document);
  }

  Ok(documents)
}

fn queue_references(
  base: &str,
  document: &Value,
  seen: &mut BTreeSet<String>,
  pending: &mut VecDeque<String>,
) -> anyhow::Result<()> {
  let mut refs = vec![];
  collect_refs(document, &mut refs);

  for raw in refs {
    let document_part = raw.split_once('#').map_or(raw, |(document, _)| document);
    if document_part.is_empty() {
      continue;
    }
    if document_part.starts_with("http://") || document_part.starts_with("https://") {
      bail!("remote reference '{raw}' in {base} is not supported");
    }
    let key = join_document_path(base, document_part);
    if seen.insert(key.clone()) {
      pending.push_back(key);
    }
  }
  Ok(())
}

fn collect_refs<'v>(value: &'v Value, refs: &mut Vec<&'v str>) {
  match value {
    Value::Object(map) => {
      for (key, child) in map {
        match child {
          Value::String(target) if key == "$ref" => refs.push(target),
          _ => collect_refs(child, refs),
        }
      }
    }
    Value::Array(items) => items.iter().for_each(|item| collect_refs(item, refs)),
    _ => {}
  }
}
