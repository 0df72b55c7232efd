//! Schema loader for reading schema documents from disk
//!
//! - One schema per `*.json` file
//! - Registry keyed by file stem
//! - Each schema is compiled once at load time

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::compiler::compile;
use super::errors::{LoadError, LoadResult};
use super::types::CompileOutcome;

/// Reads schema files and keeps their compiled `required` constraints.
#[derive(Debug, Default)]
pub struct SchemaLoader {
    /// Compiled outcomes indexed by schema name (file stem)
    schemas: BTreeMap<String, CompileOutcome>,
}

impl SchemaLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and parses a single schema document.
    pub fn load_file(path: &Path) -> LoadResult<Value> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads a schema document and compiles its `required` keyword.
    pub fn compile_file(path: &Path) -> LoadResult<CompileOutcome> {
        let schema = Self::load_file(path)?;
        Ok(compile(&schema))
    }

    /// Compiles every `*.json` file in `dir` into the registry.
    ///
    /// Malformed `required` clauses are stored as [`CompileOutcome::Error`]
    /// rather than aborting the load; unreadable or non-JSON files abort it.
    /// Returns the number of schemas loaded.
    pub fn load_dir(&mut self, dir: &Path) -> LoadResult<usize> {
        let io_err = |source: std::io::Error| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut loaded = 0;
        for path in &paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!(path = %path.display(), "skipping schema with non UTF-8 name");
                continue;
            };

            let outcome = Self::compile_file(path)?;
            if let CompileOutcome::Error(err) = &outcome {
                warn!(
                    schema = name,
                    code = err.code().code(),
                    error = %err,
                    "schema has malformed required clause"
                );
            }
            debug!(schema = name, "loaded schema");
            self.schemas.insert(name.to_string(), outcome);
            loaded += 1;
        }

        info!(dir = %dir.display(), count = loaded, "schemas loaded");
        Ok(loaded)
    }

    /// Registers an in-memory schema under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, schema: &Value) -> &CompileOutcome {
        let name = name.into();
        let outcome = compile(schema);
        self.schemas.insert(name.clone(), outcome);
        &self.schemas[&name]
    }

    /// Gets the compiled outcome for a schema name.
    pub fn get(&self, name: &str) -> Option<&CompileOutcome> {
        self.schemas.get(name)
    }

    /// Checks if a schema is registered.
    pub fn exists(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered schema names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
