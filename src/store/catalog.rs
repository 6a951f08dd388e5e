use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rust_embed::RustEmbed;
use thiserror::Error;
use tracing::{debug, warn};

use crate::exercise::{ExerciseDefinition, ValidationError, validate};

#[derive(RustEmbed)]
#[folder = "assets/exercises/"]
struct BuiltinExercises;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("exercise {0} not found")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid exercise {origin}: {source}")]
    Invalid {
        origin: String,
        #[source]
        source: ValidationError,
    },
}

/// Parse and validate one exercise. `origin` names the source in errors.
pub fn parse_exercise(json: &str, origin: &str) -> Result<ExerciseDefinition, CatalogError> {
    let exercise: ExerciseDefinition =
        serde_json::from_str(json).map_err(|source| CatalogError::Parse {
            origin: origin.to_string(),
            source,
        })?;
    validate(&exercise).map_err(|source| {
        warn!(origin, error = %source, "rejected exercise");
        CatalogError::Invalid {
            origin: origin.to_string(),
            source,
        }
    })?;
    Ok(exercise)
}

pub fn load_from_path(path: &Path) -> Result<ExerciseDefinition, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let exercise = parse_exercise(&content, &path.display().to_string())?;
    debug!(path = %path.display(), id = %exercise.id, "loaded exercise");
    Ok(exercise)
}

fn json_files(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    let io_err = |source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Every `*.json` exercise in `dir`, sorted by id. A missing directory is an
/// empty catalog; a single bad file fails the whole load.
pub fn load_dir(dir: &Path) -> Result<Vec<ExerciseDefinition>, CatalogError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut exercises = json_files(dir)?
        .iter()
        .map(|path| load_from_path(path))
        .collect::<Result<Vec<_>, _>>()?;
    exercises.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(exercises)
}

/// Like [`load_dir`], but a file that fails to read, parse or validate is
/// logged and left out.
pub fn load_dir_lenient(dir: &Path) -> Result<Vec<ExerciseDefinition>, CatalogError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut exercises = Vec::new();
    for path in json_files(dir)? {
        match load_from_path(&path) {
            Ok(exercise) => exercises.push(exercise),
            Err(err) => warn!(path = %path.display(), error = %err, "skipping exercise"),
        }
    }
    exercises.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(exercises)
}

/// Exercises bundled into the binary plus the user's exercise directory.
pub struct Catalog {
    user_dir: Option<PathBuf>,
}

impl Catalog {
    pub fn new(user_dir: Option<PathBuf>) -> Self {
        Self { user_dir }
    }

    pub fn builtin_ids() -> Vec<String> {
        let mut ids: Vec<String> = BuiltinExercises::iter()
            .filter_map(|name| name.strip_suffix(".json").map(str::to_string))
            .collect();
        ids.sort();
        ids
    }

    pub fn load_builtin(id: &str) -> Result<ExerciseDefinition, CatalogError> {
        let file = BuiltinExercises::get(&format!("{id}.json"))
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        let json = String::from_utf8_lossy(&file.data);
        parse_exercise(&json, id)
    }

    pub fn builtin() -> Result<Vec<ExerciseDefinition>, CatalogError> {
        Self::builtin_ids()
            .iter()
            .map(|id| Self::load_builtin(id))
            .collect()
    }

    fn user_exercises(&self) -> Result<Vec<ExerciseDefinition>, CatalogError> {
        match &self.user_dir {
            Some(dir) => load_dir_lenient(dir),
            None => Ok(Vec::new()),
        }
    }

    /// Built-in and user exercises; a user exercise with a built-in's id
    /// replaces it. Broken user files are skipped.
    pub fn all(&self) -> Result<Vec<ExerciseDefinition>, CatalogError> {
        let mut exercises = Self::builtin()?;
        for exercise in self.user_exercises()? {
            exercises.retain(|e| e.id != exercise.id);
            exercises.push(exercise);
        }
        exercises.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(exercises)
    }

    /// Look `name` up as a file stem in the user directory, then as an id in
    /// the user directory, then as a built-in id, then as a path. The id lookup
    /// agrees with [`Catalog::all`] about which exercise an id means.
    pub fn resolve(&self, name: &str) -> Result<Arc<ExerciseDefinition>, CatalogError> {
        if let Some(dir) = &self.user_dir {
            let candidate = dir.join(format!("{name}.json"));
            if candidate.is_file() {
                return load_from_path(&candidate).map(Arc::new);
            }
        }
        if let Some(exercise) = self.user_exercises()?.into_iter().find(|e| e.id == name) {
            return Ok(Arc::new(exercise));
        }
        match Self::load_builtin(name) {
            Err(CatalogError::NotFound(_)) => {}
            other => return other.map(Arc::new),
        }
        let path = Path::new(name);
        if path.is_file() {
            return load_from_path(path).map(Arc::new);
        }
        Err(CatalogError::NotFound(name.to_string()))
    }
}
