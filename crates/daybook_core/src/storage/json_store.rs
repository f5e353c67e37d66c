use crate::error::AppError;
use crate::model::Task;
use crate::storage::TaskStorage;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const SCHEMA_VERSION: u32 = 1;
pub const STORE_FILE_NAME: &str = "daybook-tasks.json";
pub const STORE_ENV_VAR: &str = "DAYBOOK_STORE_PATH";
pub(crate) const APP_DIR_NAME: &str = "daybook";

#[derive(Debug, Serialize, Deserialize)]
struct StoredTasks {
    schema_version: u32,
    tasks: Vec<Task>,
}

/// Directory holding the store and config files.
pub fn app_dir() -> Result<PathBuf, AppError> {
    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join(APP_DIR_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home).join(".config").join(APP_DIR_NAME))
    }
}

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    Ok(app_dir()?.join(STORE_FILE_NAME))
}

pub fn encode(tasks: &[Task]) -> Result<String, AppError> {
    let stored = StoredTasks {
        schema_version: SCHEMA_VERSION,
        tasks: tasks.to_vec(),
    };
    serde_json::to_string_pretty(&stored).map_err(|err| AppError::invalid_data(err.to_string()))
}

pub fn decode(content: &str) -> Result<Vec<Task>, AppError> {
    let stored: StoredTasks =
        serde_json::from_str(content).map_err(|err| AppError::invalid_data(err.to_string()))?;

    if stored.schema_version != SCHEMA_VERSION {
        return Err(AppError::invalid_data("schema_version mismatch"));
    }

    let tasks = stored
        .tasks
        .into_iter()
        .map(Task::normalized)
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(AppError::invalid_data(format!("duplicate task id {}", task.id)));
        }
    }

    Ok(tasks)
}

/// Stores the collection as a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskStorage for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<Task>>, AppError> {
        if !self.path.exists() {
            log::debug!("no store at {}", self.path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|err| AppError::io(format!("{}: {}", self.path.display(), err)))?;
        let tasks = decode(&content).map_err(|err| {
            AppError::invalid_data(format!("{}: {}", self.path.display(), err.message()))
        })?;
        log::debug!("loaded {} tasks from {}", tasks.len(), self.path.display());
        Ok(Some(tasks))
    }

    /// Writes a sibling temp file and renames it over the slot, so the
    /// previous collection survives any failure before the rename.
    fn save(&self, tasks: &[Task]) -> Result<(), AppError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let content = encode(tasks)?;
        let io_err = |err: std::io::Error| AppError::io(format!("{}: {}", self.path.display(), err));

        let mut temp = NamedTempFile::new_in(parent).map_err(io_err)?;
        temp.write_all(content.as_bytes()).map_err(io_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            temp.as_file().set_permissions(permissions).map_err(io_err)?;
        }

        temp.as_file().sync_all().map_err(io_err)?;
        temp.persist(&self.path).map_err(|err| io_err(err.error))?;

        log::debug!("saved {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }
}
