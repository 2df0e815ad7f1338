use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Employee, EmployeeId};
use super::repository::{EmployeeRepository, RepositoryError};

/// On-disk document layout: `{ "employees": [...] }`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct EmployeeDocument {
    #[serde(default)]
    employees: Vec<Employee>,
}

/// Whole-file JSON store. Every mutation reads the document, applies the
/// change, and rewrites the file; the mutex serializes that cycle within the
/// process.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, RepositoryError> {
        self.lock
            .lock()
            .map_err(|_| RepositoryError::Unavailable("employee store lock poisoned".to_string()))
    }

    fn io_error(&self, source: std::io::Error) -> RepositoryError {
        RepositoryError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn load(&self) -> Result<EmployeeDocument, RepositoryError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "employee data file missing, starting empty");
                return Ok(EmployeeDocument::default());
            }
            Err(err) => return Err(self.io_error(err)),
        };

        serde_json::from_reader(BufReader::new(file)).map_err(|source| RepositoryError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, document: &EmployeeDocument) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let staging = self.path.with_extension("json.tmp");
        let file = File::create(&staging).map_err(|err| self.io_error(err))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, document).map_err(|source| {
            RepositoryError::Corrupt {
                path: staging.clone(),
                source,
            }
        })?;
        writer.flush().map_err(|err| self.io_error(err))?;
        drop(writer);

        fs::rename(&staging, &self.path).map_err(|err| self.io_error(err))?;
        debug!(
            path = %self.path.display(),
            employees = document.employees.len(),
            "employee data saved"
        );
        Ok(())
    }
}

impl EmployeeRepository for JsonFileRepository {
    fn insert(&self, employee: Employee) -> Result<Employee, RepositoryError> {
        let _guard = self.guard()?;
        let mut document = self.load()?;
        if document.employees.iter().any(|existing| existing.id == employee.id) {
            return Err(RepositoryError::Conflict);
        }
        document.employees.push(employee.clone());
        self.save(&document)?;
        Ok(employee)
    }

    fn update(&self, employee: Employee) -> Result<(), RepositoryError> {
        let _guard = self.guard()?;
        let mut document = self.load()?;
        let slot = document
            .employees
            .iter_mut()
            .find(|existing| existing.id == employee.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = employee;
        self.save(&document)
    }

    fn fetch(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let _guard = self.guard()?;
        let document = self.load()?;
        Ok(document
            .employees
            .into_iter()
            .find(|employee| &employee.id == id))
    }

    fn list(&self) -> Result<Vec<Employee>, RepositoryError> {
        let _guard = self.guard()?;
        Ok(self.load()?.employees)
    }

    fn remove(&self, id: &EmployeeId) -> Result<Employee, RepositoryError> {
        let _guard = self.guard()?;
        let mut document = self.load()?;
        let index = document
            .employees
            .iter()
            .position(|employee| &employee.id == id)
            .ok_or(RepositoryError::NotFound)?;
        let removed = document.employees.remove(index);
        self.save(&document)?;
        Ok(removed)
    }
}
