use std::path::PathBuf;

use super::domain::{Employee, EmployeeId};

/// Storage abstraction so the service can be exercised without a data file.
pub trait EmployeeRepository: Send + Sync {
    fn insert(&self, employee: Employee) -> Result<Employee, RepositoryError>;
    fn update(&self, employee: Employee) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError>;
    /// All employees in insertion order.
    fn list(&self) -> Result<Vec<Employee>, RepositoryError>;
    fn remove(&self, id: &EmployeeId) -> Result<Employee, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("employee already exists")]
    Conflict,
    #[error("employee not found")]
    NotFound,
    #[error("employee data file {} is not valid JSON: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("employee data file {} could not be accessed: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
