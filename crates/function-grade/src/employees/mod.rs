//! Employee register and the assessments attached to it.

pub mod domain;
pub mod export;
pub mod file_store;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Assessment, AssessmentRequest, Employee, EmployeeId, NewEmployee, PreviewRequest};
pub use export::{write_overview_csv, ExportError};
pub use file_store::JsonFileRepository;
pub use repository::{EmployeeRepository, RepositoryError};
pub use router::grading_router;
pub use service::{GradingService, GradingServiceError};
