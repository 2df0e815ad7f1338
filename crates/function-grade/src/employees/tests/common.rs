use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::employees::domain::{AssessmentRequest, Employee, EmployeeId, NewEmployee};
use crate::employees::repository::{EmployeeRepository, RepositoryError};
use crate::employees::{grading_router, GradingService};
use crate::grading::{Answers, GradingEngine};

pub(super) fn saved_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 14)
        .expect("valid date")
        .and_hms_opt(9, 30, 0)
        .expect("valid time")
}

pub(super) fn new_employee(name: &str, department: &str) -> NewEmployee {
    NewEmployee {
        name: name.to_string(),
        department: department.to_string(),
        notes: String::new(),
    }
}

pub(super) fn answers(pairs: &[(&str, u8)]) -> Answers {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), *value))
        .collect()
}

/// Complexity 5, independence 6, risk 5, physical 2: a level 5 majority.
pub(super) fn montage_answers() -> Answers {
    answers(&[
        ("complexity_0", 1),
        ("complexity_1", 2),
        ("complexity_3", 2),
        ("independence_0", 3),
        ("independence_1", 3),
        ("risk_0", 2),
        ("risk_1", 3),
        ("physical_2", 2),
    ])
}

pub(super) fn assessment_request(family: &str) -> AssessmentRequest {
    AssessmentRequest {
        family: family.to_string(),
        answers: montage_answers(),
        review_note: "  Checked with team lead  ".to_string(),
    }
}

pub(super) fn build_service() -> (GradingService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = GradingService::new(repository.clone(), GradingEngine::standard());
    (service, repository)
}

pub(super) fn router_with_service(service: GradingService<MemoryRepository>) -> axum::Router {
    grading_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) employees: Arc<Mutex<Vec<Employee>>>,
}

impl EmployeeRepository for MemoryRepository {
    fn insert(&self, employee: Employee) -> Result<Employee, RepositoryError> {
        let mut guard = self.employees.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == employee.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(employee.clone());
        Ok(employee)
    }

    fn update(&self, employee: Employee) -> Result<(), RepositoryError> {
        let mut guard = self.employees.lock().expect("repository mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == employee.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = employee;
        Ok(())
    }

    fn fetch(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let guard = self.employees.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|employee| &employee.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Employee>, RepositoryError> {
        Ok(self
            .employees
            .lock()
            .expect("repository mutex poisoned")
            .clone())
    }

    fn remove(&self, id: &EmployeeId) -> Result<Employee, RepositoryError> {
        let mut guard = self.employees.lock().expect("repository mutex poisoned");
        let index = guard
            .iter()
            .position(|employee| &employee.id == id)
            .ok_or(RepositoryError::NotFound)?;
        Ok(guard.remove(index))
    }
}

pub(super) struct UnavailableRepository;

impl EmployeeRepository for UnavailableRepository {
    fn insert(&self, _employee: Employee) -> Result<Employee, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn update(&self, _employee: Employee) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn fetch(&self, _id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn list(&self) -> Result<Vec<Employee>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn remove(&self, _id: &EmployeeId) -> Result<Employee, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn temp_data_file(test: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "function-grade-{test}-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir.join("functieapp_data.json")
}
