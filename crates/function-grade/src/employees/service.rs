use std::io::Write;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{DateTime, Local, NaiveDateTime};
use tracing::info;

use super::domain::{Assessment, AssessmentRequest, Employee, EmployeeId, NewEmployee, PreviewRequest};
use super::export::{write_overview_csv, ExportError};
use super::repository::{EmployeeRepository, RepositoryError};
use crate::grading::{GradeOutcome, GradingEngine, QuestionnaireError};

/// Application state shared by the CLI and HTTP layers: the grading engine
/// plus the employee store it saves assessments into.
pub struct GradingService<R> {
    repository: Arc<R>,
    engine: Arc<GradingEngine>,
}

static LAST_ISSUED_MICROS: AtomicI64 = AtomicI64::new(0);

/// Local timestamp id (`%Y%m%d%H%M%S%6f`), bumped by a microsecond when two
/// employees are added within the same tick.
fn next_employee_id() -> EmployeeId {
    let now = Local::now();
    let micros = now.timestamp_micros();
    let previous = match LAST_ISSUED_MICROS.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        Some(micros.max(last + 1))
    }) {
        Ok(previous) | Err(previous) => previous,
    };
    let issued = micros.max(previous + 1);

    let stamp = DateTime::from_timestamp_micros(issued)
        .map(|utc| utc.with_timezone(&Local))
        .unwrap_or(now);
    EmployeeId(stamp.format("%Y%m%d%H%M%S%6f").to_string())
}

impl<R> GradingService<R>
where
    R: EmployeeRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: GradingEngine) -> Self {
        Self {
            repository,
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &GradingEngine {
        &self.engine
    }

    /// Register a new employee. The name is required; all text is trimmed.
    pub fn add_employee(&self, new: NewEmployee) -> Result<Employee, GradingServiceError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(GradingServiceError::MissingName);
        }

        let employee = Employee {
            id: next_employee_id(),
            name: name.to_string(),
            department: new.department.trim().to_string(),
            notes: new.notes.trim().to_string(),
            assessment: None,
        };

        let stored = self.repository.insert(employee)?;
        info!(employee_id = %stored.id, name = %stored.name, "employee added");
        Ok(stored)
    }

    pub fn list_employees(&self) -> Result<Vec<Employee>, GradingServiceError> {
        Ok(self.repository.list()?)
    }

    pub fn get_employee(&self, id: &EmployeeId) -> Result<Employee, GradingServiceError> {
        let employee = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(employee)
    }

    pub fn remove_employee(&self, id: &EmployeeId) -> Result<Employee, GradingServiceError> {
        let removed = self.repository.remove(id)?;
        info!(employee_id = %removed.id, "employee removed");
        Ok(removed)
    }

    /// Grade a scoring session without touching the store.
    pub fn preview(&self, request: &PreviewRequest) -> Result<GradeOutcome, GradingServiceError> {
        self.ensure_family(&request.family)?;
        Ok(self.engine.grade_answers(&request.family, &request.answers)?)
    }

    /// Grade a scoring session and attach it to the employee, replacing any
    /// earlier assessment.
    pub fn save_assessment(
        &self,
        id: &EmployeeId,
        request: AssessmentRequest,
    ) -> Result<Assessment, GradingServiceError> {
        self.save_assessment_at(id, request, Local::now().naive_local())
    }

    pub fn save_assessment_at(
        &self,
        id: &EmployeeId,
        request: AssessmentRequest,
        saved_at: NaiveDateTime,
    ) -> Result<Assessment, GradingServiceError> {
        let mut employee = self.get_employee(id)?;
        self.ensure_family(&request.family)?;

        let AssessmentRequest {
            family,
            answers,
            review_note,
        } = request;
        let outcome = self.engine.grade_answers(&family, &answers)?;
        let assessment = Assessment::from_outcome(outcome, answers, &review_note, saved_at);

        employee.assessment = Some(assessment.clone());
        self.repository.update(employee)?;

        info!(
            employee_id = %id,
            family = %assessment.family,
            final_level = assessment.final_level,
            role = %assessment.best_role_code,
            "assessment saved"
        );
        Ok(assessment)
    }

    /// Write the employee overview CSV.
    pub fn export_overview<W: Write>(&self, writer: W) -> Result<(), GradingServiceError> {
        let employees = self.repository.list()?;
        write_overview_csv(&employees, writer)?;
        Ok(())
    }

    fn ensure_family(&self, family: &str) -> Result<(), GradingServiceError> {
        if self.engine.catalog().contains_family(family) {
            Ok(())
        } else {
            Err(GradingServiceError::UnknownFamily(family.to_string()))
        }
    }
}

/// Error raised by the grading service.
#[derive(Debug, thiserror::Error)]
pub enum GradingServiceError {
    #[error("employee name is required")]
    MissingName,
    #[error("unknown function family '{0}'")]
    UnknownFamily(String),
    #[error(transparent)]
    Questionnaire(#[from] QuestionnaireError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("blocking storage task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl GradingServiceError {
    /// HTTP status shared by the grading router and `AppError`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GradingServiceError::MissingName
            | GradingServiceError::UnknownFamily(_)
            | GradingServiceError::Questionnaire(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GradingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            GradingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            GradingServiceError::Repository(_)
            | GradingServiceError::Export(_)
            | GradingServiceError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
