use crate::infra::{file_grading_service, grading_engine, load_catalog, parse_answer};
use clap::{Args, Subcommand};
use function_grade::config::AppConfig;
use function_grade::employees::{Assessment, AssessmentRequest, Employee, EmployeeId, NewEmployee};
use function_grade::error::AppError;
use function_grade::grading::{Characteristic, GradeOutcome, RawScores, RoleCatalog};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct GradeArgs {
    /// Function family to match roles in
    #[arg(long)]
    pub(crate) family: String,
    /// Raw complexity score
    #[arg(long)]
    pub(crate) complexity: u16,
    /// Raw independence score
    #[arg(long)]
    pub(crate) independence: u16,
    /// Raw risk-of-damage score
    #[arg(long)]
    pub(crate) risk: u16,
    /// Raw physical aspects score
    #[arg(long)]
    pub(crate) physical: u16,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogArgs {
    /// Only list the roles of this family
    #[arg(long)]
    pub(crate) family: Option<String>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum EmployeesCommand {
    /// List registered employees with their current grade
    List,
    /// Register a new employee
    Add(AddEmployeeArgs),
    /// Remove an employee and their assessment
    Remove {
        /// Employee id
        #[arg(long)]
        id: String,
    },
    /// Score questionnaire answers and save the assessment on an employee
    Assess(AssessArgs),
    /// Write the employee overview as CSV
    Export {
        /// Output file (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub(crate) struct AddEmployeeArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long, default_value = "")]
    pub(crate) department: String,
    #[arg(long, default_value = "")]
    pub(crate) notes: String,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Employee id
    #[arg(long)]
    pub(crate) id: String,
    /// Function family to match roles in
    #[arg(long)]
    pub(crate) family: String,
    /// Questionnaire answer as KEY=VALUE, e.g. complexity_0=2 (repeatable)
    #[arg(long = "answer", value_parser = parse_answer)]
    pub(crate) answers: Vec<(String, u8)>,
    /// Free-text reviewer note
    #[arg(long, default_value = "")]
    pub(crate) note: String,
}

pub(crate) fn run_grade(args: GradeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = grading_engine(&config.storage)?;

    let scores = RawScores {
        complexity: args.complexity,
        independence: args.independence,
        risk: args.risk,
        physical: args.physical,
    };
    let outcome = engine.grade(&args.family, scores);
    render_outcome(&outcome);
    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.storage)?;
    render_catalog(&catalog, args.family.as_deref());
    Ok(())
}

pub(crate) fn run_employees(command: EmployeesCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = file_grading_service(&config.storage)?;

    match command {
        EmployeesCommand::List => {
            let employees = service.list_employees()?;
            render_employees(&employees);
        }
        EmployeesCommand::Add(args) => {
            let employee = service.add_employee(NewEmployee {
                name: args.name,
                department: args.department,
                notes: args.notes,
            })?;
            println!("Added {} [{}]", employee.display_label(), employee.id);
        }
        EmployeesCommand::Remove { id } => {
            let removed = service.remove_employee(&EmployeeId(id))?;
            println!("Removed {} [{}]", removed.display_label(), removed.id);
        }
        EmployeesCommand::Assess(args) => {
            let id = EmployeeId(args.id);
            let assessment = service.save_assessment(
                &id,
                AssessmentRequest {
                    family: args.family,
                    answers: args.answers.into_iter().collect(),
                    review_note: args.note,
                },
            )?;
            render_assessment(&id, &assessment);
        }
        EmployeesCommand::Export { output } => match output {
            Some(path) => {
                let file = File::create(&path)?;
                service.export_overview(BufWriter::new(file))?;
                println!("Overview written to {}", path.display());
            }
            None => service.export_overview(io::stdout().lock())?,
        },
    }

    Ok(())
}

fn render_outcome(outcome: &GradeOutcome) {
    println!("Level per characteristic");
    for characteristic in Characteristic::ordered() {
        println!(
            "- {} (score {}): {}",
            characteristic.label(),
            outcome.scores.get(characteristic),
            outcome.levels.get(characteristic)
        );
    }

    println!("\nCalculated function level: {}", outcome.final_level);
    println!("{}", outcome.rationale);

    match &outcome.best_role {
        Some(best) => {
            println!("\nSuggested standard role: {} [{}]", best.title, best.code);
            println!("Alternatives (closest first)");
            for role in &outcome.alternatives {
                println!("- {} (distance: {})", role.title, role.distance);
            }
        }
        None => println!(
            "\nNo standard role available for family '{}'",
            outcome.family
        ),
    }
}

fn render_catalog(catalog: &RoleCatalog, family: Option<&str>) {
    match family {
        Some(family) => {
            let roles: Vec<_> = catalog.roles_in(family).collect();
            if roles.is_empty() {
                println!("No standard roles configured for family '{family}'");
                return;
            }
            println!("{family}");
            for role in roles {
                println!("- {} | {} | level {}", role.code, role.title, role.level);
            }
        }
        None => {
            println!("Function families");
            for family in catalog.families() {
                println!("- {} ({} roles)", family, catalog.roles_in(&family).count());
            }
        }
    }
}

fn render_employees(employees: &[Employee]) {
    if employees.is_empty() {
        println!("No employees registered yet.");
        return;
    }

    println!("Employees");
    for employee in employees {
        let grade = match &employee.assessment {
            Some(assessment) => format!(
                "level {} in {}, {}",
                assessment.final_level,
                assessment.family,
                if assessment.best_role_title.is_empty() {
                    "no standard role"
                } else {
                    assessment.best_role_title.as_str()
                }
            ),
            None => "not assessed".to_string(),
        };
        println!("- [{}] {}: {}", employee.id, employee.display_label(), grade);
    }
}

fn render_assessment(id: &EmployeeId, assessment: &Assessment) {
    println!("Assessment saved for {id}");
    for characteristic in Characteristic::ordered() {
        println!(
            "- {}: {}",
            characteristic.label(),
            assessment.levels.get(characteristic)
        );
    }
    println!("Function level: {}", assessment.final_level);
    println!("{}", assessment.rationale);
    if assessment.best_role_title.is_empty() {
        println!("No standard role available for family '{}'", assessment.family);
    } else {
        println!(
            "Standard role: {} [{}]",
            assessment.best_role_title, assessment.best_role_code
        );
    }
}
