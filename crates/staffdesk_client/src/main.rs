//! Command-line client for the staffdesk employee API.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use staffdesk_client::{connect, ApiClient, Console};
use staffdesk_core::config::normalize_api_url;
use staffdesk_core::format::{format_date, format_salary};
use staffdesk_core::selectors::positions_matching;
use staffdesk_core::validation::{is_iso_date, EmployeeForm, ValidationErrors};
use staffdesk_core::{Config, Employee, EmploymentType, Severity, UiAction};
use std::collections::BTreeSet;
use std::io;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "staffdesk", about = "Employee directory CLI", version)]
struct Cli {
    /// API base URL (can also be set via STAFFDESK_API_URL)
    #[arg(short, long, env = "STAFFDESK_API_URL")]
    server: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Request timeout in milliseconds
    #[arg(short = 't', long, env = "STAFFDESK_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Default, Clone, PartialEq)]
struct ListArgs {
    /// Case-insensitive match on name, email, or position
    #[arg(short = 'q', long)]
    search: Option<String>,
    /// Employment type (repeatable)
    #[arg(long = "type", value_parser = parse_employment_type)]
    types: Vec<EmploymentType>,
    #[arg(long)]
    salary_min: Option<f64>,
    #[arg(long)]
    salary_max: Option<f64>,
    /// Earliest start date, YYYY-MM-DD
    #[arg(long, value_parser = parse_filter_date)]
    from: Option<String>,
    /// Latest start date, YYYY-MM-DD
    #[arg(long, value_parser = parse_filter_date)]
    to: Option<String>,
    /// Exact position label (repeatable)
    #[arg(long = "position")]
    positions: Vec<String>,
}

#[derive(clap::Args, Debug, Default, Clone, PartialEq)]
struct FieldArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    position: Option<String>,
    #[arg(long)]
    salary: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    start_date: Option<String>,
    #[arg(long = "type", value_parser = parse_employment_type)]
    employment_type: Option<EmploymentType>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// List employees matching the search and filters
    List(ListArgs),
    /// List distinct positions
    Positions {
        /// Only positions containing this text
        #[arg(short, long = "match")]
        needle: Option<String>,
    },
    /// Show one employee
    Show { id: String },
    /// Create an employee
    Create(FieldArgs),
    /// Change fields of an employee; omitted fields keep their value
    Update {
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete an employee
    Delete { id: String },
}

fn parse_employment_type(value: &str) -> Result<EmploymentType, String> {
    value.parse()
}

fn parse_filter_date(value: &str) -> Result<String, String> {
    if is_iso_date(value) {
        Ok(value.to_string())
    } else {
        Err(format!("invalid date '{}' (expected YYYY-MM-DD)", value))
    }
}

/// Filter actions for `args`, in the order the list view applies them.
fn filter_actions(args: &ListArgs) -> Vec<UiAction> {
    let mut actions = Vec::new();
    if let Some(search) = &args.search {
        actions.push(UiAction::SetSearchQuery(search.clone()));
    }
    if !args.types.is_empty() {
        actions.push(UiAction::SetEmploymentTypes(
            args.types.iter().copied().collect::<BTreeSet<_>>(),
        ));
    }
    actions.push(UiAction::SetSalaryMin(args.salary_min));
    actions.push(UiAction::SetSalaryMax(args.salary_max));
    actions.push(UiAction::SetStartDateFrom(args.from.clone()));
    actions.push(UiAction::SetStartDateTo(args.to.clone()));
    if !args.positions.is_empty() {
        actions.push(UiAction::SetPositions(
            args.positions.iter().cloned().collect(),
        ));
    }
    actions
}

/// Overlay the provided fields onto `base`.
fn apply_fields(mut base: EmployeeForm, fields: FieldArgs) -> EmployeeForm {
    if let Some(name) = fields.name {
        base.name = name;
    }
    if let Some(email) = fields.email {
        base.email = email;
    }
    if let Some(position) = fields.position {
        base.position = position;
    }
    if let Some(salary) = fields.salary {
        base.salary = salary;
    }
    if let Some(start_date) = fields.start_date {
        base.start_date = start_date;
    }
    if let Some(employment_type) = fields.employment_type {
        base.employment_type = Some(employment_type);
    }
    base
}

fn format_rows(employees: &[Employee]) -> String {
    employees
        .iter()
        .map(|e| {
            format!(
                "{:<5} {:<24} {:<28} {:<18} {:>10}  {:<12}  {}",
                e.id,
                e.name,
                e.email,
                e.position,
                format_salary(e.salary),
                format_date(&e.start_date),
                e.employment_type
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|error| format!("  --{}: {}", flag_name(error.field.as_str()), error.message))
        .collect::<Vec<_>>()
        .join("\n")
}

fn flag_name(field: &str) -> String {
    match field {
        "startDate" => "start-date".to_string(),
        "employmentType" => "type".to_string(),
        other => other.to_string(),
    }
}

fn resolve_config(server: Option<String>, timeout_ms: Option<u64>) -> Config {
    let mut config = Config::from_env();
    if let Some(url) = server.as_deref().and_then(normalize_api_url) {
        config.api_url = url;
    }
    if let Some(ms) = timeout_ms.filter(|ms| *ms > 0) {
        config.request_timeout_ms = ms;
    }
    config
}

fn exit_with(message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

/// Wait for outstanding requests; exit on timeout or an error notification.
fn settle(console: &mut Console, timeout: Duration, action: &str) {
    if !console.wait_idle(timeout) {
        exit_with(format!("{} failed: no response from the API", action));
    }
    let notification = console.notification();
    if notification.open && notification.severity == Severity::Error {
        exit_with(format!("{} failed: {}", action, notification.message));
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_employee(employee: &Employee, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        return print_json(employee);
    }
    println!("{}", format_rows(std::slice::from_ref(employee)));
    Ok(())
}

fn submit(console: &mut Console, form: &EmployeeForm, action: &str) {
    if let Err(errors) = console.submit_form(form) {
        exit_with(format!(
            "{} failed: invalid fields\n{}",
            action,
            format_validation_errors(&errors)
        ));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staffdesk=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let Cli {
        server,
        json,
        timeout_ms,
        command,
    } = Cli::parse();

    if let Commands::Completions { shell } = &command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let config = resolve_config(server, timeout_ms);
    // Fetch may retry once, and mutations are followed by a refetch.
    let settle_timeout = config.request_timeout() * 3;
    let client = ApiClient::from_config(&config)?;
    let mut console = connect(client)?;

    console.refresh();
    settle(&mut console, settle_timeout, "Fetch");

    match command {
        Commands::Completions { .. } => {}
        Commands::List(args) => {
            for action in filter_actions(&args) {
                console.dispatch(action);
            }
            let rows = console.visible_employees();
            if json {
                print_json(&rows[..])?;
            } else if !rows.is_empty() {
                println!("{}", format_rows(&rows));
            }
        }
        Commands::Positions { needle } => {
            let positions = console.positions();
            let matching = positions_matching(&positions, needle.as_deref().unwrap_or(""));
            if json {
                print_json(&matching)?;
            } else {
                for position in matching {
                    println!("{}", position);
                }
            }
        }
        Commands::Show { id } => match console.state().employees.get(&id) {
            Some(employee) => print_employee(employee, json)?,
            None => exit_with("Show failed: Employee not found"),
        },
        Commands::Create(fields) => {
            console.open_create_form();
            let form = apply_fields(console.form_values(), fields);
            submit(&mut console, &form, "Create");
            settle(&mut console, settle_timeout, "Create");
            let created = console
                .last_created_id()
                .and_then(|id| console.state().employees.get(id).cloned());
            match created {
                Some(employee) if json => print_json(&employee)?,
                Some(employee) => println!("Created: {} ({})", employee.name, employee.id),
                None => println!("{}", console.notification().message),
            }
        }
        Commands::Update { id, fields } => {
            console.open_edit_form(id.clone());
            if console.selected_employee().is_none() {
                exit_with("Update failed: Employee not found");
            }
            let form = apply_fields(console.form_values(), fields);
            submit(&mut console, &form, "Update");
            settle(&mut console, settle_timeout, "Update");
            match console.state().employees.get(&id) {
                Some(employee) if json => print_json(employee)?,
                Some(employee) => println!("Updated: {} ({})", employee.name, employee.id),
                None => println!("{}", console.notification().message),
            }
        }
        Commands::Delete { id } => {
            console.request_delete(id.clone());
            console.confirm_delete();
            settle(&mut console, settle_timeout, "Delete");
            if json {
                print_json(&serde_json::json!({ "deleted": id }))?;
            } else {
                println!("Deleted employee: {}", id);
            }
        }
    }

    Ok(())
}
