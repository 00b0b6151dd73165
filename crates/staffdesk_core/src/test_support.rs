//! Shared test-only fixtures for staffdesk_core.

use crate::models::employee::{Employee, EmploymentType};

fn employee(
    id: &str,
    name: &str,
    position: &str,
    salary: f64,
    start_date: &str,
    employment_type: EmploymentType,
) -> Employee {
    let first = name.split_whitespace().next().unwrap_or(name);
    Employee {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@test.com", first.to_ascii_lowercase()),
        position: position.to_string(),
        salary,
        start_date: start_date.to_string(),
        employment_type,
    }
}

pub(crate) fn alice() -> Employee {
    employee(
        "1",
        "Alice Johnson",
        "Engineer",
        90_000.0,
        "2023-03-15",
        EmploymentType::FullTime,
    )
}

pub(crate) fn bob() -> Employee {
    employee(
        "2",
        "Bob Smith",
        "Designer",
        80_000.0,
        "2023-06-01",
        EmploymentType::Contract,
    )
}

pub(crate) fn carol() -> Employee {
    employee(
        "3",
        "Carol Lee",
        "Engineer",
        95_000.0,
        "2024-01-10",
        EmploymentType::PartTime,
    )
}
