//! Demo employees loaded when seeding is enabled.

use staffdesk_core::{EmployeeDraft, EmploymentType};

fn draft(
    name: &str,
    email: &str,
    position: &str,
    salary: f64,
    start_date: &str,
    employment_type: EmploymentType,
) -> EmployeeDraft {
    EmployeeDraft {
        name: name.to_string(),
        email: email.to_string(),
        position: position.to_string(),
        salary,
        start_date: start_date.to_string(),
        employment_type,
    }
}

/// Three employees, created in this order as ids `"1"` to `"3"`.
pub fn demo_drafts() -> Vec<EmployeeDraft> {
    vec![
        draft(
            "Alice Johnson",
            "alice@test.com",
            "Engineer",
            95_000.0,
            "2023-03-15",
            EmploymentType::FullTime,
        ),
        draft(
            "Bob Smith",
            "bob@test.com",
            "Designer",
            88_000.0,
            "2023-06-01",
            EmploymentType::Contract,
        ),
        draft(
            "Carol Williams",
            "carol@test.com",
            "Manager",
            105_000.0,
            "2024-01-10",
            EmploymentType::FullTime,
        ),
    ]
}
