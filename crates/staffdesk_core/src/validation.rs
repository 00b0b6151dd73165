//! Employee form input and its validation rules.
//!
//! Form fields hold raw user input (salary is text until validated).
//! [`EmployeeForm::validate`] either produces an [`EmployeeDraft`] ready for
//! the API or reports every failing field with its inline message.

use crate::models::employee::{Employee, EmployeeDraft, EmploymentType};
use chrono::NaiveDate;
use std::fmt;

const NAME_MIN_CHARS: usize = 2;

/// Form fields, named as the API names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Position,
    Salary,
    StartDate,
    EmploymentType,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Position => "position",
            Field::Salary => "salary",
            Field::StartDate => "startDate",
            Field::EmploymentType => "employmentType",
        }
    }
}

/// One failing field and the message shown next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// All field errors from one validation pass, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: Field, message: &str) {
        self.errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Message for `field`, if it failed.
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field.as_str(), error.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw values of the create/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeForm {
    pub name: String,
    pub email: String,
    pub position: String,
    pub salary: String,
    pub start_date: String,
    pub employment_type: Option<EmploymentType>,
}

impl Default for EmployeeForm {
    /// Blank create form; employment type preselected to full-time.
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            position: String::new(),
            salary: String::new(),
            start_date: String::new(),
            employment_type: Some(EmploymentType::FullTime),
        }
    }
}

impl EmployeeForm {
    /// Form prefilled from an existing record, for editing.
    pub fn from_employee(employee: &Employee) -> Self {
        Self::from_draft(&employee.to_draft())
    }

    /// Form holding the values of an already-typed payload.
    pub fn from_draft(draft: &EmployeeDraft) -> Self {
        Self {
            name: draft.name.clone(),
            email: draft.email.clone(),
            position: draft.position.clone(),
            salary: crate::format::plain_number(draft.salary),
            start_date: draft.start_date.clone(),
            employment_type: Some(draft.employment_type),
        }
    }

    /// Check every field and build the request payload.
    ///
    /// # Errors
    /// Returns every failing field; nothing is sent when this fails.
    pub fn validate(&self) -> Result<EmployeeDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.name.chars().count() < NAME_MIN_CHARS {
            errors.push(Field::Name, "Name must be at least 2 characters");
        }
        if !is_valid_email(&self.email) {
            errors.push(Field::Email, "Invalid email address");
        }
        if self.position.is_empty() {
            errors.push(Field::Position, "Position is required");
        }
        let salary = match parse_salary(&self.salary) {
            Some(value) if value < 0.0 => {
                errors.push(Field::Salary, "Salary must be 0 or more");
                None
            }
            Some(value) => Some(value),
            None => {
                errors.push(Field::Salary, "Salary must be a number");
                None
            }
        };
        if self.start_date.is_empty() {
            errors.push(Field::StartDate, "Start date is required");
        } else if !is_iso_date(&self.start_date) {
            errors.push(Field::StartDate, "Start date must be a valid YYYY-MM-DD date");
        }
        if self.employment_type.is_none() {
            errors.push(Field::EmploymentType, "Employment type is required");
        }

        match (salary, self.employment_type) {
            (Some(salary), Some(employment_type)) if errors.is_empty() => Ok(EmployeeDraft {
                name: self.name.clone(),
                email: self.email.clone(),
                position: self.position.clone(),
                salary,
                start_date: self.start_date.clone(),
                employment_type,
            }),
            _ => Err(errors),
        }
    }
}

/// Apply the form rules to a payload that arrived already typed (API bodies).
///
/// # Errors
/// Returns the same field errors the form would show.
pub fn validate_draft(draft: &EmployeeDraft) -> Result<(), ValidationErrors> {
    EmployeeForm::from_draft(draft).validate().map(|_| ())
}

/// Numeric coercion of the salary input. Blank input counts as zero.
fn parse_salary(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// `true` for a real calendar date written as `YYYY-MM-DD`.
///
/// The shape is checked byte by byte first: start-date filters compare these
/// strings lexicographically, so only zero-padded dates are accepted.
pub fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    let padded = bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, byte)| match idx {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    padded && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Structural email check: one `@`, a non-empty local part, and a dotted
/// domain without empty labels. No whitespace anywhere.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || local.starts_with('.') || local.ends_with('.')
    {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|ch| ch.is_alphanumeric() || ch == '-')
        })
        && labels.last().map_or(false, |tld| tld.chars().count() >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> EmployeeForm {
        EmployeeForm {
            name: "Dana Scully".to_string(),
            email: "dana@fbi.gov".to_string(),
            position: "Analyst".to_string(),
            salary: "72000".to_string(),
            start_date: "2024-02-29".to_string(),
            employment_type: Some(EmploymentType::Contract),
        }
    }

    #[test]
    fn valid_form_produces_draft() {
        let draft = valid_form().validate().expect("valid form");
        assert_eq!(draft.name, "Dana Scully");
        assert_eq!(draft.salary, 72_000.0);
        assert_eq!(draft.employment_type, EmploymentType::Contract);
    }

    #[test]
    fn blank_name_reports_minimum_length() {
        let form = EmployeeForm {
            name: String::new(),
            ..valid_form()
        };
        let errors = form.validate().expect_err("blank name");
        let message = errors.message_for(Field::Name).expect("name error");
        assert!(message.contains("must be at least"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn default_form_reports_every_required_text_field() {
        let errors = EmployeeForm::default().validate().expect_err("blank form");
        let fields: Vec<Field> = errors.iter().map(|error| error.field).collect();
        assert_eq!(
            fields,
            vec![Field::Name, Field::Email, Field::Position, Field::StartDate]
        );
    }

    #[test]
    fn salary_must_be_numeric_and_non_negative() {
        let cases = [
            ("abc", Some("Salary must be a number")),
            ("NaN", Some("Salary must be a number")),
            ("inf", Some("Salary must be a number")),
            ("-1", Some("Salary must be 0 or more")),
            ("0", None),
            (" 1500.50 ", None),
        ];
        for (salary, expected) in cases {
            let form = EmployeeForm {
                salary: salary.to_string(),
                ..valid_form()
            };
            let result = form.validate();
            match expected {
                Some(message) => {
                    let errors = result.expect_err("salary should fail");
                    assert_eq!(errors.message_for(Field::Salary), Some(message), "salary: {:?}", salary);
                }
                None => {
                    result.expect("salary should pass");
                }
            }
        }
    }

    #[test]
    fn blank_salary_coerces_to_zero() {
        for blank in ["", "   "] {
            let draft = EmployeeForm {
                salary: blank.to_string(),
                ..valid_form()
            }
            .validate()
            .expect("blank salary is accepted");
            assert_eq!(draft.salary, 0.0);
        }
    }

    #[test]
    fn start_date_must_be_a_real_iso_date() {
        for bad in [
            "2023-02-30",
            "15/03/2023",
            "2023-3-15",
            " 2023-3-15",
            "+2023-3-15",
            "2023- 3-15",
            "2023-03-1 ",
            "2023/03/15",
        ] {
            let form = EmployeeForm {
                start_date: bad.to_string(),
                ..valid_form()
            };
            let errors = form.validate().expect_err("bad date");
            assert_eq!(
                errors.message_for(Field::StartDate),
                Some("Start date must be a valid YYYY-MM-DD date"),
                "date: {}",
                bad
            );
        }
    }

    #[test]
    fn iso_date_shape() {
        assert!(is_iso_date("2024-02-29"));
        assert!(!is_iso_date("2023-02-29"));
        assert!(!is_iso_date("2023-1-015"));
        assert!(!is_iso_date("２０２３-03-15"));
    }

    #[test]
    fn missing_employment_type_is_reported() {
        let form = EmployeeForm {
            employment_type: None,
            ..valid_form()
        };
        let errors = form.validate().expect_err("no type");
        assert_eq!(
            errors.message_for(Field::EmploymentType),
            Some("Employment type is required")
        );
    }

    #[test]
    fn email_shapes() {
        for good in ["a@b.co", "first.last@sub.example.org", "x+tag@test.com"] {
            assert!(is_valid_email(good), "expected valid: {}", good);
        }
        for bad in ["", "plain", "@test.com", "a@", "a@b", "a@@b.com", "a b@c.com", "a@b..com", "a@b.c"] {
            assert!(!is_valid_email(bad), "expected invalid: {}", bad);
        }
    }

    #[test]
    fn edit_form_round_trips_an_employee() {
        let employee = Employee::from_draft("5", valid_form().validate().expect("valid"));
        let form = EmployeeForm::from_employee(&employee);
        assert_eq!(form.salary, "72000");
        assert_eq!(form.validate().expect("valid"), employee.to_draft());
    }

    #[test]
    fn typed_drafts_use_the_same_rules() {
        let mut draft = valid_form().validate().expect("valid");
        assert!(validate_draft(&draft).is_ok());
        draft.salary = -10.0;
        let errors = validate_draft(&draft).expect_err("negative salary");
        assert_eq!(errors.message_for(Field::Salary), Some("Salary must be 0 or more"));
    }

    #[test]
    fn errors_render_field_prefixed() {
        let errors = EmployeeForm {
            name: "A".to_string(),
            position: String::new(),
            ..valid_form()
        }
        .validate()
        .expect_err("two errors");
        assert_eq!(
            errors.to_string(),
            "name: Name must be at least 2 characters; position: Position is required"
        );
    }
}
