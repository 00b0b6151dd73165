//! Display formatting for salaries, dates, and names.

use chrono::NaiveDate;

/// Whole-dollar USD amount with thousands separators: `95000` → `$95,000`.
pub fn format_salary(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}${}", sign, grouped)
}

/// Short US date: `2023-03-15` → `Mar 15, 2023`.
///
/// Input that is not a `YYYY-MM-DD` date is returned unchanged.
pub fn format_date(iso_date: &str) -> String {
    match NaiveDate::parse_from_str(iso_date, "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => iso_date.to_string(),
    }
}

/// Up to two uppercase initials from the leading words of `name`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Number as typed into a form field: no trailing `.0` for whole values.
pub fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
