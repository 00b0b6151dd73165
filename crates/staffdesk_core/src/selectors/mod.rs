//! Derived views over [`RootState`]: the filtered roster, distinct positions,
//! and the active filter count.
//!
//! The free functions are pure. [`Selectors`] wraps them with single-entry
//! memoization keyed by the store revision, the search text, and the filter
//! value, so unrelated state changes never trigger a recomputation.

use crate::models::employee::{Employee, EmploymentType};
use crate::store::employees::EmployeeStore;
use crate::store::RootState;
use std::collections::BTreeSet;
use std::sync::Arc;


/// Multi-category roster filter. An empty set or `None` bound never restricts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub employment_types: BTreeSet<EmploymentType>,
    /// Inclusive lower salary bound.
    pub salary_min: Option<f64>,
    /// Inclusive upper salary bound.
    pub salary_max: Option<f64>,
    /// Inclusive `YYYY-MM-DD` lower bound.
    pub start_date_from: Option<String>,
    /// Inclusive `YYYY-MM-DD` upper bound.
    pub start_date_to: Option<String>,
    pub positions: BTreeSet<String>,
}

impl FilterCriteria {
    /// Number of categories (not values) currently restricting the roster.
    pub fn active_count(&self) -> usize {
        [
            !self.employment_types.is_empty(),
            self.salary_min.is_some() || self.salary_max.is_some(),
            self.start_date_from.is_some() || self.start_date_to.is_some(),
            !self.positions.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

fn matches_search(employee: &Employee, needle: Option<&str>) -> bool {
    let Some(needle) = needle else {
        return true;
    };
    employee.name.to_lowercase().contains(needle)
        || employee.email.to_lowercase().contains(needle)
        || employee.position.to_lowercase().contains(needle)
}

fn matches_employment_type(employee: &Employee, criteria: &FilterCriteria) -> bool {
    criteria.employment_types.is_empty()
        || criteria.employment_types.contains(&employee.employment_type)
}

fn matches_salary(employee: &Employee, criteria: &FilterCriteria) -> bool {
    criteria.salary_min.map_or(true, |min| employee.salary >= min)
        && criteria.salary_max.map_or(true, |max| employee.salary <= max)
}

fn matches_start_date(employee: &Employee, criteria: &FilterCriteria) -> bool {
    let date = employee.start_date.as_str();
    criteria
        .start_date_from
        .as_deref()
        .map_or(true, |from| date >= from)
        && criteria
            .start_date_to
            .as_deref()
            .map_or(true, |to| date <= to)
}

fn matches_position(employee: &Employee, criteria: &FilterCriteria) -> bool {
    criteria.positions.is_empty() || criteria.positions.contains(&employee.position)
}

/// Lowercased search needle, or `None` when the query is blank.
///
/// Blank means whitespace-only; a non-blank query is matched as typed
/// (including inner and surrounding spaces).
pub fn search_needle(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

/// Narrow `employees` by search text and criteria, keeping input order.
///
/// Stages run in a fixed order (search, employment type, salary, start
/// date, position) and short-circuit per record.
pub fn filter_employees<'a, I>(employees: I, query: &str, criteria: &FilterCriteria) -> Vec<Employee>
where
    I: IntoIterator<Item = &'a Employee>,
{
    let needle = search_needle(query);
    employees
        .into_iter()
        .filter(|employee| {
            matches_search(employee, needle.as_deref())
                && matches_employment_type(employee, criteria)
                && matches_salary(employee, criteria)
                && matches_start_date(employee, criteria)
                && matches_position(employee, criteria)
        })
        .cloned()
        .collect()
}

/// Distinct positions across all employees, ascending.
pub fn unique_positions<'a, I>(employees: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Employee>,
{
    employees
        .into_iter()
        .map(|employee| employee.position.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Positions whose label contains `needle`, case-insensitively.
pub fn positions_matching<'a>(positions: &'a [String], needle: &str) -> Vec<&'a str> {
    let needle = needle.to_lowercase();
    positions
        .iter()
        .filter(|position| position.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

/// Look up an employee by an optional id.
pub fn employee_by_id<'a>(store: &'a EmployeeStore, id: Option<&str>) -> Option<&'a Employee> {
    id.and_then(|id| store.get(id))
}

/// Number of active filter categories in `state`.
pub fn active_filter_count(state: &RootState) -> usize {
    state.ui.filters.active_count()
}

#[derive(Debug)]
struct FilteredEntry {
    revision: u64,
    query: String,
    criteria: FilterCriteria,
    rows: Arc<[Employee]>,
}

#[derive(Debug)]
struct PositionsEntry {
    revision: u64,
    positions: Arc<[String]>,
}

/// Memoized selectors over a [`RootState`].
///
/// Each selector keeps the last inputs and output; a call with equal inputs
/// returns the same shared slice without recomputing.
#[derive(Debug, Default)]
pub struct Selectors {
    filtered: Option<FilteredEntry>,
    positions: Option<PositionsEntry>,
    recomputations: usize,
}

impl Selectors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible roster for the current store, search text, and filters.
    pub fn filtered_employees(&mut self, state: &RootState) -> Arc<[Employee]> {
        let revision = state.employees.revision();
        let query = state.ui.search_query.as_str();
        let criteria = &state.ui.filters;
        if let Some(entry) = &self.filtered {
            if entry.revision == revision && entry.query == query && entry.criteria == *criteria {
                return Arc::clone(&entry.rows);
            }
        }

        self.recomputations += 1;
        let rows: Arc<[Employee]> = filter_employees(state.employees.iter(), query, criteria).into();
        self.filtered = Some(FilteredEntry {
            revision,
            query: query.to_string(),
            criteria: criteria.clone(),
            rows: Arc::clone(&rows),
        });
        rows
    }

    /// Distinct positions; depends on the store only.
    pub fn unique_positions(&mut self, state: &RootState) -> Arc<[String]> {
        let revision = state.employees.revision();
        if let Some(entry) = &self.positions {
            if entry.revision == revision {
                return Arc::clone(&entry.positions);
            }
        }

        self.recomputations += 1;
        let positions: Arc<[String]> = unique_positions(state.employees.iter()).into();
        self.positions = Some(PositionsEntry {
            revision,
            positions: Arc::clone(&positions),
        });
        positions
    }

    /// Total number of cache misses across all selectors.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}
