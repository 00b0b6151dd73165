//! Transient interaction state: dialogs, flash row, notification, filters.

use crate::models::employee::EmploymentType;
use crate::selectors::FilterCriteria;
use std::collections::BTreeSet;
use std::fmt;

/// Whether the employee form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

/// Notification severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level tab of the employee page. Only the active roster is wired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActiveTab {
    #[default]
    Active,
}

/// Create/edit dialog state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub open: bool,
    pub mode: FormMode,
    /// Record being edited; always `None` while closed or creating.
    pub selected_employee_id: Option<String>,
}

/// Global notification banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub open: bool,
    pub message: String,
    pub severity: Severity,
}

/// Every UI transition the reducer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    SetSearchQuery(String),
    OpenCreateForm,
    OpenEditForm(String),
    CloseForm,
    OpenDeleteConfirm(String),
    CloseDeleteConfirm,
    SetFlashRow(String),
    /// Clears the flash marker only if it still points at this id.
    ClearFlashRow(String),
    ShowNotification { message: String, severity: Severity },
    HideNotification,
    ToggleSidebar,
    SetActiveTab(ActiveTab),
    SetEmploymentTypes(BTreeSet<EmploymentType>),
    ToggleEmploymentType(EmploymentType),
    SetSalaryMin(Option<f64>),
    SetSalaryMax(Option<f64>),
    SetStartDateFrom(Option<String>),
    SetStartDateTo(Option<String>),
    SetPositions(BTreeSet<String>),
    TogglePosition(String),
    ClearAllFilters,
}

/// Orthogonal UI flags; each axis changes independently of the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub search_query: String,
    pub form: FormState,
    pub confirm_delete_id: Option<String>,
    pub flash_row_id: Option<String>,
    pub notification: Notification,
    pub sidebar_collapsed: bool,
    pub active_tab: ActiveTab,
    pub filters: FilterCriteria,
}

// Date inputs report "" when cleared.
fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

impl UiState {
    /// Apply one action.
    pub fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::SetSearchQuery(query) => self.search_query = query,
            UiAction::OpenCreateForm => {
                self.form = FormState {
                    open: true,
                    mode: FormMode::Create,
                    selected_employee_id: None,
                };
            }
            UiAction::OpenEditForm(id) => {
                self.form = FormState {
                    open: true,
                    mode: FormMode::Edit,
                    selected_employee_id: Some(id),
                };
            }
            UiAction::CloseForm => {
                // Mode is left as-is so a closing dialog keeps its title.
                self.form.open = false;
                self.form.selected_employee_id = None;
            }
            UiAction::OpenDeleteConfirm(id) => self.confirm_delete_id = Some(id),
            UiAction::CloseDeleteConfirm => self.confirm_delete_id = None,
            UiAction::SetFlashRow(id) => self.flash_row_id = Some(id),
            UiAction::ClearFlashRow(id) => {
                if self.flash_row_id.as_deref() == Some(id.as_str()) {
                    self.flash_row_id = None;
                }
            }
            UiAction::ShowNotification { message, severity } => {
                self.notification = Notification {
                    open: true,
                    message,
                    severity,
                };
            }
            UiAction::HideNotification => self.notification.open = false,
            UiAction::ToggleSidebar => self.sidebar_collapsed = !self.sidebar_collapsed,
            UiAction::SetActiveTab(tab) => self.active_tab = tab,
            UiAction::SetEmploymentTypes(types) => self.filters.employment_types = types,
            UiAction::ToggleEmploymentType(kind) => {
                toggle(&mut self.filters.employment_types, kind)
            }
            UiAction::SetSalaryMin(min) => self.filters.salary_min = min,
            UiAction::SetSalaryMax(max) => self.filters.salary_max = max,
            UiAction::SetStartDateFrom(from) => self.filters.start_date_from = blank_to_none(from),
            UiAction::SetStartDateTo(to) => self.filters.start_date_to = blank_to_none(to),
            UiAction::SetPositions(positions) => self.filters.positions = positions,
            UiAction::TogglePosition(position) => toggle(&mut self.filters.positions, position),
            UiAction::ClearAllFilters => self.filters = FilterCriteria::default(),
        }
    }
}
