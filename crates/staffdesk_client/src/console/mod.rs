//! Single-threaded controller: owns the root state and drives the sync worker.
//!
//! Every state change happens on the thread that owns the [`Console`]. Network
//! results arrive as [`SyncEvent`](crate::backend::SyncEvent)s and are applied
//! by [`Console::poll`]; time-based work (flash clear, search debounce) runs
//! from [`Console::tick`]. Both take the current instant as an argument.

mod sync;
mod timers;


use crate::backend::BackendHandle;
use staffdesk_core::selectors::{self, Selectors};
use staffdesk_core::store::ui::Notification;
use staffdesk_core::validation::EmployeeForm;
use staffdesk_core::{Action, Employee, FormMode, RootState, Severity, UiAction};
use std::sync::Arc;
use std::time::Instant;

pub use timers::{FlashClear, StagedSearch};

/// Employee directory controller.
pub struct Console {
    state: RootState,
    selectors: Selectors,
    backend: BackendHandle,
    flash_clear: Option<FlashClear>,
    staged_search: Option<StagedSearch>,
    last_created_id: Option<String>,
    in_flight: usize,
}

impl Console {
    pub fn new(backend: BackendHandle) -> Self {
        Self {
            state: RootState::new(),
            selectors: Selectors::new(),
            backend,
            flash_clear: None,
            staged_search: None,
            last_created_id: None,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &RootState {
        &self.state
    }

    /// Apply a state action directly (filters, sidebar, dialogs).
    pub fn dispatch(&mut self, action: impl Into<Action>) {
        self.state.dispatch(action);
    }

    /// Rows after search and filters, memoized on the inputs that matter.
    pub fn visible_employees(&mut self) -> Arc<[Employee]> {
        self.selectors.filtered_employees(&self.state)
    }

    /// Sorted distinct positions across the whole store.
    pub fn positions(&mut self) -> Arc<[String]> {
        self.selectors.unique_positions(&self.state)
    }

    /// Id of the most recent record the API confirmed as created.
    ///
    /// Unlike the flash marker this does not expire.
    pub fn last_created_id(&self) -> Option<&str> {
        self.last_created_id.as_deref()
    }

    pub fn active_filter_count(&self) -> usize {
        selectors::active_filter_count(&self.state)
    }

    /// Record being edited, if the form is in edit mode and it still exists.
    pub fn selected_employee(&self) -> Option<&Employee> {
        selectors::employee_by_id(
            &self.state.employees,
            self.state.ui.form.selected_employee_id.as_deref(),
        )
    }

    /// Record awaiting delete confirmation.
    pub fn pending_delete(&self) -> Option<&Employee> {
        selectors::employee_by_id(&self.state.employees, self.state.ui.confirm_delete_id.as_deref())
    }

    /// Initial values for the open form: blank for create, the record for edit.
    pub fn form_values(&self) -> EmployeeForm {
        match (self.state.ui.form.mode, self.selected_employee()) {
            (FormMode::Edit, Some(employee)) => EmployeeForm::from_employee(employee),
            _ => EmployeeForm::default(),
        }
    }

    pub fn open_create_form(&mut self) {
        self.dispatch(UiAction::OpenCreateForm);
    }

    pub fn open_edit_form(&mut self, id: impl Into<String>) {
        self.dispatch(UiAction::OpenEditForm(id.into()));
    }

    pub fn close_form(&mut self) {
        self.dispatch(UiAction::CloseForm);
    }

    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.dispatch(UiAction::OpenDeleteConfirm(id.into()));
    }

    pub fn cancel_delete(&mut self) {
        self.dispatch(UiAction::CloseDeleteConfirm);
    }

    pub fn notification(&self) -> &Notification {
        &self.state.ui.notification
    }

    pub fn dismiss_notification(&mut self) {
        self.dispatch(UiAction::HideNotification);
    }

    /// `true` while any request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.dispatch(UiAction::ShowNotification {
            message: message.into(),
            severity,
        });
    }

    /// Drain every event the worker has produced, then run due timers.
    ///
    /// # Returns
    /// Number of events applied.
    pub fn poll(&mut self, now: Instant) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.backend.evt_rx.try_recv() {
            self.apply_event(event, now);
            applied += 1;
        }
        self.tick(now);
        applied
    }
}
