//! Outbound requests and the side effects of their results.

use super::Console;
use crate::backend::{SyncCmd, SyncEvent};
use staffdesk_core::constants::{
    MSG_EMPLOYEE_CREATED, MSG_EMPLOYEE_DELETED, MSG_EMPLOYEE_UPDATED,
};
use staffdesk_core::store::employees::EmployeesAction;
use staffdesk_core::validation::{EmployeeForm, ValidationErrors};
use staffdesk_core::{FormMode, Severity, UiAction};
use std::time::{Duration, Instant};

const BACKEND_UNAVAILABLE: &str = "Sync worker is unavailable";

impl Console {
    fn send(&mut self, cmd: SyncCmd) -> bool {
        let op = cmd.op();
        if self.backend.cmd_tx.send(cmd).is_err() {
            tracing::error!(op = op, "sync worker channel closed");
            self.notify(BACKEND_UNAVAILABLE, Severity::Error);
            return false;
        }
        self.in_flight += 1;
        true
    }

    /// Ask for the full employee list.
    pub fn refresh(&mut self) {
        self.send(SyncCmd::FetchAll);
    }

    /// Validate the form and send a create or update for it.
    ///
    /// Edit mode without a target record sends nothing.
    ///
    /// # Errors
    /// Returns the field errors when validation fails; nothing is sent.
    pub fn submit_form(&mut self, form: &EmployeeForm) -> Result<(), ValidationErrors> {
        let draft = form.validate()?;
        let ui_form = &self.state.ui.form;
        match (ui_form.mode, ui_form.selected_employee_id.clone()) {
            (FormMode::Create, _) => {
                self.send(SyncCmd::Create { draft });
            }
            (FormMode::Edit, Some(id)) => {
                self.send(SyncCmd::Update { id, draft });
            }
            (FormMode::Edit, None) => {
                tracing::debug!("edit submitted without a target employee; ignoring");
            }
        }
        Ok(())
    }

    /// Send the delete awaiting confirmation, if any.
    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.state.ui.confirm_delete_id.clone() {
            self.send(SyncCmd::Delete { id });
        }
    }

    /// Apply one worker result to the state.
    pub fn apply_event(&mut self, event: SyncEvent, now: Instant) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match event {
            SyncEvent::Fetched { employees } => {
                self.dispatch(EmployeesAction::UpsertMany(employees));
            }
            SyncEvent::FetchFailed { error } => {
                self.notify(error.message, Severity::Error);
            }
            SyncEvent::Created { employee } => {
                let id = employee.id.clone();
                self.last_created_id = Some(id.clone());
                self.dispatch(EmployeesAction::UpsertOne(employee));
                self.dispatch(UiAction::CloseForm);
                self.notify(MSG_EMPLOYEE_CREATED, Severity::Success);
                self.flash_row(id, now);
                self.refresh();
            }
            SyncEvent::Updated { employee } => {
                let id = employee.id.clone();
                self.dispatch(EmployeesAction::UpsertOne(employee));
                self.dispatch(UiAction::CloseForm);
                self.notify(MSG_EMPLOYEE_UPDATED, Severity::Success);
                self.flash_row(id, now);
                self.refresh();
            }
            SyncEvent::Deleted { id } => {
                self.dispatch(EmployeesAction::RemoveOne(id));
                self.dispatch(UiAction::CloseDeleteConfirm);
                self.notify(MSG_EMPLOYEE_DELETED, Severity::Success);
                self.refresh();
            }
            SyncEvent::CreateFailed { error }
            | SyncEvent::UpdateFailed { error, .. }
            | SyncEvent::DeleteFailed { error, .. } => {
                self.notify(error.message, Severity::Error);
            }
        }
    }

    /// Block until no request is outstanding, applying results as they arrive.
    ///
    /// # Returns
    /// `false` if `timeout` elapsed or the worker went away first.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.backend.evt_rx.recv_timeout(remaining) {
                Ok(event) => self.apply_event(event, Instant::now()),
                Err(_) => return false,
            }
        }
        self.tick(Instant::now());
        true
    }
}
