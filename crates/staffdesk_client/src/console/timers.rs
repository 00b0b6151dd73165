//! Deferred work: row flash expiry and search debounce.

use super::Console;
use staffdesk_core::{UiAction, FLASH_ROW_DURATION, SEARCH_DEBOUNCE};
use std::time::Instant;

/// Pending removal of the flash marker from one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashClear {
    pub id: String,
    pub due: Instant,
}

/// Search text typed but not yet committed to the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedSearch {
    pub text: String,
    pub last_input_at: Instant,
}

impl Console {
    /// Highlight `id` and schedule the highlight to clear after
    /// [`FLASH_ROW_DURATION`]. Replaces any earlier scheduled clear.
    pub fn flash_row(&mut self, id: impl Into<String>, now: Instant) {
        let id = id.into();
        self.dispatch(UiAction::SetFlashRow(id.clone()));
        self.flash_clear = Some(FlashClear {
            id,
            due: now + FLASH_ROW_DURATION,
        });
    }

    pub fn pending_flash_clear(&self) -> Option<&FlashClear> {
        self.flash_clear.as_ref()
    }

    /// Record typed search text; it reaches the query after
    /// [`SEARCH_DEBOUNCE`] without further input.
    pub fn stage_search(&mut self, text: impl Into<String>, now: Instant) {
        self.staged_search = Some(StagedSearch {
            text: text.into(),
            last_input_at: now,
        });
    }

    pub fn staged_search(&self) -> Option<&StagedSearch> {
        self.staged_search.as_ref()
    }

    /// Commit staged search text immediately (e.g. on Enter).
    pub fn commit_search(&mut self) {
        if let Some(staged) = self.staged_search.take() {
            self.dispatch(UiAction::SetSearchQuery(staged.text));
        }
    }

    /// Run every timer that is due at `now`.
    pub fn tick(&mut self, now: Instant) {
        let search_due = self
            .staged_search
            .as_ref()
            .is_some_and(|staged| now.saturating_duration_since(staged.last_input_at) >= SEARCH_DEBOUNCE);
        if search_due {
            self.commit_search();
        }

        let flash_due = self
            .flash_clear
            .as_ref()
            .is_some_and(|clear| now >= clear.due);
        if flash_due {
            if let Some(clear) = self.flash_clear.take() {
                self.dispatch(UiAction::ClearFlashRow(clear.id));
            }
        }
    }
}
