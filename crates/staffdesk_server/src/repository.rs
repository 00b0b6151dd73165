//! In-memory employee repository backing the mock API.

use staffdesk_core::{AppError, Employee, EmployeeDraft, EmployeeStore};
use std::sync::{Mutex, MutexGuard};

struct Inner {
    store: EmployeeStore,
    next_id: u64,
}

/// Insertion-ordered employee table with server-assigned ids `"1"`, `"2"`, ...
pub struct EmployeeRepository {
    inner: Mutex<Inner>,
}

impl Default for EmployeeRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeRepository {
    /// Empty repository; the first created employee gets id `"1"`.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                store: EmployeeStore::new(),
                next_id: 1,
            }),
        }
    }

    /// Repository preloaded with `drafts`, ids assigned in order.
    pub fn with_drafts(drafts: Vec<EmployeeDraft>) -> Self {
        let repo = Self::new();
        if let Ok(mut inner) = repo.inner.lock() {
            for draft in drafts {
                insert(&mut inner, draft);
            }
        }
        repo
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, AppError> {
        self.inner.lock().map_err(|_| {
            tracing::error!("employee repository lock poisoned");
            AppError::Internal
        })
    }

    /// Every employee in insertion order.
    pub fn list(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.lock()?.store.all())
    }

    pub fn get(&self, id: &str) -> Result<Option<Employee>, AppError> {
        Ok(self.lock()?.store.get(id).cloned())
    }

    /// Store `draft` under the next id.
    pub fn create(&self, draft: EmployeeDraft) -> Result<Employee, AppError> {
        let mut inner = self.lock()?;
        Ok(insert(&mut inner, draft))
    }

    /// Replace the fields of `id`, keeping its position.
    ///
    /// # Returns
    /// `None` when no such employee exists.
    pub fn update(&self, id: &str, draft: EmployeeDraft) -> Result<Option<Employee>, AppError> {
        let mut inner = self.lock()?;
        if inner.store.get(id).is_none() {
            return Ok(None);
        }
        let employee = Employee::from_draft(id, draft);
        inner.store.upsert_one(employee.clone());
        Ok(Some(employee))
    }

    /// Remove `id`; `false` when it did not exist.
    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut inner = self.lock()?;
        if inner.store.get(id).is_none() {
            return Ok(false);
        }
        inner.store.remove_one(id);
        Ok(true)
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.lock()?.store.len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len()? == 0)
    }
}

fn insert(inner: &mut Inner, draft: EmployeeDraft) -> Employee {
    let employee = Employee::from_draft(inner.next_id.to_string(), draft);
    inner.next_id += 1;
    inner.store.upsert_one(employee.clone());
    employee
}

#[cfg(test)]
mod tests {
    use super::EmployeeRepository;
    use crate::seed::demo_drafts;

    #[test]
    fn ids_increment_and_are_never_reused() {
        let repo = EmployeeRepository::new();
        let drafts = demo_drafts();
        let first = repo.create(drafts[0].clone()).expect("create");
        let second = repo.create(drafts[1].clone()).expect("create");
        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");

        assert!(repo.delete("2").expect("delete"));
        let third = repo.create(drafts[2].clone()).expect("create");
        assert_eq!(third.id, "3");
    }

    #[test]
    fn update_keeps_position_and_rejects_unknown_ids() {
        let repo = EmployeeRepository::with_drafts(demo_drafts());
        let mut draft = repo.get("1").expect("get").expect("exists").to_draft();
        draft.salary = 1.0;

        let updated = repo.update("1", draft.clone()).expect("update").expect("exists");
        assert_eq!(updated.salary, 1.0);
        let ids: Vec<String> = repo
            .list()
            .expect("list")
            .into_iter()
            .map(|employee| employee.id)
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        assert!(repo.update("99", draft).expect("update").is_none());
        assert!(!repo.delete("99").expect("delete"));
    }
}
