//! Normalized, insertion-ordered employee collection.

use crate::models::employee::Employee;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

// Revisions are drawn from one process-wide counter so two stores never share
// a revision unless one is a clone of the other.
static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// Mutations accepted by [`EmployeeStore::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum EmployeesAction {
    /// Replace the whole collection.
    SetAll(Vec<Employee>),
    /// Insert or update each record, keeping records not mentioned.
    UpsertMany(Vec<Employee>),
    /// Insert or update one record.
    UpsertOne(Employee),
    /// Remove a record; unknown ids are ignored.
    RemoveOne(String),
}

/// Id-keyed employee collection that remembers first-insertion order.
///
/// Updating an existing id replaces its fields in place and keeps its
/// position. Every effective mutation moves [`revision`](Self::revision)
/// forward; selectors use it as the identity of the collection.
#[derive(Debug, Clone, Default)]
pub struct EmployeeStore {
    ids: Vec<String>,
    entities: HashMap<String, Employee>,
    revision: u64,
}

impl EmployeeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single reducer action.
    pub fn apply(&mut self, action: EmployeesAction) {
        match action {
            EmployeesAction::SetAll(list) => self.set_all(list),
            EmployeesAction::UpsertMany(list) => self.upsert_many(list),
            EmployeesAction::UpsertOne(employee) => self.upsert_one(employee),
            EmployeesAction::RemoveOne(id) => self.remove_one(&id),
        }
    }

    /// Replace every record with `list`.
    pub fn set_all(&mut self, list: Vec<Employee>) {
        self.ids.clear();
        self.entities.clear();
        for employee in list {
            self.insert_or_replace(employee);
        }
        self.revision = next_revision();
    }

    /// Insert or update each record in `list`.
    pub fn upsert_many(&mut self, list: Vec<Employee>) {
        if list.is_empty() {
            return;
        }
        for employee in list {
            self.insert_or_replace(employee);
        }
        self.revision = next_revision();
    }

    /// Insert or update a single record.
    pub fn upsert_one(&mut self, employee: Employee) {
        self.insert_or_replace(employee);
        self.revision = next_revision();
    }

    /// Remove the record with `id` if present.
    pub fn remove_one(&mut self, id: &str) {
        if self.entities.remove(id).is_some() {
            self.ids.retain(|existing| existing != id);
            self.revision = next_revision();
        }
    }

    fn insert_or_replace(&mut self, employee: Employee) {
        if !self.entities.contains_key(employee.id.as_str()) {
            self.ids.push(employee.id.clone());
        }
        self.entities.insert(employee.id.clone(), employee);
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.entities.get(id)
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Employee> + '_ {
        self.ids.iter().filter_map(|id| self.entities.get(id))
    }

    /// Owned copy of every record in insertion order.
    pub fn all(&self) -> Vec<Employee> {
        self.iter().cloned().collect()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identity of the current contents.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
