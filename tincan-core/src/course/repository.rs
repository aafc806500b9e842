//! Objective lookup.

use std::collections::HashMap;

use super::Objective;

/// Source of objective metadata referenced by questions.
pub trait ObjectiveRepository: Send + Sync {
    fn get(&self, id: &str) -> Option<Objective>;
}

/// Objectives held in a map, loaded once per course.
#[derive(Debug, Default, Clone)]
pub struct InMemoryObjectiveRepository {
    objectives: HashMap<String, Objective>,
}

impl InMemoryObjectiveRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an objective.
    pub fn insert(&mut self, objective: Objective) {
        self.objectives.insert(objective.id.clone(), objective);
    }

    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }
}

impl FromIterator<Objective> for InMemoryObjectiveRepository {
    fn from_iter<I: IntoIterator<Item = Objective>>(iter: I) -> Self {
        let mut repository = Self::new();
        for objective in iter {
            repository.insert(objective);
        }
        repository
    }
}

impl ObjectiveRepository for InMemoryObjectiveRepository {
    fn get(&self, id: &str) -> Option<Objective> {
        self.objectives.get(id).cloned()
    }
}
