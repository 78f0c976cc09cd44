use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use crate::models::{LinkMetadata, Task};

/// In-memory task storage, insertion-ordered per class.
///
/// Lock scopes are short and never span an `.await` — metadata fetching
/// happens before the store is touched.
#[derive(Clone, Default)]
pub struct TaskStore {
    tasks: Arc<RwLock<Vec<Task>>>,
    next_id: Arc<AtomicI64>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, class_id: i64, description: String, link: Option<LinkMetadata>) -> Task {
        let task = Task {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            class_id,
            description,
            link,
        };
        self.tasks.write().unwrap().push(task.clone());
        task
    }

    pub fn list_by_class(&self, class_id: i64) -> Vec<Task> {
        self.tasks
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.class_id == class_id)
            .cloned()
            .collect()
    }
}
