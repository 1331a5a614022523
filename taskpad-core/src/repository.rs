//! The task repository: owns the task and folder collections and writes
//! every change through to the store before it becomes visible.

use chrono::{DateTime, Utc};

use crate::error::{TaskpadError, TaskpadResult};
use crate::folder::{ALL_FOLDER_ID, Folder, is_builtin_id};
use crate::store::Store;
use crate::task::{Task, TaskFields};

pub struct TaskRepository<S: Store> {
    store: S,
    tasks: Vec<Task>,
    folders: Vec<Folder>,
}

impl<S: Store> TaskRepository<S> {
    /// Load both collections from `store`.
    pub fn load(store: S) -> Self {
        let mut repo = TaskRepository {
            store,
            tasks: Vec::new(),
            folders: Vec::new(),
        };
        repo.reload();

        tracing::debug!(tasks = repo.tasks.len(), folders = repo.folders.len(), "repository loaded");
        repo
    }

    /// Re-read both collections, picking up writes made by other processes.
    pub fn reload(&mut self) {
        self.tasks = dedupe_by_id(self.store.load_tasks(), |t| &t.id, "task");
        self.folders = dedupe_by_id(self.store.load_folders(), |f| &f.id, "folder");
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    // TASKS:

    pub fn create_task(&mut self, fields: TaskFields) -> TaskpadResult<Task> {
        self.create_task_at(fields, Utc::now())
    }

    /// Create a task as if at `now`, which sets both its id and `created_at`.
    pub fn create_task_at(&mut self, fields: TaskFields, now: DateTime<Utc>) -> TaskpadResult<Task> {
        validate_title(&fields.title)?;

        let id = unique_id("task", now, |id| self.task(id).is_some());
        let mut task = Task {
            id,
            title: String::new(),
            notes: None,
            due_date: None,
            folder_id: String::new(),
            completed: false,
            created_at: now,
            notify_before: 0,
            notified: false,
            voice_message: None,
        };
        task.apply(fields);

        let mut tasks = self.tasks.clone();
        tasks.push(task.clone());
        self.commit_tasks(tasks)?;

        tracing::debug!(task_id = %task.id, "task created");
        Ok(task)
    }

    /// Replace every editable field of task `id` and re-arm its reminder.
    pub fn update_task(&mut self, id: &str, fields: TaskFields) -> TaskpadResult<Task> {
        validate_title(&fields.title)?;

        let mut tasks = self.tasks.clone();
        let task = find_task_mut(&mut tasks, id)?;
        task.apply(fields);
        let updated = task.clone();

        self.commit_tasks(tasks)?;

        tracing::debug!(task_id = %id, "task updated");
        Ok(updated)
    }

    /// Flip `completed` and return the new value.
    pub fn toggle_completion(&mut self, id: &str) -> TaskpadResult<bool> {
        let mut tasks = self.tasks.clone();
        let task = find_task_mut(&mut tasks, id)?;
        task.completed = !task.completed;
        let completed = task.completed;

        self.commit_tasks(tasks)?;

        tracing::debug!(task_id = %id, completed, "task completion toggled");
        Ok(completed)
    }

    /// Remove task `id`. Deleting a task that does not exist is a no-op.
    pub fn delete_task(&mut self, id: &str) -> TaskpadResult<()> {
        if self.task(id).is_none() {
            return Ok(());
        }

        let tasks = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        self.commit_tasks(tasks)?;

        tracing::debug!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Record that the reminder for task `id` has been delivered.
    pub fn mark_notified(&mut self, id: &str) -> TaskpadResult<()> {
        let mut tasks = self.tasks.clone();
        find_task_mut(&mut tasks, id)?.notified = true;
        self.commit_tasks(tasks)
    }

    // FOLDERS:

    pub fn create_folder(&mut self, name: &str) -> TaskpadResult<Folder> {
        self.create_folder_at(name, Utc::now())
    }

    pub fn create_folder_at(&mut self, name: &str, now: DateTime<Utc>) -> TaskpadResult<Folder> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TaskpadError::Validation("Folder name is required".into()));
        }

        let id = unique_id("folder", now, |id| self.folder(id).is_some());
        let folder = Folder::new(id, name);

        let mut folders = self.folders.clone();
        folders.push(folder.clone());
        self.commit_folders(folders)?;

        tracing::debug!(folder_id = %folder.id, "folder created");
        Ok(folder)
    }

    /// Delete a user folder. Its tasks move to the "all" folder.
    /// Returns how many tasks were moved.
    pub fn delete_folder(&mut self, id: &str) -> TaskpadResult<usize> {
        if is_builtin_id(id) {
            return Err(TaskpadError::ReservedFolder(id.to_string()));
        }
        if self.folder(id).is_none() {
            return Err(TaskpadError::NotFound(format!("folder '{}'", id)));
        }

        let mut moved = 0;
        let mut tasks = self.tasks.clone();
        for task in tasks.iter_mut().filter(|t| t.folder_id == id) {
            task.folder_id = ALL_FOLDER_ID.to_string();
            moved += 1;
        }
        let folders: Vec<Folder> = self.folders.iter().filter(|f| f.id != id).cloned().collect();

        // Both files are written before either collection changes in memory.
        if moved > 0 {
            self.store.save_tasks(&tasks)?;
        }
        if let Err(e) = self.store.save_folders(&folders) {
            if moved > 0 {
                if let Err(rollback) = self.store.save_tasks(&self.tasks) {
                    tracing::error!(error = %rollback, "could not restore tasks after failed folder delete");
                }
            }
            return Err(e);
        }
        self.tasks = tasks;
        self.folders = folders;

        tracing::debug!(folder_id = %id, moved, "folder deleted");
        Ok(moved)
    }

    fn commit_tasks(&mut self, tasks: Vec<Task>) -> TaskpadResult<()> {
        self.store.save_tasks(&tasks)?;
        self.tasks = tasks;
        Ok(())
    }

    fn commit_folders(&mut self, folders: Vec<Folder>) -> TaskpadResult<()> {
        self.store.save_folders(&folders)?;
        self.folders = folders;
        Ok(())
    }
}

fn validate_title(title: &str) -> TaskpadResult<()> {
    if title.trim().is_empty() {
        return Err(TaskpadError::Validation("Task title is required".into()));
    }
    Ok(())
}

fn find_task_mut<'a>(tasks: &'a mut [Task], id: &str) -> TaskpadResult<&'a mut Task> {
    tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| TaskpadError::NotFound(format!("task '{}'", id)))
}

/// Generate `<prefix>_<unix millis>`. If that is taken, tries -2, -3, etc.
fn unique_id(prefix: &str, now: DateTime<Utc>, taken: impl Fn(&str) -> bool) -> String {
    let base = format!("{}_{}", prefix, now.timestamp_millis());

    if !taken(&base) {
        return base;
    }

    let mut n = 2;
    loop {
        let suffixed = format!("{}-{}", base, n);
        if !taken(&suffixed) {
            return suffixed;
        }
        n += 1;
    }
}

/// Keep the first record for each id.
fn dedupe_by_id<T>(items: Vec<T>, id: impl Fn(&T) -> &String, kind: &str) -> Vec<T> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(id(item).clone());
            if !fresh {
                tracing::warn!(kind, id = %id(item), "dropping record with duplicate id");
            }
            fresh
        })
        .collect()
}
