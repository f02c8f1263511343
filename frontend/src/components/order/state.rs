//! State for the ordering surface: the task store, the current job id and
//! the polling handle, owned by the component for its whole lifecycle.
//!
//! All mutation happens on the UI thread inside `update`; the server-derived
//! fields of a task are only ever replaced wholesale (never merged), and
//! every asynchronous completion re-checks that its task still exists before
//! touching it.

use gloo_events::EventListener;
use gloo_timers::callback::Interval;
use yew::prelude::*;

use common::model::options::PrintOptions;
use common::model::pricing::PriceRates;
use common::model::status::TaskStatus;
use common::requests::{PrintJobSummary, SummaryRequest, SummaryTask, TaskSnapshot};

/// Local upload lifecycle of a task, independent of the server's processing
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientStatus {
    Queued,
    Uploading,
    Error(String),
}

/// One file's processing unit within the current job.
pub struct TaskEntry {
    /// Client-generated, unique within the job, stable for the task's life.
    pub id: String,
    /// The raw file handle. Dropped after a successful upload; the file is
    /// never read again afterwards.
    pub file: Option<web_sys::File>,
    pub file_name: String,
    pub file_size: u64,
    pub file_kind: String,
    pub client_status: ClientStatus,
    /// Absent until the first poll response mentioning this task.
    pub server_status: Option<TaskStatus>,
    /// Last full status payload from the server. May be stale between
    /// polls; replaced as a whole on every poll.
    pub server_data: Option<TaskSnapshot>,
    /// Mutated only by direct user interaction with this task's row.
    pub options: PrintOptions,
}

impl TaskEntry {
    pub fn new(id: String, file: web_sys::File) -> Self {
        let file_name = file.name();
        let file_size = file.size() as u64;
        let file_kind = file.type_();
        Self {
            id,
            file: Some(file),
            file_name,
            file_size,
            file_kind,
            client_status: ClientStatus::Queued,
            server_status: None,
            server_data: None,
            options: PrintOptions::default(),
        }
    }

    /// Page count from the last server snapshot, zero while unknown.
    pub fn pages(&self) -> u32 {
        self.server_data.as_ref().and_then(|data| data.pages).unwrap_or(0)
    }

    /// Still moving through upload or server-side processing.
    pub fn is_in_flight(&self) -> bool {
        match self.server_status {
            Some(status) => status.is_in_flight(),
            None => matches!(self.client_status, ClientStatus::Uploading),
        }
    }

    /// No further status change is expected: the server made a final call,
    /// or the upload itself failed and no server record will ever come.
    pub fn is_settled(&self) -> bool {
        match self.server_status {
            Some(status) => status.is_settled(),
            None => matches!(self.client_status, ClientStatus::Error(_)),
        }
    }

    /// Eligible for pricing and printing.
    pub fn is_ready(&self) -> bool {
        self.server_status.is_some_and(TaskStatus::is_ready)
    }

    /// Failed either client-side (upload) or server-side (processing);
    /// excluded from every downstream step.
    pub fn has_failed(&self) -> bool {
        matches!(self.client_status, ClientStatus::Error(_))
            || self.server_status.is_some_and(TaskStatus::is_error)
    }
}

/// Aggregate readiness of the store, driving the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePhase {
    Empty,
    Processing,
    Ready,
    NothingPrintable,
}

pub fn store_phase(tasks: &[TaskEntry]) -> StorePhase {
    if tasks.is_empty() {
        return StorePhase::Empty;
    }
    if tasks.iter().any(|task| !task.is_settled()) {
        return StorePhase::Processing;
    }
    if tasks.iter().any(TaskEntry::is_ready) {
        StorePhase::Ready
    } else {
        StorePhase::NothingPrintable
    }
}

/// Outcome notice shown on the ordering view after a print submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

/// The ordering surface. Owns the task store, the job id and the poller
/// handle; everything is dropped with the component.
pub struct OrderComponent {
    pub identity: String,
    /// Grouping id for the current upload batch. Created lazily on the
    /// first enqueue, cleared when the store empties.
    pub job_id: Option<String>,
    /// Insertion order is display order. No duplicate name+size pairs.
    pub tasks: Vec<TaskEntry>,
    pub rates: PriceRates,
    /// Recurring poll handle; dropping it cancels the interval, and
    /// clearing an already-empty slot is a no-op.
    pub poller: Option<Interval>,
    pub summary: Option<PrintJobSummary>,
    /// Some tasks failed and were left out of the summary.
    pub excluded_warning: bool,
    pub submitting: bool,
    pub banner: Option<Banner>,
    pub file_input_ref: NodeRef,
    pub visibility: Option<EventListener>,
}

impl OrderComponent {
    pub fn new() -> Self {
        Self {
            identity: String::new(),
            job_id: None,
            tasks: Vec::new(),
            rates: PriceRates::default(),
            poller: None,
            summary: None,
            excluded_warning: false,
            submitting: false,
            banner: None,
            file_input_ref: NodeRef::default(),
            visibility: None,
        }
    }

    pub fn task(&self, id: &str) -> Option<&TaskEntry> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn task_mut(&mut self, id: &str) -> Option<&mut TaskEntry> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    /// Dedup key: name and byte size, not content.
    pub fn contains_file(&self, name: &str, size: u64) -> bool {
        self.tasks
            .iter()
            .any(|task| task.file_name == name && task.file_size == size)
    }

    /// Reconciliation: overwrite the task's server-derived fields from a
    /// poll entry. Tasks no longer in the store are ignored.
    pub fn apply_snapshot(&mut self, snapshot: TaskSnapshot) {
        if let Some(task) = self.task_mut(&snapshot.task_id) {
            task.server_status = Some(snapshot.status);
            task.server_data = Some(snapshot);
        }
    }

    pub fn stop_polling(&mut self) {
        self.poller = None;
    }

    /// Ends the current job: stops polling and clears the job id so the
    /// next file selection starts a fresh batch.
    pub fn clear_job(&mut self) {
        self.stop_polling();
        self.job_id = None;
    }

    /// Summary payload for all tasks in a terminal ready state, or `None`
    /// when nothing qualifies.
    pub fn summary_request(&self) -> Option<SummaryRequest> {
        let job_id = self.job_id.clone()?;
        let tasks: Vec<SummaryTask> = self
            .tasks
            .iter()
            .filter(|task| task.is_ready())
            .map(|task| SummaryTask {
                task_id: task.id.clone(),
                options: (&task.options).into(),
            })
            .collect();
        if tasks.is_empty() {
            return None;
        }
        Some(SummaryRequest { job_id, tasks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, server_status: Option<TaskStatus>) -> TaskEntry {
        TaskEntry {
            id: id.to_string(),
            file: None,
            file_name: format!("{id}.pdf"),
            file_size: 1000,
            file_kind: "application/pdf".to_string(),
            client_status: ClientStatus::Uploading,
            server_status,
            server_data: None,
            options: PrintOptions::default(),
        }
    }

    fn component_with(tasks: Vec<TaskEntry>) -> OrderComponent {
        let mut component = OrderComponent::new();
        component.job_id = Some("job-1".to_string());
        component.tasks = tasks;
        component
    }

    #[test]
    fn dedup_is_by_name_and_size() {
        let component = component_with(vec![entry("task-1", None)]);
        assert!(component.contains_file("task-1.pdf", 1000));
        assert!(!component.contains_file("task-1.pdf", 999));
        assert!(!component.contains_file("autre.pdf", 1000));
    }

    #[test]
    fn snapshot_overwrites_server_fields_wholesale() {
        let mut component = component_with(vec![entry("task-1", Some(TaskStatus::Converting))]);
        component.apply_snapshot(TaskSnapshot {
            task_id: "task-1".to_string(),
            file_name: None,
            status: TaskStatus::Ready,
            pages: Some(7),
            price: None,
        });
        let task = component.task("task-1").unwrap();
        assert_eq!(task.server_status, Some(TaskStatus::Ready));
        assert_eq!(task.pages(), 7);
    }

    #[test]
    fn snapshot_for_a_removed_task_is_ignored() {
        let mut component = component_with(vec![entry("task-1", None)]);
        component.apply_snapshot(TaskSnapshot {
            task_id: "task-2".to_string(),
            file_name: None,
            status: TaskStatus::Ready,
            pages: Some(3),
            price: None,
        });
        assert!(component.task("task-2").is_none());
        assert_eq!(component.tasks.len(), 1);
    }

    #[test]
    fn store_phase_tracks_settlement() {
        assert_eq!(store_phase(&[]), StorePhase::Empty);
        assert_eq!(
            store_phase(&[entry("task-1", Some(TaskStatus::CountingPages))]),
            StorePhase::Processing
        );
        assert_eq!(
            store_phase(&[entry("task-1", None)]),
            StorePhase::Processing
        );
        assert_eq!(
            store_phase(&[
                entry("task-1", Some(TaskStatus::Ready)),
                entry("task-2", Some(TaskStatus::ConversionError)),
            ]),
            StorePhase::Ready
        );
        assert_eq!(
            store_phase(&[entry("task-1", Some(TaskStatus::ConversionError))]),
            StorePhase::NothingPrintable
        );
    }

    #[test]
    fn failed_upload_counts_as_settled_not_processing() {
        let mut failed = entry("task-1", None);
        failed.client_status = ClientStatus::Error("Erreur de connexion.".to_string());
        assert_eq!(
            store_phase(&[failed]),
            StorePhase::NothingPrintable
        );
    }

    #[test]
    fn summary_request_keeps_both_ready_states_and_drops_failures() {
        let mut uncounted = entry("task-2", Some(TaskStatus::ReadyNoCount));
        uncounted.options.copies = 3;
        let component = component_with(vec![
            entry("task-1", Some(TaskStatus::Ready)),
            uncounted,
            entry("task-3", Some(TaskStatus::ConversionError)),
            entry("task-4", Some(TaskStatus::FatalReadError)),
        ]);
        let request = component.summary_request().unwrap();
        assert_eq!(request.job_id, "job-1");
        let ids: Vec<&str> = request.tasks.iter().map(|t| t.task_id.as_str()).collect();
        assert_eq!(ids, ["task-1", "task-2"]);
        assert_eq!(request.tasks[1].options.copies, "3");
    }

    #[test]
    fn no_summary_request_when_nothing_is_ready() {
        let component = component_with(vec![entry("task-1", Some(TaskStatus::Converting))]);
        assert!(component.summary_request().is_none());
    }

    #[test]
    fn clearing_the_job_resets_id_and_poller() {
        let mut component = component_with(vec![]);
        component.clear_job();
        assert!(component.job_id.is_none());
        assert!(component.poller.is_none());
        // cancelling twice is a no-op
        component.stop_polling();
        assert!(component.poller.is_none());
    }
}
