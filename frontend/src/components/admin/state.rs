//! State for the admin surface: server-fetched history (read-only), the
//! set of expanded cards, the refresh handle and the single transient
//! overlay.

use std::collections::HashSet;

use gloo_events::EventListener;
use gloo_timers::callback::Interval;

use common::requests::{AdminData, BrowsedFile, Command, HistoryFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    History,
    Files,
}

/// What a confirmed reprint will target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReprintScope {
    Task { task_id: String, file_name: String },
    Job { job_id: String },
}

/// The transient option picker for a reprint, pre-filled from the stored
/// row (task scope) or from the defaults (job scope).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReprintPicker {
    pub scope: ReprintScope,
    pub copies: u32,
    pub color: bool,
    pub duplex: bool,
}

impl ReprintPicker {
    pub fn for_task(file: &HistoryFile) -> Option<Self> {
        let task_id = file.task_id.clone()?;
        Some(Self {
            scope: ReprintScope::Task {
                task_id,
                file_name: file.file_name.clone().unwrap_or_default(),
            },
            copies: file.copies.unwrap_or(1).max(1),
            color: file.color.as_deref() == Some("Couleur"),
            duplex: file.duplex.as_deref() == Some("Recto-Verso"),
        })
    }

    pub fn for_job(command: &Command) -> Self {
        Self {
            scope: ReprintScope::Job {
                job_id: command.job_id.clone(),
            },
            copies: 1,
            color: false,
            duplex: false,
        }
    }
}

/// At most one transient overlay exists at a time; opening a new one
/// replaces the current one, dismissing has no side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Reprint(ReprintPicker),
    DeleteTask { task_id: String, file_name: String },
    DeleteAll,
}

pub struct AdminComponent {
    pub panel: Panel,
    pub data: Option<AdminData>,
    pub load_error: Option<String>,
    /// Job ids of the cards currently expanded; left untouched when the
    /// history is replaced so a refresh preserves what was open.
    pub open_cards: HashSet<String>,
    pub overlay: Option<Overlay>,
    /// Recurring refresh handle; dropping it cancels the interval.
    pub refresh: Option<Interval>,
    pub files: Option<Vec<BrowsedFile>>,
    pub action_pending: bool,
    pub visibility: Option<EventListener>,
}

impl AdminComponent {
    pub fn new() -> Self {
        Self {
            panel: Panel::History,
            data: None,
            load_error: None,
            open_cards: HashSet::new(),
            overlay: None,
            refresh: None,
            files: None,
            action_pending: false,
            visibility: None,
        }
    }

    pub fn toggle_card(&mut self, job_id: &str) {
        if !self.open_cards.remove(job_id) {
            self.open_cards.insert(job_id.to_string());
        }
    }

    pub fn open_overlay(&mut self, overlay: Overlay) {
        self.overlay = Some(overlay);
    }

    pub fn dismiss_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn stop_refresh(&mut self) {
        self.refresh = None;
    }

    pub fn has_commands(&self) -> bool {
        self.data
            .as_ref()
            .is_some_and(|data| !data.upload_commands.is_empty() || !data.email_commands.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::status::JobStatus;

    fn data_with_jobs(job_ids: &[&str]) -> AdminData {
        AdminData {
            total_revenue: "0.00".to_string(),
            total_pages: 0,
            upload_commands: job_ids
                .iter()
                .map(|id| Command {
                    job_id: id.to_string(),
                    timestamp: None,
                    username: None,
                    total_price: 0.0,
                    job_status: JobStatus::Pending,
                    source: Some("upload".to_string()),
                    email_subject: None,
                    files: Vec::new(),
                })
                .collect(),
            email_commands: Vec::new(),
        }
    }

    #[test]
    fn open_cards_survive_a_history_refresh() {
        let mut component = AdminComponent::new();
        component.data = Some(data_with_jobs(&["job-1", "job-2"]));
        component.toggle_card("job-2");

        // identical backend data replaced wholesale, as on a refresh tick
        component.data = Some(data_with_jobs(&["job-1", "job-2"]));
        assert!(component.open_cards.contains("job-2"));
        assert!(!component.open_cards.contains("job-1"));
    }

    #[test]
    fn toggling_twice_collapses_again() {
        let mut component = AdminComponent::new();
        component.toggle_card("job-1");
        component.toggle_card("job-1");
        assert!(component.open_cards.is_empty());
    }

    #[test]
    fn opening_an_overlay_replaces_the_current_one() {
        let mut component = AdminComponent::new();
        component.open_overlay(Overlay::DeleteAll);
        component.open_overlay(Overlay::DeleteTask {
            task_id: "task-1".to_string(),
            file_name: "a.pdf".to_string(),
        });
        assert!(matches!(component.overlay, Some(Overlay::DeleteTask { .. })));

        component.dismiss_overlay();
        assert!(component.overlay.is_none());
    }

    #[test]
    fn task_picker_prefills_from_the_stored_row() {
        let file = HistoryFile {
            task_id: Some("task-7".to_string()),
            file_name: Some("memo.pdf".to_string()),
            status: None,
            pages: Some(2),
            price: Some("1.40".to_string()),
            copies: Some(2),
            color: Some("Couleur".to_string()),
            duplex: Some("Recto".to_string()),
            paper_size: Some("2".to_string()),
        };
        let picker = ReprintPicker::for_task(&file).unwrap();
        assert_eq!(picker.copies, 2);
        assert!(picker.color);
        assert!(!picker.duplex);
        assert_eq!(
            picker.scope,
            ReprintScope::Task {
                task_id: "task-7".to_string(),
                file_name: "memo.pdf".to_string(),
            }
        );
    }

    #[test]
    fn rows_without_a_task_id_cannot_open_a_picker() {
        let file = HistoryFile {
            task_id: None,
            file_name: Some("memo.pdf".to_string()),
            status: None,
            pages: None,
            price: None,
            copies: None,
            color: None,
            duplex: None,
            paper_size: None,
        };
        assert!(ReprintPicker::for_task(&file).is_none());
    }
}
