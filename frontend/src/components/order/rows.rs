//! Pure per-row rendering model.
//!
//! `row_view_model` maps a task's client and server status to everything a
//! row displays — badge, label, whether the options are editable, whether
//! the remove control is live, the advisory price text and the preview
//! link — without touching any document API.

use common::model::pricing::{format_eur, quote, PriceRates};
use common::model::status::TaskStatus;

use super::state::{ClientStatus, TaskEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Busy,
    Ready,
    Warning,
    Error,
    Neutral,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowViewModel {
    pub badge: Badge,
    pub status_label: String,
    pub options_enabled: bool,
    pub removable: bool,
    pub price_text: String,
    pub preview_url: Option<String>,
}

/// Shown while no price applies yet (uploading, processing, failed).
pub const PRICE_PENDING: &str = "—";
/// The document's pages could not be counted: the shop prices it by hand.
pub const PRICE_MANUAL: &str = "Prix à déterminer";

pub fn row_view_model(task: &TaskEntry, rates: PriceRates) -> RowViewModel {
    let mut row = RowViewModel {
        badge: Badge::Neutral,
        status_label: "En attente…".to_string(),
        options_enabled: false,
        removable: true,
        price_text: PRICE_PENDING.to_string(),
        preview_url: None,
    };

    let Some(status) = task.server_status else {
        match &task.client_status {
            ClientStatus::Queued => {}
            ClientStatus::Uploading => {
                row.badge = Badge::Busy;
                row.status_label = "Envoi…".to_string();
                row.removable = false;
            }
            ClientStatus::Error(message) => {
                row.badge = Badge::Error;
                row.status_label = message.clone();
            }
        }
        return row;
    };

    match status {
        TaskStatus::Pending | TaskStatus::Converting | TaskStatus::CountingPages => {
            row.badge = Badge::Busy;
            row.status_label = "Traitement…".to_string();
            row.removable = false;
        }
        TaskStatus::Ready => {
            row.badge = Badge::Ready;
            row.status_label = "Prêt".to_string();
            row.options_enabled = true;
            row.price_text = match quote(&task.options, task.pages(), rates) {
                Some(amount) => format_eur(amount),
                None => PRICE_MANUAL.to_string(),
            };
            row.preview_url = Some(format!("/preview/{}", task.id));
        }
        TaskStatus::ReadyNoCount => {
            row.badge = Badge::Warning;
            row.status_label = "Prêt (pages non comptées)".to_string();
            row.options_enabled = true;
            row.price_text = PRICE_MANUAL.to_string();
            row.preview_url = Some(format!("/preview/{}", task.id));
        }
        TaskStatus::Printing => {
            row.badge = Badge::Busy;
            row.status_label = "Impression…".to_string();
            row.removable = false;
        }
        TaskStatus::PrintSuccess | TaskStatus::PrintSuccessNoCount => {
            row.badge = Badge::Ready;
            row.status_label = "Imprimé".to_string();
        }
        TaskStatus::ConversionError => error_row(&mut row, "Erreur de conversion"),
        TaskStatus::EmptyFileError => error_row(&mut row, "Fichier vide"),
        TaskStatus::PageCountError => error_row(&mut row, "Erreur de comptage des pages"),
        TaskStatus::FatalReadError => error_row(&mut row, "Erreur de lecture du fichier"),
        TaskStatus::PrintFailed => error_row(&mut row, "Erreur d'impression"),
        TaskStatus::Unknown => {
            row.status_label = "Statut inconnu".to_string();
        }
    }
    row
}

fn error_row(row: &mut RowViewModel, label: &str) {
    row.badge = Badge::Error;
    row.status_label = label.to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::options::PrintOptions;
    use common::requests::TaskSnapshot;

    fn task(client_status: ClientStatus, server_status: Option<TaskStatus>) -> TaskEntry {
        let server_data = server_status.map(|status| TaskSnapshot {
            task_id: "task-1".to_string(),
            file_name: None,
            status,
            pages: Some(4),
            price: None,
        });
        TaskEntry {
            id: "task-1".to_string(),
            file: None,
            file_name: "notes.pdf".to_string(),
            file_size: 2048,
            file_kind: "application/pdf".to_string(),
            client_status,
            server_status,
            server_data,
            options: PrintOptions::default(),
        }
    }

    #[test]
    fn uploading_row_is_locked_down() {
        let row = row_view_model(
            &task(ClientStatus::Uploading, None),
            PriceRates::default(),
        );
        assert_eq!(row.badge, Badge::Busy);
        assert!(!row.removable);
        assert!(!row.options_enabled);
        assert_eq!(row.price_text, PRICE_PENDING);
    }

    #[test]
    fn in_flight_server_phases_stay_locked() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::Converting,
            TaskStatus::CountingPages,
        ] {
            let row = row_view_model(
                &task(ClientStatus::Uploading, Some(status)),
                PriceRates::default(),
            );
            assert_eq!(row.badge, Badge::Busy);
            assert!(!row.removable);
            assert!(!row.options_enabled);
        }
    }

    #[test]
    fn ready_row_prices_with_current_options() {
        let mut entry = task(ClientStatus::Uploading, Some(TaskStatus::Ready));
        entry.options.copies = 2;
        let row = row_view_model(&entry, PriceRates { bw: 0.05, color: 0.70 });
        assert_eq!(row.badge, Badge::Ready);
        assert!(row.options_enabled);
        assert!(row.removable);
        assert_eq!(row.price_text, "0.40 €");
        assert_eq!(row.preview_url.as_deref(), Some("/preview/task-1"));
    }

    #[test]
    fn uncounted_ready_row_shows_the_manual_marker() {
        let row = row_view_model(
            &task(ClientStatus::Uploading, Some(TaskStatus::ReadyNoCount)),
            PriceRates::default(),
        );
        assert_eq!(row.badge, Badge::Warning);
        assert!(row.options_enabled);
        assert_eq!(row.price_text, PRICE_MANUAL);
    }

    #[test]
    fn error_rows_are_removable_but_not_editable() {
        let row = row_view_model(
            &task(ClientStatus::Uploading, Some(TaskStatus::ConversionError)),
            PriceRates::default(),
        );
        assert_eq!(row.badge, Badge::Error);
        assert!(row.removable);
        assert!(!row.options_enabled);
        assert!(row.preview_url.is_none());
    }

    #[test]
    fn client_side_upload_failure_keeps_its_message() {
        let row = row_view_model(
            &task(ClientStatus::Error("Erreur de connexion.".to_string()), None),
            PriceRates::default(),
        );
        assert_eq!(row.badge, Badge::Error);
        assert_eq!(row.status_label, "Erreur de connexion.");
        assert!(row.removable);
    }
}
