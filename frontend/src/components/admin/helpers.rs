//! Network calls and pure display helpers for the admin surface.

use gloo_net::http::Request;

use common::model::status::TaskStatus;
use common::requests::{
    ActionResponse, AdminData, BrowsedFile, ReprintJobRequest, ReprintTaskRequest,
};

/// Failure of an admin fetch. An expired session is its own case because
/// it is handled by forcing a full page reload, never locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    Auth,
    Other(String),
}

fn transport(err: gloo_net::Error) -> FetchError {
    FetchError::Other(err.to_string())
}

fn auth_guard(response: &gloo_net::http::Response) -> Result<(), FetchError> {
    match response.status() {
        401 | 403 => Err(FetchError::Auth),
        _ => Ok(()),
    }
}

pub async fn fetch_admin_data() -> Result<AdminData, FetchError> {
    let response = Request::get("/api/admin_data")
        .send()
        .await
        .map_err(transport)?;
    auth_guard(&response)?;
    response.json::<AdminData>().await.map_err(transport)
}

pub async fn fetch_files() -> Result<Vec<BrowsedFile>, FetchError> {
    let response = Request::get("/api/browse_files")
        .send()
        .await
        .map_err(transport)?;
    auth_guard(&response)?;
    response.json::<Vec<BrowsedFile>>().await.map_err(transport)
}

pub async fn post_reprint_task(request: &ReprintTaskRequest) -> Result<ActionResponse, FetchError> {
    let response = Request::post("/reprint")
        .json(request)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    auth_guard(&response)?;
    response.json::<ActionResponse>().await.map_err(transport)
}

pub async fn post_reprint_job(request: &ReprintJobRequest) -> Result<ActionResponse, FetchError> {
    let response = Request::post("/api/reprint_job")
        .json(request)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    auth_guard(&response)?;
    response.json::<ActionResponse>().await.map_err(transport)
}

pub async fn post_delete_task(task_id: &str) -> Result<ActionResponse, FetchError> {
    let response = Request::post(&format!("/api/delete_task/{task_id}"))
        .send()
        .await
        .map_err(transport)?;
    auth_guard(&response)?;
    response.json::<ActionResponse>().await.map_err(transport)
}

pub async fn post_delete_all() -> Result<ActionResponse, FetchError> {
    let response = Request::post("/api/delete_all_tasks")
        .send()
        .await
        .map_err(transport)?;
    auth_guard(&response)?;
    response.json::<ActionResponse>().await.map_err(transport)
}

/// Badge class and label for a history file row.
pub fn status_badge(status: Option<TaskStatus>) -> (&'static str, &'static str) {
    let Some(status) = status else {
        return ("badge badge-neutral", "Statut inconnu");
    };
    if status.is_error() {
        return ("badge badge-danger", error_label(status));
    }
    match status {
        TaskStatus::PrintSuccess | TaskStatus::PrintSuccessNoCount => {
            ("badge badge-success", "Imprimé")
        }
        TaskStatus::Printing => ("badge badge-info", "Impression…"),
        TaskStatus::Ready | TaskStatus::ReadyNoCount => ("badge badge-secondary", "Prêt"),
        TaskStatus::Pending | TaskStatus::Converting | TaskStatus::CountingPages => {
            ("badge badge-secondary", "En traitement")
        }
        _ => ("badge badge-neutral", "Statut inconnu"),
    }
}

fn error_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::ConversionError => "Erreur de conversion",
        TaskStatus::EmptyFileError => "Fichier vide",
        TaskStatus::PageCountError => "Erreur de comptage",
        TaskStatus::FatalReadError => "Erreur de lecture",
        TaskStatus::PrintFailed => "Erreur d'impression",
        _ => "Erreur",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_statuses_get_the_danger_badge() {
        let (class, label) = status_badge(Some(TaskStatus::ConversionError));
        assert_eq!(class, "badge badge-danger");
        assert_eq!(label, "Erreur de conversion");
    }

    #[test]
    fn printed_and_unknown_statuses() {
        assert_eq!(
            status_badge(Some(TaskStatus::PrintSuccess)),
            ("badge badge-success", "Imprimé")
        );
        assert_eq!(status_badge(None), ("badge badge-neutral", "Statut inconnu"));
        assert_eq!(
            status_badge(Some(TaskStatus::Unknown)),
            ("badge badge-neutral", "Statut inconnu")
        );
    }
}
