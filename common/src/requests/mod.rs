//! Wire records for every endpoint the print-shop client consumes.
//!
//! Field names follow what the server actually speaks, including the French
//! spellings of the summary payload (`prix`, `prix_total`), kept behind
//! serde renames. All payloads are field-keyed JSON except the upload
//! itself, which goes out as multipart form data.

use serde::{Deserialize, Serialize};

use crate::model::options::OptionsPayload;
use crate::model::status::{JobStatus, TaskStatus};

/// `POST /upload_and_process_file` response. One call per file.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub task_id: Option<String>,
    pub error: Option<String>,
}

/// One task's entry in the job status poll. Replaced wholesale in the task
/// store on every poll; never merged field by field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskSnapshot {
    pub task_id: String,
    pub file_name: Option<String>,
    pub status: TaskStatus,
    pub pages: Option<u32>,
    pub price: Option<String>,
}

/// `GET /get_job_status/{job_id}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    pub job_id: String,
    pub tasks: Vec<TaskSnapshot>,
    pub is_complete: bool,
}

/// One task's contribution to the summary request: its id plus the full
/// current options snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTask {
    pub task_id: String,
    pub options: OptionsPayload,
}

/// `POST /calculate_summary` request body.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRequest {
    pub job_id: String,
    pub tasks: Vec<SummaryTask>,
}

/// A task as priced by the server at summary time. `pages == 0` marks a
/// document the pipeline could not count: its price is not authoritative
/// and the shop prices it manually.
#[derive(Debug, Clone, Deserialize)]
pub struct PricedTask {
    pub task_id: Option<String>,
    pub name: String,
    pub pages: u32,
    pub copies: u32,
    pub is_color: bool,
    pub is_duplex: bool,
    #[serde(rename = "prix")]
    pub price: f64,
}

/// The authoritative job summary computed server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct PrintJobSummary {
    pub tasks: Vec<PricedTask>,
    #[serde(rename = "prix_total")]
    pub total_price: f64,
    #[serde(rename = "username")]
    pub identity: Option<String>,
    pub job_id: Option<String>,
}

/// `POST /calculate_summary` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub success: bool,
    pub print_job_summary: Option<PrintJobSummary>,
    pub error: Option<String>,
}

/// Generic acknowledgment shared by `/print`, the reprint commands and the
/// delete commands.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
}

/// One file row inside a history command, as stored server-side. Fields
/// filled at summary time (copies, colour, price) are absent for commands
/// that never reached that step.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryFile {
    pub task_id: Option<String>,
    pub file_name: Option<String>,
    pub status: Option<TaskStatus>,
    pub pages: Option<u32>,
    pub price: Option<String>,
    pub copies: Option<u32>,
    pub color: Option<String>,
    pub duplex: Option<String>,
    pub paper_size: Option<String>,
}

/// A history command: all files uploaded under one job id, with the
/// aggregate status the server derives for the card header.
#[derive(Debug, Clone, Deserialize)]
pub struct Command {
    pub job_id: String,
    pub timestamp: Option<String>,
    pub username: Option<String>,
    pub total_price: f64,
    pub job_status: JobStatus,
    pub source: Option<String>,
    pub email_subject: Option<String>,
    pub files: Vec<HistoryFile>,
}

/// `GET /api/admin_data` response. Revenue is preformatted server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminData {
    pub total_revenue: String,
    pub total_pages: u64,
    pub upload_commands: Vec<Command>,
    pub email_commands: Vec<Command>,
}

/// `POST /reprint` request: reprint a single task with fresh options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReprintTaskRequest {
    pub task_id: String,
    pub copies: u32,
    pub is_color: bool,
    pub is_duplex: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReprintJobOptions {
    pub copies: u32,
    pub is_color: bool,
    pub is_duplex: bool,
}

/// `POST /api/reprint_job` request: reprint every printable file of a job
/// with one shared set of options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReprintJobRequest {
    pub job_id: String,
    pub options: ReprintJobOptions,
}

/// One entry of the read-only upload-folder listing.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowsedFile {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub modified: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::options::{PageMode, PrintOptions};

    #[test]
    fn job_status_response_decodes_server_payload() {
        let raw = r#"{
            "job_id": "job-1",
            "tasks": [
                {"task_id": "task-1", "file_name": "a.pdf", "status": "PRET_POUR_CALCUL", "pages": 3, "price": null},
                {"task_id": "task-2", "file_name": "b.doc", "status": "CONVERSION_EN_COURS", "pages": null, "price": null}
            ],
            "is_complete": false
        }"#;
        let response: JobStatusResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.tasks.len(), 2);
        assert_eq!(response.tasks[0].status, TaskStatus::Ready);
        assert_eq!(response.tasks[0].pages, Some(3));
        assert_eq!(response.tasks[1].pages, None);
        assert!(!response.is_complete);
    }

    #[test]
    fn summary_request_serializes_string_options() {
        let options = PrintOptions {
            copies: 2,
            page_mode: PageMode::Range,
            start_page: Some(1),
            end_page: Some(4),
            ..PrintOptions::default()
        };
        let request = SummaryRequest {
            job_id: "job-9".into(),
            tasks: vec![SummaryTask {
                task_id: "task-9".into(),
                options: (&options).into(),
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        let sent = &value["tasks"][0]["options"];
        assert_eq!(sent["copies"], "2");
        assert_eq!(sent["pagemode"], "range");
        assert_eq!(sent["startpage"], "1");
        assert_eq!(sent["endpage"], "4");
    }

    #[test]
    fn summary_response_uses_french_field_names() {
        let raw = r#"{
            "success": true,
            "print_job_summary": {
                "tasks": [
                    {"task_id": "task-1", "name": "a.pdf", "pages": 5, "copies": 2,
                     "is_color": false, "is_duplex": true, "prix": 2.0, "path": "/tmp/a.pdf"}
                ],
                "prix_total": 2.0,
                "username": "camille",
                "job_id": "job-1"
            }
        }"#;
        let response: SummaryResponse = serde_json::from_str(raw).unwrap();
        let summary = response.print_job_summary.unwrap();
        assert_eq!(summary.total_price, 2.0);
        assert_eq!(summary.tasks[0].price, 2.0);
        assert_eq!(summary.identity.as_deref(), Some("camille"));
    }

    #[test]
    fn job_reprint_request_wire_shape() {
        let request = ReprintJobRequest {
            job_id: "job-1".to_string(),
            options: ReprintJobOptions {
                copies: 2,
                is_color: true,
                is_duplex: false,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["job_id"], "job-1");
        assert_eq!(value["options"]["copies"], 2);
        assert_eq!(value["options"]["is_color"], true);
        assert_eq!(value["options"]["is_duplex"], false);
    }

    #[test]
    fn admin_data_decodes_sparse_history_rows() {
        let raw = r#"{
            "total_revenue": "12.40",
            "total_pages": 310,
            "upload_commands": [{
                "job_id": "job-1",
                "timestamp": "2025-03-01 10:00:00",
                "username": "camille",
                "total_price": 1.2,
                "job_status": "completed",
                "source": "upload",
                "email_subject": null,
                "files": [{"task_id": "task-1", "file_name": "a.pdf", "status": "IMPRIME_AVEC_SUCCES",
                           "pages": 3, "price": "1.20", "copies": 2, "color": "N&B",
                           "duplex": "Recto", "paper_size": "2"}]
            }],
            "email_commands": []
        }"#;
        let data: AdminData = serde_json::from_str(raw).unwrap();
        assert_eq!(data.total_revenue, "12.40");
        assert_eq!(data.upload_commands[0].job_status, JobStatus::Completed);
        assert_eq!(
            data.upload_commands[0].files[0].status,
            Some(TaskStatus::PrintSuccess)
        );
    }
}
