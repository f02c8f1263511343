//! Network calls and environment glue for the ordering surface.
//!
//! Every request helper returns `Result<_, String>` with a displayable
//! message; the callers decide whether a failure stops the poller, marks a
//! task or only shows a toast. Responses are decoded regardless of the HTTP
//! status because the server reports application failures as
//! `{success: false, error}` bodies on non-2xx statuses too.

use gloo_net::http::Request;
use js_sys::Reflect;
use uuid::Uuid;
use wasm_bindgen::JsValue;
use web_sys::FormData;

use common::model::options::OptionsPayload;
use common::model::pricing::PriceRates;
use common::requests::{ActionResponse, JobStatusResponse, SummaryRequest, SummaryResponse, UploadResponse};

pub fn new_job_id() -> String {
    format!("job-{}", Uuid::new_v4())
}

pub fn new_task_id() -> String {
    format!("task-{}", Uuid::new_v4())
}

/// Per-page rates for the advisory price display. The page template may
/// inject `prix_nb` / `prix_c` globals; anything missing falls back to the
/// built-in defaults.
pub fn window_rates() -> PriceRates {
    let mut rates = PriceRates::default();
    if let Some(window) = web_sys::window() {
        if let Some(bw) = read_global_number(&window, "prix_nb") {
            rates.bw = bw;
        }
        if let Some(color) = read_global_number(&window, "prix_c") {
            rates.color = color;
        }
    }
    rates
}

fn read_global_number(window: &web_sys::Window, name: &str) -> Option<f64> {
    Reflect::get(window, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.as_f64())
}

/// One multipart upload: the row's option fields plus the file itself and
/// the correlation ids the server needs.
pub async fn upload_file(
    job_id: &str,
    task_id: &str,
    identity: &str,
    options: &OptionsPayload,
    file: &web_sys::File,
) -> Result<UploadResponse, String> {
    let form = FormData::new().map_err(display_js)?;
    for (name, value) in options.form_fields() {
        form.append_with_str(name, &value).map_err(display_js)?;
    }
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(display_js)?;
    form.append_with_str("client_name", identity).map_err(display_js)?;
    form.append_with_str("job_id", job_id).map_err(display_js)?;
    form.append_with_str("task_id", task_id).map_err(display_js)?;

    let response = Request::post("/upload_and_process_file")
        .body(form)
        .map_err(|err| err.to_string())?
        .send()
        .await
        .map_err(|err| err.to_string())?;
    response
        .json::<UploadResponse>()
        .await
        .map_err(|err| err.to_string())
}

/// One aggregate status fetch for every task of the job.
pub async fn fetch_job_status(job_id: &str) -> Result<JobStatusResponse, String> {
    let response = Request::get(&format!("/get_job_status/{job_id}"))
        .send()
        .await
        .map_err(|err| err.to_string())?;
    response
        .json::<JobStatusResponse>()
        .await
        .map_err(|err| err.to_string())
}

pub async fn post_summary(request: &SummaryRequest) -> Result<SummaryResponse, String> {
    let response = Request::post("/calculate_summary")
        .json(request)
        .map_err(|err| err.to_string())?
        .send()
        .await
        .map_err(|err| err.to_string())?;
    response
        .json::<SummaryResponse>()
        .await
        .map_err(|err| err.to_string())
}

/// Final print submission; the job context lives in the session.
pub async fn post_print() -> Result<ActionResponse, String> {
    let response = Request::post("/print")
        .send()
        .await
        .map_err(|err| err.to_string())?;
    response
        .json::<ActionResponse>()
        .await
        .map_err(|err| err.to_string())
}

fn display_js(value: JsValue) -> String {
    format!("{value:?}")
}
