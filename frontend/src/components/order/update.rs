//! Update logic for the ordering surface.
//!
//! Elm-style: one function receives the component state, the context and a
//! message, mutates the state and returns whether the view must re-render.
//! All network work is dispatched from here with `spawn_local`; completions
//! come back as messages and re-validate that their task still exists.

use gloo_timers::callback::Interval;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::files::is_allowed_extension;
use common::model::options::{OptionsPayload, PrintOptions};

use crate::components::helpers::show_toast;

use super::helpers::{
    fetch_job_status, new_job_id, new_task_id, post_print, post_summary, upload_file,
};
use super::messages::{Msg, OptionEdit};
use super::rows::row_view_model;
use super::state::{Banner, ClientStatus, OrderComponent, TaskEntry};

/// Cadence of the job status poll.
pub const POLL_INTERVAL_MS: u32 = 2_500;

pub fn update(component: &mut OrderComponent, ctx: &Context<OrderComponent>, msg: Msg) -> bool {
    match msg {
        Msg::IdentityChanged(value) => {
            // the identity is job-scoped: frozen while tasks exist
            if component.tasks.is_empty() {
                component.identity = value;
                return true;
            }
            false
        }
        Msg::OpenFilePicker => {
            if component.identity.trim().is_empty() {
                show_toast("Veuillez d'abord renseigner votre nom.");
                return false;
            }
            if let Some(input) = component.file_input_ref.cast::<web_sys::HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::FilesSelected(files) => {
            enqueue(component, ctx, files);
            true
        }
        Msg::UploadFinished { task_id, result } => {
            // the task may have been removed between dispatch and response
            let Some(task) = component.task_mut(&task_id) else {
                return false;
            };
            match result {
                Ok(response) if response.success => {
                    // the file is never read again after a successful upload
                    task.file = None;
                }
                Ok(response) => {
                    task.client_status = ClientStatus::Error(
                        response.error.unwrap_or_else(|| "Erreur serveur".to_string()),
                    );
                }
                Err(err) => {
                    gloo_console::error!("échec de l'envoi:", err);
                    task.client_status = ClientStatus::Error("Erreur de connexion.".to_string());
                }
            }
            true
        }
        Msg::PollTick => {
            let Some(job_id) = component.job_id.clone() else {
                component.stop_polling();
                return true;
            };
            if component.tasks.is_empty() {
                component.stop_polling();
                return true;
            }
            let link = ctx.link().clone();
            spawn_local(async move {
                match fetch_job_status(&job_id).await {
                    Ok(response) => link.send_message(Msg::PollArrived(response)),
                    Err(err) => link.send_message(Msg::PollFailed(err)),
                }
            });
            false
        }
        Msg::PollArrived(response) => {
            for snapshot in response.tasks {
                component.apply_snapshot(snapshot);
            }
            if response.is_complete {
                component.stop_polling();
            }
            true
        }
        Msg::PollFailed(err) => {
            // no retry: stop and wait for an explicit re-trigger
            gloo_console::error!("suivi du traitement interrompu:", err);
            component.stop_polling();
            show_toast("Connexion au serveur perdue. Rouvrez la page pour reprendre le suivi.");
            true
        }
        Msg::RemoveTask(task_id) => {
            let removable = component
                .task(&task_id)
                .map(|task| row_view_model(task, component.rates).removable)
                .unwrap_or(false);
            if !removable {
                return false;
            }
            component.tasks.retain(|task| task.id != task_id);
            if component.tasks.is_empty() {
                component.clear_job();
            }
            true
        }
        Msg::EditOption { task_id, edit } => {
            let Some(task) = component.task_mut(&task_id) else {
                return false;
            };
            apply_edit(&mut task.options, edit);
            true
        }
        Msg::RequestSummary => {
            let Some(request) = component.summary_request() else {
                show_toast("Aucun fichier n'est prêt à être imprimé.");
                return false;
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::SummaryArrived(post_summary(&request).await));
            });
            false
        }
        Msg::SummaryArrived(result) => {
            match result {
                Ok(response) if response.success => match response.print_job_summary {
                    Some(summary) => {
                        component.excluded_warning =
                            component.tasks.iter().any(TaskEntry::has_failed);
                        component.summary = Some(summary);
                    }
                    None => show_toast("Impossible de calculer le résumé."),
                },
                Ok(response) => show_toast(
                    &response
                        .error
                        .unwrap_or_else(|| "Impossible de calculer le résumé.".to_string()),
                ),
                Err(_) => show_toast("Erreur de communication avec le serveur."),
            }
            true
        }
        Msg::DismissSummary => {
            if component.submitting {
                return false;
            }
            component.summary = None;
            true
        }
        Msg::ConfirmPrint => {
            if component.submitting {
                return false;
            }
            component.submitting = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::PrintFinished(post_print().await));
            });
            true
        }
        Msg::PrintFinished(result) => {
            component.submitting = false;
            component.summary = None;
            match result {
                Ok(response) if response.success => {
                    component.tasks.clear();
                    component.clear_job();
                    component.banner =
                        Some(Banner::Success("Impression lancée avec succès !".to_string()));
                }
                Ok(response) => {
                    component.banner = Some(Banner::Error(response.error.unwrap_or_else(|| {
                        "Une erreur s'est produite lors du lancement de l'impression.".to_string()
                    })));
                }
                Err(_) => {
                    component.banner = Some(Banner::Error(
                        "Erreur de communication avec le serveur.".to_string(),
                    ));
                }
            }
            true
        }
        Msg::VisibilityChanged { hidden } => {
            if hidden {
                component.stop_polling();
            } else if component.job_id.is_some() && !component.tasks.is_empty() {
                ensure_poller(component, ctx);
            }
            false
        }
        Msg::DismissBanner => {
            component.banner = None;
            true
        }
    }
}

/// Accepts a freshly selected batch: dedup, validation, task creation, then
/// one upload per new task and a running poller.
fn enqueue(component: &mut OrderComponent, ctx: &Context<OrderComponent>, files: Vec<web_sys::File>) {
    if component.identity.trim().is_empty() {
        show_toast("Veuillez d'abord renseigner votre nom.");
        return;
    }
    component.banner = None;
    if component.job_id.is_none() {
        component.job_id = Some(new_job_id());
    }
    for file in files {
        let name = file.name();
        let size = file.size() as u64;
        if component.contains_file(&name, size) {
            continue;
        }
        if size == 0 {
            show_toast(&format!("« {name} » est vide et a été ignoré."));
            continue;
        }
        if !is_allowed_extension(&name) {
            show_toast(&format!("Type de fichier non autorisé : {name}"));
            continue;
        }
        component.tasks.push(TaskEntry::new(new_task_id(), file));
    }
    start_uploads(component, ctx);
    ensure_poller(component, ctx);
}

/// Fires one upload request per queued task; completion order between them
/// is unspecified and each completion only touches its own task.
fn start_uploads(component: &mut OrderComponent, ctx: &Context<OrderComponent>) {
    let Some(job_id) = component.job_id.clone() else {
        return;
    };
    let identity = component.identity.clone();
    for task in component
        .tasks
        .iter_mut()
        .filter(|task| task.client_status == ClientStatus::Queued)
    {
        task.client_status = ClientStatus::Uploading;
        let Some(file) = task.file.clone() else {
            continue;
        };
        let payload = OptionsPayload::from(&task.options);
        let task_id = task.id.clone();
        let job_id = job_id.clone();
        let identity = identity.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = upload_file(&job_id, &task_id, &identity, &payload, &file).await;
            link.send_message(Msg::UploadFinished { task_id, result });
        });
    }
}

/// Starts the poll interval if it is not already running and there is work
/// to watch, with an immediate first poll.
fn ensure_poller(component: &mut OrderComponent, ctx: &Context<OrderComponent>) {
    if component.poller.is_some() || component.tasks.is_empty() {
        return;
    }
    let link = ctx.link().clone();
    component.poller = Some(Interval::new(POLL_INTERVAL_MS, move || {
        link.send_message(Msg::PollTick);
    }));
    ctx.link().send_message(Msg::PollTick);
}

fn apply_edit(options: &mut PrintOptions, edit: OptionEdit) {
    match edit {
        OptionEdit::Copies(copies) => options.copies = copies.max(1),
        OptionEdit::Color(color) => options.color = color,
        OptionEdit::Siding(siding) => options.siding = siding,
        OptionEdit::Paper(paper) => options.paper_size = paper,
        OptionEdit::Mode(mode) => options.page_mode = mode,
        OptionEdit::StartPage(page) => options.start_page = page,
        OptionEdit::EndPage(page) => options.end_page = page,
    }
}
