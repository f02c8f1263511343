//! Update logic for the admin surface.
//!
//! The refresh loop mirrors the order page's poller: a cancellable
//! interval, stopped on transport failure or when the tab is hidden, and
//! re-armed by any explicit refresh. Destructive commands only ever leave
//! through `ConfirmOverlay`, so a dismissed confirmation sends nothing.

use gloo_timers::callback::Interval;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::requests::{ReprintJobOptions, ReprintJobRequest, ReprintTaskRequest};

use crate::components::helpers::show_toast;

use super::helpers::{
    fetch_admin_data, fetch_files, post_delete_all, post_delete_task, post_reprint_job,
    post_reprint_task, FetchError,
};
use super::messages::{Msg, PickerEdit};
use super::state::{AdminComponent, Overlay, Panel, ReprintScope};

/// Cadence of the history refresh.
pub const REFRESH_INTERVAL_MS: u32 = 5_000;

pub fn update(component: &mut AdminComponent, ctx: &Context<AdminComponent>, msg: Msg) -> bool {
    match msg {
        Msg::RefreshTick => {
            ensure_refresh(component, ctx);
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::DataArrived(fetch_admin_data().await));
            });
            false
        }
        Msg::DataArrived(result) => match result {
            Ok(data) => {
                component.load_error = None;
                component.data = Some(data);
                true
            }
            Err(FetchError::Auth) => {
                force_reload();
                false
            }
            Err(FetchError::Other(err)) => {
                gloo_console::error!("chargement de l'historique impossible:", err);
                component.stop_refresh();
                component.load_error = Some("Impossible de charger l'historique.".to_string());
                true
            }
        },
        Msg::ToggleCard(job_id) => {
            component.toggle_card(&job_id);
            true
        }
        Msg::SetPanel(panel) => {
            component.panel = panel;
            if panel == Panel::Files {
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::FilesArrived(fetch_files().await));
                });
            }
            true
        }
        Msg::FilesArrived(result) => match result {
            Ok(files) => {
                component.files = Some(files);
                true
            }
            Err(FetchError::Auth) => {
                force_reload();
                false
            }
            Err(FetchError::Other(err)) => {
                gloo_console::error!("listing des fichiers impossible:", err);
                show_toast("Impossible de charger la liste des fichiers.");
                false
            }
        },
        Msg::OpenOverlay(overlay) => {
            component.open_overlay(overlay);
            true
        }
        Msg::DismissOverlay => {
            component.dismiss_overlay();
            true
        }
        Msg::EditPicker(edit) => {
            let Some(Overlay::Reprint(picker)) = &mut component.overlay else {
                return false;
            };
            match edit {
                PickerEdit::Copies(copies) => picker.copies = copies.max(1),
                PickerEdit::Color(color) => picker.color = color,
                PickerEdit::Duplex(duplex) => picker.duplex = duplex,
            }
            true
        }
        Msg::ConfirmOverlay => confirm_overlay(component, ctx),
        Msg::ReprintFinished(result) => {
            component.action_pending = false;
            match result {
                Ok(response) if response.success => {
                    // no refresh needed for the acknowledgment itself
                    show_toast("Réimpression lancée.");
                }
                Ok(response) => show_toast(&format!(
                    "Erreur : {}",
                    response.error.unwrap_or_else(|| "Erreur inconnue".to_string())
                )),
                Err(FetchError::Auth) => force_reload(),
                Err(FetchError::Other(_)) => {
                    show_toast("Erreur de communication avec le serveur.");
                }
            }
            true
        }
        Msg::DeleteFinished(result) => {
            component.action_pending = false;
            match result {
                Ok(response) if response.success => {
                    // deletion changes the history: force a re-fetch
                    ctx.link().send_message(Msg::RefreshTick);
                }
                Ok(response) => show_toast(&format!(
                    "Erreur : {}",
                    response.error.unwrap_or_else(|| "Suppression impossible.".to_string())
                )),
                Err(FetchError::Auth) => force_reload(),
                Err(FetchError::Other(_)) => {
                    show_toast("Erreur de communication avec le serveur.");
                }
            }
            true
        }
        Msg::VisibilityChanged { hidden } => {
            if hidden {
                component.stop_refresh();
            } else {
                ctx.link().send_message(Msg::RefreshTick);
            }
            false
        }
    }
}

/// Issues the command the active overlay describes and closes it.
fn confirm_overlay(component: &mut AdminComponent, ctx: &Context<AdminComponent>) -> bool {
    let Some(overlay) = component.overlay.take() else {
        return false;
    };
    component.action_pending = true;
    let link = ctx.link().clone();
    match overlay {
        Overlay::Reprint(picker) => match picker.scope {
            ReprintScope::Task { task_id, .. } => {
                let request = ReprintTaskRequest {
                    task_id,
                    copies: picker.copies,
                    is_color: picker.color,
                    is_duplex: picker.duplex,
                };
                spawn_local(async move {
                    link.send_message(Msg::ReprintFinished(post_reprint_task(&request).await));
                });
            }
            ReprintScope::Job { job_id } => {
                let request = ReprintJobRequest {
                    job_id,
                    options: ReprintJobOptions {
                        copies: picker.copies,
                        is_color: picker.color,
                        is_duplex: picker.duplex,
                    },
                };
                spawn_local(async move {
                    link.send_message(Msg::ReprintFinished(post_reprint_job(&request).await));
                });
            }
        },
        Overlay::DeleteTask { task_id, .. } => {
            spawn_local(async move {
                link.send_message(Msg::DeleteFinished(post_delete_task(&task_id).await));
            });
        }
        Overlay::DeleteAll => {
            spawn_local(async move {
                link.send_message(Msg::DeleteFinished(post_delete_all().await));
            });
        }
    }
    true
}

fn ensure_refresh(component: &mut AdminComponent, ctx: &Context<AdminComponent>) {
    if component.refresh.is_some() {
        return;
    }
    let link = ctx.link().clone();
    component.refresh = Some(Interval::new(REFRESH_INTERVAL_MS, move || {
        link.send_message(Msg::RefreshTick);
    }));
}

/// An expired session is never recovered locally.
fn force_reload() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}
