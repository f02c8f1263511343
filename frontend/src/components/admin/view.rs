//! View rendering for the admin surface: aggregate tiles, the two command
//! groups as collapsible cards, the transient reprint/delete overlays and
//! the read-only file browser.

use num_format::{Locale, ToFormattedString};
use web_sys::{HtmlInputElement, InputEvent};
use yew::html::Scope;
use yew::prelude::*;

use common::requests::{BrowsedFile, Command, HistoryFile};

use crate::components::helpers::format_bytes;

use super::helpers::status_badge;
use super::messages::{Msg, PickerEdit};
use super::state::{AdminComponent, Overlay, Panel, ReprintPicker, ReprintScope};

pub fn view(component: &AdminComponent, ctx: &Context<AdminComponent>) -> Html {
    let link = ctx.link();
    html! {
        <div class="admin-root">
            { header(component, link) }
            {
                match component.panel {
                    Panel::History => history_panel(component, link),
                    Panel::Files => files_panel(component),
                }
            }
            { overlay_view(component, link) }
        </div>
    }
}

fn header(component: &AdminComponent, link: &Scope<AdminComponent>) -> Html {
    let tab = |panel: Panel, label: &str| {
        let active = component.panel == panel;
        html! {
            <button
                class={classes!("tab-btn", active.then_some("active"))}
                onclick={link.callback(move |_| Msg::SetPanel(panel))}
            >
                { label }
            </button>
        }
    };
    html! {
        <div class="admin-header">
            <h1>{"Administration"}</h1>
            <div class="tab-bar">
                { tab(Panel::History, "Historique") }
                { tab(Panel::Files, "Fichiers") }
            </div>
            <div class="admin-actions">
                <button class="refresh-btn" onclick={link.callback(|_| Msg::RefreshTick)}>
                    {"Rafraîchir"}
                </button>
                <button
                    class="delete-all-btn"
                    disabled={!component.has_commands()}
                    onclick={link.callback(|_| Msg::OpenOverlay(Overlay::DeleteAll))}
                >
                    {"Vider l'historique"}
                </button>
            </div>
        </div>
    }
}

fn history_panel(component: &AdminComponent, link: &Scope<AdminComponent>) -> Html {
    if let Some(error) = &component.load_error {
        return html! {
            <div class="alert alert-danger">
                { error }
                {" "}
                <button onclick={link.callback(|_| Msg::RefreshTick)}>{"Réessayer"}</button>
            </div>
        };
    }
    let Some(data) = &component.data else {
        return html! { <p class="loading">{"Chargement de l'historique…"}</p> };
    };
    html! {
        <div class="history-panel">
            <div class="stat-tiles">
                <div class="stat-tile">
                    <span class="stat-label">{"Chiffre d'affaires"}</span>
                    <strong>{ format!("{} €", data.total_revenue) }</strong>
                </div>
                <div class="stat-tile">
                    <span class="stat-label">{"Pages imprimées"}</span>
                    <strong>{ data.total_pages.to_formatted_string(&Locale::fr) }</strong>
                </div>
            </div>
            { command_section(component, link, "Commandes en ligne", &data.upload_commands) }
            { command_section(component, link, "Commandes par email", &data.email_commands) }
        </div>
    }
}

fn command_section(
    component: &AdminComponent,
    link: &Scope<AdminComponent>,
    title: &str,
    commands: &[Command],
) -> Html {
    html! {
        <section class="command-section">
            <h2>{ title }</h2>
            {
                if commands.is_empty() {
                    html! { <p class="empty-note">{"Aucune commande dans l'historique."}</p> }
                } else {
                    html! { for commands.iter().map(|command| command_card(component, link, command)) }
                }
            }
        </section>
    }
}

fn command_card(
    component: &AdminComponent,
    link: &Scope<AdminComponent>,
    command: &Command,
) -> Html {
    let open = component.open_cards.contains(&command.job_id);
    let ontoggle = {
        let job_id = command.job_id.clone();
        link.callback(move |_| Msg::ToggleCard(job_id.clone()))
    };
    let onreprint = {
        let picker = ReprintPicker::for_job(command);
        link.callback(move |_| Msg::OpenOverlay(Overlay::Reprint(picker.clone())))
    };
    let status_class = format!("status-{:?}", command.job_status).to_lowercase();
    html! {
        <div class={classes!("command-card", status_class)} key={command.job_id.clone()}>
            <div class="card-heading" onclick={ontoggle}>
                <div>
                    <h3>{ command.username.clone().unwrap_or_else(|| "(inconnu)".to_string()) }</h3>
                    <small>{ command.timestamp.clone().unwrap_or_default() }</small>
                    {
                        match &command.email_subject {
                            Some(subject) => html! { <small class="email-subject">{ subject }</small> },
                            None => html! {},
                        }
                    }
                </div>
                <div class="card-figures">
                    <strong>{ format!("{:.2} €", command.total_price) }</strong>
                    <small>{ format!("{} fichier(s)", command.files.len()) }</small>
                </div>
            </div>
            {
                if open {
                    html! {
                        <div class="card-body">
                            <button class="job-reprint-btn" onclick={onreprint}>
                                {"Réimprimer la commande"}
                            </button>
                            <ul class="history-files">
                                { for command.files.iter().map(|file| file_row(link, file)) }
                            </ul>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn file_row(link: &Scope<AdminComponent>, file: &HistoryFile) -> Html {
    let (badge_class, badge_label) = status_badge(file.status);
    let name = file.file_name.clone().unwrap_or_else(|| "(sans nom)".to_string());
    let is_error = file.status.is_some_and(|status| status.is_error());
    let onreprint = ReprintPicker::for_task(file).map(|picker| {
        link.callback(move |_| Msg::OpenOverlay(Overlay::Reprint(picker.clone())))
    });
    let ondelete = file.task_id.clone().map(|task_id| {
        let file_name = name.clone();
        link.callback(move |_| {
            Msg::OpenOverlay(Overlay::DeleteTask {
                task_id: task_id.clone(),
                file_name: file_name.clone(),
            })
        })
    });
    let reprint_disabled = is_error || onreprint.is_none();
    let delete_disabled = ondelete.is_none();
    html! {
        <li class="history-file">
            <div class="file-ident">
                {
                    match &file.task_id {
                        Some(task_id) => html! {
                            <a href={format!("/download/{task_id}")} target="_blank">{ &name }</a>
                        },
                        None => html! { <span>{ &name }</span> },
                    }
                }
                {
                    match &file.price {
                        Some(price) => html! { <small class="file-price">{ format!("({price} €)") }</small> },
                        None => html! {},
                    }
                }
                <span class={badge_class}>{ badge_label }</span>
            </div>
            <div class="file-actions">
                <button
                    class="reprint-btn"
                    title="Réimprimer"
                    disabled={reprint_disabled}
                    onclick={onreprint.unwrap_or_default()}
                >
                    {"Réimprimer"}
                </button>
                <button
                    class="delete-task-btn"
                    title="Supprimer cette tâche"
                    disabled={delete_disabled}
                    onclick={ondelete.unwrap_or_default()}
                >
                    {"✕"}
                </button>
            </div>
        </li>
    }
}

fn files_panel(component: &AdminComponent) -> Html {
    let Some(files) = &component.files else {
        return html! { <p class="loading">{"Chargement de la liste des fichiers…"}</p> };
    };
    html! {
        <table class="files-table">
            <thead>
                <tr>
                    <th>{"Nom"}</th>
                    <th>{"Taille"}</th>
                    <th>{"Modifié"}</th>
                    <th>{"Actions"}</th>
                </tr>
            </thead>
            <tbody>
                { for files.iter().map(browsed_file_row) }
            </tbody>
        </table>
    }
}

fn browsed_file_row(file: &BrowsedFile) -> Html {
    let encoded: String = js_sys::encode_uri_component(&file.path).into();
    html! {
        <tr key={file.path.clone()}>
            <td>{ &file.name }</td>
            <td>{ format_bytes(file.size) }</td>
            <td>{ &file.modified }</td>
            <td>
                <a href={format!("/api/download_raw_file?path={encoded}")} target="_blank">
                    {"Aperçu"}
                </a>
                {" "}
                <a href={format!("/api/download_raw_file?path={encoded}&dl=1")}>
                    {"Télécharger"}
                </a>
            </td>
        </tr>
    }
}

fn overlay_view(component: &AdminComponent, link: &Scope<AdminComponent>) -> Html {
    let Some(overlay) = &component.overlay else {
        return html! {};
    };
    let body = match overlay {
        Overlay::Reprint(picker) => reprint_picker(component, link, picker),
        Overlay::DeleteTask { file_name, .. } => confirm_dialog(
            component,
            link,
            format!("Supprimer la tâche pour « {file_name} » ?"),
            "Supprimer",
        ),
        Overlay::DeleteAll => confirm_dialog(
            component,
            link,
            "Êtes-vous sûr de vouloir effacer TOUT l'historique des commandes ? \
             Cette action est définitive et irréversible."
                .to_string(),
            "Tout supprimer",
        ),
    };
    html! {
        <>
            <div class="overlay-backdrop" onclick={link.callback(|_| Msg::DismissOverlay)} />
            <div class="overlay-panel">{ body }</div>
        </>
    }
}

fn reprint_picker(
    component: &AdminComponent,
    link: &Scope<AdminComponent>,
    picker: &ReprintPicker,
) -> Html {
    let title = match &picker.scope {
        ReprintScope::Task { file_name, .. } => format!("Réimprimer « {file_name} »"),
        ReprintScope::Job { .. } => "Réimprimer toute la commande".to_string(),
    };
    let oncopies = link.callback(|e: InputEvent| {
        let copies = e
            .target_unchecked_into::<HtmlInputElement>()
            .value()
            .parse()
            .unwrap_or(1);
        Msg::EditPicker(PickerEdit::Copies(copies))
    });
    let toggle = |active: bool, label: &str, edit: PickerEdit| {
        html! {
            <button
                type="button"
                class={classes!("option-btn", active.then_some("active"))}
                onclick={link.callback(move |_| Msg::EditPicker(edit))}
            >
                { label }
            </button>
        }
    };
    html! {
        <div class="reprint-picker">
            <h3>{ title }</h3>
            <div class="option-line">
                <label>{"Copies :"}</label>
                <input type="number" min="1" value={picker.copies.to_string()} oninput={oncopies} />
            </div>
            <div class="option-line">
                <div class="option-btn-group">
                    { toggle(!picker.color, "N&B", PickerEdit::Color(false)) }
                    { toggle(picker.color, "Couleur", PickerEdit::Color(true)) }
                </div>
                <div class="option-btn-group">
                    { toggle(!picker.duplex, "Recto", PickerEdit::Duplex(false)) }
                    { toggle(picker.duplex, "R/V", PickerEdit::Duplex(true)) }
                </div>
            </div>
            <div class="overlay-actions">
                <button onclick={link.callback(|_| Msg::DismissOverlay)}>{"Annuler"}</button>
                <button
                    class="confirm-btn"
                    disabled={component.action_pending}
                    onclick={link.callback(|_| Msg::ConfirmOverlay)}
                >
                    {"Réimprimer"}
                </button>
            </div>
        </div>
    }
}

fn confirm_dialog(
    component: &AdminComponent,
    link: &Scope<AdminComponent>,
    message: String,
    confirm_label: &str,
) -> Html {
    html! {
        <div class="confirm-dialog">
            <p>{ message }</p>
            <div class="overlay-actions">
                <button onclick={link.callback(|_| Msg::DismissOverlay)}>{"Annuler"}</button>
                <button
                    class="danger-btn"
                    disabled={component.action_pending}
                    onclick={link.callback(|_| Msg::ConfirmOverlay)}
                >
                    { confirm_label }
                </button>
            </div>
        </div>
    }
}
