//! View rendering for the ordering surface.
//!
//! The row content is entirely driven by [`row_view_model`], so this module
//! only wires view-models and option values to DOM nodes and callbacks.
//! All user-facing messages are in French by design.

use web_sys::{HtmlInputElement, HtmlSelectElement, InputEvent};
use yew::html::Scope;
use yew::prelude::*;

use common::model::options::{ColorMode, PageMode, PaperSize, Siding};
use common::model::pricing::format_eur;
use common::requests::PricedTask;

use crate::components::helpers::format_bytes;

use super::messages::{Msg, OptionEdit};
use super::rows::{row_view_model, Badge, RowViewModel, PRICE_MANUAL};
use super::state::{store_phase, Banner, OrderComponent, StorePhase, TaskEntry};

pub fn view(component: &OrderComponent, ctx: &Context<OrderComponent>) -> Html {
    let link = ctx.link();
    html! {
        <div class="order-root">
            { banner_view(component, link) }
            { identity_field(component, link) }
            { picker_controls(component, link) }
            <ul class="file-list">
                { for component.tasks.iter().map(|task| task_row(component, link, task)) }
            </ul>
            { submit_control(component, link) }
            { confirm_dialog(component, link) }
        </div>
    }
}

fn banner_view(component: &OrderComponent, link: &Scope<OrderComponent>) -> Html {
    let Some(banner) = &component.banner else {
        return html! {};
    };
    let (class, text) = match banner {
        Banner::Success(text) => ("banner banner-success", text),
        Banner::Error(text) => ("banner banner-error", text),
    };
    html! {
        <div class={class}>
            <span>{ text }</span>
            <button class="banner-close" onclick={link.callback(|_| Msg::DismissBanner)}>{"✕"}</button>
        </div>
    }
}

fn identity_field(component: &OrderComponent, link: &Scope<OrderComponent>) -> Html {
    let oninput = link.callback(|e: InputEvent| {
        Msg::IdentityChanged(e.target_unchecked_into::<HtmlInputElement>().value())
    });
    html! {
        <div class="identity-field">
            <label for="client-name">{"Votre nom"}</label>
            <input
                id="client-name"
                type="text"
                value={component.identity.clone()}
                disabled={!component.tasks.is_empty()}
                placeholder="Nom ou identifiant"
                {oninput}
            />
        </div>
    }
}

fn picker_controls(component: &OrderComponent, link: &Scope<OrderComponent>) -> Html {
    let onchange = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut files = Vec::new();
        if let Some(list) = input.files() {
            for index in 0..list.length() {
                if let Some(file) = list.get(index) {
                    files.push(file);
                }
            }
        }
        // allow re-selecting the same file after a removal
        input.set_value("");
        Msg::FilesSelected(files)
    });
    html! {
        <div class="picker-controls">
            <button class="add-file-btn" onclick={link.callback(|_| Msg::OpenFilePicker)}>
                {"Ajouter des fichiers"}
            </button>
            <input
                ref={component.file_input_ref.clone()}
                type="file"
                multiple=true
                style="display: none;"
                {onchange}
            />
        </div>
    }
}

fn task_row(component: &OrderComponent, link: &Scope<OrderComponent>, task: &TaskEntry) -> Html {
    let row = row_view_model(task, component.rates);
    let task_id = task.id.clone();
    let onremove = link.callback(move |_| Msg::RemoveTask(task_id.clone()));
    let kind = if task.file_kind.is_empty() {
        "Fichier".to_string()
    } else {
        task.file_kind.clone()
    };
    html! {
        <li class="task-row" key={task.id.clone()}>
            <div class="task-heading">
                <span class="file-name">{ &task.file_name }</span>
                <span class="file-details">
                    { format!("{} | {}", kind, format_bytes(task.file_size)) }
                </span>
                <button class="remove-file-btn" disabled={!row.removable} onclick={onremove}>
                    {"✕"}
                </button>
            </div>
            { status_line(&row) }
            {
                if row.options_enabled {
                    options_form(link, task)
                } else {
                    html! {}
                }
            }
            <div class="task-price">{ &row.price_text }</div>
        </li>
    }
}

fn status_line(row: &RowViewModel) -> Html {
    let class = match row.badge {
        Badge::Busy => "task-status status-busy",
        Badge::Ready => "task-status status-ready",
        Badge::Warning => "task-status status-warning",
        Badge::Error => "task-status status-error",
        Badge::Neutral => "task-status status-neutral",
    };
    html! {
        <div class={class}>
            { if row.badge == Badge::Busy { html! { <span class="spinner" /> } } else { html! {} } }
            <span>{ &row.status_label }</span>
            {
                match &row.preview_url {
                    Some(url) => html! {
                        <a class="preview-link" href={url.clone()} target="_blank">{"Aperçu"}</a>
                    },
                    None => html! {},
                }
            }
        </div>
    }
}

fn options_form(link: &Scope<OrderComponent>, task: &TaskEntry) -> Html {
    let options = &task.options;
    let copies_input = {
        let task_id = task.id.clone();
        link.callback(move |e: InputEvent| {
            let copies = e
                .target_unchecked_into::<HtmlInputElement>()
                .value()
                .parse()
                .unwrap_or(1);
            Msg::EditOption {
                task_id: task_id.clone(),
                edit: OptionEdit::Copies(copies),
            }
        })
    };
    let paper_change = {
        let task_id = task.id.clone();
        link.callback(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            Msg::EditOption {
                task_id: task_id.clone(),
                edit: OptionEdit::Paper(PaperSize::from_wire(&value).unwrap_or_default()),
            }
        })
    };
    html! {
        <form class="task-options" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
            <div class="option-line">
                <label>{"Copies :"}</label>
                <input
                    type="number"
                    min="1"
                    value={options.copies.to_string()}
                    oninput={copies_input}
                />
                <div class="option-btn-group">
                    { option_toggle(link, task, options.color == ColorMode::Bw, "N&B",
                        OptionEdit::Color(ColorMode::Bw)) }
                    { option_toggle(link, task, options.color == ColorMode::Color, "Couleur",
                        OptionEdit::Color(ColorMode::Color)) }
                </div>
            </div>
            <details class="advanced-options">
                <summary>{"Options avancées"}</summary>
                <div class="option-line">
                    <label>{"Format"}</label>
                    <select onchange={paper_change}>
                        { paper_option(PaperSize::A4, options.paper_size) }
                        { paper_option(PaperSize::A3, options.paper_size) }
                        { paper_option(PaperSize::A5, options.paper_size) }
                    </select>
                </div>
                <div class="option-line">
                    <label>{"Impression"}</label>
                    <div class="option-btn-group">
                        { option_toggle(link, task, options.siding == Siding::Recto, "Recto",
                            OptionEdit::Siding(Siding::Recto)) }
                        { option_toggle(link, task, options.siding == Siding::RectoVerso, "R/V",
                            OptionEdit::Siding(Siding::RectoVerso)) }
                    </div>
                </div>
                <div class="option-line">
                    <label>{"Plage"}</label>
                    <div class="option-btn-group">
                        { option_toggle(link, task, options.page_mode == PageMode::All, "Tout",
                            OptionEdit::Mode(PageMode::All)) }
                        { option_toggle(link, task, options.page_mode == PageMode::Range, "Plage",
                            OptionEdit::Mode(PageMode::Range)) }
                    </div>
                    {
                        if options.page_mode == PageMode::Range {
                            range_inputs(link, task)
                        } else {
                            html! {}
                        }
                    }
                </div>
            </details>
        </form>
    }
}

fn option_toggle(
    link: &Scope<OrderComponent>,
    task: &TaskEntry,
    active: bool,
    label: &str,
    edit: OptionEdit,
) -> Html {
    let task_id = task.id.clone();
    let onclick = link.callback(move |_| Msg::EditOption {
        task_id: task_id.clone(),
        edit,
    });
    html! {
        <button
            type="button"
            class={classes!("option-btn", active.then_some("active"))}
            {onclick}
        >
            { label }
        </button>
    }
}

fn paper_option(size: PaperSize, current: PaperSize) -> Html {
    html! {
        <option value={size.as_wire()} selected={size == current}>{ size.label() }</option>
    }
}

fn range_inputs(link: &Scope<OrderComponent>, task: &TaskEntry) -> Html {
    let start_input = {
        let task_id = task.id.clone();
        link.callback(move |e: InputEvent| {
            let page = e.target_unchecked_into::<HtmlInputElement>().value().parse().ok();
            Msg::EditOption {
                task_id: task_id.clone(),
                edit: OptionEdit::StartPage(page),
            }
        })
    };
    let end_input = {
        let task_id = task.id.clone();
        link.callback(move |e: InputEvent| {
            let page = e.target_unchecked_into::<HtmlInputElement>().value().parse().ok();
            Msg::EditOption {
                task_id: task_id.clone(),
                edit: OptionEdit::EndPage(page),
            }
        })
    };
    let start = task.options.start_page.map(|p| p.to_string()).unwrap_or_default();
    let end = task.options.end_page.map(|p| p.to_string()).unwrap_or_default();
    html! {
        <div class="page-range-inputs">
            <input type="number" min="1" placeholder="Début" value={start} oninput={start_input} />
            <span>{"-"}</span>
            <input type="number" min="1" placeholder="Fin" value={end} oninput={end_input} />
        </div>
    }
}

fn submit_control(component: &OrderComponent, link: &Scope<OrderComponent>) -> Html {
    let (disabled, body) = match store_phase(&component.tasks) {
        StorePhase::Empty => (true, html! { {"Suivant"} }),
        StorePhase::Processing => (
            true,
            html! { <><span class="spinner" />{" Traitement en cours…"}</> },
        ),
        StorePhase::Ready => (false, html! { {"Suivant"} }),
        StorePhase::NothingPrintable => (true, html! { {"Aucun fichier valide"} }),
    };
    html! {
        <button
            class="summary-btn"
            {disabled}
            onclick={link.callback(|_| Msg::RequestSummary)}
        >
            { body }
        </button>
    }
}

fn confirm_dialog(component: &OrderComponent, link: &Scope<OrderComponent>) -> Html {
    let Some(summary) = &component.summary else {
        return html! {};
    };
    html! {
        <>
            <div class="overlay-backdrop" onclick={link.callback(|_| Msg::DismissSummary)} />
            <div class="overlay-panel confirm-dialog">
                <h2>{"Confirmer l'impression"}</h2>
                {
                    match &summary.identity {
                        Some(identity) => html! { <p class="confirm-identity">{ identity }</p> },
                        None => html! {},
                    }
                }
                {
                    if component.excluded_warning {
                        html! {
                            <div class="alert alert-warning">
                                {"Attention : certains fichiers n'ont pas pu être traités et \
                                  n'apparaissent pas ci-dessous. Ils ne seront pas imprimés."}
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
                <div class="confirm-task-list">
                    { for summary.tasks.iter().map(priced_task_card) }
                </div>
                <div class="confirm-total">
                    <span>{"Total"}</span>
                    <strong>{ format_eur(summary.total_price) }</strong>
                </div>
                <div class="confirm-actions">
                    <button
                        class="cancel-btn"
                        disabled={component.submitting}
                        onclick={link.callback(|_| Msg::DismissSummary)}
                    >
                        {"Annuler"}
                    </button>
                    <button
                        class="print-btn"
                        disabled={component.submitting}
                        onclick={link.callback(|_| Msg::ConfirmPrint)}
                    >
                        {
                            if component.submitting {
                                html! { <><span class="spinner" />{" Envoi…"}</> }
                            } else {
                                html! { {"Lancer l'impression"} }
                            }
                        }
                    </button>
                </div>
            </div>
        </>
    }
}

fn priced_task_card(task: &PricedTask) -> Html {
    let pages = if task.pages == 0 {
        "indisponible".to_string()
    } else {
        format!("{} page(s)", task.pages)
    };
    let price = if task.pages == 0 {
        PRICE_MANUAL.to_string()
    } else {
        format_eur(task.price)
    };
    let color = if task.is_color { "Couleur" } else { "N&B" };
    let siding = if task.is_duplex { "Recto/Verso" } else { "Recto" };
    html! {
        <div class="task-card">
            <div class="task-card-heading">
                <span class="file-name">{ &task.name }</span>
                <span class="task-card-price">{ price }</span>
            </div>
            <div class="task-card-details">
                <span>{ pages }</span>
                <span>{ format!("{} copie(s)", task.copies) }</span>
                <span>{ color }</span>
                <span>{ siding }</span>
            </div>
        </div>
    }
}
