//! Admin surface: job history with per-task and per-job reprint, task and
//! bulk deletion behind explicit confirmations, aggregate tiles and a
//! read-only file browser.

use gloo_events::EventListener;
use yew::prelude::*;

mod helpers;
mod messages;
mod state;
mod update;
mod view;

pub use messages::{Msg, PickerEdit};
pub use state::AdminComponent;

impl Component for AdminComponent {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut component = AdminComponent::new();
        component.visibility = visibility_listener(ctx);
        ctx.link().send_message(Msg::RefreshTick);
        component
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}

/// Pauses the history refresh while the tab is hidden and re-fetches
/// immediately when it becomes visible again.
fn visibility_listener(ctx: &Context<AdminComponent>) -> Option<EventListener> {
    let document = web_sys::window()?.document()?;
    let link = ctx.link().clone();
    let observed = document.clone();
    Some(EventListener::new(&document, "visibilitychange", move |_| {
        link.send_message(Msg::VisibilityChanged {
            hidden: observed.hidden(),
        });
    }))
}
