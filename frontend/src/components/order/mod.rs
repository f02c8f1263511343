//! Customer ordering surface: queue files, follow their server-side
//! processing through a polling loop, edit print options with a live
//! advisory price, then confirm and submit the print job.
//!
//! Root module wiring the Yew `Component` implementation with submodules
//! for state, messages, update logic, the pure row view-model and view
//! rendering.

use gloo_events::EventListener;
use yew::prelude::*;

mod helpers;
mod messages;
mod rows;
mod state;
mod update;
mod view;

pub use messages::{Msg, OptionEdit};
pub use state::OrderComponent;

impl Component for OrderComponent {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut component = OrderComponent::new();
        component.rates = helpers::window_rates();
        component.visibility = visibility_listener(ctx);
        component
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}

/// Pauses the status poll while the page is in a background tab and
/// resumes it (with an immediate poll) when it becomes visible again.
fn visibility_listener(ctx: &Context<OrderComponent>) -> Option<EventListener> {
    let document = web_sys::window()?.document()?;
    let link = ctx.link().clone();
    let observed = document.clone();
    Some(EventListener::new(&document, "visibilitychange", move |_| {
        link.send_message(Msg::VisibilityChanged {
            hidden: observed.hidden(),
        });
    }))
}
