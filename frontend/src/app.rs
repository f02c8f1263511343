use yew::{html, Component, Context, Html};

use crate::components::admin::AdminComponent;
use crate::components::order::OrderComponent;

/// Root component. The same bundle serves the customer ordering page and
/// the admin panel; the path decides which surface is mounted.
pub struct App;

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        if current_path().starts_with("/admin") {
            html! { <AdminComponent /> }
        } else {
            html! { <OrderComponent /> }
        }
    }
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}
