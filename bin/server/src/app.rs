//! Main Leptos application component and routing.

use crate::pages::DashboardPage;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

/// Root component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="FlowBit"/>
        <Router>
            <main class="app">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=DashboardPage/>
                </Routes>
            </main>
        </Router>
    }
}
