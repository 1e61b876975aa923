//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{dashboard::DashboardPage, editor::EditorPage};
use crate::state::{editor::EditorState, notify::NotifyState, scenes::ScenesState, viewport::ViewportState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Provide reactive state contexts for all child components.
    let scenes = RwSignal::new(ScenesState::default());
    let editor = RwSignal::new(EditorState::default());
    let viewport = RwSignal::new(ViewportState::default());
    let notify = RwSignal::new(NotifyState::default());

    provide_context(scenes);
    provide_context(editor);
    provide_context(viewport);
    provide_context(notify);

    view! {
        <Stylesheet id="leptos" href="/pkg/showroom.css"/>
        <Title text="Showroom"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=DashboardPage/>
                <Route path=(StaticSegment("scene"), ParamSegment("id")) view=EditorPage/>
            </Routes>
        </Router>
    }
}
