//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::{header::Header, routed_page::RoutedPage};
use crate::state::session::SessionContext;

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
/// Every listed path renders `RoutedPage`, which runs the navigation policy
/// and picks the page. The list only tells SSR which URLs exist; unknown URLs
/// land in the fallback and get redirected the same way.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = SessionContext::new();
    provide_context(session);

    // Effects never run during SSR, so the session is only read in the browser.
    Effect::new(move || session.restore());

    view! {
        <Stylesheet id="leptos" href="/pkg/badal.css"/>
        <Title text="BADAL"/>

        <Router>
            <div class="app">
                <Header/>
                <main class="main-content">
                    <Routes fallback=|| view! { <RoutedPage/> }>
                        <Route path=StaticSegment("") view=RoutedPage/>
                        <Route path=StaticSegment("register") view=RoutedPage/>
                        <Route path=StaticSegment("patients") view=RoutedPage/>
                        <Route path=(StaticSegment("patients"), StaticSegment("add")) view=RoutedPage/>
                        <Route path=(StaticSegment("patients"), ParamSegment("id")) view=RoutedPage/>
                        <Route path=StaticSegment("predictions") view=RoutedPage/>
                        <Route path=StaticSegment("research") view=RoutedPage/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
