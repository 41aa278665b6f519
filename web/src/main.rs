use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::core::theme::{self, Theme};
use ui::views::{Dashboard, Home};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/dashboard")]
    Dashboard {},
}

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_dashboard(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Dashboard {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    register_nav(NavBuilder {
        home: nav_home,
        dashboard: nav_dashboard,
    });

    // Global theme signal, seeded from localStorage and shared with the
    // navbar toggle through context.
    let theme_signal = use_signal(theme::load_theme);
    use_context_provider(|| theme_signal);
    let theme: Theme = theme_signal();

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        div { class: "app-shell {theme.css_class()}",
            Router::<Route> {}
        }
    }
}

/// A web-specific Router around the shared `AppNavbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
