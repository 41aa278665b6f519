use dioxus::prelude::*;
use once_cell::sync::OnceCell;

use crate::core::theme::{self, Theme};

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Platforms register a `NavBuilder` providing fully constructed `Link`
/// elements, so this crate does not need to know each platform's `Route`
/// enum. Each closure receives the label and returns a link that already
/// contains it as its child.
///
/// Platform setup:
/// ```ignore
/// use ui::components::{register_nav, NavBuilder};
/// fn install_nav() {
///     register_nav(NavBuilder {
///         home: |label| rsx!( Link { class: "navbar__link", to: Route::Home {}, "{label}" } ),
///         dashboard: |label| rsx!( Link { class: "navbar__link", to: Route::Dashboard {}, "{label}" } ),
///     });
/// }
/// ```
pub struct NavBuilder {
    pub home: fn(label: &str) -> Element,
    pub dashboard: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    // The hosting shell provides the theme signal; without one the toggle
    // is hidden and the default dark styling applies.
    let theme_ctx: Option<Signal<Theme>> = try_use_context::<Signal<Theme>>();
    let current_theme = theme_ctx.as_ref().map(|t| t()).unwrap_or_default();

    let on_toggle = move |_| {
        if let Some(mut theme_signal) = theme_ctx {
            let next = theme_signal().toggled();
            theme_signal.set(next);
            theme::store_theme(next);
        }
    };

    let internal_nav: Option<Element> = NAV_BUILDER.get().map(|b| {
        let home = (b.home)("Home");
        let dashboard = (b.dashboard)("Dashboard");

        rsx! {
            nav { class: "navbar__links",
                {home}
                {dashboard}
            }
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header {
            id: "navbar",
            class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "Marquee" }
                    }
                    span { class: "navbar__brand-subtitle", "Cinema admin" }
                }

                if let Some(nav) = internal_nav {
                    {nav}
                } else {
                    nav { class: "navbar__links", {children} }
                }

                if theme_ctx.is_some() {
                    button {
                        r#type: "button",
                        class: "navbar__theme-toggle",
                        aria_label: "Toggle color theme",
                        onclick: on_toggle,
                        "{current_theme.toggle_icon()}"
                    }
                }
            }
        }
    }
}
