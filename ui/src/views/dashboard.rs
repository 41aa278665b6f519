//! Metrics dashboard view and its refresh controller.
//!
//! All state transitions funnel through one coroutine: refresh requests,
//! applied responses, and exports. Each refresh carries a monotonically
//! increasing token; a response whose token no longer matches the latest
//! issued one is discarded, so out-of-order completions can never overwrite
//! newer data. The busy flag is set when a request is issued and cleared on
//! every applied exit path.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedSender;
use futures_util::StreamExt;
use tracing::{info, warn};

use api::filters::Granularity;
use api::series::ResponseKind;
use api::{MetricsClient, MetricsResponse, RefreshError};

use crate::components::{Notice, NoticeBanner};
use crate::core::platform;
use crate::dashboard::{
    export_chart_png, export_document, DashboardData, DocumentKind, FilterForm, FilterOptions,
    Metric, MetricChart,
};

/// Backend origin. Overridable at compile time; the web build defaults to
/// same-origin relative URLs, native builds to a local backend.
fn api_base() -> String {
    if let Some(base) = option_env!("MARQUEE_API_BASE") {
        return base.to_string();
    }
    if cfg!(target_arch = "wasm32") {
        String::new()
    } else {
        "http://localhost:5000".to_string()
    }
}

enum DashboardEvent {
    Refresh,
    ClearFilters,
    Loaded {
        token: u64,
        outcome: Result<MetricsResponse, RefreshError>,
    },
    ExportChart(Metric),
    ExportDocument(DocumentKind),
}

#[component]
pub fn Dashboard() -> Element {
    let form = use_signal(FilterForm::default_window);
    let data = use_signal(DashboardData::default);
    let notice: Signal<Option<Notice>> = use_signal(|| None);
    let busy = use_signal(|| false);
    let options = use_signal(FilterOptions::default);

    let sender_slot: Rc<RefCell<Option<UnboundedSender<DashboardEvent>>>> =
        Rc::new(RefCell::new(None));
    let sender_slot_for_loop = sender_slot.clone();

    let coroutine = use_coroutine(move |mut rx: UnboundedReceiver<DashboardEvent>| {
        let sender_slot = sender_slot_for_loop.clone();
        let client = MetricsClient::new(api_base());
        let mut form = form;
        let mut data = data;
        let mut notice = notice;
        let mut busy = busy;
        // Token of the most recently issued request; only a matching
        // `Loaded` may touch the dashboard.
        let mut latest: u64 = 0;

        async move {
            while let Some(event) = rx.next().await {
                match event {
                    DashboardEvent::Refresh => {
                        let criteria = match form.peek().criteria() {
                            Ok(criteria) => criteria,
                            Err(err) => {
                                notice.set(Some(Notice::error(err.to_string())));
                                continue;
                            }
                        };

                        latest += 1;
                        let token = latest;
                        busy.set(true);
                        notice.set(None);

                        let Some(sender) = sender_slot.borrow().as_ref().cloned() else {
                            busy.set(false);
                            continue;
                        };
                        let request_client = client.clone();
                        platform::spawn_future(async move {
                            let outcome = request_client.fetch_metrics(&criteria).await;
                            let _ = sender.unbounded_send(DashboardEvent::Loaded {
                                token,
                                outcome,
                            });
                        });
                    }

                    DashboardEvent::ClearFilters => {
                        form.with_mut(FilterForm::clear);
                        notice.set(None);
                        // Restoring the default window re-queries it.
                        if let Some(sender) = sender_slot.borrow().as_ref().cloned() {
                            let _ = sender.unbounded_send(DashboardEvent::Refresh);
                        }
                    }

                    DashboardEvent::Loaded { token, outcome } => {
                        if token != latest {
                            info!(token, latest, "discarding stale dashboard response");
                            continue;
                        }
                        match outcome {
                            Ok(response) => match response.classify() {
                                ResponseKind::Business(message) => {
                                    warn!(%message, "backend rejected the dashboard query");
                                    notice.set(Some(Notice::error(message)));
                                }
                                ResponseKind::Empty => {
                                    data.with_mut(DashboardData::clear_summaries);
                                    notice.set(Some(Notice::info(
                                        "No results match the selected filters",
                                    )));
                                }
                                ResponseKind::Data => {
                                    data.set(DashboardData::from_response(&response));
                                    notice.set(Some(Notice::success("Dashboard updated")));
                                }
                            },
                            Err(err) => {
                                warn!(error = %err, "dashboard refresh failed");
                                notice.set(Some(Notice::error(err.to_string())));
                            }
                        }
                        busy.set(false);
                    }

                    DashboardEvent::ExportChart(metric) => {
                        let chart = data.peek().card(metric).chart.clone();
                        let result = export_chart_png(&chart).await;
                        notice.set(Some(match result {
                            Ok(message) => Notice::success(message),
                            Err(message) => Notice::error(message),
                        }));
                    }

                    DashboardEvent::ExportDocument(kind) => {
                        let criteria = match form.peek().criteria() {
                            Ok(criteria) => criteria,
                            Err(err) => {
                                notice.set(Some(Notice::error(err.to_string())));
                                continue;
                            }
                        };
                        let result = export_document(&client, &criteria, kind).await;
                        notice.set(Some(match result {
                            Ok(message) => Notice::success(message),
                            Err(message) => Notice::error(message),
                        }));
                    }
                }
            }
        }
    });

    sender_slot.borrow_mut().replace(coroutine.tx());

    // First paint fetches the default 30-day window.
    use_hook(|| coroutine.send(DashboardEvent::Refresh));

    let current_options = options();
    let is_busy = busy();

    rsx! {
        section { class: "page page-dashboard",
            header { class: "page-dashboard__header",
                h1 { "Metrics dashboard" }
                p { "Revenue, occupancy, ticket usage, and cancellations for the selected period." }
            }

            NoticeBanner { notice }

            FiltersPanel {
                form,
                options: current_options,
                busy: is_busy,
                on_refresh: move |_| coroutine.send(DashboardEvent::Refresh),
                on_clear: move |_| coroutine.send(DashboardEvent::ClearFilters),
                on_export: move |kind| coroutine.send(DashboardEvent::ExportDocument(kind)),
            }

            div { class: "metric-grid",
                for (metric, card) in Metric::ALL.map(|metric| (metric, data().card(metric).clone())) {
                    article { key: "{metric.slug()}", class: "metric-card",
                        div { class: "metric-card__head",
                            h2 { class: "metric-card__title", "{metric.title()}" }
                            button {
                                r#type: "button",
                                class: "button button--ghost metric-card__download",
                                disabled: card.chart.is_empty(),
                                onclick: move |_| {
                                    coroutine.send(DashboardEvent::ExportChart(metric))
                                },
                                "Download PNG"
                            }
                        }
                        MetricChart { series: card.chart.clone() }
                        if let Some(parts) = card.summary.clone() {
                            dl { class: "metric-card__summary",
                                for (label, value) in parts {
                                    div { class: "metric-card__summary-item",
                                        dt { "{label}" }
                                        dd { "{value}" }
                                    }
                                }
                            }
                        } else {
                            p { class: "metric-card__empty", "No data for this period" }
                        }
                    }
                }
            }

            if is_busy {
                div { class: "loading-overlay", role: "status",
                    div { class: "loading-overlay__spinner", aria_hidden: "true" }
                    p { "Loading metrics…" }
                }
            }
        }
    }
}

#[component]
fn FiltersPanel(
    form: Signal<FilterForm>,
    options: FilterOptions,
    busy: bool,
    on_refresh: EventHandler<()>,
    on_clear: EventHandler<()>,
    on_export: EventHandler<DocumentKind>,
) -> Element {
    let mut form = form;
    let current = form();

    rsx! {
        section { class: "filters",
            div { class: "filters__row",
                label { class: "filters__field",
                    span { "Start date" }
                    input {
                        r#type: "date",
                        value: "{current.start_date}",
                        oninput: move |evt| form.with_mut(|f| f.start_date = evt.value()),
                    }
                }
                label { class: "filters__field",
                    span { "End date" }
                    input {
                        r#type: "date",
                        value: "{current.end_date}",
                        oninput: move |evt| form.with_mut(|f| f.end_date = evt.value()),
                    }
                }
                label { class: "filters__field",
                    span { "Group by" }
                    select {
                        value: "{current.granularity.wire_value()}",
                        oninput: move |evt| {
                            if let Some(granularity) = Granularity::from_wire(&evt.value()) {
                                form.with_mut(|f| f.granularity = granularity);
                            }
                        },
                        for granularity in Granularity::ALL {
                            option {
                                key: "{granularity.wire_value()}",
                                value: "{granularity.wire_value()}",
                                "{granularity.label()}"
                            }
                        }
                    }
                }
            }

            div { class: "filters__groups",
                FilterGroup {
                    label: "Cinemas",
                    items: options.cinemas.clone(),
                    selected: current.cinema_ids.clone(),
                    on_toggle: move |id| form.with_mut(|f| {
                        crate::dashboard::toggle_id(&mut f.cinema_ids, id)
                    }),
                }
                FilterGroup {
                    label: "Genres",
                    items: options.genres.clone(),
                    selected: current.genre_ids.clone(),
                    on_toggle: move |id| form.with_mut(|f| {
                        crate::dashboard::toggle_id(&mut f.genre_ids, id)
                    }),
                }
                FilterGroup {
                    label: "Movies",
                    items: options.movies.clone(),
                    selected: current.movie_ids.clone(),
                    on_toggle: move |id| form.with_mut(|f| {
                        crate::dashboard::toggle_id(&mut f.movie_ids, id)
                    }),
                }
                FilterGroup {
                    label: "Showtimes",
                    items: options.showtimes.clone(),
                    selected: current.showtime_ids.clone(),
                    on_toggle: move |id| form.with_mut(|f| {
                        crate::dashboard::toggle_id(&mut f.showtime_ids, id)
                    }),
                }
                FilterGroup {
                    label: "Weekdays",
                    items: options.weekdays.clone(),
                    selected: current.weekday_ids.clone(),
                    on_toggle: move |id| form.with_mut(|f| {
                        crate::dashboard::toggle_id(&mut f.weekday_ids, id)
                    }),
                }
            }

            div { class: "filters__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: busy,
                    onclick: move |_| on_refresh.call(()),
                    "Refresh"
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: busy,
                    onclick: move |_| on_clear.call(()),
                    "Clear filters"
                }
                span { class: "filters__actions-spacer" }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| on_export.call(DocumentKind::Excel),
                    "Export Excel"
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| on_export.call(DocumentKind::Pdf),
                    "Export PDF"
                }
            }
        }
    }
}

/// One checkbox group. An empty item list hides the group entirely.
#[component]
fn FilterGroup(
    label: &'static str,
    items: Vec<(u32, String)>,
    selected: Vec<u32>,
    on_toggle: EventHandler<u32>,
) -> Element {
    if items.is_empty() {
        return rsx! {};
    }

    rsx! {
        fieldset { class: "filters__group",
            legend { "{label}" }
            for (id, name) in items {
                label { key: "{id}", class: "filters__option",
                    input {
                        r#type: "checkbox",
                        checked: selected.contains(&id),
                        onchange: move |_| on_toggle.call(id),
                    }
                    span { "{name}" }
                }
            }
        }
    }
}
