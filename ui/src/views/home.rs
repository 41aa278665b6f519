use dioxus::prelude::*;

use crate::components::{HeroCarousel, HeroSlide};

fn featured_slides() -> Vec<HeroSlide> {
    vec![
        HeroSlide {
            title: "Now showing".to_string(),
            subtitle: "This week's premieres across every screen".to_string(),
            art_class: "banner-slide--premiere".to_string(),
            trailer_url: None,
        },
        HeroSlide {
            title: "Midnight marathon".to_string(),
            subtitle: "Back-to-back classics, every Saturday".to_string(),
            art_class: "banner-slide--marathon".to_string(),
            trailer_url: None,
        },
        HeroSlide {
            title: "Family matinee".to_string(),
            subtitle: "Discounted morning sessions for the whole crew".to_string(),
            art_class: "banner-slide--matinee".to_string(),
            trailer_url: None,
        },
    ]
}

#[component]
pub fn Home() -> Element {
    rsx! {
        section { class: "page page-home",
            HeroCarousel { slides: featured_slides() }

            div { class: "page-home__intro",
                h1 { "Marquee" }
                p { "The admin panel for cinema operations: bookings, screens, and the numbers behind them." }
            }

            ul { class: "page-home__features",
                li { class: "movie-card",
                    h3 { "Revenue at a glance" }
                    p { "Daily, weekly, or monthly income with ticket volumes." }
                }
                li { class: "movie-card",
                    h3 { "Occupancy" }
                    p { "How full every screening really was." }
                }
                li { class: "movie-card",
                    h3 { "Ticket usage" }
                    p { "Sold versus scanned, period by period." }
                }
                li { class: "movie-card",
                    h3 { "Cancellations" }
                    p { "Spot refund spikes before they become a trend." }
                }
            }
        }
    }
}
