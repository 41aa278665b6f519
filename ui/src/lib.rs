//! Shared UI crate for Marquee. Cross-platform views and dashboard logic live here.

pub mod core;
pub mod dashboard;
pub mod views;

pub mod components {
    // Application navbar with brand, nav links, and the theme toggle.
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;

    // Hero banner carousel for the landing view.
    pub mod carousel;
    pub use carousel::{CarouselEngine, HeroCarousel, HeroSlide};

    // Inline notification banners (success / info / error).
    pub mod notification;
    pub use notification::{Notice, NoticeKind, NoticeBanner};
}
