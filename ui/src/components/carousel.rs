//! Hero banner carousel.
//!
//! The engine is a plain value: slide index, pause flag, and a generation
//! counter. Every queued auto-advance tick carries the generation it was
//! scheduled under; manual navigation and resume bump the generation, so a
//! stale tick that fires later is ignored instead of skipping a slide early.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedSender;
use futures_util::StreamExt;

use crate::core::{platform, timing};

const AUTO_ADVANCE_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq)]
pub struct HeroSlide {
    pub title: String,
    pub subtitle: String,
    /// CSS modifier selecting the banner artwork/gradient.
    pub art_class: String,
    pub trailer_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselEngine {
    pub index: usize,
    pub len: usize,
    pub generation: u64,
    pub paused: bool,
}

impl CarouselEngine {
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len,
            generation: 0,
            paused: false,
        }
    }

    /// Manual forward navigation; restarts the auto-advance window.
    pub fn next(&mut self) {
        self.step(1);
        self.generation += 1;
    }

    /// Manual backward navigation; restarts the auto-advance window.
    pub fn prev(&mut self) {
        self.step(-1);
        self.generation += 1;
    }

    /// Jump straight to a slide. Out-of-range indices are ignored.
    pub fn jump(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
            self.generation += 1;
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
        self.generation += 1;
    }

    pub fn resume(&mut self) {
        self.paused = false;
        self.generation += 1;
    }

    /// Auto-advance attempt. Returns whether the tick was applied; ticks
    /// scheduled under an older generation or while paused are dropped.
    pub fn tick(&mut self, generation: u64) -> bool {
        if self.paused || generation != self.generation || self.len == 0 {
            return false;
        }
        self.step(1);
        true
    }

    fn step(&mut self, delta: isize) {
        if self.len == 0 {
            return;
        }
        let len = self.len as isize;
        let next = (self.index as isize + delta).rem_euclid(len);
        self.index = next as usize;
    }
}

#[derive(Debug, Clone)]
enum CarouselEvent {
    Next,
    Prev,
    Jump(usize),
    Pause,
    Resume,
    Tick { generation: u64 },
}

#[component]
pub fn HeroCarousel(slides: Vec<HeroSlide>) -> Element {
    let slide_count = slides.len();
    let engine = use_signal(|| CarouselEngine::new(slide_count));

    let sender_slot: Rc<RefCell<Option<UnboundedSender<CarouselEvent>>>> =
        Rc::new(RefCell::new(None));
    let sender_slot_for_loop = sender_slot.clone();

    let coroutine = use_coroutine(move |mut rx: UnboundedReceiver<CarouselEvent>| {
        let sender_slot = sender_slot_for_loop.clone();
        let mut engine_signal = engine;

        async move {
            // Arm the first auto-advance window.
            let initial_generation = engine_signal.peek().generation;
            queue_tick(&sender_slot, initial_generation);

            while let Some(event) = rx.next().await {
                let requeue = engine_signal.with_mut(|eng| match event {
                    CarouselEvent::Next => {
                        eng.next();
                        true
                    }
                    CarouselEvent::Prev => {
                        eng.prev();
                        true
                    }
                    CarouselEvent::Jump(index) => {
                        eng.jump(index);
                        true
                    }
                    CarouselEvent::Pause => {
                        eng.pause();
                        false
                    }
                    CarouselEvent::Resume => {
                        eng.resume();
                        true
                    }
                    CarouselEvent::Tick { generation } => eng.tick(generation),
                });

                if requeue {
                    let generation = engine_signal.peek().generation;
                    queue_tick(&sender_slot, generation);
                }
            }
        }
    });

    sender_slot.borrow_mut().replace(coroutine.tx());

    if slide_count == 0 {
        return rsx! {
            section { class: "hero-banner hero-banner--empty",
                p { "Featured titles will appear here soon." }
            }
        };
    }

    let current = engine().index;
    let rendered_slides: Vec<(usize, String, HeroSlide)> = slides
        .iter()
        .enumerate()
        .map(|(idx, slide)| {
            let active = if idx == current {
                " banner-slide--active"
            } else {
                ""
            };
            let class = format!("banner-slide{} {}", active, slide.art_class);
            (idx, class, slide.clone())
        })
        .collect();
    let indicators: Vec<(usize, String, &'static str)> = (0..slide_count)
        .map(|idx| {
            let label = format!("Go to slide {}", idx + 1);
            let class = if idx == current {
                "banner-indicator banner-indicator--active"
            } else {
                "banner-indicator"
            };
            (idx, label, class)
        })
        .collect();

    rsx! {
        section {
            class: "hero-banner",
            onmouseenter: move |_| coroutine.send(CarouselEvent::Pause),
            onmouseleave: move |_| coroutine.send(CarouselEvent::Resume),

            for (idx, class, slide) in rendered_slides {
                div {
                    key: "{idx}",
                    class: "{class}",
                    div { class: "banner-slide__copy",
                        h2 { "{slide.title}" }
                        p { "{slide.subtitle}" }
                        if let Some(url) = slide.trailer_url {
                            button {
                                r#type: "button",
                                class: "button button--accent trailer-btn",
                                onclick: move |_| open_external(&url),
                                "Watch trailer"
                            }
                        }
                    }
                }
            }

            button {
                r#type: "button",
                class: "hero-banner__nav hero-banner__nav--prev",
                aria_label: "Previous slide",
                onclick: move |_| coroutine.send(CarouselEvent::Prev),
                "‹"
            }
            button {
                r#type: "button",
                class: "hero-banner__nav hero-banner__nav--next",
                aria_label: "Next slide",
                onclick: move |_| coroutine.send(CarouselEvent::Next),
                "›"
            }

            div { class: "hero-banner__indicators",
                for (idx, label, class) in indicators {
                    button {
                        key: "{idx}",
                        r#type: "button",
                        class: "{class}",
                        aria_label: "{label}",
                        onclick: move |_| coroutine.send(CarouselEvent::Jump(idx)),
                    }
                }
            }
        }
    }
}

fn queue_tick(
    sender_slot: &Rc<RefCell<Option<UnboundedSender<CarouselEvent>>>>,
    generation: u64,
) {
    if let Some(sender) = sender_slot.borrow().as_ref().cloned() {
        platform::spawn_future(async move {
            timing::sleep_ms(AUTO_ADVANCE_MS).await;
            let _ = sender.unbounded_send(CarouselEvent::Tick { generation });
        });
    }
}

fn open_external(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.open_with_url_and_target(url, "_blank");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::info!(%url, "trailer link activated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_wraps_both_directions() {
        let mut eng = CarouselEngine::new(3);
        eng.prev();
        assert_eq!(eng.index, 2);
        eng.next();
        assert_eq!(eng.index, 0);
        eng.jump(1);
        assert_eq!(eng.index, 1);
        // Out-of-range jump is a no-op.
        eng.jump(9);
        assert_eq!(eng.index, 1);
    }

    #[test]
    fn stale_ticks_are_dropped_after_manual_navigation() {
        let mut eng = CarouselEngine::new(3);
        let armed = eng.generation;
        eng.next();
        assert!(!eng.tick(armed), "tick from before manual nav must be stale");
        assert_eq!(eng.index, 1);
        assert!(eng.tick(eng.generation));
        assert_eq!(eng.index, 2);
    }

    #[test]
    fn paused_engine_ignores_ticks_until_resume() {
        let mut eng = CarouselEngine::new(2);
        eng.pause();
        assert!(!eng.tick(eng.generation));
        assert_eq!(eng.index, 0);
        eng.resume();
        assert!(eng.tick(eng.generation));
        assert_eq!(eng.index, 1);
    }

    #[test]
    fn auto_ticks_keep_their_generation() {
        let mut eng = CarouselEngine::new(4);
        let generation = eng.generation;
        assert!(eng.tick(generation));
        // An applied tick does not invalidate the next scheduled one.
        assert!(eng.tick(generation));
        assert_eq!(eng.index, 2);
    }

    #[test]
    fn empty_carousel_never_advances() {
        let mut eng = CarouselEngine::new(0);
        assert!(!eng.tick(eng.generation));
        eng.next();
        assert_eq!(eng.index, 0);
    }
}
