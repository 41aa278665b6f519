//! Inline notification banners for refresh and export outcomes.

use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    fn css_modifier(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "notice--success",
            NoticeKind::Info => "notice--info",
            NoticeKind::Error => "notice--error",
        }
    }

    fn glyph(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "✅",
            NoticeKind::Info => "ℹ",
            NoticeKind::Error => "⚠️",
        }
    }
}

#[component]
pub fn NoticeBanner(notice: Signal<Option<Notice>>) -> Element {
    let Some(current) = notice() else {
        return rsx! {};
    };
    let modifier = current.css_modifier();
    let glyph = current.glyph();

    rsx! {
        div { class: "notice {modifier}", role: "status",
            span { class: "notice__glyph", aria_hidden: "true", "{glyph}" }
            span { class: "notice__message", "{current.message}" }
            button {
                r#type: "button",
                class: "notice__dismiss",
                aria_label: "Dismiss notification",
                onclick: move |_| notice.set(None),
                "×"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_tag_the_kind() {
        assert_eq!(Notice::success("ok").kind, NoticeKind::Success);
        assert_eq!(Notice::info("hm").kind, NoticeKind::Info);
        assert_eq!(Notice::error("no").kind, NoticeKind::Error);
        assert_eq!(Notice::error("no").css_modifier(), "notice--error");
    }
}
