//! Theme preference persistence.
//!
//! A single binary flag, read back on every launch: `localStorage["theme"]`
//! on the web, a small file under the project data directory on desktop.
//! Failures to persist are ignored; the in-memory state still flips.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Dark => "dark-theme",
            Theme::Light => "light-theme",
        }
    }

    /// Icon glyph for the navbar toggle button.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Dark => "☀",
            Theme::Light => "☾",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

/// Stored preference, or the dark default when nothing usable is persisted.
pub fn load_theme() -> Theme {
    read_preference()
        .as_deref()
        .and_then(Theme::parse)
        .unwrap_or_default()
}

pub fn store_theme(theme: Theme) {
    write_preference(theme.as_str());
}

#[cfg(target_arch = "wasm32")]
fn read_preference() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item("theme").ok()?
}

#[cfg(target_arch = "wasm32")]
fn write_preference(value: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item("theme", value);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_preference() -> Option<String> {
    std::fs::read_to_string(preference_path()?).ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn write_preference(value: &str) {
    let Some(path) = preference_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = std::fs::write(path, value);
}

#[cfg(not(target_arch = "wasm32"))]
fn preference_path() -> Option<std::path::PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "Marquee", "Marquee")?;
    Some(dirs.data_dir().join("settings").join("theme"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_flips_both_ways() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn parse_round_trips_and_rejects_noise() {
        assert_eq!(Theme::parse(Theme::Dark.as_str()), Some(Theme::Dark));
        assert_eq!(Theme::parse(" light\n"), Some(Theme::Light));
        assert_eq!(Theme::parse("solarized"), None);
        assert_eq!(Theme::parse(""), None);
    }
}
