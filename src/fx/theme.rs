pub const THEME_KEY: &str = "theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Reads whatever the root attribute currently says. Anything that is
    /// not `dark` counts as light, so a page without the attribute flips to
    /// dark on the first click.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Font Awesome classes for the toggle's `<i>`: the icon shows the theme
    /// a click would switch to.
    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Light => "fas fa-moon",
            Self::Dark => "fas fa-sun",
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }
}

/// Theme to apply at startup. A non-empty stored preference wins; otherwise a dark OS
/// preference selects dark. `None` leaves the authored markup alone.
pub fn initial_theme(stored: Option<&str>, system_prefers_dark: bool) -> Option<Theme> {
    if let Some(value) = stored.filter(|value| !value.is_empty()) {
        return Theme::from_str(value).or(Some(Theme::Light));
    }

    system_prefers_dark.then_some(Theme::Dark)
}

/// Storage-agnostic preference store so the toggle logic can be driven
/// without a browser.
pub trait PreferenceStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, value: &str);
}

/// Flips `current`, persists the result and returns it.
pub fn toggle_and_persist(current: Theme, store: &mut impl PreferenceStore) -> Theme {
    let next = current.toggled();
    store.save(next.as_str());
    next
}
