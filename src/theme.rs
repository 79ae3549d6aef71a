use ratatui::style::{Color, Modifier, Style};

use crate::store::KeyValueStore;

/// Store key holding `"dark"` or `"light"`.
pub const THEME_STORE_KEY: &str = "theme";

/// Two-tone palette applied across every view. Light unless the store says
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
    pub dark: bool,
}

impl Theme {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let dark = matches!(store.get(THEME_STORE_KEY), Ok(Some(v)) if v == "dark");
        Self { dark }
    }

    pub fn persist(self, store: &dyn KeyValueStore) {
        let value = if self.dark { "dark" } else { "light" };
        if let Err(err) = store.set(THEME_STORE_KEY, value) {
            tracing::warn!("could not persist theme: {err}");
        }
    }

    pub fn toggled(self) -> Self {
        Self { dark: !self.dark }
    }

    pub fn fg(self) -> Color {
        if self.dark { Color::White } else { Color::Black }
    }

    pub fn bg(self) -> Color {
        if self.dark { Color::Black } else { Color::White }
    }

    pub fn base(self) -> Style {
        Style::default().fg(self.fg()).bg(self.bg())
    }

    /// Secondary text: dates, previews, hints.
    pub fn accent(self) -> Style {
        let color = if self.dark {
            Color::Gray
        } else {
            Color::DarkGray
        };
        Style::default().fg(color).bg(self.bg())
    }

    pub fn border(self) -> Style {
        Style::default().fg(self.fg()).bg(self.bg())
    }

    /// Selected rows invert the palette, the terminal take on hover.
    pub fn highlight(self) -> Style {
        Style::default()
            .fg(self.bg())
            .bg(self.fg())
            .add_modifier(Modifier::BOLD)
    }
}
