use egui::{Color32, Visuals};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color32,
    pub foreground: Color32,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            background: Color32::WHITE,
            foreground: Color32::BLACK,
        },
        Theme::Dark => Palette {
            background: Color32::from_rgb(0x2e, 0x2e, 0x2e),
            foreground: Color32::WHITE,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Window,
    Panel,
    Button,
    Label,
    Slider,
    TextField,
}

impl Element {
    pub const ALL: [Element; 6] = [
        Element::Window,
        Element::Panel,
        Element::Button,
        Element::Label,
        Element::Slider,
        Element::TextField,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which palette colors an element accepts.
pub struct Capabilities {
    pub background: bool,
    pub foreground: bool,
}

pub const fn capabilities(element: Element) -> Capabilities {
    match element {
        Element::Window | Element::Panel | Element::Slider => Capabilities {
            background: true,
            foreground: false,
        },
        Element::Label => Capabilities {
            background: false,
            foreground: true,
        },
        Element::Button | Element::TextField => Capabilities {
            background: true,
            foreground: true,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementStyle {
    pub background: Option<Color32>,
    pub foreground: Option<Color32>,
}

/// Palette colors restricted to what `element` supports.
pub fn style_for(theme: Theme, element: Element) -> ElementStyle {
    let p = palette(theme);
    let caps = capabilities(element);
    ElementStyle {
        background: caps.background.then_some(p.background),
        foreground: caps.foreground.then_some(p.foreground),
    }
}

/// Full egui visuals for `theme`, built from the per-element styles.
pub fn visuals(theme: Theme) -> Visuals {
    let mut v = match theme {
        Theme::Light => Visuals::light(),
        Theme::Dark => Visuals::dark(),
    };

    for element in Element::ALL {
        let style = style_for(theme, element);
        match element {
            Element::Window => {
                if let Some(bg) = style.background {
                    v.window_fill = bg;
                }
            }
            Element::Panel => {
                if let Some(bg) = style.background {
                    v.panel_fill = bg;
                }
            }
            Element::Button => {
                if let Some(bg) = style.background {
                    v.widgets.inactive.weak_bg_fill = bg;
                }
                if let Some(fg) = style.foreground {
                    v.widgets.inactive.fg_stroke.color = fg;
                }
            }
            Element::Label => {
                v.override_text_color = style.foreground;
            }
            Element::Slider => {
                if let Some(bg) = style.background {
                    v.widgets.inactive.bg_fill = bg;
                }
            }
            Element::TextField => {
                if let Some(bg) = style.background {
                    v.extreme_bg_color = bg;
                }
            }
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use egui::Color32;

    use super::*;

    #[test]
    fn toggle_flips_between_themes() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn dark_palette_uses_charcoal_and_white() {
        let p = palette(Theme::Dark);
        assert_eq!(p.background, Color32::from_rgb(0x2e, 0x2e, 0x2e));
        assert_eq!(p.foreground, Color32::WHITE);
    }

    #[test]
    fn style_only_includes_supported_colors() {
        let label = style_for(Theme::Dark, Element::Label);
        assert_eq!(label.background, None);
        assert_eq!(label.foreground, Some(Color32::WHITE));

        let panel = style_for(Theme::Light, Element::Panel);
        assert_eq!(panel.background, Some(Color32::WHITE));
        assert_eq!(panel.foreground, None);
    }

    #[test]
    fn visuals_apply_palette() {
        let v = visuals(Theme::Dark);
        assert!(v.dark_mode);
        assert_eq!(v.panel_fill, Color32::from_rgb(0x2e, 0x2e, 0x2e));
        assert_eq!(v.override_text_color, Some(Color32::WHITE));

        let l = visuals(Theme::Light);
        assert!(!l.dark_mode);
        assert_eq!(l.window_fill, Color32::WHITE);
    }

    #[test]
    fn theme_serializes_lowercase() {
        #[derive(serde::Serialize)]
        struct Wrapper {
            theme: Theme,
        }
        let s = toml::to_string(&Wrapper { theme: Theme::Dark }).unwrap();
        assert_eq!(s.trim(), "theme = \"dark\"");
    }
}
