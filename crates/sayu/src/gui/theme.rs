use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub sector: Srgba<f64>,
    pub selected: Srgba<f64>,
    pub preview: Srgba<f64>,
    pub panel: Srgba<f64>,
    pub text: Srgba<f64>,
    pub cursor: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: Srgba::new(0.1, 0.1, 0.12, 1.0),
            sector: Srgba::new(0.2, 0.2, 0.24, 0.85),
            selected: Srgba::new(0.4, 0.4, 0.8, 0.9),
            preview: Srgba::new(0.9, 0.9, 0.9, 0.06),
            panel: Srgba::new(0.15, 0.15, 0.15, 0.9),
            text: Srgba::new(0.95, 0.95, 0.95, 1.0),
            cursor: Srgba::new(1.0, 1.0, 1.0, 0.95),
        }
    }
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::default();
        Self {
            background: Self::lookup_color(context, "theme_base_color", fallback.background, None),
            sector: Self::lookup_color(context, "theme_bg_color", fallback.sector, Some(0.85)),
            selected: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                fallback.selected,
                Some(0.9),
            ),
            preview: Self::lookup_color(context, "theme_fg_color", fallback.preview, Some(0.06)),
            panel: Self::lookup_color(context, "theme_bg_color", fallback.panel, Some(0.95)),
            text: Self::lookup_color(context, "theme_fg_color", fallback.text, None),
            cursor: Self::lookup_color(context, "theme_fg_color", fallback.cursor, Some(0.95)),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.sayu-window, .sayu-drawing-area {
    background: none;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
