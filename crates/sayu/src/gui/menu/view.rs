use super::model::{LockBackend, Session, ViewState};
use super::{CURSOR_RADIUS, HINT_FONT_SIZE, PANEL_FONT_SIZE, TITLE_FONT_SIZE};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use sayu_core::geometry::{PathCommand, WedgePath};
use sayu_core::{Menu, Point};
use std::f64::consts::{PI, TAU};
use std::path::Path;

const SNAPSHOT_PADDING: f64 = 40.0;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn angle_from_center(p: Point) -> f64 {
    (p.y - 0.5).atan2(p.x - 0.5)
}

/// Replays a unit-square wedge path; all arcs are centered on (0.5, 0.5).
fn trace(cr: &Context, path: &WedgePath) {
    let mut current = Point::default();
    for cmd in path.commands() {
        match *cmd {
            PathCommand::MoveTo(p) => {
                cr.move_to(p.x, p.y);
                current = p;
            }
            PathCommand::LineTo(p) => {
                cr.line_to(p.x, p.y);
                current = p;
            }
            PathCommand::ArcTo {
                radius,
                large_arc,
                sweep,
                to,
            } => {
                let start = angle_from_center(current);
                let mut end = angle_from_center(to);
                // a single sector closes on its own start point
                if large_arc && (end - start).abs() < 1e-9 {
                    end += if sweep { TAU } else { -TAU };
                }
                if sweep {
                    cr.arc(0.5, 0.5, radius, start, end);
                } else {
                    cr.arc_negative(0.5, 0.5, radius, start, end);
                }
                current = to;
            }
            PathCommand::Close => cr.close_path(),
        }
    }
}

fn trace_wedge(
    cr: &Context,
    path: &WedgePath,
    center: Point,
    diameter: f64,
    rotation_degrees: f64,
) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.translate(center.x, center.y);
    cr.rotate(rotation_degrees.to_radians());
    cr.scale(diameter, diameter);
    cr.translate(-0.5, -0.5);
    trace(cr, path);
    cr.restore()
}

fn draw_centered_text(
    cr: &Context,
    text: &str,
    at: Point,
    size: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    if text.is_empty() {
        return Ok(());
    }
    set_color(cr, color);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(size);
    if let Ok(ext) = cr.text_extents(text) {
        cr.move_to(
            at.x - ext.width() / 2.0 - ext.x_bearing(),
            at.y + ext.height() / 2.0,
        );
        cr.show_text(text)?;
    }
    Ok(())
}

fn draw_preview_ring(
    cr: &Context,
    menu: &Menu,
    view: &ViewState,
    center: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let options = menu.options();
    for i in 0..menu.items().len() {
        trace_wedge(
            cr,
            &menu.geometry().preview_path,
            center,
            options.scaled,
            menu.rotation_degrees(i),
        )?;
        let color = if view.highlighted == Some(i) {
            Srgba::new(
                colors.selected.red,
                colors.selected.green,
                colors.selected.blue,
                colors.preview.alpha * 2.0,
            )
        } else {
            colors.preview
        };
        set_color(cr, color);
        cr.fill()?;
    }
    Ok(())
}

fn draw_sectors(
    cr: &Context,
    menu: &Menu,
    view: &ViewState,
    center: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let options = menu.options();
    let title_radius = (options.inner + options.outer) / 4.0;

    for (i, item) in menu.items().iter().enumerate() {
        trace_wedge(
            cr,
            &menu.geometry().sector_path,
            center,
            options.outer,
            menu.rotation_degrees(i),
        )?;
        set_color(
            cr,
            if view.highlighted == Some(i) {
                colors.selected
            } else {
                colors.sector
            },
        );
        cr.fill_preserve()?;
        set_color(cr, colors.background);
        cr.set_line_width(options.gap / 2.0);
        cr.stroke()?;

        let angle = menu.bisector_degrees(i).to_radians();
        let at = Point::new(
            center.x + title_radius * angle.cos(),
            center.y + title_radius * angle.sin(),
        );
        draw_centered_text(cr, &item.title, at, TITLE_FONT_SIZE, colors.text)?;
    }
    Ok(())
}

fn draw_panel(
    cr: &Context,
    menu: &Menu,
    view: &ViewState,
    center: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let options = menu.options();
    let radius = ((options.inner - options.gap) / 2.0).max(0.0);
    set_color(cr, colors.panel);
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    cr.fill()?;
    draw_centered_text(cr, &view.panel, center, PANEL_FONT_SIZE, colors.text)
}

fn draw_hint(
    cr: &Context,
    menu: &Menu,
    view: &ViewState,
    center: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let hint = format!("Hold {} to open the menu", menu.options().trigger_key);
    draw_centered_text(cr, &hint, center, HINT_FONT_SIZE, colors.text)?;
    if let Some(title) = &view.last_committed {
        let below = Point::new(center.x, center.y + 2.0 * HINT_FONT_SIZE);
        draw_centered_text(
            cr,
            &format!("Last choice: {title}"),
            below,
            HINT_FONT_SIZE,
            colors.text,
        )?;
    }
    Ok(())
}

pub fn render(
    cr: &Context,
    menu: &Menu,
    view: &ViewState,
    center: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.background);
    cr.paint()?;

    if !view.menu_visible {
        return draw_hint(cr, menu, view, center, colors);
    }

    if menu.options().sector_scaled {
        draw_preview_ring(cr, menu, view, center, colors)?;
    }
    draw_sectors(cr, menu, view, center, colors)?;
    draw_panel(cr, menu, view, center, colors)?;

    if view.cursor_visible {
        set_color(cr, colors.cursor);
        cr.arc(view.cursor.x, view.cursor.y, CURSOR_RADIUS, 0.0, 2.0 * PI);
        cr.fill()?;
    }
    Ok(())
}

pub fn draw<P: LockBackend>(
    cr: &Context,
    session: &Session<P>,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    render(cr, session.menu(), &session.view, session.center(), colors)
}

/// SVG `<defs>` holding both wedge templates as bounding-box clip paths,
/// followed by the rotation each sector applies to them.
pub fn clip_path_defs(menu: &Menu) -> String {
    let options = menu.options();
    let geometry = menu.geometry();
    let mut out = String::from("<svg width=\"0\" height=\"0\">\n  <defs>\n");
    for (id, path) in [
        (&options.sector_template_id, &geometry.sector_path),
        (&options.sector_scaled_template_id, &geometry.preview_path),
    ] {
        out.push_str(&format!(
            "    <clipPath clipPathUnits=\"objectBoundingBox\" id=\"{id}\">\n      <path fill=\"none\" d=\"{path}\"/>\n    </clipPath>\n"
        ));
    }
    out.push_str("  </defs>\n</svg>\n");
    for (i, item) in menu.items().iter().enumerate() {
        out.push_str(&format!(
            "<!-- {i} {}: rotate({}deg) -->\n",
            item.title,
            menu.rotation_degrees(i)
        ));
    }
    out
}

/// Renders the open menu with `highlighted` selected into a PNG file.
pub fn snapshot(menu: &Menu, highlighted: Option<usize>, path: &Path) -> anyhow::Result<()> {
    let size = (menu.options().outer + 2.0 * SNAPSHOT_PADDING).ceil();
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, size as i32, size as i32)?;

    {
        let cr = Context::new(&surface)?;
        let view = ViewState {
            menu_visible: true,
            highlighted,
            panel: highlighted
                .and_then(|i| menu.items().get(i))
                .map(|item| item.content.clone())
                .unwrap_or_default(),
            ..ViewState::default()
        };
        let center = Point::new(size / 2.0, size / 2.0);
        render(&cr, menu, &view, center, &ThemeColors::default())?;
    }

    let mut file = fs_err::File::create(path)?;
    surface.write_to_png(&mut file)?;
    Ok(())
}
