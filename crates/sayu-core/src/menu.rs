use crate::error::OptionsError;
use crate::frame::{FrameQueue, VisualUpdate};
use crate::geometry::{MenuGeometry, Point};
use crate::options::{MenuItem, MenuOptions};
use crate::resolver::SectorResolver;

/// What the custom cursor needs from a menu.
pub trait MenuController {
    fn show(&mut self);
    fn hide(&mut self);
    /// `None` clears the selection. Returns the selection now in effect.
    fn select(&mut self, index: Option<usize>) -> Option<usize>;
    fn trigger_select_callback(&mut self);
    fn resolver(&self) -> SectorResolver;
    fn include_outer_bound(&self) -> bool;
}

/// Callbacks for menu visibility and the committed choice.
///
/// The defaults toggle the menu through the frame queue and ignore selections.
pub trait MenuHooks {
    fn on_show(&mut self, frames: &FrameQueue) {
        frames.push(VisualUpdate::MenuVisible(true));
    }

    fn on_hide(&mut self, frames: &FrameQueue) {
        frames.push(VisualUpdate::MenuVisible(false));
    }

    fn on_select(&mut self, _item: Option<&MenuItem>) {}
}

#[derive(Debug, Default)]
pub struct DefaultHooks;

impl MenuHooks for DefaultHooks {}

pub struct Menu {
    options: MenuOptions,
    geometry: MenuGeometry,
    offset_degrees: f64,
    selected: Option<usize>,
    visible: bool,
    frames: FrameQueue,
    hooks: Box<dyn MenuHooks>,
}

impl Menu {
    pub fn new(options: MenuOptions, frames: FrameQueue) -> Result<Self, OptionsError> {
        let options = options.normalize()?;
        let geometry = MenuGeometry::new(options.items.len(), options.inner, options.outer)?;
        let offset_degrees = options.sector_offset.degrees(&options, &geometry);

        Ok(Self {
            options,
            geometry,
            offset_degrees,
            selected: None,
            visible: false,
            frames,
            hooks: Box::new(DefaultHooks),
        })
    }

    pub fn with_hooks(mut self, hooks: impl MenuHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    pub fn options(&self) -> &MenuOptions {
        &self.options
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.options.items
    }

    pub fn geometry(&self) -> &MenuGeometry {
        &self.geometry
    }

    pub fn offset_degrees(&self) -> f64 {
        self.offset_degrees
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.selected.and_then(|i| self.options.items.get(i))
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn frames(&self) -> &FrameQueue {
        &self.frames
    }

    pub fn rotation_degrees(&self, index: usize) -> f64 {
        self.geometry.layout.rotation_degrees(index, self.offset_degrees)
    }

    /// Raw angle of the line bisecting sector `index`.
    pub fn bisector_degrees(&self, index: usize) -> f64 {
        self.geometry
            .layout
            .sector_center_degrees(index, self.offset_degrees)
    }

    /// Selects whatever sector lies under a real pointer.
    pub fn hover(&mut self, point: Point, center: Point) -> Option<usize> {
        let index = self
            .resolver()
            .resolve(point, center, self.include_outer_bound());
        self.select(index)
    }

    fn panel_content(&self) -> String {
        self.selected_item()
            .map(|item| item.content.clone())
            .unwrap_or_default()
    }
}

impl MenuController for Menu {
    fn show(&mut self) {
        self.hooks.on_show(&self.frames);
        self.visible = true;
    }

    fn hide(&mut self) {
        self.hooks.on_hide(&self.frames);
        self.visible = false;
    }

    fn select(&mut self, index: Option<usize>) -> Option<usize> {
        let index = index.map(|i| i % self.options.items.len());
        if index == self.selected {
            return self.selected;
        }

        if let Some(prev) = self.selected {
            self.frames.push(VisualUpdate::Highlight {
                index: prev,
                active: false,
            });
        }

        self.selected = index;

        if let Some(index) = index {
            self.frames
                .push(VisualUpdate::Highlight { index, active: true });
        }
        self.frames
            .push(VisualUpdate::PanelContent(self.panel_content()));

        self.selected
    }

    fn trigger_select_callback(&mut self) {
        let item = self.selected.and_then(|i| self.options.items.get(i));
        self.hooks.on_select(item);
    }

    fn resolver(&self) -> SectorResolver {
        SectorResolver {
            bounds: self.options.bounds(),
            layout: self.geometry.layout,
            offset_degrees: self.offset_degrees,
        }
    }

    fn include_outer_bound(&self) -> bool {
        self.options.include_outer_bound()
    }
}
