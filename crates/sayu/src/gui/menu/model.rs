use crate::events::AppEvent;
use async_channel::Sender;
use sayu_core::{
    CustomCursor, CustomCursorOptions, FrameQueue, Menu, MenuController, MenuHooks, MenuItem,
    Point, PointerEvent, PointerLock, Size, TriggerKey, VisualUpdate,
};

/// A pointer lock that also reports its own events back to the session.
pub trait LockBackend: PointerLock {
    fn motion(&mut self, point: Point) -> Option<PointerEvent>;
    fn take_events(&mut self) -> Vec<PointerEvent>;
}

/// Forwards committed choices to the app.
#[derive(Clone)]
pub struct CommitHooks {
    tx: Sender<AppEvent>,
}

impl CommitHooks {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl MenuHooks for CommitHooks {
    fn on_select(&mut self, item: Option<&MenuItem>) {
        if let Err(e) = self.tx.try_send(AppEvent::Committed(item.cloned())) {
            log::error!("Failed to report selection: {}", e);
        }
    }
}

/// What is currently on screen, updated once per frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub menu_visible: bool,
    pub cursor_visible: bool,
    pub cursor: Point,
    pub highlighted: Option<usize>,
    pub panel: String,
    pub last_committed: Option<String>,
}

impl ViewState {
    pub fn apply(&mut self, update: VisualUpdate) {
        match update {
            VisualUpdate::CursorTransform(p) => self.cursor = p,
            VisualUpdate::CursorVisible(v) => self.cursor_visible = v,
            VisualUpdate::Highlight { index, active } => {
                if active {
                    self.highlighted = Some(index);
                } else if self.highlighted == Some(index) {
                    self.highlighted = None;
                }
            }
            VisualUpdate::PanelContent(content) => self.panel = content,
            VisualUpdate::MenuVisible(v) => self.menu_visible = v,
        }
    }
}

pub struct Session<P: LockBackend> {
    menu: Menu,
    cursor: Option<CustomCursor<P>>,
    pub view: ViewState,
    frames: FrameQueue,
    canvas: Size,
}

impl<P: LockBackend> Session<P> {
    pub fn new(menu: Menu, backend: P, canvas: Size) -> Self {
        let frames = menu.frames().clone();
        let cursor = CustomCursor::setup(
            backend,
            canvas,
            CustomCursorOptions::from(menu.options()),
            frames.clone(),
        );

        Self {
            menu,
            cursor: Some(cursor),
            view: ViewState::default(),
            frames,
            canvas,
        }
    }

    pub fn frames(&self) -> &FrameQueue {
        &self.frames
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn center(&self) -> Point {
        self.canvas.center()
    }

    fn uses_custom_cursor(&self) -> bool {
        self.menu.options().use_custom_cursor
    }

    pub fn key_pressed(&mut self, key: TriggerKey) {
        if self.uses_custom_cursor() {
            self.dispatch(PointerEvent::KeyPressed(key));
        } else if key == self.menu.options().trigger_key && !self.menu.is_visible() {
            self.menu.show();
        }
    }

    pub fn key_released(&mut self, key: TriggerKey) {
        if self.uses_custom_cursor() {
            self.dispatch(PointerEvent::KeyReleased(key));
        } else if key == self.menu.options().trigger_key && self.menu.is_visible() {
            self.menu.trigger_select_callback();
            self.menu.hide();
            self.menu.select(None);
        }
    }

    pub fn motion(&mut self, point: Point) {
        let relative = self
            .cursor
            .as_mut()
            .filter(|c| c.platform().is_locked())
            .map(|c| c.platform_mut().motion(point));

        match relative {
            Some(Some(event)) => self.dispatch(event),
            Some(None) => {}
            None if self.menu.is_visible() => {
                self.menu.hover(point, self.canvas.center());
            }
            None => {}
        }
    }

    /// The real pointer left the canvas.
    pub fn leave(&mut self) {
        let locked = self
            .cursor
            .as_ref()
            .is_some_and(|c| c.platform().is_locked());
        if !locked && self.menu.is_visible() {
            self.menu.select(None);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.canvas = Size::new(width, height);
        self.dispatch(PointerEvent::Resize { width, height });
    }

    /// Swaps in a new menu. It should share this session's frame queue.
    pub fn reload(&mut self, menu: Menu) {
        if let Some(cursor) = self.cursor.take() {
            let mut backend = cursor.release(&mut self.menu);
            // the old cursor already handled its own unlock
            backend.take_events();
            self.cursor = Some(CustomCursor::setup(
                backend,
                self.canvas,
                CustomCursorOptions::from(menu.options()),
                self.frames.clone(),
            ));
        }
        if self.menu.is_visible() {
            self.menu.hide();
        }
        self.menu.select(None);

        self.menu = menu;
    }

    pub fn committed(&mut self, item: Option<MenuItem>) {
        match &item {
            Some(item) => log::info!("Selected '{}'", item.title),
            None => log::info!("Menu closed without a selection"),
        }
        self.view.last_committed = item.map(|i| i.title);
    }

    /// Applies every visual update queued since the last frame.
    pub fn apply_frame(&mut self) {
        for update in self.frames.drain() {
            self.view.apply(update);
        }
    }

    fn dispatch(&mut self, event: PointerEvent) {
        let Some(cursor) = self.cursor.as_mut() else {
            return;
        };
        cursor.handle_event(event, &mut self.menu);

        loop {
            let events = cursor.platform_mut().take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                cursor.handle_event(event, &mut self.menu);
            }
        }
    }
}
