use crate::gui::menu::model::LockBackend;
use gtk::prelude::*;
use gtk4 as gtk;
use sayu_core::{LockError, Point, PointerEvent, PointerLock};

/// Pointer lock for GTK4, which has no native one.
///
/// While locked the system cursor is hidden over the widget and relative
/// motion is derived from successive absolute positions. Lock changes are
/// queued and must be fed back through [`LockBackend::take_events`].
pub struct GtkPointerLock {
    widget: gtk::Widget,
    locked: bool,
    last: Option<Point>,
    pending: Vec<PointerEvent>,
}

impl GtkPointerLock {
    pub fn new(widget: &impl IsA<gtk::Widget>) -> Self {
        Self {
            widget: widget.as_ref().clone(),
            locked: false,
            last: None,
            pending: Vec::new(),
        }
    }
}

impl LockBackend for GtkPointerLock {
    /// Turns an absolute pointer position into a relative sample while locked.
    fn motion(&mut self, point: Point) -> Option<PointerEvent> {
        if !self.locked {
            return None;
        }
        let event = self.last.map(|last| PointerEvent::RelativeMotion {
            dx: point.x - last.x,
            dy: point.y - last.y,
        });
        self.last = Some(point);
        event
    }

    fn take_events(&mut self) -> Vec<PointerEvent> {
        std::mem::take(&mut self.pending)
    }
}

impl PointerLock for GtkPointerLock {
    fn request_lock(&mut self) {
        if !self.widget.is_mapped() {
            self.pending.push(PointerEvent::LockError(LockError::Rejected(
                "target widget is not mapped".to_string(),
            )));
            return;
        }

        self.widget.set_cursor_from_name(Some("none"));
        self.locked = true;
        self.last = None;
        self.pending.push(PointerEvent::LockChange);
    }

    fn release_lock(&mut self) {
        if !self.locked {
            return;
        }
        self.widget.set_cursor_from_name(None);
        self.locked = false;
        self.last = None;
        self.pending.push(PointerEvent::LockChange);
    }

    fn is_locked(&self) -> bool {
        self.locked
    }
}
