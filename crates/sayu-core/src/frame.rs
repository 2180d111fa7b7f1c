use crate::geometry::Point;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A visual change waiting for the next display refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualUpdate {
    CursorTransform(Point),
    CursorVisible(bool),
    Highlight { index: usize, active: bool },
    PanelContent(String),
    MenuVisible(bool),
}

#[derive(Default)]
struct Inner {
    pending: Vec<VisualUpdate>,
    scheduler: Option<Box<dyn Fn()>>,
}

/// Batches visual updates until the owner of the frame clock drains them.
///
/// Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct FrameQueue(Rc<RefCell<Inner>>);

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// `request_frame` runs whenever an update lands in an empty queue.
    pub fn set_scheduler(&self, request_frame: impl Fn() + 'static) {
        self.0.borrow_mut().scheduler = Some(Box::new(request_frame));
    }

    pub fn push(&self, update: VisualUpdate) {
        let was_empty = {
            let mut inner = self.0.borrow_mut();
            let was_empty = inner.pending.is_empty();
            inner.pending.push(update);
            was_empty
        };

        if was_empty && let Some(request_frame) = &self.0.borrow().scheduler {
            request_frame();
        }
    }

    pub fn drain(&self) -> Vec<VisualUpdate> {
        std::mem::take(&mut self.0.borrow_mut().pending)
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().pending.is_empty()
    }
}

impl fmt::Debug for FrameQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameQueue")
            .field("pending", &self.0.borrow().pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_frame_requested_once_per_batch() {
        let queue = FrameQueue::new();
        let requests = Rc::new(Cell::new(0));
        let counter = requests.clone();
        queue.set_scheduler(move || counter.set(counter.get() + 1));

        queue.push(VisualUpdate::CursorVisible(true));
        queue.push(VisualUpdate::MenuVisible(true));
        assert_eq!(requests.get(), 1);

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![VisualUpdate::CursorVisible(true), VisualUpdate::MenuVisible(true)]
        );
        assert!(queue.is_empty());

        queue.push(VisualUpdate::MenuVisible(false));
        assert_eq!(requests.get(), 2);
    }
}
