use crate::error::LockError;
use crate::options::TriggerKey;

/// Pointer capture provided by the host platform.
///
/// Requests are asynchronous: the platform answers a [`PointerLock::request_lock`]
/// with a later [`PointerEvent::LockChange`] or [`PointerEvent::LockError`].
pub trait PointerLock {
    fn request_lock(&mut self);
    fn release_lock(&mut self);
    fn is_locked(&self) -> bool;
}

/// Platform input as seen by the custom cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    KeyPressed(TriggerKey),
    KeyReleased(TriggerKey),
    LockChange,
    LockError(LockError),
    RelativeMotion { dx: f64, dy: f64 },
    Resize { width: f64, height: f64 },
}
