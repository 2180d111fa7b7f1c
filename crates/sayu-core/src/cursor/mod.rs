//! Drives menu selection from relative pointer motion while the pointer is locked.
//!
//! Holding the trigger key requests a lock. Once the platform confirms it the
//! virtual cursor is recentered and the menu shown; every accepted motion
//! sample moves the cursor and reselects. Releasing the lock commits the
//! selection, hides the menu and clears the selection.

pub mod platform;

use crate::error::LockError;
use crate::frame::{FrameQueue, VisualUpdate};
use crate::geometry::{Point, Size};
use crate::menu::MenuController;
use crate::options::{MenuOptions, TriggerKey};
use crate::pointer::{Margin, VirtualCursor};
pub use platform::{PointerEvent, PointerLock};

/// Some platforms report bogus deltas right after locking; anything larger
/// than this on either axis is dropped.
pub const MAX_MOTION_DELTA: f64 = 50.0;
pub const CURSOR_MARGIN: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomCursorOptions {
    pub trigger: TriggerKey,
    pub margin: Margin,
    pub max_motion_delta: f64,
}

impl Default for CustomCursorOptions {
    fn default() -> Self {
        Self {
            trigger: TriggerKey::default(),
            margin: Margin::new(CURSOR_MARGIN, CURSOR_MARGIN),
            max_motion_delta: MAX_MOTION_DELTA,
        }
    }
}

impl From<&MenuOptions> for CustomCursorOptions {
    fn from(options: &MenuOptions) -> Self {
        Self {
            trigger: options.trigger_key,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    #[default]
    Inactive,
    Active,
}

pub struct CustomCursor<P: PointerLock> {
    platform: P,
    cursor: VirtualCursor,
    state: LockState,
    options: CustomCursorOptions,
    frames: FrameQueue,
}

impl<P: PointerLock> CustomCursor<P> {
    /// Mounts a hidden cursor on a canvas of `canvas` size.
    pub fn setup(
        platform: P,
        canvas: Size,
        options: CustomCursorOptions,
        frames: FrameQueue,
    ) -> Self {
        let transforms = frames.clone();
        let cursor = VirtualCursor::new(canvas, options.margin).with_on_move(move |p, _| {
            transforms.push(VisualUpdate::CursorTransform(p));
        });
        frames.push(VisualUpdate::CursorVisible(false));

        Self {
            platform,
            cursor,
            state: LockState::Inactive,
            options,
            frames,
        }
    }

    /// Unmounts the cursor, closing the menu first if it is still active.
    pub fn release(mut self, menu: &mut impl MenuController) -> P {
        if self.platform.is_locked() {
            self.platform.release_lock();
        }
        if self.state == LockState::Active {
            self.deactivate(menu);
        }
        self.frames.push(VisualUpdate::CursorVisible(false));
        self.platform
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == LockState::Active
    }

    pub fn position(&self) -> Point {
        self.cursor.position()
    }

    pub fn canvas(&self) -> Size {
        self.cursor.canvas()
    }

    pub fn options(&self) -> &CustomCursorOptions {
        &self.options
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn handle_event(&mut self, event: PointerEvent, menu: &mut impl MenuController) {
        match event {
            PointerEvent::KeyPressed(key) => self.key_pressed(key),
            PointerEvent::KeyReleased(key) => self.key_released(key),
            PointerEvent::LockChange => self.lock_changed(menu),
            PointerEvent::LockError(e) => self.lock_error(&e),
            PointerEvent::RelativeMotion { dx, dy } => {
                self.relative_motion(dx, dy, menu);
            }
            PointerEvent::Resize { width, height } => self.resize(width, height),
        }
    }

    pub fn key_pressed(&mut self, key: TriggerKey) {
        if key != self.options.trigger || self.platform.is_locked() {
            return;
        }
        self.platform.request_lock();
    }

    pub fn key_released(&mut self, key: TriggerKey) {
        if key == self.options.trigger {
            self.platform.release_lock();
        }
    }

    pub fn lock_changed(&mut self, menu: &mut impl MenuController) {
        match (self.state, self.platform.is_locked()) {
            (LockState::Inactive, true) => self.activate(menu),
            (LockState::Active, false) => self.deactivate(menu),
            _ => {}
        }
    }

    pub fn lock_error(&self, error: &LockError) {
        log::error!("[custom-cursor]: pointer lock error: {}", error);
    }

    /// Returns whether the sample was applied.
    pub fn relative_motion(
        &mut self,
        dx: f64,
        dy: f64,
        menu: &mut impl MenuController,
    ) -> bool {
        if self.state != LockState::Active {
            return false;
        }

        let limit = self.options.max_motion_delta;
        if dx.abs() > limit || dy.abs() > limit {
            log::trace!("[custom-cursor]: dropped motion spike ({dx}, {dy})");
            return false;
        }

        let position = self.cursor.move_relative(dx, dy);
        self.track(position, menu);
        true
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.cursor.resize(width, height);
    }

    fn activate(&mut self, menu: &mut impl MenuController) {
        self.state = LockState::Active;

        let position = self.cursor.move_to_fraction(0.5, 0.5);
        self.track(position, menu);
        self.frames.push(VisualUpdate::CursorVisible(true));
        menu.show();
        log::info!("[custom-cursor]: lock pointer");
    }

    fn deactivate(&mut self, menu: &mut impl MenuController) {
        self.state = LockState::Inactive;

        self.frames.push(VisualUpdate::CursorVisible(false));
        menu.trigger_select_callback();
        menu.hide();
        menu.select(None);
        log::info!("[custom-cursor]: unlock pointer");
    }

    fn track(&mut self, position: Point, menu: &mut impl MenuController) {
        let index = menu.resolver().resolve(
            position,
            self.cursor.center_point(),
            menu.include_outer_bound(),
        );
        menu.select(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{Menu, MenuHooks};
    use crate::options::MenuItem;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct FakeLock {
        locked: bool,
        requests: usize,
        releases: usize,
    }

    impl PointerLock for FakeLock {
        fn request_lock(&mut self) {
            self.requests += 1;
            self.locked = true;
        }

        fn release_lock(&mut self) {
            self.releases += 1;
            self.locked = false;
        }

        fn is_locked(&self) -> bool {
            self.locked
        }
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Option<String>>>>);

    impl MenuHooks for Recorder {
        fn on_select(&mut self, item: Option<&MenuItem>) {
            self.0.borrow_mut().push(item.map(|i| i.title.clone()));
        }
    }

    fn fixture() -> (CustomCursor<FakeLock>, Menu, Recorder) {
        let frames = FrameQueue::new();
        let items = (0..6)
            .map(|i| MenuItem::new(format!("item {i}"), ""))
            .collect();
        let recorder = Recorder::default();
        let menu = Menu::new(MenuOptions::with_items(items), frames.clone())
            .unwrap()
            .with_hooks(recorder.clone());
        let cursor = CustomCursor::setup(
            FakeLock::default(),
            Size::new(1920.0, 1080.0),
            CustomCursorOptions::from(menu.options()),
            frames,
        );
        (cursor, menu, recorder)
    }

    fn lock(cursor: &mut CustomCursor<FakeLock>, menu: &mut Menu) {
        cursor.handle_event(PointerEvent::KeyPressed(TriggerKey::Tab), menu);
        cursor.handle_event(PointerEvent::LockChange, menu);
    }

    fn unlock(cursor: &mut CustomCursor<FakeLock>, menu: &mut Menu) {
        cursor.handle_event(PointerEvent::KeyReleased(TriggerKey::Tab), menu);
        cursor.handle_event(PointerEvent::LockChange, menu);
    }

    #[test]
    fn test_activation_recenters_and_shows() {
        let (mut cursor, mut menu, _) = fixture();
        lock(&mut cursor, &mut menu);

        assert!(cursor.is_active());
        assert_eq!(cursor.position(), Point::new(960.0, 540.0));
        assert!(menu.is_visible());
        assert_eq!(menu.selected(), None);

        let frames = menu.frames().drain();
        assert!(frames.contains(&VisualUpdate::CursorTransform(Point::new(960.0, 540.0))));
        assert!(frames.contains(&VisualUpdate::CursorVisible(true)));
        assert!(frames.contains(&VisualUpdate::MenuVisible(true)));
    }

    #[test]
    fn test_repeated_trigger_is_idempotent() {
        let (mut cursor, mut menu, _) = fixture();
        lock(&mut cursor, &mut menu);
        cursor.handle_event(PointerEvent::KeyPressed(TriggerKey::Tab), &mut menu);
        cursor.handle_event(PointerEvent::LockChange, &mut menu);
        assert_eq!(cursor.platform().requests, 1);
        assert!(cursor.is_active());
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let (mut cursor, mut menu, _) = fixture();
        cursor.handle_event(PointerEvent::KeyPressed(TriggerKey::Space), &mut menu);
        assert_eq!(cursor.platform().requests, 0);
    }

    #[test]
    fn test_motion_selects_sectors() {
        let (mut cursor, mut menu, _) = fixture();
        lock(&mut cursor, &mut menu);

        // walk due east past the dead zone (inner radius 250)
        for _ in 0..6 {
            assert!(cursor.relative_motion(50.0, 0.0, &mut menu));
        }
        assert_eq!(cursor.position(), Point::new(1260.0, 540.0));
        assert_eq!(menu.selected(), Some(2));

        // and straight up from there is still to the right of 12 o'clock
        for _ in 0..8 {
            cursor.relative_motion(0.0, -50.0, &mut menu);
        }
        assert_eq!(menu.selected(), Some(1));
    }

    #[test]
    fn test_spikes_are_discarded() {
        let (mut cursor, mut menu, _) = fixture();
        lock(&mut cursor, &mut menu);
        let before = cursor.position();

        assert!(!cursor.relative_motion(51.0, 0.0, &mut menu));
        assert!(!cursor.relative_motion(0.0, -300.0, &mut menu));
        assert_eq!(cursor.position(), before);

        assert!(cursor.relative_motion(-50.0, 50.0, &mut menu));
        assert_eq!(cursor.position(), Point::new(910.0, 590.0));
    }

    #[test]
    fn test_motion_ignored_while_inactive() {
        let (mut cursor, mut menu, _) = fixture();
        assert!(!cursor.relative_motion(5.0, 5.0, &mut menu));
        assert_eq!(cursor.position(), Point::default());
    }

    #[test]
    fn test_deactivation_commits_once_and_resets() {
        let (mut cursor, mut menu, recorder) = fixture();
        lock(&mut cursor, &mut menu);
        menu.select(Some(2));

        unlock(&mut cursor, &mut menu);
        assert_eq!(*recorder.0.borrow(), vec![Some("item 2".to_string())]);
        assert!(!menu.is_visible());
        assert_eq!(menu.selected(), None);

        // a stray lock-change while inactive must not commit again
        cursor.handle_event(PointerEvent::LockChange, &mut menu);
        assert_eq!(recorder.0.borrow().len(), 1);

        lock(&mut cursor, &mut menu);
        assert_eq!(menu.selected(), None);
    }

    #[test]
    fn test_lock_error_keeps_state() {
        let (mut cursor, mut menu, _) = fixture();
        cursor.handle_event(
            PointerEvent::LockError(LockError::Rejected("denied".into())),
            &mut menu,
        );
        assert_eq!(cursor.state(), LockState::Inactive);
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_resize_changes_recenter_target() {
        let (mut cursor, mut menu, _) = fixture();
        cursor.handle_event(
            PointerEvent::Resize {
                width: 800.0,
                height: 600.0,
            },
            &mut menu,
        );
        lock(&mut cursor, &mut menu);
        assert_eq!(cursor.position(), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_release_closes_active_menu() {
        let (mut cursor, mut menu, recorder) = fixture();
        lock(&mut cursor, &mut menu);
        let platform = cursor.release(&mut menu);
        assert!(!platform.locked);
        assert!(!menu.is_visible());
        assert_eq!(recorder.0.borrow().len(), 1);
    }
}
