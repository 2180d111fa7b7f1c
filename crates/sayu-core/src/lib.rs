//! Radial menu core: sector geometry, pointer-to-sector resolution and a
//! pointer-lock driven virtual cursor.

pub mod cursor;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod menu;
pub mod options;
pub mod pointer;
pub mod resolver;

pub use cursor::{CustomCursor, CustomCursorOptions, LockState, PointerEvent, PointerLock};
pub use error::{GeometryError, LockError, OptionsError};
pub use frame::{FrameQueue, VisualUpdate};
pub use geometry::{AngularLayout, AnnulusBounds, CenterPoint, MenuGeometry, Point, Size};
pub use menu::{Menu, MenuController, MenuHooks};
pub use options::{MenuItem, MenuOptions, TriggerKey};
pub use pointer::{Margin, VirtualCursor};
pub use resolver::{SectorOffset, SectorResolver, resolve_sector};
