pub mod model;
pub mod view;

pub use model::{CommitHooks, Session, ViewState};
pub use view::{clip_path_defs, draw, snapshot};

pub const DEFAULT_WIDTH: i32 = 1600;
pub const DEFAULT_HEIGHT: i32 = 1000;
pub const CURSOR_RADIUS: f64 = 6.0;
pub const TITLE_FONT_SIZE: f64 = 22.0;
pub const PANEL_FONT_SIZE: f64 = 28.0;
pub const HINT_FONT_SIZE: f64 = 16.0;
