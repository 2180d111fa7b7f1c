pub mod app;
pub mod lock;
pub mod menu;
pub mod theme;
