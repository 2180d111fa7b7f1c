use sayu_core::MenuItem;

#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigReload,
    Committed(Option<MenuItem>),
}
