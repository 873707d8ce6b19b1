pub mod actions;
pub mod dialog;
pub mod export;
pub mod forms;
pub mod import;
pub mod list_query;
pub mod navigation;
pub mod permissions;
pub mod screen;
pub mod ui_config;
