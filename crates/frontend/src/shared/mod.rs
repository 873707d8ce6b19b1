pub mod api_utils;
pub mod components;
pub mod crud_api;
pub mod crud_screen;
pub mod dialogs;
pub mod download;
pub mod icons;
pub mod list_utils;
pub mod modal_frame;
pub mod notifications;
pub mod page_frame;
pub mod page_standard;
pub mod viewport;
