pub mod app;
pub mod config_modal;
pub mod modal;
pub mod quiz_panel;
pub mod vocab_modal;

pub use app::WendaApp;
