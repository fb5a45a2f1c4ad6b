pub mod errors;
pub mod models;

pub use errors::WendaError;
pub use models::{
    Band,
    CharacterForm,
    ContentType,
    Entry,
    Preferences,
    ReadingSystem,
};
