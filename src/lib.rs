//! Flashcard quiz for practicing Chinese characters and vocabulary against
//! the HSK 3.0 curriculum.

pub mod audio;
pub mod core;
pub mod dataset;
pub mod gui;
pub mod persistence;
pub mod quiz;
