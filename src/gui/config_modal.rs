use eframe::egui;

use super::modal::{
    action_buttons,
    Modal,
    ModalConfig,
    ModalResult,
};
use crate::core::{
    CharacterForm,
    Preferences,
    ReadingSystem,
};

/// Characters/readings preference dialog.
pub struct ConfigModal {
    modal: Modal<Preferences>,
}

impl ConfigModal {
    pub fn new() -> Self {
        let config = ModalConfig {
            fixed_size: Some(egui::Vec2::new(300.0, 140.0)),
            min_size: None,
            ..Default::default()
        };
        Self { modal: Modal::new("Configuration").with_config(config) }
    }

    pub fn open(&mut self, current: Preferences) {
        *self.modal.data_mut() = current;
        self.modal.open();
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    /// The confirmed preferences, once, when the user hits Save.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<Preferences> {
        let result = self.modal.show(ctx, |ui, prefs| {
            egui::Grid::new("config_grid").num_columns(2).spacing([12.0, 10.0]).show(ui, |ui| {
                ui.label("Characters:");
                egui::ComboBox::from_id_salt("characters_pref")
                    .selected_text(prefs.characters.to_string())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut prefs.characters,
                            CharacterForm::Simplified,
                            "simplified",
                        );
                        ui.selectable_value(
                            &mut prefs.characters,
                            CharacterForm::Traditional,
                            "traditional",
                        );
                    });
                ui.end_row();

                ui.label("Readings:");
                egui::ComboBox::from_id_salt("readings_pref")
                    .selected_text(prefs.readings.to_string())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut prefs.readings, ReadingSystem::Pinyin, "pinyin");
                        ui.selectable_value(&mut prefs.readings, ReadingSystem::Zhuyin, "zhuyin");
                    });
                ui.end_row();
            });

            ui.add_space(10.0);
            action_buttons(ui, prefs, "Save", "Cancel")
        });

        match result {
            Some(ModalResult::Confirmed(prefs)) => Some(prefs),
            _ => None,
        }
    }
}
