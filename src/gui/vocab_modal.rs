use std::path::Path;

use csv::StringRecord;
use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};

use super::modal::{
    Modal,
    ModalConfig,
    ModalResult,
};
use crate::{
    core::{
        Band,
        ContentType,
        Preferences,
        ReadingSystem,
    },
    dataset,
};

/// Working state of the custom-study dialog. Rows are kept raw so the
/// confirmed subset can be re-projected later under whatever preferences are
/// active at that point.
#[derive(Default, Clone)]
pub struct VocabModalData {
    band: Band,
    content: ContentType,
    reading_col: usize,
    rows: Vec<StringRecord>,
    checked: Vec<bool>,
    notice: Option<String>,
}

pub struct VocabModal {
    modal: Modal<VocabModalData>,
}

impl VocabModal {
    pub fn new() -> Self {
        let config = ModalConfig {
            resizable: true,
            min_size: Some(egui::Vec2::new(700.0, 420.0)),
            ..Default::default()
        };
        Self { modal: Modal::new("Select Vocabulary for Study").with_config(config) }
    }

    pub fn open(&mut self, band: Band, content: ContentType, prefs: &Preferences, data_dir: &Path) {
        let data = self.modal.data_mut();
        data.band = band;
        data.content = content;
        data.reading_col = match prefs.readings {
            ReadingSystem::Pinyin => dataset::PINYIN_COL,
            ReadingSystem::Zhuyin => dataset::ZHUYIN_COL,
        };
        Self::reload(data, data_dir);
        self.modal.open();
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    fn reload(data: &mut VocabModalData, data_dir: &Path) {
        let path = dataset::table_path(data_dir, data.band, data.content);
        match dataset::read_rows(&path) {
            Ok(rows) => {
                data.checked = vec![false; rows.len()];
                data.rows = rows;
                data.notice = None;
            }
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                data.rows.clear();
                data.checked.clear();
                data.notice = Some(format!("Data file '{}' not found", path.display()));
            }
        }
    }

    /// The confirmed raw-row subset, once, when the user starts a study
    /// session. Confirming with nothing selected keeps the dialog open.
    pub fn show(&mut self, ctx: &egui::Context, data_dir: &Path) -> Option<Vec<StringRecord>> {
        let result = self.modal.show(ctx, |ui, data| {
            let mut action = None;

            ui.horizontal(|ui| {
                let band_before = data.band;
                let content_before = data.content;

                ui.label("Band:");
                egui::ComboBox::from_id_salt("vocab_band")
                    .selected_text(data.band.to_string())
                    .show_ui(ui, |ui| {
                        for band in Band::ALL {
                            ui.selectable_value(&mut data.band, band, band.to_string());
                        }
                    });

                ui.label("Content:");
                egui::ComboBox::from_id_salt("vocab_content")
                    .selected_text(data.content.to_string())
                    .show_ui(ui, |ui| {
                        for content in ContentType::ALL {
                            ui.selectable_value(&mut data.content, content, content.to_string());
                        }
                    });

                if data.band != band_before || data.content != content_before {
                    Self::reload(data, data_dir);
                }
            });
            ui.separator();

            if let Some(notice) = &data.notice {
                ui.colored_label(egui::Color32::LIGHT_RED, notice);
            }

            let table_height = (ui.available_height() - 40.0).max(120.0);
            ui.push_id("vocab_rows", |ui| {
                let reading_col = data.reading_col;
                let rows = &data.rows;
                let checked = &mut data.checked;

                TableBuilder::new(ui)
                    .striped(true)
                    .min_scrolled_height(100.0)
                    .max_scroll_height(table_height)
                    .column(Column::auto())
                    .column(Column::initial(90.0))
                    .column(Column::initial(90.0))
                    .column(Column::initial(110.0))
                    .column(Column::remainder())
                    .header(22.0, |mut header| {
                        header.col(|_ui| {});
                        header.col(|ui| {
                            ui.strong("Simplified");
                        });
                        header.col(|ui| {
                            ui.strong("Traditional");
                        });
                        header.col(|ui| {
                            ui.strong("Reading");
                        });
                        header.col(|ui| {
                            ui.strong("Meaning");
                        });
                    })
                    .body(|body| {
                        body.rows(24.0, rows.len(), |mut row| {
                            let index = row.index();
                            let record = &rows[index];
                            row.col(|ui| {
                                ui.checkbox(&mut checked[index], "");
                            });
                            row.col(|ui| {
                                ui.label(record.get(dataset::SIMPLIFIED_COL).unwrap_or(""));
                            });
                            row.col(|ui| {
                                ui.label(record.get(dataset::TRADITIONAL_COL).unwrap_or(""));
                            });
                            row.col(|ui| {
                                ui.label(record.get(reading_col).unwrap_or(""));
                            });
                            row.col(|ui| {
                                ui.label(record.get(dataset::MEANING_COL).unwrap_or(""));
                            });
                        });
                    });
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Select All").clicked() {
                    data.checked.iter_mut().for_each(|checked| *checked = true);
                }
                if ui.button("Deselect All").clicked() {
                    data.checked.iter_mut().for_each(|checked| *checked = false);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Start Study").clicked() {
                        if data.checked.iter().any(|checked| *checked) {
                            action = Some(ModalResult::Confirmed(data.clone()));
                        } else {
                            // Distinct from silently starting an empty
                            // session: tell the user and stay open.
                            data.notice =
                                Some("Select at least one row to study.".to_string());
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(ModalResult::Cancelled);
                    }
                });
            });

            action
        });

        match result {
            Some(ModalResult::Confirmed(data)) => {
                let selected: Vec<StringRecord> = data
                    .rows
                    .iter()
                    .zip(&data.checked)
                    .filter(|(_, checked)| **checked)
                    .map(|(record, _)| record.clone())
                    .collect();
                Some(selected)
            }
            _ => None,
        }
    }
}
