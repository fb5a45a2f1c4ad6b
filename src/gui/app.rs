use std::path::PathBuf;

use csv::StringRecord;
use eframe::egui;

use super::{
    config_modal::ConfigModal,
    quiz_panel::{
        quiz_panel,
        QuestionView,
    },
    vocab_modal::VocabModal,
};
use crate::{
    audio::{
        AudioPlayer,
        DEFAULT_ADVANCE_DELAY,
    },
    core::{
        Band,
        ContentType,
        Preferences,
    },
    dataset,
    persistence::{
        load_json_or_default,
        save_json,
    },
    quiz::{
        AdvanceTimer,
        Mode,
        QuizEngine,
        QuizEvent,
    },
};

pub const PREFS_FILE: &str = "preferences.json";
const DEFAULT_DATA_DIR: &str = "assets/data";

pub struct WendaApp {
    prefs: Preferences,
    band: Band,
    content: ContentType,
    random_mode: bool,
    data_dir: PathBuf,

    /// Raw rows of an active custom study set. Preference changes re-project
    /// these; band/content changes discard them.
    custom_rows: Option<Vec<StringRecord>>,

    engine: QuizEngine,
    question: Option<QuestionView>,
    advance: AdvanceTimer,
    audio: AudioPlayer,

    config_modal: ConfigModal,
    vocab_modal: VocabModal,
}

impl WendaApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        install_cjk_font(&cc.egui_ctx);

        let prefs = load_json_or_default::<Preferences>(PREFS_FILE);

        let mut app = Self {
            prefs,
            band: Band::default(),
            content: ContentType::default(),
            random_mode: true,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            custom_rows: None,
            engine: QuizEngine::new(Vec::new(), Mode::Random),
            question: None,
            advance: AdvanceTimer::new(),
            audio: AudioPlayer::new(),
            config_modal: ConfigModal::new(),
            vocab_modal: VocabModal::new(),
        };
        app.reload_entries();
        app
    }

    fn mode(&self) -> Mode {
        if self.random_mode {
            Mode::Random
        } else {
            Mode::Sequential
        }
    }

    /// Rebuilds the entry set from the active source (custom subset or band
    /// table) and starts over from the first question.
    fn reload_entries(&mut self) {
        let entries = match &self.custom_rows {
            Some(rows) => dataset::entries_from_rows(rows, &self.prefs),
            None => dataset::load_table(&self.data_dir, self.band, self.content, &self.prefs),
        };

        self.advance.cancel();
        let event = self.engine.set_entries(entries);
        self.apply_event(event);
    }

    fn apply_event(&mut self, event: QuizEvent) {
        match event {
            QuizEvent::Empty => {
                self.question = None;
            }
            QuizEvent::QuestionReady { prompt, meaning, choices } => {
                self.question = Some(QuestionView::new(prompt, meaning, choices));
            }
            QuizEvent::AnswerResult { .. } => {}
        }
    }

    fn submit_choice(&mut self, index: usize) {
        let Some(selected) = self.question.as_ref().and_then(|q| q.choices.get(index).cloned())
        else {
            return;
        };
        let Some(QuizEvent::AnswerResult { correct, .. }) = self.engine.submit(&selected) else {
            return;
        };

        if correct {
            let delay = self
                .engine
                .current_audio()
                .and_then(|path| self.audio.play(path))
                .unwrap_or(DEFAULT_ADVANCE_DELAY);
            self.advance.schedule(delay, self.engine.generation());
            println!("Advance scheduled in {} ms", delay.as_millis());
        } else {
            if let Some(question) = &mut self.question {
                question.wrong[index] = true;
            }
            self.audio.play_wrong_cue();
        }
    }
}

impl eframe::App for WendaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.advance.poll(self.engine.generation()) {
            let event = self.engine.new_question();
            self.apply_event(event);
        }

        let mut source_changed = false;
        let mut mode_changed = false;
        let mut open_options = false;
        let mut open_custom = false;

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let band_before = self.band;
                let content_before = self.content;

                ui.label("Band:");
                egui::ComboBox::from_id_salt("band")
                    .selected_text(self.band.to_string())
                    .show_ui(ui, |ui| {
                        for band in Band::ALL {
                            ui.selectable_value(&mut self.band, band, band.to_string());
                        }
                    });

                ui.label("Content:");
                egui::ComboBox::from_id_salt("content")
                    .selected_text(self.content.to_string())
                    .show_ui(ui, |ui| {
                        for content in ContentType::ALL {
                            ui.selectable_value(&mut self.content, content, content.to_string());
                        }
                    });

                source_changed = self.band != band_before || self.content != content_before;
                mode_changed = ui.checkbox(&mut self.random_mode, "Random").changed();

                if self.custom_rows.is_some() {
                    if ui.button("End Custom Study").clicked() {
                        source_changed = true;
                    }
                    ui.label(egui::RichText::new("custom study set active").weak());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Options").clicked() {
                        open_options = true;
                    }
                    if ui.button("Custom Study").clicked() {
                        open_custom = true;
                    }
                });
            });
        });

        if source_changed {
            self.custom_rows = None;
            self.reload_entries();
        }
        if mode_changed {
            self.advance.cancel();
            let event = self.engine.set_mode(self.mode());
            self.apply_event(event);
        }
        if open_options {
            self.config_modal.open(self.prefs);
        }
        if open_custom {
            self.vocab_modal.open(self.band, self.content, &self.prefs, &self.data_dir);
        }

        if let Some(prefs) = self.config_modal.show(ctx) {
            self.prefs = prefs;
            if let Err(e) = save_json(&self.prefs, PREFS_FILE) {
                eprintln!("Failed to save preferences: {}", e);
            }
            // Custom sets survive a preference change; they are re-projected
            // with the new column choices.
            self.reload_entries();
        }

        if let Some(rows) = self.vocab_modal.show(ctx, &self.data_dir) {
            self.custom_rows = Some(rows);
            self.reload_entries();
        }

        let correct_answer = self.engine.current().map(|entry| entry.answer.clone());
        let clicked = egui::CentralPanel::default()
            .show(ctx, |ui| {
                quiz_panel(ui, self.question.as_ref(), self.engine.phase(), correct_answer.as_deref())
            })
            .inner;

        if let Some(index) = clicked {
            self.submit_choice(index);
        }

        if let Some(remaining) = self.advance.remaining() {
            ctx.request_repaint_after(remaining);
        }
    }
}

/// Best-effort CJK font registration. Rendering degrades without one but the
/// app still runs.
fn install_cjk_font(ctx: &egui::Context) {
    const CANDIDATES: &[&str] = &[
        "assets/fonts/NotoSansSC-Regular.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansCJKsc-Regular.otf",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.otf",
    ];

    for candidate in CANDIDATES {
        let Ok(bytes) = std::fs::read(candidate) else {
            continue;
        };

        let mut fonts = egui::FontDefinitions::default();
        fonts
            .font_data
            .insert("cjk".to_owned(), std::sync::Arc::new(egui::FontData::from_owned(bytes)));
        fonts.families.entry(egui::FontFamily::Proportional).or_default().insert(0, "cjk".to_owned());
        fonts.families.entry(egui::FontFamily::Monospace).or_default().push("cjk".to_owned());
        ctx.set_fonts(fonts);
        return;
    }

    eprintln!("No CJK font found. Prompts may not render correctly.");
}
