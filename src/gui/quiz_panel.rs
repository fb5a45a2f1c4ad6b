use eframe::egui::{
    self,
    Color32,
    RichText,
};

use crate::quiz::Phase;

const WRONG_FILL: Color32 = Color32::from_rgb(140, 46, 46);
const CORRECT_FILL: Color32 = Color32::from_rgb(36, 110, 50);

/// Host-side view of the displayed question, rebuilt wholesale on every
/// question-ready signal. Wrong picks stay marked (and clickable) until the
/// question is replaced.
pub struct QuestionView {
    pub prompt: String,
    pub meaning: String,
    pub choices: Vec<String>,
    pub wrong: Vec<bool>,
}

impl QuestionView {
    pub fn new(prompt: String, meaning: String, choices: Vec<String>) -> Self {
        let wrong = vec![false; choices.len()];
        Self { prompt, meaning, choices, wrong }
    }
}

/// Prompt, meaning hint and the 2x2 answer grid. Returns the index of the
/// clicked choice, if any.
pub fn quiz_panel(
    ui: &mut egui::Ui,
    question: Option<&QuestionView>,
    phase: Phase,
    correct_answer: Option<&str>,
) -> Option<usize> {
    let mut clicked = None;

    ui.vertical_centered(|ui| {
        let Some(question) = question else {
            ui.add_space(120.0);
            ui.label(RichText::new("No data for this selection").size(22.0));
            ui.label("Pick another band or content type, or check the data directory.");
            return;
        };

        ui.add_space(60.0);
        ui.label(RichText::new(&question.prompt).size(72.0).strong());
        ui.add_space(12.0);
        ui.label(RichText::new(&question.meaning).size(15.0));
        ui.add_space(40.0);

        egui::Grid::new("choice_grid").num_columns(2).spacing([10.0, 10.0]).show(ui, |ui| {
            for (index, choice) in question.choices.iter().enumerate() {
                let mut button = egui::Button::new(RichText::new(choice).size(18.0))
                    .min_size(egui::vec2(200.0, 52.0));

                if question.wrong[index] {
                    button = button.fill(WRONG_FILL);
                }
                if phase == Phase::Answered && Some(choice.as_str()) == correct_answer {
                    button = button.fill(CORRECT_FILL);
                }

                if ui.add_enabled(phase == Phase::Ready, button).clicked() {
                    clicked = Some(index);
                }
                if index % 2 == 1 {
                    ui.end_row();
                }
            }
        });
    });

    clicked
}
