use eframe::egui;

/// Generic dialog scaffolding shared by the configuration and custom-study
/// dialogs.
pub struct Modal<T> {
    open: bool,
    title: String,
    data: T,
    config: ModalConfig,
}

#[derive(Clone)]
pub struct ModalConfig {
    pub resizable: bool,
    pub fixed_size: Option<egui::Vec2>,
    pub min_size: Option<egui::Vec2>,
    /// Dark overlay behind the modal; clicking it cancels.
    pub show_overlay: bool,
    pub centered: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            resizable: false,
            fixed_size: None,
            min_size: Some(egui::Vec2::new(300.0, 200.0)),
            show_overlay: true,
            centered: true,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ModalResult<T> {
    Confirmed(T),
    Cancelled,
}

impl<T: Default> Modal<T> {
    pub fn new(title: impl Into<String>) -> Self {
        Self { open: false, title: title.into(), data: T::default(), config: ModalConfig::default() }
    }
}

impl<T> Modal<T> {
    pub fn with_config(mut self, config: ModalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Draws the dialog when open. A `Some` result from the content closure
    /// closes the dialog and is passed through to the caller.
    pub fn show<F>(&mut self, ctx: &egui::Context, content: F) -> Option<ModalResult<T>>
    where
        F: FnOnce(&mut egui::Ui, &mut T) -> Option<ModalResult<T>>,
    {
        if !self.open {
            return None;
        }

        let mut result = None;
        let mut outside_click = false;

        if self.config.show_overlay {
            outside_click = self.show_overlay(ctx);
        }

        let mut window =
            egui::Window::new(&self.title).collapsible(false).resizable(self.config.resizable);

        if let Some(size) = self.config.fixed_size {
            window = window.fixed_size(size);
        }
        if let Some(min_size) = self.config.min_size {
            window = window.min_size(min_size);
        }
        if self.config.centered {
            window = window.anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO);
        }

        window.show(ctx, |ui| {
            result = content(ui, &mut self.data);
        });

        if result.is_none() && outside_click {
            result = Some(ModalResult::Cancelled);
        }

        if result.is_some() {
            self.open = false;
        }
        result
    }

    fn show_overlay(&self, ctx: &egui::Context) -> bool {
        let area_response = egui::Area::new(egui::Id::new("modal_overlay"))
            .order(egui::Order::Background)
            .fixed_pos(egui::Pos2::ZERO)
            .show(ctx, |ui| {
                let screen_rect = ctx.screen_rect();
                let (_rect, response) =
                    ui.allocate_exact_size(screen_rect.size(), egui::Sense::click());
                ui.painter().rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(100));
                response.clicked()
            });

        area_response.inner
    }
}

/// Right-aligned confirm/cancel row used by dialogs without extra guards.
pub fn action_buttons<T: Clone>(
    ui: &mut egui::Ui,
    data: &T,
    confirm_text: &str,
    cancel_text: &str,
) -> Option<ModalResult<T>> {
    ui.horizontal(|ui| {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(confirm_text).clicked() {
                Some(ModalResult::Confirmed(data.clone()))
            } else if ui.button(cancel_text).clicked() {
                Some(ModalResult::Cancelled)
            } else {
                None
            }
        })
        .inner
    })
    .inner
}
