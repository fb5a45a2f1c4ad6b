use wenda::gui::WendaApp;

fn main() -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([800.0, 1000.0])
            .with_title("HSK 3.0 Practice"),
        ..Default::default()
    };

    eframe::run_native("HSK 3.0 Practice", options, Box::new(|cc| Ok(Box::new(WendaApp::new(cc)))))
}
