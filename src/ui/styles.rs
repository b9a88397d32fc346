use eframe::egui::{Color32, Label, Response, RichText, Sense, Ui};

use crate::domain::Collection;
use crate::ui::config::UI_CONFIG;

/// Extension trait to add semantic styling methods directly to `egui::Ui`.
pub trait UiStyleExt {
    /// Renders small, gray text.
    fn label_subdued(&mut self, text: impl Into<String>);

    /// Renders a "Label: Value" pair. The label is subdued, the value is colored.
    fn metric(&mut self, label: &str, value: &str, color: Color32);

    /// Renders a section header using the configured global color.
    fn label_header(&mut self, text: impl Into<String>);

    fn label_subheader(&mut self, text: impl Into<String>);

    /// Chain badge (BTC, ETH, ...) in the chain's color. Clickable.
    fn chain_badge(&mut self, collection: &Collection) -> Response;

    fn label_warning(&mut self, text: impl Into<String>);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::GRAY));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).small().color(color));
        });
    }

    fn label_header(&mut self, text: impl Into<String>) {
        let text = text.into().to_uppercase();
        self.heading(RichText::new(text).color(UI_CONFIG.colors.heading).monospace());
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(UI_CONFIG.colors.subsection_heading));
    }

    fn chain_badge(&mut self, collection: &Collection) -> Response {
        let color = UI_CONFIG.chain_color(collection.chain_kind());
        let text = RichText::new(collection.chain_badge())
            .small()
            .strong()
            .monospace()
            .color(color);
        self.add(Label::new(text).sense(Sense::click()))
    }

    fn label_warning(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::from_rgb(255, 215, 0)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{CentralPanel, Context, RawInput};

    #[test]
    fn chain_badge_takes_clicks() {
        let collection = Collection {
            id: "c".into(),
            chain: "ordinals".into(),
            ..Default::default()
        };
        let ctx = Context::default();
        let mut senses_click = false;
        let _ = ctx.run(RawInput::default(), |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                senses_click = ui.chain_badge(&collection).sense.senses_click();
            });
        });
        assert!(senses_click);
    }
}
