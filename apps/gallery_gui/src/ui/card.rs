use eframe::egui;
use shared::protocol::Product;

pub const CARD_WIDTH: f32 = 220.0;

/// Draws one product card. Callers key it by product id.
pub fn product_card(ui: &mut egui::Ui, product: &Product) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(CARD_WIDTH);
        ui.vertical(|ui| {
            ui.strong(&product.name);
            if let Some(price) = product.price {
                ui.label(format!("{price:.2}"));
            }
            if let Some(description) = &product.description {
                ui.label(egui::RichText::new(description).small().weak());
            }
            if let Some(image_url) = &product.image_url {
                ui.hyperlink_to("Image", image_url);
            }
            ui.label(
                egui::RichText::new(format!("#{}", product.id))
                    .small()
                    .monospace()
                    .weak(),
            );
        });
    });
}
