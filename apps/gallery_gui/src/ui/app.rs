use std::time::Duration;

use client_core::{grid_columns, GalleryBody, GalleryView, PageEvent, PageFetchController};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorContext, UiEvent},
    orchestration::apply_step,
};
use crate::ui::card::product_card;

pub struct GalleryApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: PageFetchController,
    catalog_url: String,
    status: String,
}

impl GalleryApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        catalog_url: impl Into<String>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            controller: PageFetchController::new(),
            catalog_url: catalog_url.into(),
            status: "Starting".to_string(),
        }
    }

    /// Starts the first page load.
    pub fn mount(&mut self) {
        self.handle(PageEvent::Mount);
    }

    pub fn controller(&self) -> &PageFetchController {
        &self.controller
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn handle(&mut self, event: PageEvent) {
        let mut pending = Some(event);
        while let Some(event) = pending.take() {
            let step = self.controller.transition(event);
            pending = apply_step(&self.cmd_tx, step, &mut self.status);
        }
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    if err.context() == UiErrorContext::BackendStartup {
                        tracing::error!("{}", err.message());
                    }
                    self.status = err.status_line();
                }
                UiEvent::PageResolved { request, outcome } => {
                    let failure = outcome.as_ref().err().cloned();
                    self.handle(PageEvent::Resolved { request, outcome });
                    if self.controller.in_flight().is_none() {
                        self.status = match failure {
                            Some(failure) => {
                                UiError::from_message(UiErrorContext::FetchPage, failure.message())
                                    .status_line()
                            }
                            None => format!("Connected to {}", self.catalog_url),
                        };
                    }
                }
            }
        }
    }

    fn show_gallery(&mut self, ctx: &egui::Context) {
        let view = GalleryView::from_controller(&self.controller);
        let mut pager_event = None;

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(egui::RichText::new(&self.status).small());
        });

        if let Some(pager) = &view.pager {
            egui::TopBottomPanel::bottom("pager").show(ctx, |ui| {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(pager.previous_enabled, egui::Button::new("Previous"))
                        .clicked()
                    {
                        pager_event = Some(PageEvent::Previous);
                    }
                    ui.label(&pager.label);
                    if ui
                        .add_enabled(pager.next_enabled, egui::Button::new("Next"))
                        .clicked()
                    {
                        pager_event = Some(PageEvent::Next);
                    }
                });
                ui.add_space(6.0);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(view.heading);
            ui.add_space(8.0);

            match &view.body {
                GalleryBody::Loading => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(24.0);
                        ui.add(egui::Spinner::new().size(32.0));
                        ui.label(client_core::view::LOADING_TEXT);
                    });
                }
                GalleryBody::Error(text) => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(24.0);
                        ui.colored_label(ui.visuals().error_fg_color, text);
                    });
                }
                GalleryBody::Grid(items) if items.is_empty() => {
                    ui.label("No products on this page.");
                }
                GalleryBody::Grid(items) => {
                    let columns = grid_columns(ui.available_width());
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        egui::Grid::new("product_grid")
                            .num_columns(columns)
                            .spacing([16.0, 16.0])
                            .show(ui, |ui| {
                                for (index, product) in items.iter().enumerate() {
                                    ui.push_id(product.id.as_str(), |ui| {
                                        product_card(ui, product);
                                    });
                                    if (index + 1) % columns == 0 {
                                        ui.end_row();
                                    }
                                }
                            });
                    });
                }
            }
        });

        if let Some(event) = pager_event {
            self.handle(event);
        }
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_gallery(ctx);

        if self.controller.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
