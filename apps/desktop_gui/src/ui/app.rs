use std::time::Duration;

use client_core::{Effect, FetchError, Outcome, ViewState, Workflow};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::panels;

const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(50);
const IDLE_REPAINT_INTERVAL: Duration = Duration::from_millis(250);

pub struct ProductSearchApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    api_url: String,
    view: ViewState,
    status: String,
    status_banner: Option<String>,
}

impl ProductSearchApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, api_url: String) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            api_url,
            view: ViewState::new(),
            status: "Connecting to product API".to_string(),
            status_banner: None,
        };
        let _ = dispatch_backend_command(&app.cmd_tx, BackendCommand::CheckHealth, &mut app.status);
        app
    }

    pub fn submit(&mut self, workflow: Workflow) {
        if let Some(effect) = self.view.submit(workflow) {
            self.queue_effect(effect);
        }
    }

    fn queue_effect(&mut self, effect: Effect) {
        let cmd = BackendCommand::Execute(effect);
        if let Err(BackendCommand::Execute(effect)) =
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status)
        {
            let reason = self.status.clone();
            self.apply_outcome(effect.into_failure(FetchError::Dispatch(reason)));
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        if let Some(follow_up) = self.view.apply(outcome) {
            self.queue_effect(follow_up);
        }
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Outcome(outcome) => self.apply_outcome(outcome),
                UiEvent::BackendFailure(message) => {
                    self.status = message.clone();
                    self.status_banner = Some(message);
                }
            }
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(message) = self.status_banner.clone() {
            egui::Frame::new()
                .fill(egui::Color32::from_rgb(111, 53, 53))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
                .corner_radius(8.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(12.0);
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&self.api_url).weak());
                ui.separator();
                ui.label(self.status.as_str());
            });
        });
    }
}

impl eframe::App for ProductSearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_status_bar(ctx);

        let mut submitted = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("product search");
                    ui.add_space(12.0);
                    self.show_status_banner(ui);

                    if panels::lookup_card(ui, &mut self.view.lookup) {
                        submitted.push(Workflow::Lookup);
                    }
                    ui.add_space(20.0);
                    if panels::search_card(ui, &mut self.view.search) {
                        submitted.push(Workflow::Search);
                    }
                    ui.add_space(20.0);
                    if panels::create_card(ui, &mut self.view.create) {
                        submitted.push(Workflow::Create);
                    }
                });
        });

        for workflow in submitted {
            self.submit(workflow);
        }

        if self.view.awaiting_outcome() {
            ctx.request_repaint_after(BUSY_REPAINT_INTERVAL);
        } else {
            ctx.request_repaint_after(IDLE_REPAINT_INTERVAL);
        }
    }
}
