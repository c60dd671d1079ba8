use std::{path::PathBuf, time::Duration};

use client_core::{
    document::document_name,
    view::{
        FileCard, PrimaryAction, SessionView, SuccessPanel, APP_TAGLINE, APP_TITLE,
        DOWNLOAD_LABEL, DROP_ZONE_HINT, DROP_ZONE_PROMPT, PROCESS_ANOTHER_LABEL, SUCCESS_BODY,
        SUCCESS_TITLE,
    },
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{validate_document_name, SelectedDocument, DOCX_EXTENSION},
    error::UploadError,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiAction, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{reduce, UiState};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(79, 70, 229);
const ACCENT_MUTED: egui::Color32 = egui::Color32::from_rgb(165, 160, 240);
const SUCCESS_GREEN: egui::Color32 = egui::Color32::from_rgb(22, 163, 74);
const CARD_FILL: egui::Color32 = egui::Color32::from_rgb(241, 245, 249);
const BORDER: egui::Color32 = egui::Color32::from_rgb(203, 213, 225);

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    base_url: String,
    state: UiState,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        base_url: String,
        startup_notice: Option<String>,
    ) -> Self {
        let mut state = UiState::new();
        state.status = startup_notice.unwrap_or_else(|| "Starting backend worker...".to_string());
        Self {
            cmd_tx,
            ui_rx,
            base_url,
            state,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            reduce(&mut self.state, event);
        }
    }

    /// Name validation happens here so a wrong extension never reaches the
    /// worker.
    fn offer_path(&mut self, path: PathBuf) {
        if !self.state.accepts_selection() {
            return;
        }

        let name = document_name(&path);
        if let Err(err) = validate_document_name(&name) {
            self.state.session.reject_selection(err);
            return;
        }

        if dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::LoadDocument { path },
            &mut self.state.status,
        ) {
            self.state.loading_document = Some(name);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        if !self.state.accepts_drop() {
            return;
        }

        if let Some(path) = file.path {
            self.offer_path(path);
        } else if let Some(bytes) = file.bytes {
            self.state
                .session
                .select_document(SelectedDocument::new(file.name, bytes.to_vec()));
        }
    }

    fn submit(&mut self) {
        let document = match self.state.session.begin_submission() {
            Ok(document) => document,
            Err(rejection) => {
                tracing::debug!(?rejection, "submit ignored");
                return;
            }
        };

        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Upload { document },
            &mut self.state.status,
        ) {
            let reason = self.state.status.clone();
            self.state
                .session
                .complete_submission(Err(UploadError::transport(reason)));
        }
    }

    fn apply_action(&mut self, ctx: &egui::Context, action: UiAction) {
        match action {
            UiAction::PickFile => {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Word document", &[DOCX_EXTENSION.trim_start_matches('.')])
                    .pick_file()
                {
                    self.offer_path(path);
                }
            }
            UiAction::Submit => self.submit(),
            UiAction::Clear => {
                self.state.session.clear();
            }
            UiAction::Download(url) => {
                tracing::info!(%url, "opening download link");
                ctx.open_url(egui::OpenUrl::new_tab(url));
            }
            UiAction::ProcessAnother => {
                self.state.session.process_another();
            }
        }
    }

    fn show_header(&self, ui: &mut egui::Ui) {
        egui::Frame::new()
            .fill(ACCENT)
            .corner_radius(12_u8)
            .inner_margin(egui::Margin::same(20))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(format!("📄 {APP_TITLE}"))
                            .size(26.0)
                            .strong()
                            .color(egui::Color32::WHITE),
                    );
                    ui.label(egui::RichText::new(APP_TAGLINE).color(ACCENT_MUTED));
                });
            });
    }

    fn show_drop_zone(&self, ui: &mut egui::Ui, ctx: &egui::Context) -> Option<UiAction> {
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        let stroke = if hovering { ACCENT } else { BORDER };

        let response = egui::Frame::new()
            .stroke(egui::Stroke::new(2.0, stroke))
            .corner_radius(12_u8)
            .inner_margin(egui::Margin::same(28))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    if let Some(name) = &self.state.loading_document {
                        ui.spinner();
                        ui.label(format!("Reading {name}..."));
                        return;
                    }
                    ui.label(egui::RichText::new("⬆").size(32.0).color(ACCENT));
                    ui.label(egui::RichText::new(DROP_ZONE_PROMPT).strong());
                    ui.label(egui::RichText::new(DROP_ZONE_HINT).small().weak());
                });
            })
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand);

        (response.clicked() && self.state.loading_document.is_none()).then_some(UiAction::PickFile)
    }

    fn show_file_card(
        &self,
        ui: &mut egui::Ui,
        card: &FileCard,
        primary: Option<PrimaryAction>,
    ) -> Option<UiAction> {
        let mut action = None;

        egui::Frame::new()
            .fill(CARD_FILL)
            .stroke(egui::Stroke::new(1.0, BORDER))
            .corner_radius(8_u8)
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("📄").size(22.0).color(ACCENT));
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&card.name).strong());
                        ui.label(egui::RichText::new(&card.size_label).small().weak());
                    });
                    if card.can_clear {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui
                                .button("✕")
                                .on_hover_text("Remove file")
                                .clicked()
                            {
                                action = Some(UiAction::Clear);
                            }
                        });
                    }
                });
            });

        if let Some(primary) = primary {
            ui.add_space(16.0);
            let fill = if primary.enabled { ACCENT } else { ACCENT_MUTED };
            let button = egui::Button::new(
                egui::RichText::new(primary.label)
                    .strong()
                    .color(egui::Color32::WHITE),
            )
            .fill(fill)
            .min_size(egui::vec2(ui.available_width(), 42.0));

            ui.horizontal(|ui| {
                if primary.busy {
                    ui.spinner();
                }
                if ui.add_enabled(primary.enabled, button).clicked() {
                    action = Some(UiAction::Submit);
                }
            });
        }

        action
    }

    fn show_success_panel(&self, ui: &mut egui::Ui, panel: &SuccessPanel) -> Option<UiAction> {
        let mut action = None;

        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new("✔").size(40.0).color(SUCCESS_GREEN));
            ui.label(egui::RichText::new(SUCCESS_TITLE).size(20.0).strong());
            ui.label(egui::RichText::new(SUCCESS_BODY).weak());
            ui.add_space(16.0);

            let download = egui::Button::new(
                egui::RichText::new(format!("⬇ {DOWNLOAD_LABEL}"))
                    .strong()
                    .color(egui::Color32::WHITE),
            )
            .fill(SUCCESS_GREEN)
            .min_size(egui::vec2(ui.available_width(), 42.0));
            if ui
                .add(download)
                .on_hover_text(&panel.download_url)
                .clicked()
            {
                action = Some(UiAction::Download(panel.download_url.clone()));
            }

            ui.add_space(8.0);
            if ui.link(PROCESS_ANOTHER_LABEL).clicked() {
                action = Some(UiAction::ProcessAnother);
            }
        });

        action
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(&self.state.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(egui::RichText::new(&self.base_url).weak());
                });
            });
        });
    }
}

fn show_error_banner(ui: &mut egui::Ui, message: &str) {
    egui::Frame::new()
        .fill(egui::Color32::from_rgb(254, 242, 242))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(254, 202, 202)))
        .corner_radius(8_u8)
        .inner_margin(egui::Margin::symmetric(12, 10))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new("⚠").color(egui::Color32::from_rgb(185, 28, 28)));
                ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(185, 28, 28)));
            });
        });
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.handle_dropped_files(ctx);
        self.show_status_bar(ctx);

        let view = SessionView::from_session(&self.state.session);
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(12.0);
            self.show_header(ui);
            ui.add_space(24.0);

            if view.show_drop_zone {
                action = action.take().or(self.show_drop_zone(ui, ctx));
            }
            if let Some(card) = &view.file_card {
                action = action.take().or(self.show_file_card(ui, card, view.primary_action));
            }
            if let Some(panel) = &view.success {
                action = action.take().or(self.show_success_panel(ui, panel));
            }
            if let Some(message) = &view.error_banner {
                ui.add_space(16.0);
                show_error_banner(ui, message);
            }
        });

        if let Some(action) = action {
            self.apply_action(ctx, action);
        }

        let repaint_after = if view.status.is_in_flight() || self.state.loading_document.is_some()
        {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(250)
        };
        ctx.request_repaint_after(repaint_after);
    }
}
