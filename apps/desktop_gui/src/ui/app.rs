use std::time::Duration;

use browser_core::{Directory, MediaLoadState, UserBrowser, VIDEO_LOAD_ERROR_MESSAGE};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{UserId, UserRecord},
    error::FIELD_REQUIRED_MESSAGE,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::theme::{lighten_color, visuals_for_palette, BrowserPalette};

const LIST_HEIGHT: f32 = 370.0;
const ROW_HEADER_HEIGHT: f32 = 64.0;
const AVATAR_RADIUS: f32 = 22.0;
const PLAY_BUTTON_SIZE: f32 = 44.0;
const REPOSITORY_URL: &str = "https://github.com/your-repo";

fn ui_in_rect(ui: &mut egui::Ui, rect: egui::Rect, add: impl FnOnce(&mut egui::Ui)) {
    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(rect)
            .layout(egui::Layout::top_down(egui::Align::Min)),
    );
    child.set_clip_rect(rect);
    add(&mut child);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

pub struct UserBrowserApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    browser: UserBrowser,

    status: String,
    status_banner: Option<StatusBanner>,

    palette: BrowserPalette,
    visuals_applied: bool,
    focus_intake_field: bool,
}

impl UserBrowserApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        directory: Directory,
    ) -> Self {
        let status = format!("{} users loaded", directory.len());
        Self {
            cmd_tx,
            ui_rx,
            browser: UserBrowser::new(directory),
            status,
            status_banner: None,
            palette: BrowserPalette::default(),
            visuals_applied: false,
            focus_intake_field: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::VideoReady { session } => {
                    if self.browser.video_loaded(session) {
                        self.status = "Video ready".to_string();
                    }
                }
                UiEvent::VideoFailed { session, reason } => {
                    if self.browser.video_failed(session, reason) {
                        self.status = VIDEO_LOAD_ERROR_MESSAGE.to_string();
                    }
                }
                UiEvent::IntakeAccepted { discord_id } => {
                    self.status = format!("Submitted entry for {discord_id}");
                }
                UiEvent::Error(err) => {
                    self.show_error(err);
                }
            }
        }
    }

    fn show_error(&mut self, err: UiError) {
        tracing::warn!(context = ?err.context(), category = ?err.category(), "{}", err.message());
        self.status = err.message().to_string();
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message: err.banner_text(),
        });
    }

    fn apply_visuals_if_needed(&mut self, ctx: &egui::Context) {
        if self.visuals_applied {
            return;
        }
        ctx.set_visuals(visuals_for_palette(self.palette));
        self.visuals_applied = true;
    }

    // List actions are inert while a modal covers the list.
    fn toggle_user(&mut self, id: &UserId) {
        if self.browser.dialog_open() {
            return;
        }
        self.browser.click_record(id);
    }

    fn play_user(&mut self, id: &UserId) {
        if self.browser.dialog_open() {
            return;
        }
        match self.browser.play(id) {
            Ok(request) => {
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::ProbeVideo {
                        session: request.session,
                        url: request.url,
                    },
                    &mut self.status,
                );
            }
            Err(err) => {
                self.show_error(UiError::from_message(
                    UiErrorContext::PlayVideo,
                    err.to_string(),
                ));
            }
        }
    }

    fn retry_video(&mut self) {
        if let Some(request) = self.browser.retry_overlay() {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::ProbeVideo {
                    session: request.session,
                    url: request.url,
                },
                &mut self.status,
            );
        }
    }

    fn open_current_video_externally(&mut self) {
        if let Some(url) = self.browser.overlay().current_url().map(str::to_string) {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::OpenExternal { url },
                &mut self.status,
            );
        }
    }

    fn open_intake(&mut self) {
        if self.browser.dialog_open() {
            return;
        }
        self.browser.open_intake();
        self.focus_intake_field = true;
    }

    fn submit_intake(&mut self) {
        match self.browser.submit_intake() {
            Ok(submission) => {
                dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::SubmitIntake { submission },
                    &mut self.status,
                );
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
        }
    }

    fn show_search_bar(&mut self, ui: &mut egui::Ui) {
        egui::Frame::NONE
            .fill(self.palette.surface)
            .corner_radius(10.0)
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let add_width = 48.0;
                    let mut term = self.browser.search_term().to_string();
                    let edit = egui::TextEdit::singleline(&mut term)
                        .id_salt("user_search")
                        .hint_text(
                            egui::RichText::new("Search users by name or ID...")
                                .color(self.palette.weak_text),
                        )
                        .font(egui::FontId::proportional(18.0))
                        .frame(false)
                        .desired_width(f32::INFINITY);
                    let response = ui.add_sized(
                        [ui.available_width() - add_width - 8.0, 44.0],
                        edit,
                    );
                    if response.changed() {
                        self.browser.set_search(term);
                    }

                    let add = egui::Button::new(egui::RichText::new("+").size(22.0).strong())
                        .min_size(egui::vec2(add_width, 44.0))
                        .fill(self.palette.row_hover)
                        .corner_radius(egui::CornerRadius::same(6));
                    if ui.add(add).on_hover_text("Add new user").clicked() {
                        self.open_intake();
                    }
                });
            });
    }

    fn show_user_list(&mut self, ui: &mut egui::Ui) {
        let records: Vec<UserRecord> = self
            .browser
            .visible_records()
            .into_iter()
            .cloned()
            .collect();

        egui::Frame::NONE
            .fill(self.palette.surface)
            .corner_radius(10.0)
            .inner_margin(egui::Margin::same(14))
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("user_list_scroll")
                    .min_scrolled_height(LIST_HEIGHT)
                    .max_height(LIST_HEIGHT)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        if records.is_empty() {
                            ui.add_space(12.0);
                            ui.vertical_centered(|ui| {
                                ui.label(egui::RichText::new("No users found.").size(15.0));
                            });
                            return;
                        }
                        for record in &records {
                            self.render_user_row(ui, record);
                        }
                    });
            });
    }

    fn expanded_row_height(&self, ui: &egui::Ui, record: &UserRecord, inner_width: f32) -> f32 {
        let reason = ui.painter().layout(
            record.reason_or_default().to_string(),
            egui::FontId::proportional(13.0),
            self.palette.text,
            (inner_width - 24.0).max(40.0),
        );
        let mut height = ROW_HEADER_HEIGHT + 16.0 + 22.0 + 8.0 + reason.size().y + 16.0;
        if record.playable_video().is_some() {
            height += PLAY_BUTTON_SIZE + 12.0;
        }
        height
    }

    fn render_user_row(&mut self, ui: &mut egui::Ui, record: &UserRecord) {
        let expanded = self.browser.is_expanded(&record.id);
        let width = ui.available_width();
        let height = if expanded {
            self.expanded_row_height(ui, record, width)
        } else {
            ROW_HEADER_HEIGHT
        };

        let (row_rect, row_resp) =
            ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::click());
        let hovered = ui.rect_contains_pointer(row_rect);

        let row_fill = if expanded {
            self.palette.row_active
        } else if hovered {
            self.palette.row_hover
        } else {
            egui::Color32::TRANSPARENT
        };
        if row_fill != egui::Color32::TRANSPARENT {
            ui.painter()
                .rect_filled(row_rect, egui::CornerRadius::same(6), row_fill);
        }
        if expanded {
            ui.painter().rect_stroke(
                row_rect,
                egui::CornerRadius::same(6),
                egui::Stroke::new(1.0, self.palette.row_stroke_active),
                egui::StrokeKind::Inside,
            );
        }

        let header = egui::Rect::from_min_size(row_rect.min, egui::vec2(width, ROW_HEADER_HEIGHT));
        self.paint_avatar(ui, header, record);

        let mut play_clicked = false;
        let inner = row_rect.shrink2(egui::vec2(12.0, 0.0));
        ui_in_rect(ui, inner, |ui| {
            ui.spacing_mut().item_spacing = egui::vec2(8.0, 4.0);

            let name_rect = egui::Rect::from_min_max(
                egui::pos2(header.left() + 12.0 + AVATAR_RADIUS * 2.0 + 16.0, header.top()),
                egui::pos2(header.right() - 12.0, header.bottom()),
            );
            ui_in_rect(ui, name_rect, |ui| {
                ui.with_layout(
                    egui::Layout::left_to_right(egui::Align::Center)
                        .with_cross_justify(true),
                    |ui| {
                        ui.label(
                            egui::RichText::new(record.truncated_name())
                                .size(17.0)
                                .color(self.palette.text),
                        )
                        .on_hover_text(&record.name);

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            egui::Frame::NONE
                                .fill(self.palette.badge_fill)
                                .stroke(egui::Stroke::new(1.0, self.palette.badge_stroke))
                                .corner_radius(4.0)
                                .inner_margin(egui::Margin::symmetric(4, 2))
                                .show(ui, |ui| {
                                    ui.label(
                                        egui::RichText::new(record.id.as_str())
                                            .size(11.0)
                                            .monospace()
                                            .color(self.palette.text),
                                    );
                                });
                        });
                    },
                );
            });

            if !expanded {
                return;
            }

            let detail_rect = egui::Rect::from_min_max(
                egui::pos2(inner.left(), header.bottom() + 8.0),
                inner.max,
            );
            ui_in_rect(ui, detail_rect, |ui| {
                egui::Frame::NONE
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new("Reason")
                                .size(17.0)
                                .strong()
                                .color(self.palette.text),
                        );
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(record.reason_or_default())
                                    .size(13.0)
                                    .color(self.palette.text),
                            )
                            .wrap(),
                        );
                    });

                if record.playable_video().is_some() {
                    ui.vertical_centered(|ui| {
                        let play = egui::Button::new(
                            egui::RichText::new("▶").size(18.0).color(self.palette.text),
                        )
                        .min_size(egui::vec2(PLAY_BUTTON_SIZE, PLAY_BUTTON_SIZE))
                        .fill(self.palette.control_fill)
                        .corner_radius(egui::CornerRadius::same(u8::MAX));
                        if ui.add(play).on_hover_text("Play clip").clicked() {
                            play_clicked = true;
                        }
                    });
                }
            });
        });

        // The play control sits inside the row; its click must not toggle expansion.
        if play_clicked {
            self.play_user(&record.id);
        } else if row_resp.clicked() {
            self.toggle_user(&record.id);
        }

        ui.add_space(10.0);
    }

    fn paint_avatar(&self, ui: &egui::Ui, header: egui::Rect, record: &UserRecord) {
        let center = egui::pos2(header.left() + 12.0 + AVATAR_RADIUS, header.center().y);
        ui.painter().circle_filled(
            center,
            AVATAR_RADIUS,
            lighten_color(self.palette.control_fill, 0.06),
        );
        let initial = record
            .avatar_initial()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default();
        ui.painter().text(
            center,
            egui::Align2::CENTER_CENTER,
            initial,
            egui::FontId::proportional(18.0),
            self.palette.text,
        );
    }

    fn show_video_overlay(&mut self, ctx: &egui::Context) {
        let Some(session) = self.browser.overlay().session().cloned() else {
            return;
        };

        let mut close = false;
        let mut retry = false;
        let mut open_external = false;

        let modal = egui::Modal::new(egui::Id::new("video_overlay")).show(ctx, |ui| {
            ui.set_width(520.0);
            Self::modal_title(ui, "Play Option", &mut close);

            egui::Frame::NONE
                .fill(self.palette.app_background)
                .corner_radius(6.0)
                .inner_margin(egui::Margin::same(12))
                .show(ui, |ui| {
                    ui.set_min_size(egui::vec2(480.0, 200.0));
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        match &session.load {
                            MediaLoadState::Pending => {
                                ui.add(egui::Spinner::new().size(28.0));
                                ui.label("Loading video...");
                            }
                            MediaLoadState::Ready => {
                                ui.label(egui::RichText::new("▶").size(40.0));
                                if ui.button("Open in player").clicked() {
                                    open_external = true;
                                }
                            }
                            MediaLoadState::Failed(_) => {
                                ui.label(egui::RichText::new("⚠").size(32.0));
                            }
                        }
                    });
                });

            ui.add_space(6.0);
            ui.hyperlink_to(
                egui::RichText::new(&session.video_url)
                    .small()
                    .color(self.palette.weak_text),
                &session.video_url,
            );

            if let MediaLoadState::Failed(reason) = &session.load {
                ui.add_space(6.0);
                ui.colored_label(self.palette.error_text, VIDEO_LOAD_ERROR_MESSAGE);
                ui.small(egui::RichText::new(reason).color(self.palette.weak_text));
                if ui.button("Retry").clicked() {
                    retry = true;
                }
            }
        });

        if close || modal.should_close() {
            self.browser.close_overlay();
        } else if retry {
            self.retry_video();
        } else if open_external {
            self.open_current_video_externally();
        }
    }

    fn modal_title(ui: &mut egui::Ui, title: &str, close: &mut bool) {
        ui.horizontal(|ui| {
            ui.heading(title);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Close").clicked() {
                    *close = true;
                }
            });
        });
        ui.separator();
    }

    fn intake_text_field(
        ui: &mut egui::Ui,
        id: &'static str,
        label: &str,
        value: &mut String,
        should_focus: bool,
    ) -> egui::Response {
        ui.label(egui::RichText::new(label).strong());
        let edit = egui::TextEdit::singleline(value)
            .id_salt(id)
            .desired_width(f32::INFINITY);
        let response = ui.add_sized([ui.available_width(), 32.0], edit);
        if should_focus {
            response.request_focus();
        }
        response
    }

    fn show_intake_window(&mut self, ctx: &egui::Context) {
        if !self.browser.intake().is_open() {
            return;
        }

        let mut close = false;
        let mut submit = false;
        let focus = std::mem::take(&mut self.focus_intake_field);
        let error_color = self.palette.error_text;

        let modal = egui::Modal::new(egui::Id::new("intake_form")).show(ctx, |ui| {
            ui.set_width(420.0);
            Self::modal_title(ui, "Add New User", &mut close);
            ui.spacing_mut().item_spacing = egui::vec2(8.0, 8.0);
            let form = self.browser.intake_mut();

            let id_resp = Self::intake_text_field(
                ui,
                "intake_discord_id",
                "Discord ID",
                &mut form.discord_id,
                focus,
            );
            if id_resp.changed() {
                form.revalidate();
            }
            if form.errors().discord_id {
                ui.colored_label(error_color, FIELD_REQUIRED_MESSAGE);
            }

            let reason_resp =
                Self::intake_text_field(ui, "intake_reason", "Reason", &mut form.reason, false);
            if reason_resp.changed() {
                form.revalidate();
            }
            if form.errors().reason {
                ui.colored_label(error_color, FIELD_REQUIRED_MESSAGE);
            }

            ui.checkbox(&mut form.clip, "Clip");

            let enter_pressed = ctx.input(|i| i.key_pressed(egui::Key::Enter));
            if enter_pressed && (id_resp.lost_focus() || reason_resp.lost_focus()) {
                submit = true;
            }

            ui.add_space(8.0);
            let button = egui::Button::new(egui::RichText::new("Submit").strong())
                .min_size(egui::vec2(ui.available_width(), 36.0));
            if ui.add(button).clicked() {
                submit = true;
            }
        });

        if close || modal.should_close() {
            self.browser.close_intake();
        } else if submit {
            self.submit_intake();
        }
    }

    fn show_footer(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.hyperlink_to(
                egui::RichText::new("GitHub").size(14.0).color(self.palette.text),
                REPOSITORY_URL,
            );
            ui.small(egui::RichText::new(&self.status).color(self.palette.weak_text));
        });
    }

    fn show_main_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::NONE
                    .fill(self.palette.app_background)
                    .inner_margin(egui::Margin::symmetric(16, 32)),
            )
            .show(ctx, |ui| {
                let avail = ui.available_size();
                let column_width = (avail.x * 0.5).clamp(360.0, 640.0).min(avail.x);
                ui.vertical_centered(|ui| {
                    ui.set_max_width(column_width);
                    self.show_status_banner(ui);
                    self.show_search_bar(ui);
                    ui.add_space(8.0);
                    self.show_user_list(ui);
                    ui.add_space(24.0);
                    self.show_footer(ui);
                });
            });
    }
}

impl eframe::App for UserBrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_visuals_if_needed(ctx);

        self.show_main_view(ctx);
        self.show_video_overlay(ctx);
        self.show_intake_window(ctx);

        let waiting_on_video = matches!(
            self.browser.overlay().session().map(|s| &s.load),
            Some(MediaLoadState::Pending)
        );
        if waiting_on_video {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
