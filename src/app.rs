use crate::logic::CheckTrigger;
use crate::model::{Config, Host, HostStatus, StatusUpdate, grid_position};
use eframe::egui;
use eframe::egui::{Color32, RichText};
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;
use tr::tr;

/// Maximum number of hosts displayed in a row.
pub const COLUMN_LIMIT: usize = 5;
/// Size of the status indicator rectangle.
pub const STATUS_WIDTH: f32 = 100.0;
pub const STATUS_HEIGHT: f32 = 50.0;

/// Helper for application-specific colors adapted for light/dark themes.
struct StatusVisuals {
    pub is_dark: bool,
}

impl StatusVisuals {
    fn from_ctx(ctx: &egui::Context) -> Self {
        Self {
            is_dark: ctx.style().visuals.dark_mode,
        }
    }

    fn indicator_color(&self, status: HostStatus) -> Color32 {
        match status {
            HostStatus::Unknown => {
                if self.is_dark {
                    Color32::from_gray(115)
                } else {
                    Color32::from_gray(160)
                }
            }
            HostStatus::Reachable => {
                if self.is_dark {
                    Color32::from_rgb(0, 255, 100)
                } else {
                    Color32::from_rgb(0, 150, 0)
                }
            }
            HostStatus::Unreachable => {
                if self.is_dark {
                    Color32::RED
                } else {
                    Color32::from_rgb(200, 0, 0)
                }
            }
        }
    }
}

/// Transient widget state for the settings window. Created from the store
/// when the window opens, dropped on Cancel or successful Apply.
pub struct SettingsDialog {
    pub cycle_entry: String,
    pub count_entry: String,
    pub quiet: bool,
}

impl SettingsDialog {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cycle_entry: config.cycle_time().to_string(),
            count_entry: config.ping_count().to_string(),
            quiet: config.quiet(),
        }
    }
}

pub struct NetDash {
    hosts: Vec<Host>,
    /// Indicator state, one slot per host, bound by registry index for the
    /// lifetime of the session. Only the rendering thread writes here.
    statuses: Vec<HostStatus>,
    config: Arc<Config>,
    trigger: Arc<CheckTrigger>,
    updates: Receiver<StatusUpdate>,
    pub settings: Option<SettingsDialog>,
    error_popup: Option<String>,
    startup_errors: Option<String>,
    down_notices: Vec<String>,
}

/// One aggregated message for all configuration problems collected before
/// the dashboard existed.
pub fn aggregate_startup_errors(errors: &[String]) -> String {
    let mut message = tr!("Configuration file error(s):");
    for error in errors {
        message.push_str("\n\n");
        message.push_str(error);
    }
    message.push_str("\n\n");
    message.push_str(&tr!("Confirm settings in the configuration window."));
    message
}

impl NetDash {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: Arc<Config>,
        trigger: Arc<CheckTrigger>,
        updates: Receiver<StatusUpdate>,
        startup_errors: Vec<String>,
    ) -> Self {
        Self::from_parts(config, trigger, updates, startup_errors)
    }

    pub fn from_parts(
        config: Arc<Config>,
        trigger: Arc<CheckTrigger>,
        updates: Receiver<StatusUpdate>,
        startup_errors: Vec<String>,
    ) -> Self {
        let hosts = config.hosts().to_vec();
        let statuses = vec![HostStatus::default(); hosts.len()];
        let startup_errors =
            (!startup_errors.is_empty()).then(|| aggregate_startup_errors(&startup_errors));

        Self {
            hosts,
            statuses,
            config,
            trigger,
            updates,
            settings: None,
            error_popup: None,
            startup_errors,
            down_notices: Vec::new(),
        }
    }

    pub fn statuses(&self) -> &[HostStatus] {
        &self.statuses
    }

    /// Applies one check result to the matching indicator. Called only on
    /// the rendering thread, in the order the checker produced the results.
    pub fn apply_update(&mut self, update: StatusUpdate) {
        let Some(slot) = self.statuses.get_mut(update.host_id) else {
            tracing::warn!(host_id = update.host_id, "status update for unknown host");
            return;
        };

        let new_status = HostStatus::from_reachable(update.reachable);
        if *slot == HostStatus::Reachable
            && new_status == HostStatus::Unreachable
            && !self.config.quiet()
        {
            let host = &self.hosts[update.host_id];
            self.down_notices
                .push(format!("{} ({})", host.label, host.address));
        }
        *slot = new_status;
    }

    fn drain_updates(&mut self) {
        while let Ok(update) = self.updates.try_recv() {
            self.apply_update(update);
        }
    }

    pub fn ui_layout(&mut self, ctx: &egui::Context) {
        self.drain_updates();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button(tr!("File"), |ui| {
                    if ui.button(tr!("Configuration")).clicked() {
                        self.settings = Some(SettingsDialog::from_config(&self.config));
                        ui.close();
                    }
                    ui.separator();
                    if ui.button(tr!("Exit")).clicked() {
                        // Background workers are daemon-style, never joined
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                if ui.button(tr!("Refresh")).clicked() {
                    self.trigger.set();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.hosts.is_empty() {
                ui.label(tr!(
                    "No hosts configured. Add hosts to the configuration file and restart."
                ));
                return;
            }

            let visuals = StatusVisuals::from_ctx(ctx);
            egui::Grid::new("host_grid").spacing([16.0, 12.0]).show(ui, |ui| {
                for (idx, host) in self.hosts.iter().enumerate() {
                    if idx > 0 && grid_position(idx, COLUMN_LIMIT).1 == 0 {
                        ui.end_row();
                    }
                    let status = self.statuses[idx];
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&host.label).strong());
                        let (rect, _) = ui.allocate_exact_size(
                            egui::vec2(STATUS_WIDTH, STATUS_HEIGHT),
                            egui::Sense::hover(),
                        );
                        ui.painter()
                            .rect_filled(rect, 2.0, visuals.indicator_color(status));
                    });
                }
            });
        });

        self.settings_window(ctx);
        self.error_window(ctx);
        self.startup_errors_window(ctx);
        self.down_notices_window(ctx);
    }

    /// Non-exclusive settings window; the dashboard keeps updating behind it.
    fn settings_window(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &mut self.settings else {
            return;
        };

        let mut open = true;
        let mut apply_clicked = false;
        let mut cancel_clicked = false;

        egui::Window::new(tr!("Program Configuration"))
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("settings_grid").num_columns(2).show(ui, |ui| {
                    ui.label(tr!("Update Cycle Time (seconds):"));
                    ui.text_edit_singleline(&mut dialog.cycle_entry);
                    ui.end_row();

                    ui.label(tr!("Ping Count:"));
                    ui.text_edit_singleline(&mut dialog.count_entry);
                    ui.end_row();

                    ui.label(tr!("Quiet Mode:"));
                    ui.checkbox(&mut dialog.quiet, "");
                    ui.end_row();
                });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button(tr!("Apply")).clicked() {
                        apply_clicked = true;
                    }
                    if ui.button(tr!("Cancel")).clicked() {
                        cancel_clicked = true;
                    }
                });
            });

        if apply_clicked {
            self.apply_settings();
        } else if cancel_clicked || !open {
            // Cancel discards all edits, no side effects
            self.settings = None;
        }
    }

    /// Validates and commits the dialog input. On success the store is
    /// persisted on a detached worker and the window closes; on failure the
    /// window stays open so the user can correct the input.
    fn apply_settings(&mut self) {
        let Some(dialog) = &self.settings else {
            return;
        };

        match self
            .config
            .apply_settings(&dialog.cycle_entry, &dialog.count_entry, dialog.quiet)
        {
            Ok(()) => {
                let config = self.config.clone();
                std::thread::spawn(move || {
                    if let Err(err) = config.persist() {
                        tracing::error!("failed to persist configuration: {err}");
                    }
                });
                self.settings = None;
            }
            Err(err) => {
                tracing::error!("settings window: {err}");
                self.error_popup = Some(format!("{err}."));
            }
        }
    }

    fn error_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error_popup.clone() else {
            return;
        };

        let mut acknowledged = false;
        egui::Window::new(tr!("Error"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button(tr!("OK")).clicked() {
                    acknowledged = true;
                }
            });
        if acknowledged {
            self.error_popup = None;
        }
    }

    /// One-shot window with the aggregated startup errors. By the time the
    /// first frame runs the surface exists, so showing it here cannot race
    /// surface construction.
    fn startup_errors_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.startup_errors.clone() else {
            return;
        };

        let mut acknowledged = false;
        egui::Window::new(tr!("Error(s)"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button(tr!("OK")).clicked() {
                    acknowledged = true;
                }
            });
        if acknowledged {
            self.startup_errors = None;
        }
    }

    fn down_notices_window(&mut self, ctx: &egui::Context) {
        if self.down_notices.is_empty() {
            return;
        }

        let mut acknowledged = false;
        egui::Window::new(tr!("Host Down"))
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(tr!("Host(s) became unreachable:"));
                for notice in &self.down_notices {
                    ui.label(notice);
                }
                ui.add_space(8.0);
                if ui.button(tr!("OK")).clicked() {
                    acknowledged = true;
                }
            });
        if acknowledged {
            self.down_notices.clear();
        }
    }
}

impl eframe::App for NetDash {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_layout(ctx);
        ctx.request_repaint_after(Duration::from_millis(1000));
    }
}
