//! One method per page of the flow. Chart pages draw through
//! [`EegCloudApp::paint_chart`]; form pages only touch the mock auth layer.

use chrono::NaiveDate;
use eframe::egui;
use eeg_cloud_core::auth::{Gender, LoginRequest, UserInfoPatch, authenticate, demo_login};
use eeg_cloud_core::history::Granularity;
use eeg_cloud_core::history::panel::{MAX_YEAR, MIN_YEAR};
use eeg_cloud_core::views;

use crate::app::{EegCloudApp, GlyphSource, Page};
use crate::theme::FONT_DISPLAY;

const FORM_WIDTH: f32 = 320.0;
const VIDEO_HEIGHT: f32 = 180.0;

fn error_line(ui: &mut egui::Ui, error: &Option<String>) {
    if let Some(err) = error {
        ui.colored_label(ui.visuals().error_fg_color, err.as_str());
    }
}

fn field(ui: &mut egui::Ui, label: &str, value: &mut String, password: bool) -> egui::Response {
    ui.label(label);
    ui.add(
        egui::TextEdit::singleline(value)
            .password(password)
            .desired_width(FORM_WIDTH),
    )
}

impl EegCloudApp {
    pub(crate) fn welcome_page(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 4.0);
            ui.label(egui::RichText::new("Welcome to EEG Cloud").size(FONT_DISPLAY));
            ui.add_space(16.0);
            if ui.button("Log In").clicked() {
                self.go(Page::Login);
            }
            if ui.link("Create an account").clicked() {
                self.go(Page::Signup);
            }
        });
    }

    pub(crate) fn login_page(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.set_max_width(FORM_WIDTH);
            ui.heading("Log In");
            error_line(ui, &self.login.error);
            field(ui, "Email or Username", &mut self.login.identifier, false);
            let pw = field(ui, "Password", &mut self.login.password, true);
            ui.checkbox(&mut self.login.use_demo_account, "Demo account");

            let submitted = ui.button("Log In").clicked()
                || (pw.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)));
            if submitted {
                let identifier = self.login.identifier.trim().to_string();
                let result = if self.login.use_demo_account {
                    demo_login(&identifier, &self.login.password)
                } else {
                    authenticate(&LoginRequest {
                        identifier: identifier.clone(),
                        password: self.login.password.clone(),
                    })
                    .map(|resp| log::debug!("token expires in {}s", resp.expires_in))
                };
                self.login.password.clear();
                match result {
                    Ok(()) => {
                        self.login.error = None;
                        self.user = Some(identifier);
                        self.go(Page::Charts);
                    }
                    Err(e) => self.login.error = Some(e.to_string()),
                }
            }
            if ui.link("No account? Sign up").clicked() {
                self.go(Page::Signup);
            }
        });
    }

    pub(crate) fn signup_page(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.set_max_width(FORM_WIDTH);
            ui.heading("Create Account");
            error_line(ui, &self.signup.submit_error);

            let email = field(ui, "Email", &mut self.signup.form.email, false);
            if email.lost_focus() {
                self.signup.email_error = match self.signup.form.email.trim() {
                    "" => None,
                    text => self.directory.check_email(text).err().map(|e| e.to_string()),
                };
            }
            error_line(ui, &self.signup.email_error);

            let username = field(ui, "Username", &mut self.signup.form.username, false);
            if username.lost_focus() {
                self.signup.username_error = match self.signup.form.username.trim() {
                    "" => None,
                    text => self.directory.check_username(text).err().map(|e| e.to_string()),
                };
            }
            error_line(ui, &self.signup.username_error);

            field(ui, "Password", &mut self.signup.form.password, true);
            field(ui, "Confirm password", &mut self.signup.form.confirm, true);

            if ui.button("Sign Up").clicked() {
                match self.directory.signup(&self.signup.form) {
                    Ok(()) => {
                        self.user = Some(self.signup.form.username.trim().to_string());
                        self.signup = Default::default();
                        self.go(Page::Participant);
                    }
                    Err(e) => self.signup.submit_error = Some(e.to_string()),
                }
            }
            if ui.link("Already have an account? Log in").clicked() {
                self.go(Page::Login);
            }
        });
    }

    pub(crate) fn participant_page(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.set_max_width(FORM_WIDTH);
            ui.heading("Participant information");
            error_line(ui, &self.participant.error);

            let p = &mut self.participant;
            field(ui, "First name", &mut p.first_name, false);
            field(ui, "Last name", &mut p.last_name, false);
            ui.label("Birth date (YYYY-MM-DD)");
            ui.add(egui::TextEdit::singleline(&mut p.birth_date).desired_width(FORM_WIDTH));
            egui::ComboBox::from_id_salt("gender")
                .selected_text(p.gender.label())
                .show_ui(ui, |ui| {
                    for g in Gender::ALL {
                        ui.selectable_value(&mut p.gender, g, g.label());
                    }
                });

            if ui.button("Save").clicked() {
                let birth_date = match p.birth_date.trim() {
                    "" => Ok(None),
                    text => NaiveDate::parse_from_str(text, "%Y-%m-%d").map(Some),
                };
                match birth_date {
                    Ok(birth_date) => {
                        p.info.apply(UserInfoPatch {
                            first_name: Some(p.first_name.trim().to_string()),
                            last_name: Some(p.last_name.trim().to_string()),
                            birth_date,
                            gender: Some(p.gender),
                        });
                        p.error = None;
                        p.saved = true;
                        log::info!("participant info saved (complete: {})", p.info.is_complete());
                    }
                    Err(_) => p.error = Some("Birth date must be YYYY-MM-DD".into()),
                }
            }
            if p.saved {
                ui.label("Saved.");
            }
            if ui.button("Continue to charts").clicked() {
                self.go(Page::Charts);
            }
        });
    }

    pub(crate) fn charts_page(&mut self, ui: &mut egui::Ui) {
        let width = ui.available_width();
        let (rect, _) =
            ui.allocate_exact_size(egui::vec2(width, VIDEO_HEIGHT), egui::Sense::hover());
        ui.painter()
            .rect_filled(rect, egui::CornerRadius::same(4), ui.visuals().extreme_bg_color);
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "Video placeholder",
            egui::FontId::proportional(14.0),
            ui.visuals().weak_text_color(),
        );
        ui.add_space(12.0);
        self.line_chart(ui);
        ui.separator();
        self.radar_chart(ui);
    }

    pub(crate) fn glyph_page(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("glyph_source")
                .selected_text(match self.glyph_source {
                    GlyphSource::Series => "One channel over time",
                    GlyphSource::Sample => "All channels at one second",
                })
                .show_ui(ui, |ui| {
                    ui.selectable_value(
                        &mut self.glyph_source,
                        GlyphSource::Series,
                        "One channel over time",
                    );
                    ui.selectable_value(
                        &mut self.glyph_source,
                        GlyphSource::Sample,
                        "All channels at one second",
                    );
                });
            match self.glyph_source {
                GlyphSource::Series => {
                    let names: Vec<String> =
                        self.radar_data.channel_names().map(str::to_string).collect();
                    egui::ComboBox::from_id_salt("glyph_channel")
                        .selected_text(self.glyph_channel.as_str())
                        .show_ui(ui, |ui| {
                            for name in names {
                                let label = name.clone();
                                ui.selectable_value(&mut self.glyph_channel, name, label);
                            }
                        });
                }
                GlyphSource::Sample => {
                    let last = self.radar_data.len().saturating_sub(1);
                    ui.label("Second");
                    ui.add(egui::DragValue::new(&mut self.glyph_sample).range(0..=last));
                    for (name, on) in &mut self.glyph_dims {
                        ui.checkbox(on, name.as_str());
                    }
                }
            }
        });

        match self.glyph() {
            Some(glyph) if !glyph.is_empty() => {
                let size = self.config.glyph_size as f32;
                self.paint_chart(ui, size, |vp| views::render_star_glyph(&glyph, vp));
            }
            _ => {
                self.last_chart = None;
                ui.label("Nothing to draw for this selection.");
            }
        }
    }

    pub(crate) fn history_page(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut granularity = self.history.granularity();
            egui::ComboBox::from_id_salt("granularity")
                .selected_text(granularity.label())
                .show_ui(ui, |ui| {
                    for g in Granularity::ALL {
                        ui.selectable_value(&mut granularity, g, g.label());
                    }
                });
            if granularity != self.history.granularity() {
                self.set_granularity(granularity);
            }

            let c = &mut self.history_controls;
            let result = match granularity {
                Granularity::Year => {
                    let r = ui.add(egui::DragValue::new(&mut c.year).range(MIN_YEAR..=MAX_YEAR));
                    r.changed().then(|| self.history.set_year(c.year))
                }
                Granularity::Month => {
                    let y = ui.add(egui::DragValue::new(&mut c.year).range(MIN_YEAR..=MAX_YEAR));
                    let m = ui.add(egui::DragValue::new(&mut c.month).range(1..=12));
                    (y.changed() || m.changed()).then(|| self.history.set_month(c.year, c.month))
                }
                Granularity::Week => {
                    let y = ui.add(egui::DragValue::new(&mut c.year).range(MIN_YEAR..=MAX_YEAR));
                    ui.label("Week");
                    let w = ui.add(egui::DragValue::new(&mut c.week).range(1..=53));
                    (y.changed() || w.changed()).then(|| self.history.set_iso_week(c.year, c.week))
                }
                Granularity::Day => {
                    let r = ui.add(egui::TextEdit::singleline(&mut c.date_text).desired_width(100.0));
                    (r.lost_focus() || ui.button("Go").clicked())
                        .then(|| self.history.set_date_str(&c.date_text))
                }
            };
            if let Some(result) = result {
                c.error = result.err().map(|e| e.to_string());
            }

            if ui.button("Reshuffle").clicked() {
                self.history.reshuffle();
            }
            if ui.button("Back to year").clicked() {
                self.set_granularity(Granularity::Year);
            }
        });
        error_line(ui, &self.history_controls.error);

        self.history_chart(ui);

        match self.history.session_summary() {
            Some(summary) => ui.label(summary),
            None if self.history.granularity() == Granularity::Day => {
                ui.label("Click a game to see its score.")
            }
            None => ui.label("Click a bar to drill down."),
        };
    }
}
