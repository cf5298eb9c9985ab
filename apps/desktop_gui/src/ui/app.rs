//! The form app shell: widgets on the left of the trigger, the display
//! area under it, and the worker bridge that fetches what the form asks
//! for.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::TextureHandle;
use reqwest::Client as HttpClient;
use shared::display::{DisplayState, FontSizeReadout};
use shared::form::{capture_snapshot, FormFields};
use shared::query::{build_image_uri, DEFAULT_FONT_SIZE};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

const IMAGE_FADE_SECONDS: f32 = 0.4;
const IMAGE_TYPES: [&str; 3] = ["jpg", "png", "gif"];

/// A decoded response ready for texture upload on the UI thread.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub struct LoremFormApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    server_url: String,

    width_input: String,
    height_input: String,
    text_input: String,
    font_size: u32,
    font_size_readout: FontSizeReadout,
    has_property: bool,
    image_type: Option<&'static str>,

    display: DisplayState,
    preview: Option<PreviewImage>,
    texture: Option<TextureHandle>,
    load_error: Option<String>,
    fetch_in_flight: bool,

    status: String,
}

impl LoremFormApp {
    pub fn new(server_url: String, cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url,
            width_input: String::new(),
            height_input: String::new(),
            text_input: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            font_size_readout: FontSizeReadout::new(),
            has_property: false,
            image_type: None,
            display: DisplayState::default(),
            preview: None,
            texture: None,
            load_error: None,
            fetch_in_flight: false,
            status: String::new(),
        }
    }

    /// The trigger action: hide the old image, read the form once, queue
    /// the fetch for the assembled request.
    fn trigger_create(&mut self) {
        self.display.begin_reload();
        self.texture = None;
        self.preview = None;
        self.load_error = None;

        let snapshot = capture_snapshot(self);
        let uri = build_image_uri(&snapshot);
        self.fetch_in_flight = true;
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchImage { uri },
            &mut self.status,
        );
    }

    fn sync_font_size_readout(&mut self) {
        let value = self.font_size.to_string();
        self.font_size_readout.on_input(&value);
    }

    fn drain_backend_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::ImageReady { uri, image } => {
                    self.fetch_in_flight = false;
                    self.load_error = None;
                    self.preview = Some(image);
                    self.texture = None;
                    self.display.reveal(uri);
                }
                UiEvent::ImageFailed { reason } => {
                    self.fetch_in_flight = false;
                    self.load_error = Some(reason);
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
            }
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("lorem-form")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("width");
                ui.text_edit_singleline(&mut self.width_input);
                ui.end_row();

                ui.label("height");
                ui.text_edit_singleline(&mut self.height_input);
                ui.end_row();

                ui.label("font size");
                ui.horizontal(|ui| {
                    let response =
                        ui.add(egui::Slider::new(&mut self.font_size, 8..=72).show_value(false));
                    if response.changed() {
                        self.sync_font_size_readout();
                    }
                    ui.monospace(self.font_size_readout.text());
                });
                ui.end_row();

                ui.label("text");
                ui.text_edit_singleline(&mut self.text_input);
                ui.end_row();

                ui.label("size caption");
                ui.checkbox(&mut self.has_property, "print dimensions on the image");
                ui.end_row();

                ui.label("type");
                ui.horizontal(|ui| {
                    for value in IMAGE_TYPES {
                        if ui.radio(self.image_type == Some(value), value).clicked() {
                            self.image_type = Some(value);
                        }
                    }
                });
                ui.end_row();
            });
    }

    fn show_display_area(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        // While hidden the fade snaps to zero, so every reveal starts dark.
        let fade_id = egui::Id::new("display-fade");
        let alpha = if self.display.visible_uri().is_some() {
            ctx.animate_bool_with_time(fade_id, true, IMAGE_FADE_SECONDS)
        } else {
            ctx.animate_bool_with_time(fade_id, false, 0.0)
        };

        match &self.display {
            DisplayState::Empty => {}
            DisplayState::Hidden => {
                if let Some(reason) = &self.load_error {
                    ui.label(format!("image failed to load: {reason}"));
                } else {
                    ui.add(egui::Spinner::new());
                }
            }
            DisplayState::ShowingImage(uri) => {
                if self.texture.is_none() {
                    if let Some(preview) = &self.preview {
                        let color_image = egui::ColorImage::from_rgba_unmultiplied(
                            [preview.width as usize, preview.height as usize],
                            &preview.rgba,
                        );
                        self.texture = Some(ctx.load_texture(
                            "lorem-preview",
                            color_image,
                            egui::TextureOptions::LINEAR,
                        ));
                    }
                }

                ui.monospace(uri);
                if let Some(texture) = &self.texture {
                    let [w, h] = texture.size();
                    let tint = egui::Color32::WHITE.gamma_multiply(alpha);
                    egui::ScrollArea::both().show(ui, |ui| {
                        ui.add(
                            egui::Image::new(texture)
                                .fit_to_exact_size(egui::vec2(w as f32, h as f32))
                                .tint(tint),
                        );
                    });
                }
            }
        }
    }
}

impl FormFields for LoremFormApp {
    fn width(&self) -> String {
        self.width_input.clone()
    }

    fn height(&self) -> String {
        self.height_input.clone()
    }

    fn font_size(&self) -> String {
        self.font_size.to_string()
    }

    fn text(&self) -> String {
        self.text_input.clone()
    }

    fn has_property(&self) -> bool {
        self.has_property
    }

    fn image_type(&self) -> Option<String> {
        self.image_type.map(str::to_string)
    }
}

impl eframe::App for LoremFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_backend_events();
        if self.fetch_in_flight {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Placeholder image");
            ui.weak(format!("service: {}", self.server_url));
            ui.add_space(8.0);

            self.show_form(ui);
            ui.add_space(8.0);

            if ui.button("Create").clicked() {
                self.trigger_create();
            }
            if !self.status.is_empty() {
                ui.label(&self.status);
            }

            ui.separator();
            self.show_display_area(ctx, ui);
        });
    }
}

pub fn start_backend_bridge(
    server_url: String,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::ImageFailed {
                    reason: format!("failed to build worker runtime: {err}"),
                });
                tracing::error!("failed to build worker runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let http = HttpClient::new();
            let _ = ui_tx.try_send(UiEvent::Info("image worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::FetchImage { uri } => {
                        let event = match fetch_image_bytes(&http, &server_url, &uri).await {
                            Ok(bytes) => match decode_preview_image(&bytes) {
                                Ok(image) => UiEvent::ImageReady { uri, image },
                                Err(reason) => UiEvent::ImageFailed { reason },
                            },
                            Err(reason) => UiEvent::ImageFailed { reason },
                        };
                        let _ = ui_tx.try_send(event);
                    }
                }
            }
        });
    });
}

async fn fetch_image_bytes(
    http: &HttpClient,
    server_url: &str,
    uri: &str,
) -> Result<Vec<u8>, String> {
    let response = http
        .get(format!("{server_url}{uri}"))
        .send()
        .await
        .map_err(|err| format!("failed to reach image endpoint: {err}"))?
        .error_for_status()
        .map_err(|err| format!("image endpoint returned error: {err}"))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|err| format!("failed to read image bytes: {err}"))?;
    Ok(bytes.to_vec())
}

pub fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let decoded =
        image::load_from_memory(bytes).map_err(|err| format!("failed to decode image: {err}"))?;
    let rgba = decoded.to_rgba8();
    Ok(PreviewImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}
