use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::dialogs::{
    ActiveDialog, CropDialog, DialogOutcome, ResizeDialog, RotateDialog, TransformRequest,
};
use crate::session::{EditSession, SessionState};
use crate::state::{
    Adjustments, BLUR_RANGE, BRIGHTNESS_RANGE, CONTRAST_RANGE, HIGHLIGHTS_RANGE,
    NOISE_REDUCTION_RANGE, SATURATION_RANGE, SHARPNESS_RANGE,
};
use crate::theme::{self, Theme};
use crate::{decode, preview};

/// Slider renders wait until the slider has been still this long.
const DEBOUNCE: Duration = Duration::from_millis(150);

pub struct TouchupApp {
    session: EditSession,
    /// Slider values as displayed; pushed into the session after debounce.
    adjustments: Adjustments,
    needs_render: bool,
    last_slider_change: Option<Instant>,
    texture: Option<egui::TextureHandle>,
    texture_dirty: bool,
    dialog: ActiveDialog,
    theme: Theme,
    open_path: String,
    save_path: String,
    status: String,
    config: AppConfig,
}

impl TouchupApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        Self::with_config(config)
    }

    fn with_config(config: AppConfig) -> Self {
        let open_path = config
            .last_open_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let save_path = config
            .last_save_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        Self {
            session: EditSession::new(),
            adjustments: Adjustments::default(),
            needs_render: false,
            last_slider_change: None,
            texture: None,
            texture_dirty: false,
            dialog: ActiveDialog::None,
            theme: config.theme,
            open_path,
            save_path,
            status: String::new(),
            config,
        }
    }

    fn load(&mut self, path: PathBuf) {
        self.flush_render();
        match self.session.load_path(&path) {
            Ok(()) => {
                let (w, h) = self.session.original().map_or((0, 0), |o| o.dimensions());
                self.status = format!("Opened {} ({} × {})", path.display(), w, h);
                self.open_path = path.display().to_string();
                self.config.last_open_path = Some(path);
                self.texture_dirty = true;
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn save(&mut self) {
        let typed = PathBuf::from(self.save_path.trim());
        if typed.as_os_str().is_empty() {
            self.status = "Save path is empty".to_string();
            return;
        }
        let path = decode::with_default_extension(&typed);
        self.save_path = path.display().to_string();
        // Flush a pending slider render so the saved file matches the sliders.
        self.flush_render();
        match self.session.save(&path) {
            Ok(()) => {
                self.status = format!("Saved {}", path.display());
                self.config.last_save_path = Some(path);
            }
            Err(err) => self.status = err.to_string(),
        }
    }

    fn flush_render(&mut self) {
        if self.needs_render {
            self.session.apply_parameters(self.adjustments);
            self.adjustments = *self.session.adjustments();
            self.needs_render = false;
            self.last_slider_change = None;
            self.texture_dirty = true;
        }
    }

    fn pick_open_path(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Open Image")
            .add_filter("Images", decode::supported_extensions());
        if let Some(dir) = parent_dir(self.config.last_open_path.as_deref()) {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.load(path);
        }
    }

    fn pick_save_path(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Save Image")
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .set_file_name("untitled.png");
        if let Some(dir) = parent_dir(self.config.last_save_path.as_deref()) {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.save_file() {
            self.save_path = path.display().to_string();
            self.save();
        }
    }

    fn apply_request(&mut self, request: TransformRequest) {
        self.run_transform(|session| match request {
            TransformRequest::Crop(rect) => {
                session.crop(rect.left, rect.upper, rect.right, rect.lower)
            }
            TransformRequest::Rotate(angle) => session.rotate(angle),
            TransformRequest::Resize { width, height } => session.resize(width, height),
        });
    }

    /// Flushes any pending slider render, then applies `op` to the session.
    fn run_transform(&mut self, op: impl FnOnce(&mut EditSession) -> bool) {
        self.flush_render();
        let applied = op(&mut self.session);
        self.after_transform(applied);
    }

    fn after_transform(&mut self, applied: bool) {
        if applied {
            self.texture_dirty = true;
            if let Some(img) = self.session.working() {
                self.status = format!("{} × {}", img.width(), img.height());
            }
        } else {
            self.status = "Invalid input; image unchanged".to_string();
        }
    }

    fn poll_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if let Some(path) = dropped.into_iter().find(|p| decode::is_supported_image(p)) {
            self.load(path);
        }
    }

    fn maybe_render(&mut self, ctx: &egui::Context) {
        if !self.needs_render {
            return;
        }
        let waited = self
            .last_slider_change
            .map(|t| t.elapsed())
            .unwrap_or(DEBOUNCE);
        if waited >= DEBOUNCE {
            self.flush_render();
        } else {
            ctx.request_repaint_after(DEBOUNCE - waited);
        }
    }

    fn refresh_texture(&mut self, ctx: &egui::Context) {
        if !self.texture_dirty {
            return;
        }
        self.texture_dirty = false;
        self.texture = self.session.rendered().map(|img| {
            ctx.load_texture(
                "rendered",
                preview::to_color_image(img),
                egui::TextureOptions::LINEAR,
            )
        });
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        let loaded = self.session.state() == SessionState::Loaded;
        ui.horizontal(|ui| {
            ui.label("Open");
            ui.add(
                egui::TextEdit::singleline(&mut self.open_path)
                    .desired_width(240.0)
                    .hint_text("path, or drop a file"),
            );
            if ui.button("Load").clicked() {
                let path = PathBuf::from(self.open_path.trim());
                self.load(path);
            }
            if ui.button("Open Image…").clicked() {
                self.pick_open_path();
            }
            ui.separator();
            ui.label("Save");
            ui.add(
                egui::TextEdit::singleline(&mut self.save_path)
                    .desired_width(200.0)
                    .hint_text("out.png / out.jpg"),
            );
            if ui.add_enabled(loaded, egui::Button::new("Save")).clicked() {
                self.save();
            }
            if ui
                .add_enabled(loaded, egui::Button::new("Save Image…"))
                .clicked()
            {
                self.pick_save_path();
            }
            ui.separator();
            if ui.add_enabled(loaded, egui::Button::new("Reset")).clicked() {
                self.flush_render();
                self.session.reset();
                self.texture_dirty = true;
            }
            if ui
                .button(format!("{} mode", self.theme.toggled().label()))
                .clicked()
            {
                self.theme = self.theme.toggled();
                self.config.theme = self.theme;
            }
        });
    }

    fn show_sliders(&mut self, ui: &mut egui::Ui) {
        ui.heading("Adjustments");
        ui.separator();
        let a = &mut self.adjustments;
        let mut changed = false;
        changed |= slider(ui, "Brightness", &mut a.brightness, BRIGHTNESS_RANGE);
        changed |= slider(ui, "Contrast", &mut a.contrast, CONTRAST_RANGE);
        changed |= slider(ui, "Sharpness", &mut a.sharpness, SHARPNESS_RANGE);
        changed |= slider(ui, "Saturation", &mut a.saturation, SATURATION_RANGE);
        changed |= slider(ui, "Highlights", &mut a.highlights, HIGHLIGHTS_RANGE);
        changed |= slider(ui, "Blur", &mut a.blur, BLUR_RANGE);
        changed |= slider(ui, "Noise Reduction", &mut a.noise_reduction, NOISE_REDUCTION_RANGE);

        if !self.adjustments.is_default() {
            ui.add_space(4.0);
            if ui.small_button("Reset sliders").clicked() {
                self.adjustments = Adjustments::default();
                changed = true;
            }
        }

        if changed {
            self.needs_render = true;
            self.last_slider_change = Some(Instant::now());
        }
    }

    fn show_tools(&mut self, ui: &mut egui::Ui) {
        ui.heading("Advanced Tools");
        ui.separator();
        let working_size = self.session.working().map(|w| w.dimensions());
        ui.add_enabled_ui(working_size.is_some(), |ui| {
            if ui.button("Upscale 2x").clicked() {
                self.run_transform(EditSession::upscale_2x);
            }
            if ui.button("Custom Resolution").clicked() {
                let (w, h) = working_size.unwrap_or((1, 1));
                self.dialog = ActiveDialog::Resize(ResizeDialog::with_size(w, h));
            }
            if ui.button("Crop").clicked() {
                self.dialog = ActiveDialog::Crop(CropDialog::default());
            }
            if ui.button("Rotate").clicked() {
                self.dialog = ActiveDialog::Rotate(RotateDialog::default());
            }
            if ui.button("Flip").clicked() {
                self.run_transform(EditSession::flip);
            }
            if ui.button("Remove Background").clicked() {
                self.run_transform(EditSession::remove_background);
            }
        });
    }

    fn show_image(&self, ui: &mut egui::Ui) {
        let Some(ref tex) = self.texture else {
            ui.centered_and_justified(|ui| {
                ui.label("Open an image or drop one here");
            });
            return;
        };
        ui.centered_and_justified(|ui| {
            let tex_size = tex.size_vec2();
            let avail = ui.available_size();
            let scale = (avail.x / tex_size.x).min(avail.y / tex_size.y).min(1.0);
            let (rect, _) = ui.allocate_exact_size(tex_size * scale, egui::Sense::hover());
            ui.painter().image(
                tex.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        });
    }
}

fn parent_dir(path: Option<&Path>) -> Option<&Path> {
    path.and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
}

fn slider(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut f32,
    range: std::ops::RangeInclusive<f32>,
) -> bool {
    ui.add(
        egui::Slider::new(value, range)
            .text(label)
            .step_by(0.1)
            .fixed_decimals(1)
            .clamping(egui::SliderClamping::Always),
    )
    .changed()
}

impl eframe::App for TouchupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(theme::visuals(self.theme));

        // Track window size for saving on exit
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.config.window_width = Some(rect.width());
            self.config.window_height = Some(rect.height());
        }

        self.poll_dropped_files(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.show_toolbar(ui);
        });
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(&self.status);
        });
        egui::SidePanel::left("adjustments")
            .resizable(false)
            .default_width(240.0)
            .show(ctx, |ui| {
                self.show_sliders(ui);
            });
        egui::SidePanel::right("tools")
            .resizable(false)
            .default_width(160.0)
            .show(ctx, |ui| {
                self.show_tools(ui);
            });

        match self.dialog.show(ctx) {
            DialogOutcome::Submitted(request) => self.apply_request(request),
            DialogOutcome::Cancelled | DialogOutcome::Pending => {}
        }

        self.maybe_render(ctx);
        self.refresh_texture(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_image(ui);
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.config.save();
    }
}
