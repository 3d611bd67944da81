//! Numeric entry dialogs for crop, rotate and resize.
//!
//! Each dialog owns its raw text fields and turns them into a typed request
//! only when every field parses. The session never sees unparsed input.

use crate::processing::transform::CropRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformRequest {
    Crop(CropRect),
    Rotate(i32),
    Resize { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    Pending,
    Cancelled,
    Submitted(TransformRequest),
}

#[derive(Debug, Default, Clone)]
pub struct CropDialog {
    pub left: String,
    pub upper: String,
    pub right: String,
    pub lower: String,
}

impl CropDialog {
    pub fn request(&self) -> Option<TransformRequest> {
        Some(TransformRequest::Crop(CropRect::new(
            parse_u32(&self.left)?,
            parse_u32(&self.upper)?,
            parse_u32(&self.right)?,
            parse_u32(&self.lower)?,
        )))
    }
}

#[derive(Debug, Default, Clone)]
pub struct RotateDialog {
    pub angle: String,
}

impl RotateDialog {
    pub fn request(&self) -> Option<TransformRequest> {
        self.angle.trim().parse().ok().map(TransformRequest::Rotate)
    }
}

#[derive(Debug, Default, Clone)]
pub struct ResizeDialog {
    pub width: String,
    pub height: String,
}

impl ResizeDialog {
    /// Prefills the fields with the current working size.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width: width.to_string(),
            height: height.to_string(),
        }
    }

    pub fn request(&self) -> Option<TransformRequest> {
        let width = parse_u32(&self.width).filter(|&w| w > 0)?;
        let height = parse_u32(&self.height).filter(|&h| h > 0)?;
        Some(TransformRequest::Resize { width, height })
    }
}

fn parse_u32(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// At most one dialog is open at a time.
#[derive(Debug, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Crop(CropDialog),
    Rotate(RotateDialog),
    Resize(ResizeDialog),
}

impl ActiveDialog {
    /// Draws the open dialog, if any. Closes it on submit or cancel.
    pub fn show(&mut self, ctx: &egui::Context) -> DialogOutcome {
        let outcome = match self {
            ActiveDialog::None => return DialogOutcome::Pending,
            ActiveDialog::Crop(d) => {
                let request = d.request();
                show_window(ctx, "Crop", request, |ui| {
                    field(ui, "Left", &mut d.left);
                    field(ui, "Upper", &mut d.upper);
                    field(ui, "Right", &mut d.right);
                    field(ui, "Lower", &mut d.lower);
                })
            }
            ActiveDialog::Rotate(d) => {
                let request = d.request();
                show_window(ctx, "Rotate", request, |ui| {
                    field(ui, "Angle (°, counterclockwise)", &mut d.angle);
                })
            }
            ActiveDialog::Resize(d) => {
                let request = d.request();
                show_window(ctx, "Custom Resolution", request, |ui| {
                    field(ui, "Width", &mut d.width);
                    field(ui, "Height", &mut d.height);
                })
            }
        };
        if outcome != DialogOutcome::Pending {
            *self = ActiveDialog::None;
        }
        outcome
    }
}

fn field(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).desired_width(120.0));
    ui.end_row();
}

fn show_window(
    ctx: &egui::Context,
    title: &str,
    request: Option<TransformRequest>,
    fields: impl FnOnce(&mut egui::Ui),
) -> DialogOutcome {
    let mut outcome = DialogOutcome::Pending;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new(title)
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, fields);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if let Some(req) = request {
                    if ui.button("OK").clicked() {
                        outcome = DialogOutcome::Submitted(req);
                    }
                } else {
                    ui.add_enabled(false, egui::Button::new("OK"));
                }
                if ui.button("Cancel").clicked() {
                    outcome = DialogOutcome::Cancelled;
                }
            });
        });
    outcome
}
