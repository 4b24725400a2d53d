use eframe::egui::{self, Color32, Context, Key, Modifiers, RichText, TextureHandle};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::info;

use crate::canvas;
use crate::geometry::Point;
use crate::session::{ClickOutcome, Prompter, Session};
use crate::startup;

const HELP_TEXT: &str = "This is the CenterPicker, it will create a centers.txt file for you.\n\
Please click on the center of every single territory and sea zone on your map, and give each a name.\n\
The point you clicked on tells the game where to put things like flags, text and unit placements,\n\
so be sure to click in the exact middle, or slightly up and left of the middle, of each territory\n\
(but still within the territory borders).\n\
Do not use special or illegal characters in territory names.\n\n\
You can also load an existing centers.txt file, then modify it and save it again.\n\n\
LEFT CLICK = create a new center point for a territory/zone.\n\
RIGHT CLICK on an existing center = delete that center point.\n\n\
When finished, save the centers and exit.";

pub struct CenterPickerApp {
    session: Session,
    map: TextureHandle,
    // 状态栏
    cursor: Option<Point>,
    status: String,
    show_help: bool,
    // 左键后的名称输入框
    pending: Option<NamePrompt>,
}

struct NamePrompt {
    point: Point,
    text: String,
    focus: bool,
}

/// 名称由窗口内输入框提供，确认走系统消息框
struct DialogPrompter {
    entered: Option<String>,
}

impl Prompter for DialogPrompter {
    fn prompt_name(&mut self, _suggested: &str) -> Option<String> {
        self.entered.take()
    }

    fn confirm(&mut self, message: &str) -> bool {
        let answer = MessageDialog::new()
            .set_title("Center Picker")
            .set_description(message)
            .set_level(MessageLevel::Warning)
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(answer, MessageDialogResult::Yes)
    }
}

impl CenterPickerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, session: Session, image: image::RgbaImage) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let size = [image.width() as usize, image.height() as usize];
        let pixels = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        let map = cc.egui_ctx.load_texture("map", pixels, egui::TextureOptions::NEAREST);
        let status = if session.polygons().is_empty() {
            "No polygons loaded, names default to \"unknown\"".to_owned()
        } else {
            format!("{} territories in polygon table", session.polygons().len())
        };
        Self {
            session,
            map,
            cursor: None,
            status,
            show_help: true,
            pending: None,
        }
    }

    pub fn ui_menu(&mut self, ui: &mut egui::Ui, ctx: &Context) {
        ui.menu_button("File", |ui| {
            if ui.button("Load Centers    Ctrl+O").on_hover_text("Load An Existing Center Points File").clicked() {
                ui.close_menu();
                self.action_load_centers();
            }
            if ui.button("Save Centers    Ctrl+S").on_hover_text("Save The Center Points To File").clicked() {
                ui.close_menu();
                self.action_save_centers();
            }
            ui.separator();
            if ui.button("Exit").on_hover_text("Exit The Program").clicked() {
                ui.close_menu();
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
        if ui.button("Help").clicked() { self.show_help = true; }
        ui.separator();
        ui.label(RichText::new(&self.status).color(Color32::LIGHT_GRAY));
    }

    fn action_load_centers(&mut self) {
        info!("Load a center file");
        let Some(path) = startup::pick_file("Load A Center File", self.session.map_folder(), "Text", &["txt"])
        else { return };
        self.status = match self.session.load_centers(&path) {
            Ok(n) => format!("Loaded {} centers from {}", n, path.display()),
            Err(e) => format!("Failed to load centers: {}", e),
        };
    }

    fn action_save_centers(&mut self) {
        let Some(path) = startup::save_file("Where To Save centers.txt ?", self.session.map_folder(), "centers.txt")
        else { return };
        self.status = match self.session.save_centers(&path) {
            Ok(()) => format!("Data written to: {}", path.display()),
            Err(e) => format!("Failed to save centers: {}", e),
        };
    }

    fn on_secondary_click(&mut self, point: Point) {
        let mut prompter = DialogPrompter { entered: None };
        if let ClickOutcome::Removed(name) = self.session.on_secondary_click(point, &mut prompter) {
            self.status = format!("Removed {}", name);
        }
    }

    fn submit_name(&mut self, prompt: NamePrompt) {
        let mut prompter = DialogPrompter { entered: Some(prompt.text) };
        self.status = match self.session.on_primary_click(prompt.point, &mut prompter) {
            ClickOutcome::Inserted(name) => format!("Added {} at ({}, {})", name, prompt.point.x, prompt.point.y),
            ClickOutcome::Replaced(name) => format!("Moved {} to ({}, {})", name, prompt.point.x, prompt.point.y),
            _ => return,
        };
    }

    fn ui_name_prompt(&mut self, ctx: &Context) {
        let Some(prompt) = &mut self.pending else { return };
        let mut submit = false;
        let mut cancel = false;
        egui::Window::new("Territory Name")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Enter the territory name:");
                let resp = ui.text_edit_singleline(&mut prompt.text);
                if prompt.focus { resp.request_focus(); prompt.focus = false; }
                if resp.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) { submit = true; }
                if ui.input(|i| i.key_pressed(Key::Escape)) { cancel = true; }
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() { submit = true; }
                    if ui.button("Cancel").clicked() { cancel = true; }
                });
            });
        if cancel {
            self.pending = None;
        } else if submit {
            if let Some(prompt) = self.pending.take() { self.submit_name(prompt); }
        }
    }

    fn ui_help(&mut self, ctx: &Context) {
        if !self.show_help { return; }
        egui::Window::new("Center Picker")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(HELP_TEXT);
                ui.add_space(8.0);
                if ui.button("OK").clicked() { self.show_help = false; }
            });
    }
}

impl eframe::App for CenterPickerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| { self.ui_menu(ui, ctx); });
        });

        // 底部：鼠标坐标
        egui::TopBottomPanel::bottom("bottom").show(ctx, |ui| {
            let text = match self.cursor {
                Some(p) => format!("x: {} y: {}", p.x, p.y),
                None => String::new(),
            };
            ui.label(text);
        });

        let modal = self.pending.is_some() || self.show_help;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().auto_shrink([false; 2]).show(ui, |ui| {
                let (rect, response) = canvas::paint(ui, &self.map, self.session.centers());
                self.cursor = response.hover_pos().map(|pos| canvas::to_map_point(rect, pos));
                if modal { return; }
                let Some(pos) = response.interact_pointer_pos() else { return };
                let point = canvas::to_map_point(rect, pos);
                if response.clicked() {
                    let text = self.session.suggest_name(point);
                    self.pending = Some(NamePrompt { point, text, focus: true });
                } else if response.secondary_clicked() {
                    self.on_secondary_click(point);
                }
            });
        });

        self.ui_name_prompt(ctx);
        self.ui_help(ctx);

        // 快捷键
        if !modal {
            if ctx.input(|i| i.modifiers == Modifiers::CTRL && i.key_pressed(Key::O)) { self.action_load_centers(); }
            if ctx.input(|i| i.modifiers == Modifiers::CTRL && i.key_pressed(Key::S)) { self.action_save_centers(); }
        }
    }
}
