use eframe::egui;

use crate::editor::Command;
use crate::hit::Hit;
use crate::model::{ArrowStyle, Team};
use crate::render::{RenderOptions, draw_document};
use crate::storage::SlotStore;

use super::command_palette::{CommandContext, CommandPalette, PaletteOutcome};
use super::help::draw_help_window;
use super::render::{EguiSurface, draw_background, from_pos2, to_pos2};

use super::BoardApp;

const BOARD_MARGIN: f32 = 8.0;

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| self.toolbar(ui));
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.editor.status().unwrap_or("Ready"));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let doc = self.editor.document();
                    ui.label(format!("Zones: {}", doc.zones.len()));
                    ui.separator();
                    ui.label(format!("Lines: {}", doc.arrows.len() + doc.picks.len()));
                    ui.separator();
                    ui.label(format!("Players: {}", doc.players.len()));
                    ui.separator();
                    ui.label(format!("Undo: {}", self.editor.history().undo_len()));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| self.canvas(ctx, ui));

        let cx = self.command_context();
        match self.command_palette.ui(ctx, cx) {
            Some(PaletteOutcome::Run(id)) => CommandPalette::execute(self, ctx, id),
            Some(PaletteOutcome::Blocked(reason)) => self.editor.set_status(reason),
            None => {}
        }
        draw_help_window(ctx, &mut self.show_help);

        if self.editor.take_redraw_request() {
            ctx.request_repaint();
        }
    }
}

impl BoardApp {
    fn command_context(&self) -> CommandContext {
        CommandContext {
            has_undo: self.editor.can_undo(),
            has_redo: self.editor.can_redo(),
            has_line: self.editor.last_line().is_some(),
            player_count: self
                .editor
                .document()
                .players
                .iter()
                .filter(|p| p.visible)
                .count(),
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let typing = ctx.wants_keyboard_input() || self.command_palette.open || self.relabel.is_some();
        let mut open_palette = false;
        let mut redo = false;
        let mut undo = false;
        let mut save = false;
        let mut open = false;
        let mut export = false;
        ctx.input_mut(|i| {
            if !self.command_palette.open
                && i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::P)
            {
                open_palette = true;
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::F1) {
                self.show_help = true;
            }
            if typing {
                return;
            }
            save = i.consume_key(egui::Modifiers::COMMAND, egui::Key::S);
            open = i.consume_key(egui::Modifiers::COMMAND, egui::Key::O);
            export = i.consume_key(egui::Modifiers::COMMAND, egui::Key::E);
            if i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::Z)
                || i.consume_key(egui::Modifiers::COMMAND, egui::Key::Y)
            {
                redo = true;
            } else if i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z) {
                undo = true;
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Space) {
                open_palette = true;
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                self.show_help = false;
            }
        });
        if open_palette {
            self.command_palette.open("");
        }
        if undo {
            self.run(Command::Undo);
        }
        if redo {
            self.run(Command::Redo);
        }
        if save {
            self.save_json_dialog();
        }
        if open {
            self.open_json_dialog();
        }
        if export {
            self.save_svg_dialog();
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("File", |ui| {
            if ui.button("Open... (⌘O)").clicked() {
                self.open_json_dialog();
                ui.close();
            }
            if ui.button("Save JSON... (⌘S)").clicked() {
                self.save_json_dialog();
                ui.close();
            }
            if ui.button("Export SVG... (⌘E)").clicked() {
                self.save_svg_dialog();
                ui.close();
            }
            if ui.button("Export PNG...").clicked() {
                self.save_png_dialog();
                ui.close();
            }
            ui.separator();
            ui.small("Quick save path:");
            if ui.text_edit_singleline(&mut self.settings.file_path).lost_focus() {
                self.persist_settings();
            }
            ui.horizontal(|ui| {
                if ui.small_button("Quick Save").clicked() {
                    self.save_to_path();
                    ui.close();
                }
                if ui.small_button("Quick Load").clicked() {
                    self.load_from_path();
                    ui.close();
                }
                if ui.small_button("Quick SVG").clicked() {
                    self.save_svg_to_path();
                    ui.close();
                }
            });
            ui.separator();
            ui.small("Slot:");
            if ui.text_edit_singleline(&mut self.settings.slot_name).lost_focus() {
                self.persist_settings();
            }
            let saved = self.slots.slots().unwrap_or_default();
            if !saved.is_empty() {
                ui.horizontal_wrapped(|ui| {
                    for name in saved {
                        let current = name == self.settings.slot_name;
                        if ui.selectable_label(current, &name).clicked() && !current {
                            self.settings.slot_name = name;
                            self.persist_settings();
                        }
                    }
                });
            }
            ui.horizontal(|ui| {
                if ui.small_button("Save slot").clicked() {
                    self.save_slot();
                    ui.close();
                }
                if ui.small_button("Load slot").clicked() {
                    self.load_slot();
                    ui.close();
                }
            });
        });
        ui.separator();

        if ui.button("+ A").on_hover_text("Add team A player").clicked() {
            self.run(Command::AddPlayer(Team::A));
        }
        if ui.button("+ B").on_hover_text("Add team B player").clicked() {
            self.run(Command::AddPlayer(Team::B));
        }
        if ui.button("Ball").clicked() {
            self.run(Command::AddBall);
        }
        for style in ArrowStyle::ALL {
            if ui.button(format!("→ {}", style.name())).clicked() {
                self.run(Command::AddArrow(style));
            }
        }
        if ui.button("Pick").clicked() {
            self.run(Command::AddPick);
        }
        if ui
            .button("Pick ⇄")
            .on_hover_text("Pick between the last two players")
            .clicked()
        {
            self.run(Command::AddPickFromPlayers);
        }
        if ui.button("Zone").clicked() {
            self.run(Command::AddZone);
        }
        ui.separator();

        for team in Team::ALL {
            if ui.button(format!("Hide/Show {}", team.label_prefix())).clicked() {
                self.run(Command::ToggleTeamVisibility(team));
            }
        }
        let has_line = self.editor.last_line().is_some();
        if ui.add_enabled(has_line, egui::Button::new("Curve")).clicked() {
            self.toggle_curve_of_last_line();
        }
        if ui.add_enabled(has_line, egui::Button::new("Remove line")).clicked() {
            self.remove_last_line();
        }
        if ui.button("Clear").clicked() {
            self.run(Command::ClearBoard);
        }
        ui.separator();

        if ui.add_enabled(self.editor.can_undo(), egui::Button::new("Undo")).clicked() {
            self.run(Command::Undo);
        }
        if ui.add_enabled(self.editor.can_redo(), egui::Button::new("Redo")).clicked() {
            self.run(Command::Redo);
        }
        let scatter = self.settings.placement == crate::settings::Placement::Scatter;
        if ui.selectable_label(scatter, "Scatter").clicked() {
            self.toggle_scatter();
        }
        if ui.button("?").clicked() {
            self.show_help = true;
        }
    }

    fn canvas(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let origin = rect.min + egui::vec2(BOARD_MARGIN, BOARD_MARGIN);
        let (w, h) = self.editor.canvas_size();
        let board = egui::Rect::from_min_size(origin, egui::vec2(w, h));
        let to_board = |p: egui::Pos2| from_pos2(p - origin.to_vec2());

        let blocked = self.command_palette.open || self.relabel.is_some();
        let (pressed, released, hover) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.hover_pos(),
            )
        });
        let inside = hover.filter(|p| rect.contains(*p));

        if !blocked {
            if pressed {
                if let Some(p) = inside {
                    self.editor.pointer_down(to_board(p));
                }
            }
            if self.editor.session().is_dragging() {
                match inside {
                    Some(p) => {
                        self.editor.pointer_move(to_board(p));
                    }
                    None => {
                        self.editor.pointer_leave();
                    }
                }
            }
            if released {
                self.editor.pointer_up();
            }
            if response.double_clicked() {
                if let Some(p) = inside {
                    self.open_relabel(to_board(p));
                }
            }
        }

        let painter = ui.painter_at(rect);
        draw_background(&painter, rect, board);
        let options = RenderOptions {
            show_handles: true,
            active: self
                .editor
                .session()
                .target()
                .map(|(target, handle)| Hit { target, handle }),
        };
        let mut surface = EguiSurface::new(&painter, origin);
        draw_document(&mut surface, self.editor.document(), self.editor.metrics(), &options);

        self.relabel_prompt(ctx, origin);
    }

    fn relabel_prompt(&mut self, ctx: &egui::Context, origin: egui::Pos2) {
        let Some(prompt) = self.relabel.as_mut() else {
            return;
        };
        let mut commit = false;
        let mut cancel = false;
        egui::Area::new(egui::Id::new("relabel_prompt"))
            .fixed_pos(to_pos2(prompt.anchor) + origin.to_vec2())
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    let resp = ui.add(
                        egui::TextEdit::singleline(&mut prompt.text)
                            .desired_width(160.0)
                            .hint_text("Label"),
                    );
                    if prompt.request_focus {
                        resp.request_focus();
                        prompt.request_focus = false;
                    }
                    if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        commit = true;
                    }
                    if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                        cancel = true;
                    }
                });
            });
        if commit {
            if let Some(prompt) = self.relabel.take() {
                self.run(Command::Relabel {
                    target: prompt.target,
                    text: prompt.text,
                });
            }
        } else if cancel {
            self.relabel = None;
        }
    }
}
