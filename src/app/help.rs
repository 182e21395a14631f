use eframe::egui;

pub(super) fn draw_help_window(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Help & Commands")
        .open(open)
        .resizable(true)
        .default_width(520.0)
        .default_height(440.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Keyboard Shortcuts");
                ui.separator();
                help_row(ui, "Space", "Open command palette");
                help_row(ui, "⌘⇧P", "Open command palette");
                help_row(ui, "⌘S", "Save play (JSON)");
                help_row(ui, "⌘O", "Open play");
                help_row(ui, "⌘E", "Export SVG");
                help_row(ui, "⌘Z", "Undo");
                help_row(ui, "⌘⇧Z / ⌘Y", "Redo");
                help_row(ui, "F1", "This window");
                help_row(ui, "Escape", "Close palette / cancel relabel");

                ui.add_space(10.0);
                ui.heading("Board");
                ui.separator();
                help_row(ui, "Drag", "Move players, ball, zones and line handles");
                help_row(ui, "Zone rim", "Drag to resize the zone");
                help_row(ui, "Double-click", "Relabel a player or arrow");
                help_row(ui, "Click a line", "Make it the target of Curve / Remove");

                ui.add_space(10.0);
                ui.heading("Files");
                ui.separator();
                ui.label("• Plays are saved as JSON; older red/blue files load too");
                ui.label("• Slots are JSON files in the slot directory");
                ui.label("• Export to SVG (with labels) or PNG (without labels)");
                ui.label("• Settings live in ~/.config/playboard.toml or settings.toml");
            });
        });
}

fn help_row(ui: &mut egui::Ui, shortcut: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [100.0, 16.0],
            egui::Label::new(egui::RichText::new(shortcut).monospace().strong()),
        );
        ui.label(description);
    });
}
