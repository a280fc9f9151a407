//! App shell: the rendered product list, the add-product form, and the
//! edit/delete/alert dialogs.

use client_core::{AlertMessage, ControlState, ControlTarget, ListView, ProductRow};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::ProductId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

struct EditDialog {
    product_id: ProductId,
    name: String,
    price: String,
}

struct DeleteDialog {
    product_id: ProductId,
    name: String,
}

pub struct CatalogApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    /// Mirror of the controller's rendered list, replaced wholesale on
    /// every ViewRefreshed event.
    view: ListView,
    create_control: ControlState,
    name_input: String,
    price_input: String,

    edit_dialog: Option<EditDialog>,
    delete_dialog: Option<DeleteDialog>,
    alert: Option<AlertMessage>,
    status: String,
}

impl CatalogApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            view: ListView::default(),
            create_control: ControlState::Idle,
            name_input: String::new(),
            price_input: String::new(),
            edit_dialog: None,
            delete_dialog: None,
            alert: None,
            status: "Starting backend worker...".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::WorkerReady => self.status = "Connected to backend worker".to_string(),
            UiEvent::WorkerGone(message) => self.status = message,
            UiEvent::ViewRefreshed(view) => self.view = view,
            UiEvent::ControlStateChanged { target, state } => match target {
                ControlTarget::CreateSubmit => self.create_control = state,
                ControlTarget::RowEdit(_) | ControlTarget::RowDelete(_) => {
                    // No-op when the row is already gone from a re-render.
                    self.view.set_row_control(target, state);
                }
            },
            UiEvent::FormReset => {
                self.name_input.clear();
                self.price_input.clear();
            }
            UiEvent::Alert(alert) => self.alert = Some(alert),
        }
    }

    fn submit_create_form(&mut self) {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::CreateProduct {
                name: self.name_input.clone(),
                price: self.price_input.clone(),
            },
            &mut self.status,
        );
    }

    fn open_edit_dialog(&mut self, row: &ProductRow) {
        self.edit_dialog = Some(EditDialog {
            product_id: row.product.id,
            name: row.product.name.clone(),
            price: format!("{}", row.product.price),
        });
    }

    fn cancel_edit(&mut self) {
        self.edit_dialog = None;
    }

    fn submit_edit_dialog(&mut self) {
        if let Some(dialog) = self.edit_dialog.take() {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::UpdateProduct {
                    product_id: dialog.product_id,
                    name: dialog.name,
                    price: dialog.price,
                },
                &mut self.status,
            );
        }
    }

    fn open_delete_dialog(&mut self, row: &ProductRow) {
        self.delete_dialog = Some(DeleteDialog {
            product_id: row.product.id,
            name: row.product.name.clone(),
        });
    }

    fn cancel_delete(&mut self) {
        self.delete_dialog = None;
    }

    fn confirm_delete(&mut self) {
        if let Some(dialog) = self.delete_dialog.take() {
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::DeleteProduct {
                    product_id: dialog.product_id,
                },
                &mut self.status,
            );
        }
    }

    fn control_button(
        ui: &mut egui::Ui,
        target: ControlTarget,
        state: ControlState,
    ) -> egui::Response {
        let (enabled, label) = match state {
            ControlState::Idle => (true, target.idle_label()),
            ControlState::Pending => (false, target.pending_label()),
        };
        ui.add_enabled(enabled, egui::Button::new(label))
    }

    fn show_add_form(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Name:");
            ui.add(
                egui::TextEdit::singleline(&mut self.name_input)
                    .hint_text("Product name")
                    .desired_width(180.0),
            );
            ui.label("Price:");
            ui.add(
                egui::TextEdit::singleline(&mut self.price_input)
                    .hint_text("0.00")
                    .desired_width(80.0),
            );
        });
        if Self::control_button(ui, ControlTarget::CreateSubmit, self.create_control).clicked() {
            self.submit_create_form();
        }
    }

    fn show_product_list(&mut self, ui: &mut egui::Ui) {
        if let Some(placeholder) = self.view.placeholder_text() {
            ui.label(placeholder);
            return;
        }

        let rows = self.view.rows().to_vec();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for row in &rows {
                ui.horizontal(|ui| {
                    ui.label(&row.product.name);
                    ui.label(row.product.display_price());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if Self::control_button(
                            ui,
                            ControlTarget::RowDelete(row.product.id),
                            row.delete_control,
                        )
                        .clicked()
                        {
                            self.open_delete_dialog(row);
                        }
                        if Self::control_button(
                            ui,
                            ControlTarget::RowEdit(row.product.id),
                            row.edit_control,
                        )
                        .clicked()
                        {
                            self.open_edit_dialog(row);
                        }
                    });
                });
                ui.separator();
            }
        });
    }

    fn show_edit_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &mut self.edit_dialog else {
            return;
        };
        let mut save = false;
        let mut cancel = false;
        egui::Window::new("Edit product")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Enter the new product name:");
                ui.text_edit_singleline(&mut dialog.name);
                ui.label("Enter the new price:");
                ui.text_edit_singleline(&mut dialog.price);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                    if ui.button("Save").clicked() {
                        save = true;
                    }
                });
            });
        if save {
            self.submit_edit_dialog();
        } else if cancel {
            self.cancel_edit();
        }
    }

    fn show_delete_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &self.delete_dialog else {
            return;
        };
        let name = dialog.name.clone();
        let mut confirm = false;
        let mut cancel = false;
        egui::Window::new("Delete product")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Are you sure you want to delete this product?\n\n{name}"
                ));
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                    if ui.button("Delete").clicked() {
                        confirm = true;
                    }
                });
            });
        if confirm {
            self.confirm_delete();
        } else if cancel {
            self.cancel_delete();
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.alert else {
            return;
        };
        let mut dismiss = false;
        egui::Window::new("Alert")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(alert.user_text());
                if ui.button("OK").clicked() {
                    dismiss = true;
                }
            });
        if dismiss {
            self.alert = None;
        }
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(&self.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Product Catalog");
            ui.add_space(8.0);
            self.show_add_form(ui);
            ui.add_space(8.0);
            ui.separator();
            self.show_product_list(ui);
        });

        self.show_edit_dialog(ctx);
        self.show_delete_dialog(ctx);
        self.show_alert(ctx);

        // Keep draining backend events even while the user is idle.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
