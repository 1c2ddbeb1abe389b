//! The three workflow cards. Each returns `true` when the user submitted it.

use client_core::{
    present::{ProductCard, SearchRow, CREATE_SUCCESS_MESSAGE, NO_PRODUCTS_FOUND},
    view::{CreateState, LookupState, SearchState},
};
use eframe::egui;

#[derive(Debug, Clone, Copy)]
enum AlertKind {
    Error,
    Info,
    Success,
}

impl AlertKind {
    fn colors(self) -> (egui::Color32, egui::Color32) {
        match self {
            AlertKind::Error => (
                egui::Color32::from_rgb(111, 53, 53),
                egui::Color32::from_rgb(175, 96, 96),
            ),
            AlertKind::Info => (
                egui::Color32::from_rgb(44, 72, 110),
                egui::Color32::from_rgb(88, 130, 190),
            ),
            AlertKind::Success => (
                egui::Color32::from_rgb(45, 92, 58),
                egui::Color32::from_rgb(92, 160, 110),
            ),
        }
    }
}

fn alert(ui: &mut egui::Ui, kind: AlertKind, message: &str) {
    let (fill, stroke) = kind.colors();
    ui.add_space(8.0);
    egui::Frame::new()
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, stroke))
        .corner_radius(6.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
        });
}

fn card(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui) -> bool) -> bool {
    egui::Frame::group(ui.style())
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(title).size(18.0).strong());
            ui.add_space(6.0);
            add_contents(ui)
        })
        .inner
}

fn loading_indicator(ui: &mut egui::Ui) {
    ui.add_space(8.0);
    ui.vertical_centered(|ui| {
        ui.spinner();
    });
}

/// Single-line input with a trailing button; Enter in the field also submits.
fn input_with_button(
    ui: &mut egui::Ui,
    text: &mut String,
    hint: &str,
    button: &str,
    loading: bool,
) -> bool {
    ui.horizontal(|ui| {
        let field_width = (ui.available_width() - 90.0).max(120.0);
        let response = ui.add(
            egui::TextEdit::singleline(text)
                .hint_text(hint)
                .desired_width(field_width),
        );
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let clicked = ui.add_enabled(!loading, egui::Button::new(button)).clicked();
        entered || clicked
    })
    .inner
}

fn field_line(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new(label).strong());
        ui.label(value);
    });
}

fn product_card(ui: &mut egui::Ui, card: &ProductCard) {
    ui.add_space(8.0);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        field_line(ui, "id:", &card.id);
        field_line(ui, "name:", &card.name);
        field_line(ui, "description:", &card.description);
        field_line(ui, "price:", &card.price);
        field_line(ui, "created at:", &card.created_at);
    });
}

fn price_tag(ui: &mut egui::Ui, price: &str) {
    egui::Frame::new()
        .fill(egui::Color32::from_rgb(30, 52, 84))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(64, 120, 200)))
        .corner_radius(4.0)
        .inner_margin(4.0)
        .show(ui, |ui| {
            ui.label(egui::RichText::new(price).color(egui::Color32::from_rgb(140, 190, 255)));
        });
}

fn result_list(ui: &mut egui::Ui, rows: &[SearchRow]) {
    ui.add_space(8.0);
    for row in rows {
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(&row.name).strong());
            ui.label(egui::RichText::new(&row.description).weak());
            price_tag(ui, &row.price);
        });
        ui.separator();
    }
}

pub fn lookup_card(ui: &mut egui::Ui, lookup: &mut LookupState) -> bool {
    card(ui, "search by product id", |ui| {
        let loading = lookup.is_loading();
        let submitted = input_with_button(
            ui,
            &mut lookup.product_id,
            "enter product id",
            "search",
            loading,
        );

        if let Some(error) = lookup.error() {
            alert(ui, AlertKind::Error, error);
        }
        if loading {
            loading_indicator(ui);
        }
        if let Some(card) = lookup.card() {
            product_card(ui, &card);
        }
        submitted
    })
}

pub fn search_card(ui: &mut egui::Ui, search: &mut SearchState) -> bool {
    card(ui, "search products by keyword", |ui| {
        let loading = search.is_loading();
        let submitted =
            input_with_button(ui, &mut search.keyword, "enter keyword", "search", loading);

        if let Some(error) = search.error() {
            alert(ui, AlertKind::Error, error);
        }
        if loading {
            loading_indicator(ui);
        }
        let rows = search.rows();
        if !rows.is_empty() {
            result_list(ui, &rows);
        }
        if search.shows_no_results() {
            alert(ui, AlertKind::Info, NO_PRODUCTS_FOUND);
        }
        submitted
    })
}

pub fn create_card(ui: &mut egui::Ui, create: &mut CreateState) -> bool {
    card(ui, "create new product", |ui| {
        let loading = create.is_loading();
        ui.add(
            egui::TextEdit::singleline(&mut create.name)
                .hint_text("product name")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(4.0);
        ui.add(
            egui::TextEdit::singleline(&mut create.description)
                .hint_text("product description")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(6.0);
        let clicked = ui
            .horizontal(|ui| {
                let clicked = ui
                    .add_enabled(!loading, egui::Button::new("create product"))
                    .clicked();
                if loading {
                    ui.spinner();
                }
                clicked
            })
            .inner;

        if let Some(error) = create.error() {
            alert(ui, AlertKind::Error, error);
        }
        if create.is_success() {
            alert(ui, AlertKind::Success, CREATE_SUCCESS_MESSAGE);
        }
        clicked
    })
}
