use crate::explorer::filters::{self, FilterBounds, Filters};
use crate::models::StoredListing;
use eframe::egui;
use egui_extras::{Column, TableBuilder};

const HEADERS: [&str; 11] = [
    "Id", "Route", "Link", "Operator", "Type", "Departure", "Duration", "Arrival", "Rating",
    "Price", "Seats",
];

/// Launch the explorer window over the loaded table. Blocks until the
/// window is closed.
pub fn run(rows: Vec<StoredListing>) -> eframe::Result<()> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Bus Scout",
        options,
        Box::new(|_cc| Ok(Box::new(ExplorerApp::new(rows)))),
    )
}

/// Interactive filter/browse view. The whole table is in memory; the
/// filtered view is recomputed from it on every frame, so there is no
/// state beyond the loaded rows and the current filter selections.
pub struct ExplorerApp {
    rows: Vec<StoredListing>,
    bounds: Option<FilterBounds>,
    filters: Filters,
}

impl ExplorerApp {
    pub fn new(rows: Vec<StoredListing>) -> Self {
        let bounds = FilterBounds::from_rows(&rows);
        let filters = bounds
            .as_ref()
            .map(Filters::from_bounds)
            .unwrap_or_default();
        Self {
            rows,
            bounds,
            filters,
        }
    }

    fn filter_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Filters");

        let Some(bounds) = self.bounds.clone() else {
            ui.label("No data to filter.");
            return;
        };

        ui.separator();
        ui.label("Bus type");
        ui.horizontal(|ui| {
            if ui.button("All").clicked() {
                self.filters.bus_types = bounds.bus_types.iter().cloned().collect();
            }
            if ui.button("None").clicked() {
                self.filters.bus_types.clear();
            }
        });
        for bus_type in &bounds.bus_types {
            let selected = self.filters.bus_types.contains(bus_type);
            if ui.selectable_label(selected, bus_type).clicked() {
                if selected {
                    self.filters.bus_types.remove(bus_type);
                } else {
                    self.filters.bus_types.insert(bus_type.clone());
                }
            }
        }

        ui.separator();
        ui.label("Price range");
        let (lo, hi) = bounds.price;
        ui.add(egui::Slider::new(&mut self.filters.price.0, lo..=hi).text("min"));
        ui.add(egui::Slider::new(&mut self.filters.price.1, lo..=hi).text("max"));
        // Keep the two ends ordered.
        if self.filters.price.0 > self.filters.price.1 {
            self.filters.price.1 = self.filters.price.0;
        }

        ui.separator();
        ui.label("Minimum star rating");
        let (rating_lo, rating_hi) = bounds.rating;
        ui.add(
            egui::Slider::new(&mut self.filters.min_rating, rating_lo..=rating_hi)
                .fixed_decimals(1),
        );
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("filters")
            .resizable(false)
            .show(ctx, |ui| {
                self.filter_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.bounds.is_none() {
                ui.heading("No listings stored yet");
                ui.label("Run a collection first; stored routes will show up here.");
                return;
            }

            let visible = filters::apply(&self.rows, &self.filters);
            ui.heading(format!("{} of {} routes", visible.len(), self.rows.len()));
            ui.separator();
            listing_table(ui, &visible);
        });
    }
}

fn listing_table(ui: &mut egui::Ui, rows: &[&StoredListing]) {
    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true), HEADERS.len())
        .header(24.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let stored = rows[row.index()];
                let l = &stored.listing;
                row.col(|ui| {
                    ui.label(stored.id.to_string());
                });
                row.col(|ui| {
                    ui.label(l.route_name.as_str());
                });
                row.col(|ui| {
                    ui.hyperlink(l.route_link.as_str());
                });
                row.col(|ui| {
                    ui.label(l.bus_operator_name.as_str());
                });
                row.col(|ui| {
                    ui.label(l.bus_type.as_str());
                });
                row.col(|ui| {
                    ui.label(l.departure_time.as_str());
                });
                row.col(|ui| {
                    ui.label(l.duration.as_str());
                });
                row.col(|ui| {
                    ui.label(l.arrival_time.as_str());
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", l.star_rating));
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", l.price));
                });
                row.col(|ui| {
                    ui.label(l.seats_available.to_string());
                });
            });
        });
}
