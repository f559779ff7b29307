use egui::text::{LayoutJob, TextFormat};
use egui_extras::{Column, TableBuilder};
use regex::Regex;

use crate::provider::{DataProvider, LoadState};
use crate::search::{find_match_indices, highlight, Directory, ResolvedCharacter, SearchQuery};
use crate::swapi::Snapshot;

pub const NO_RESULTS: &str = "No results found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    None,
    Refresh,
}

/// What the result area shows below the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultList {
    NoResults,
    Rows(usize),
}

#[derive(Default)]
pub struct SearchWindowState {
    search_query: String,
    query: Option<SearchQuery>,
    filtered_indices: Vec<usize>,
    stale: bool,
    first_frame: bool,
}

impl SearchWindowState {
    pub fn new() -> Self {
        Self {
            search_query: String::new(),
            query: None,
            filtered_indices: Vec::new(),
            stale: true,
            first_frame: true,
        }
    }

    /// Forces the next frame to re-run the search, e.g. after the snapshot changed.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    pub fn show(&mut self, ctx: &egui::Context, provider: &DataProvider) -> WindowAction {
        let mut action = WindowAction::None;
        let snapshot = provider.snapshot();
        let directory = Directory::new(snapshot);

        ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) && !self.search_query.is_empty() {
                self.search_query.clear();
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if provider.is_loading() && snapshot.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
                return;
            }

            ui.horizontal(|ui| {
                ui.label("Search:");
                let search_response = ui.add(
                    egui::TextEdit::singleline(&mut self.search_query)
                        .hint_text("Search by name, homeworld, or species"),
                );

                if self.first_frame {
                    search_response.request_focus();
                    self.first_frame = false;
                }

                let refresh = ui.add_enabled(!provider.is_fetching(), egui::Button::new("Refresh"));
                if refresh.clicked() {
                    action = WindowAction::Refresh;
                }
                if provider.is_fetching() {
                    ui.spinner();
                }
            });

            if let LoadState::Failed(message) = provider.state() {
                ui.horizontal(|ui| {
                    let color = ui.visuals().error_fg_color;
                    ui.colored_label(color, format!("Could not load data: {message}"));
                    if ui.button("Retry").clicked() {
                        action = WindowAction::Refresh;
                    }
                });
            }

            ui.separator();

            self.update_filtered_results(snapshot, &directory);

            let (ResultList::Rows(row_count), Some(pattern)) =
                (self.result_list(), self.query.as_ref().map(SearchQuery::pattern))
            else {
                ui.label(NO_RESULTS);
                return;
            };

            let table = TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto().at_least(160.0))
                .column(Column::auto().at_least(120.0))
                .column(Column::remainder())
                .min_scrolled_height(300.0);

            table
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Name");
                    });
                    header.col(|ui| {
                        ui.strong("Homeworld");
                    });
                    header.col(|ui| {
                        ui.strong("Species");
                    });
                })
                .body(|body| {
                    body.rows(25.0, row_count, |mut row| {
                        let Some(character) = self
                            .filtered_indices
                            .get(row.index())
                            .and_then(|&idx| snapshot.characters.get(idx))
                        else {
                            return;
                        };
                        let resolved = ResolvedCharacter::resolve(character, &directory);

                        row.col(|ui| highlighted_label(ui, resolved.name, pattern));
                        row.col(|ui| highlighted_label(ui, resolved.homeworld, pattern));
                        row.col(|ui| highlighted_label(ui, &resolved.species, pattern));
                    });
                });
        });

        action
    }

    pub fn result_list(&self) -> ResultList {
        if self.query.is_none() || self.filtered_indices.is_empty() {
            ResultList::NoResults
        } else {
            ResultList::Rows(self.filtered_indices.len())
        }
    }

    fn update_filtered_results(&mut self, snapshot: &Snapshot, directory: &Directory<'_>) {
        let unchanged = self
            .query
            .as_ref()
            .is_some_and(|q| q.term() == self.search_query);
        if unchanged && !self.stale {
            return;
        }

        match SearchQuery::new(&self.search_query) {
            Ok(query) => {
                self.filtered_indices = find_match_indices(&query, snapshot, directory);
                self.query = Some(query);
            }
            Err(e) => {
                log::warn!("Unusable search term '{}': {}", self.search_query, e);
                self.filtered_indices.clear();
                self.query = None;
            }
        }
        self.stale = false;
    }
}

fn highlighted_label(ui: &mut egui::Ui, text: &str, pattern: &Regex) {
    let plain = TextFormat {
        color: ui.visuals().text_color(),
        ..Default::default()
    };
    let hit = TextFormat {
        color: ui.visuals().strong_text_color(),
        background: ui.visuals().selection.bg_fill,
        ..Default::default()
    };

    let mut job = LayoutJob::default();
    for segment in highlight(text, pattern) {
        if segment.text.is_empty() {
            continue;
        }
        let format = if segment.matched { hit.clone() } else { plain.clone() };
        job.append(segment.text, 0.0, format);
    }
    ui.label(job);
}
