use color_eyre::eyre::eyre;
use color_eyre::Result;
use covid_core::format::format_thousands;
use covid_core::{CasesType, Selection, StatsSnapshot, ViewState};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::api::{fetch_countries, fetch_snapshot, StatsSource};
use crate::app::{handle_input, App, FetchEvent};
use crate::config::AppConfig;
use crate::ui;

const HEADLESS_TOP_COUNTRIES: usize = 10;

/// Fetch once, print a summary and exit
pub async fn run_headless(source: &dyn StatsSource, config: &AppConfig, json: bool) -> Result<()> {
    let report =
        build_headless_report(source, &config.initial_selection, HEADLESS_TOP_COUNTRIES).await?;

    if json {
        let json = serde_json::to_string_pretty(&report)?;
        println!("{json}");
    } else {
        render_headless_stats(&report);
    }

    Ok(())
}

fn render_headless_stats(report: &HeadlessReport) {
    println!("\nCOVID-19 Stats: {}", report.selection);
    println!("=================");
    if let Some(updated) = &report.updated {
        println!("Updated: {updated}");
    }

    for card in &report.cards {
        println!("{}: {} total ({} today)", card.title, card.total, card.today);
    }

    println!("\nLive Cases by Country:");
    for country in &report.top_countries {
        println!(
            "- {} | {} | {}",
            country.name,
            country.code,
            format_thousands(country.cases)
        );
    }
}

pub async fn build_headless_report(
    source: &dyn StatsSource,
    selection: &Selection,
    top: usize,
) -> Result<HeadlessReport> {
    let mut view = ViewState::new();
    let request = view.select_country(selection.clone());

    let (snapshot, countries) = tokio::join!(
        fetch_snapshot(source, &request.selection),
        fetch_countries(source)
    );

    match view.apply_countries(countries?) {
        Some(fallback) => {
            tracing::warn!(code = selection.code(), "unknown country, showing worldwide");
            let global = fetch_snapshot(source, &fallback.selection).await?;
            view.apply_snapshot(fallback.generation, global);
        }
        None => {
            view.apply_snapshot(request.generation, snapshot?);
        }
    }

    let counts = view.snapshot.as_ref().map(StatsSnapshot::counts);
    let cards = view
        .info_cards()
        .into_iter()
        .map(|card| HeadlessCard {
            category: card.cases_type,
            title: card.title.to_string(),
            today: card.today,
            total: card.total,
            today_raw: counts.and_then(|c| c.today(card.cases_type)),
            total_raw: counts.and_then(|c| c.total(card.cases_type)),
        })
        .collect();

    let top_countries = view
        .table
        .iter()
        .take(top)
        .map(|country| HeadlessCountry {
            name: country.country.clone(),
            code: country.selection_code().to_string(),
            cases: country.counts.cases,
            today_cases: country.counts.today_cases,
            recovered: country.counts.recovered,
            deaths: country.counts.deaths,
        })
        .collect();

    Ok(HeadlessReport {
        selection: view.selection_label().to_string(),
        code: view.selection.code().to_string(),
        updated: ui::format_updated(view.snapshot.as_ref().and_then(StatsSnapshot::updated)),
        cards,
        top_countries,
    })
}

#[derive(Debug, serde::Serialize)]
pub struct HeadlessReport {
    pub selection: String,
    pub code: String,
    pub updated: Option<String>,
    pub cards: Vec<HeadlessCard>,
    pub top_countries: Vec<HeadlessCountry>,
}

#[derive(Debug, serde::Serialize)]
pub struct HeadlessCard {
    pub category: CasesType,
    pub title: String,
    pub today: String,
    pub total: String,
    pub today_raw: Option<u64>,
    pub total_raw: Option<u64>,
}

#[derive(Debug, serde::Serialize)]
pub struct HeadlessCountry {
    pub name: String,
    pub code: String,
    pub cases: Option<u64>,
    pub today_cases: Option<u64>,
    pub recovered: Option<u64>,
    pub deaths: Option<u64>,
}

/// Run the main application event loop
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut fetches: UnboundedReceiver<FetchEvent>,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        app.update();

        // Apply whatever fetches finished since the last frame
        while let Ok(fetch) = fetches.try_recv() {
            app.handle_fetch_event(fetch);
        }

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        tracing::debug!("redraw after resize failed");
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::debug!(error = %e, "failed to read terminal event"),
            }
        }

        // Give the fetch tasks a chance to run between frames
        tokio::task::yield_now().await;
    }
    Ok(())
}
