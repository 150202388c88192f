use std::ops::RangeInclusive;

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    api::FetchError,
    core::{
        chart::ChartData,
        cutoff::PublicationCutoff,
        region::Region,
        snapshot::{Snapshot, SnapshotError},
        statistics::{self, DerivedStats},
    },
    prelude::*,
    quantity::rate::KilowattHourRate,
};

const BAR_WIDTH: f64 = 32.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum View {
    /// Current price and the day's summary.
    Compact,

    /// Summary followed by the hourly chart.
    Expanded,
}

/// Render the snapshot, falling back to the error table when today is unavailable.
pub fn build_snapshot_tables(
    snapshot: &Snapshot,
    view: View,
    cutoff: PublicationCutoff,
) -> Result<Vec<Table>> {
    let stats = match snapshot.stats() {
        Ok(stats) => stats,
        Err(SnapshotError::TodayUnavailable) => {
            let error = snapshot.today.as_ref().err();
            return Ok(vec![build_unavailable_table(snapshot.region, error)]);
        }
        Err(error) => return Err(error).context("inconsistent prices"),
    };
    let mut tables = vec![build_now_table(snapshot, &stats, cutoff)];
    if view == View::Expanded {
        tables.push(build_chart_table(&snapshot.chart()?, snapshot.current_hour()));
    }
    Ok(tables)
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn hour_range(hour: usize) -> String {
    format!("{hour:02}-{:02}", hour + 1)
}

#[must_use]
pub fn build_now_table(
    snapshot: &Snapshot,
    stats: &DerivedStats,
    cutoff: PublicationCutoff,
) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(format!("{} {}", snapshot.region, snapshot.region.city()))
            .add_attribute(Attribute::Bold),
        Cell::new(format!("Spot price {}", snapshot.taken_at.format("%-d %B %Y"))),
        Cell::new("excl. VAT and taxes").add_attribute(Attribute::Dim),
    ]);
    table.add_row(vec![
        Cell::new("Now").fg(Color::DarkGreen).add_attribute(Attribute::Bold),
        Cell::new(stats.current).add_attribute(Attribute::Bold).set_alignment(CellAlignment::Right),
        match stats.percent_change_vs_yesterday {
            Some(change) => Cell::new(format!("{change} vs yesterday"))
                .fg(if change.is_increase() { Color::Red } else { Color::Green }),
            None => Cell::new("no comparison with yesterday").add_attribute(Attribute::Dim),
        },
    ]);
    table.add_row(vec![
        Cell::new("↑ Highest").fg(Color::Red),
        Cell::new(stats.extremes.max).fg(Color::Red).set_alignment(CellAlignment::Right),
        Cell::new(hour_range(stats.extremes.max_hour)),
    ]);
    table.add_row(vec![
        Cell::new("↓ Lowest").fg(Color::Green),
        Cell::new(stats.extremes.min).fg(Color::Green).set_alignment(CellAlignment::Right),
        Cell::new(hour_range(stats.extremes.min_hour)),
    ]);
    table.add_row(vec![
        Cell::new("Average"),
        Cell::new(stats.average).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);
    table.add_row(match &snapshot.tomorrow {
        Ok(tomorrow) => vec![
            Cell::new("Tomorrow"),
            statistics::average(tomorrow).map_or_else(
                |error| Cell::new(error).fg(Color::Red),
                |average| Cell::new(average).set_alignment(CellAlignment::Right),
            ),
            Cell::new("average").add_attribute(Attribute::Dim),
        ],
        Err(_) if !snapshot.is_tomorrow_due(cutoff) => vec![
            Cell::new("Tomorrow"),
            Cell::new(format!("published at {cutoff} at the earliest"))
                .add_attribute(Attribute::Dim),
            Cell::new(""),
        ],
        Err(error) => vec![
            Cell::new("Tomorrow"),
            Cell::new(error).fg(Color::DarkYellow),
            Cell::new(""),
        ],
    });
    table
}

fn bar(rate: KilowattHourRate, limits: &RangeInclusive<KilowattHourRate>) -> String {
    let span = limits.end().0 - limits.start().0;
    if span <= 0.0 {
        return String::new();
    }
    let fraction = ((rate.0 - limits.start().0) / span).clamp(0.0, 1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let width = (fraction * BAR_WIDTH).round() as usize;
    "█".repeat(width)
}

fn rate_cell(rate: KilowattHourRate, average: KilowattHourRate) -> Cell {
    Cell::new(rate)
        .set_alignment(CellAlignment::Right)
        .fg(if rate >= average { Color::Red } else { Color::Green })
}

#[must_use]
pub fn build_chart_table(chart: &ChartData, current_hour: usize) -> Table {
    let mut table = new_table();
    let mut header = vec!["Hour", "Today", ""];
    if chart.tomorrow.is_some() {
        header.extend(["Tomorrow", ""]);
    }
    table.set_header(header);

    let tomorrow_rates = chart.tomorrow.iter().flat_map(|series| series.rates().map(Some));
    let tomorrow_rates = tomorrow_rates.chain(std::iter::repeat(None));
    for ((hour, today_rate), tomorrow_rate) in chart.today.rates().enumerate().zip(tomorrow_rates) {
        let mut hour_cell = Cell::new(hour_range(hour));
        let mut today_bar = Cell::new(bar(today_rate, &chart.y_limits)).fg(Color::Blue);
        if hour == current_hour {
            hour_cell = hour_cell.add_attribute(Attribute::Bold).fg(Color::Cyan);
            today_bar = today_bar.fg(Color::Cyan);
        }
        let mut row = vec![hour_cell, rate_cell(today_rate, chart.today.average), today_bar];
        if let (Some(series), Some(rate)) = (&chart.tomorrow, tomorrow_rate) {
            row.push(rate_cell(rate, series.average));
            row.push(Cell::new(bar(rate, &chart.y_limits)).fg(Color::DarkRed));
        }
        table.add_row(row);
    }

    let mut footer = vec![
        Cell::new("Average").add_attribute(Attribute::Bold),
        Cell::new(chart.today.average).set_alignment(CellAlignment::Right),
        Cell::new(format!("now {}", chart.marker.1)).add_attribute(Attribute::Dim),
    ];
    if let Some(series) = &chart.tomorrow {
        footer.push(Cell::new(series.average).set_alignment(CellAlignment::Right));
        footer.push(Cell::new(""));
    }
    table.add_row(footer);
    table
}

#[must_use]
pub fn build_unavailable_table(region: Region, error: Option<&FetchError>) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(format!("{region} {}", region.city())).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Could not fetch the prices").fg(Color::Red).add_attribute(Attribute::Bold),
    ]);
    if let Some(error) = error {
        table.add_row(vec![Cell::new(error).add_attribute(Attribute::Dim)]);
    }
    table.add_row(vec![Cell::new("Try again later or run `watch` to keep retrying")]);
    table
}
