use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::market::{ChartPoint, InstrumentRequest, MarketSummary};

#[derive(Debug, Parser)]
#[command(name = "market-feed")]
#[command(about = "Fetch price summaries and sparkline charts for a set of instruments")]
#[command(version)]
pub struct Cli {
    /// JSON config file; builtin defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the number of concurrent requests
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Print summaries as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Instruments as SYMBOL or SYMBOL:CURRENCY (e.g. AAPL ^GSPC MSFT:EUR)
    #[arg(required = true)]
    pub instruments: Vec<String>,
}

impl Cli {
    pub fn instrument_requests(&self) -> Result<Vec<InstrumentRequest>> {
        self.instruments
            .iter()
            .map(|raw| InstrumentRequest::parse(raw))
            .collect()
    }
}

pub fn render_table(summaries: &[MarketSummary]) -> String {
    let rows: Vec<[String; 4]> = summaries
        .iter()
        .map(|summary| {
            [
                summary.request.symbol.clone(),
                format!("{}{:.2}", summary.currency_symbol, summary.price),
                format!("{:+.2}%", summary.percent_change),
                ChartPoint::format_points(&summary.chart_points),
            ]
        })
        .collect();

    let mut widths = [0usize; 3];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let mut output = format!("# Fetched at {}\n", Local::now().format("%Y-%m-%d %H:%M"));
    for row in &rows {
        let mut line = String::new();
        for (cell, width) in row.iter().zip(widths.iter()) {
            line.push_str(&pad_label(cell, *width));
            line.push_str("  ");
        }
        line.push_str(&row[3]);
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

fn pad_label(label: &str, target_width: usize) -> String {
    let current_width = UnicodeWidthStr::width(label);
    let padding = target_width.saturating_sub(current_width);
    format!("{}{}", label, " ".repeat(padding))
}
