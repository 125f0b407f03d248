//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use fxdesk_domain::{FxBlockExtraction, FxHedgeRequest, TradeRecord, TradeStatus};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a trade record.
    pub fn format_trade(&self, record: &TradeRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Table => Ok(self.format_trade_table(record)),
            OutputFormat::Quiet => Ok(trade_summary(record)),
        }
    }

    /// Format a hedge extraction.
    pub fn format_hedge(&self, extraction: &FxBlockExtraction) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(extraction)?),
            OutputFormat::Table => Ok(self.format_hedge_table(extraction)),
            OutputFormat::Quiet => Ok(extraction.clean_content.clone()),
        }
    }

    fn format_trade_table(&self, record: &TradeRecord) -> String {
        let heading = format!(
            "{} | {}",
            record.product_type.label(),
            record.status.as_str().to_uppercase()
        );
        let heading = self.colorize(&heading, status_color(record.status));

        let mut output = format!("{}\n{}", heading, field_table(&trade_rows(record)));

        if !record.structure_legs.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Leg", "Direction", "Type", "Strike"]);
            for (idx, leg) in record.structure_legs.iter().enumerate() {
                builder.push_record([
                    (idx + 1).to_string(),
                    leg.direction.as_str().to_string(),
                    leg.option_type.as_str().to_string(),
                    leg.strike.clone(),
                ]);
            }
            output.push('\n');
            output.push_str(&styled(builder));
        }

        output
    }

    fn format_hedge_table(&self, extraction: &FxBlockExtraction) -> String {
        let Some(request) = &extraction.data else {
            return format!(
                "{}\n\n{}",
                self.warning("No hedge request found."),
                extraction.clean_content
            );
        };

        let mut output = format!(
            "{}\n{}",
            self.colorize("Hedge request", "cyan"),
            field_table(&hedge_rows(request))
        );
        if !extraction.clean_content.is_empty() {
            output.push_str("\n\n");
            output.push_str(&extraction.clean_content);
        }
        output
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// One-line summary of a trade record.
pub fn trade_summary(record: &TradeRecord) -> String {
    let mut parts = vec![record.product_type.as_str().to_string()];
    parts.extend(record.currency_pair.clone());
    if let Some(notional) = &record.notional {
        match &record.notional_currency {
            Some(ccy) => parts.push(format!("{} {}", notional, ccy)),
            None => parts.push(notional.clone()),
        }
    }
    parts.extend(record.tenor.clone());
    parts.push(record.status.as_str().to_string());
    parts.join(" ")
}

fn status_color(status: TradeStatus) -> &'static str {
    match status {
        TradeStatus::Done => "green",
        TradeStatus::Passed => "red",
        TradeStatus::Quoted => "yellow",
        TradeStatus::Inquiry => "blue",
    }
}

/// Populated fields of a trade record, in display order.
fn trade_rows(record: &TradeRecord) -> Vec<(&'static str, String)> {
    let with_ccy = |amount: &Option<String>, ccy: &Option<String>| {
        amount.as_ref().map(|a| match ccy {
            Some(c) => format!("{} {}", a, c),
            None => a.clone(),
        })
    };

    let rows = [
        ("Counterparty", record.counterparty.clone()),
        ("Pair", record.currency_pair.clone()),
        ("Notional", with_ccy(&record.notional, &record.notional_currency)),
        ("Direction", record.direction.map(|d| d.as_str().to_string())),
        ("Spot", record.spot_rate.clone()),
        ("Fwd points", record.forward_points.clone()),
        ("Outright", record.outright_rate.clone()),
        ("Value date", record.value_date.clone()),
        ("Tenor", record.tenor.clone()),
        ("Option", record.option_type.map(|o| o.as_str().to_string())),
        ("Strike", record.strike.clone()),
        ("Premium", with_ccy(&record.premium, &record.premium_currency)),
        ("Vol", record.volatility.clone()),
        ("Delta", record.delta.clone()),
        ("Time", Some(record.trade_time.format("%Y-%m-%d %H:%M:%S UTC").to_string())),
    ];

    rows.into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect()
}

fn hedge_rows(request: &FxHedgeRequest) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Amount", request.display_amount()),
        ("Flow", request.direction.label().to_string()),
        ("Maturity", request.display_maturity()),
        ("Base currency", request.base_currency.clone()),
    ];
    if let Some(rate) = request.current_rate {
        rows.push(("Current rate", rate.to_string()));
    }
    if let Some(barrier) = request.barrier {
        rows.push(("Barrier", barrier.to_string()));
    }
    if let Some(direction) = request.hedge_direction {
        rows.push(("Protection", direction.label().to_string()));
    }
    rows
}

fn field_table(rows: &[(&'static str, String)]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (label, value) in rows {
        builder.push_record([label.to_string(), value.clone()]);
    }
    styled(builder)
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}
