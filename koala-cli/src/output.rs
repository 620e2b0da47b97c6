//! Rendering of imported records as a terminal table, JSON or CSV.

use anyhow::Result;
use chrono::NaiveDate;
use clap::ValueEnum;
use koala_core::{Expense, ExpenseType, MonetaryValue};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
    Csv,
}

/// Flat row shape shared by all formats (CSV cannot nest).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub purchased_at: NaiveDate,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ExpenseType>,
    pub installment_of: Option<u32>,
    pub installment_to: Option<u32>,
    pub amount: f64,
}

impl From<&MonetaryValue> for Row {
    fn from(v: &MonetaryValue) -> Self {
        Row {
            purchased_at: v.purchased_at,
            name: v.name.clone(),
            kind: None,
            installment_of: v.installment_of(),
            installment_to: v.installment_to(),
            amount: v.amount,
        }
    }
}

impl From<&Expense> for Row {
    fn from(e: &Expense) -> Self {
        Row {
            purchased_at: e.purchased_at,
            name: e.name.clone(),
            kind: Some(e.kind),
            installment_of: e.installment.map(|i| i.current),
            installment_to: e.installment.map(|i| i.total),
            amount: e.amount,
        }
    }
}

pub fn render<W: Write>(rows: &[Row], format: Format, mut w: W) -> Result<()> {
    match format {
        Format::Table => {
            render_table(rows, &mut w)?;
            w.flush()?;
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut w, rows)?;
            writeln!(w)?;
            w.flush()?;
        }
        Format::Csv => {
            let mut wtr = csv::Writer::from_writer(w);
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

fn render_table<W: Write>(rows: &[Row], w: &mut W) -> Result<()> {
    writeln!(
        w,
        "{:>5}  {:<12}  {:<40}  {:<11}  {:>7}  {:>10}",
        "Index", "Purchased At", "Name", "Type", "Install", "Amount"
    )?;
    for (i, row) in rows.iter().enumerate() {
        let kind = row
            .kind
            .map(|k| format!("{k:?}").to_lowercase())
            .unwrap_or_default();
        let installment = match (row.installment_of, row.installment_to) {
            (Some(of), Some(to)) => format!("{of}/{to}"),
            _ => String::new(),
        };
        writeln!(
            w,
            "{:>5}  {:<12}  {:<40}  {:<11}  {:>7}  {:>10.2}",
            i + 1,
            row.purchased_at.format("%d/%m/%Y").to_string(),
            truncate(&row.name, 40),
            kind,
            installment,
            row.amount
        )?;
    }

    let total: f64 = rows.iter().map(|r| r.amount).sum();
    writeln!(w, "\n{} rows, total {:.2}", rows.len(), total)?;
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}
