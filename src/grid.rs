//! Pure mapping from a fetched payload and a cursor to the six-month grid.
//!
//! The grid is shared by the interactive dashboard and the plain-text
//! `show` report; neither does any month arithmetic of its own.

use crate::fmt::{income, partners};
use crate::models::{month_at, MonthData, Payload};
use crate::window::{displayed_months, MONTH_NAMES, WINDOW_LEN};

pub const NO_DATA: &str = "No data";

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Calendar month index, 0 = January.
    pub month: usize,
    pub name: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    Total,
    Manager(String),
}

impl RowKind {
    pub fn title(&self) -> &str {
        match self {
            RowKind::Total => "Manager",
            RowKind::Manager(name) => name,
        }
    }

    pub fn income_label(&self) -> &'static str {
        match self {
            RowKind::Total => "Total income:",
            RowKind::Manager(_) => "Income:",
        }
    }

    pub fn partners_label(&self) -> &'static str {
        match self {
            RowKind::Total => "Total active partners:",
            RowKind::Manager(_) => "Active partners:",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    NoData,
    Figures {
        plan_income: String,
        fact_income: String,
        plan_partners: String,
        fact_partners: String,
    },
}

impl Cell {
    fn from_month(month: Option<&MonthData>) -> Self {
        match month {
            None => Cell::NoData,
            Some(m) => Cell::Figures {
                plan_income: income(m.plan.income),
                fact_income: income(m.fact.income),
                plan_partners: partners(m.plan.active_partners),
                fact_partners: partners(m.fact.active_partners),
            },
        }
    }

    /// (plan, fact) text for the income sub-row.
    pub fn income_pair(&self) -> (&str, &str) {
        match self {
            Cell::NoData => (NO_DATA, NO_DATA),
            Cell::Figures { plan_income, fact_income, .. } => (plan_income, fact_income),
        }
    }

    /// (plan, fact) text for the partner sub-row. Empty for placeholders.
    pub fn partners_pair(&self) -> (&str, &str) {
        match self {
            Cell::NoData => ("", ""),
            Cell::Figures { plan_partners, fact_partners, .. } => (plan_partners, fact_partners),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub kind: RowKind,
    /// One cell per displayed column, in column order.
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub columns: Vec<Column>,
    /// Aggregate row first, then one row per manager in payload order.
    pub rows: Vec<Row>,
}

pub fn render(payload: &Payload, cursor: usize) -> Grid {
    let months = displayed_months(cursor);

    let columns = months
        .iter()
        .map(|&month| Column {
            month,
            name: MONTH_NAMES[month],
        })
        .collect();

    let mut rows = Vec::with_capacity(payload.table.len() + 1);
    rows.push(Row {
        kind: RowKind::Total,
        cells: cells_for(&payload.total, &months),
    });
    for manager in &payload.table {
        rows.push(Row {
            kind: RowKind::Manager(manager.admin_name.clone()),
            cells: cells_for(&manager.months, &months),
        });
    }

    Grid { columns, rows }
}

fn cells_for(series: &[Option<MonthData>], months: &[usize; WINDOW_LEN]) -> Vec<Cell> {
    months
        .iter()
        .map(|&m| Cell::from_month(month_at(series, m)))
        .collect()
}
