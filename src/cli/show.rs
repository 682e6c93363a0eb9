use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::ViewArgs;
use crate::error::Result;
use crate::grid::{self, Grid};
use crate::settings::load_settings;

pub fn run(view: &ViewArgs) -> Result<()> {
    let settings = load_settings();
    let payload = view.source(&settings).fetch()?;
    let grid = grid::render(&payload, view.start_month());
    println!("{}", format_grid(&grid));
    Ok(())
}

/// Plain-text rendition of the grid: two table rows per grid row,
/// income first, then active partners.
pub fn format_grid(grid: &Grid) -> String {
    let mut table = Table::new();

    let mut header = vec![Cell::new(""), Cell::new("")];
    for col in &grid.columns {
        header.push(Cell::new(format!("{}\nPlan:", col.name)));
        header.push(Cell::new("\nFact:"));
    }
    table.set_header(header);

    for row in &grid.rows {
        let mut income_row = vec![
            Cell::new(row.kind.title().bold()),
            Cell::new(row.kind.income_label()),
        ];
        let mut partner_row = vec![Cell::new(""), Cell::new(row.kind.partners_label())];
        for cell in &row.cells {
            let (plan, fact) = cell.income_pair();
            income_row.push(Cell::new(plan));
            income_row.push(Cell::new(fact));
            let (plan, fact) = cell.partners_pair();
            partner_row.push(Cell::new(plan));
            partner_row.push(Cell::new(fact));
        }
        table.add_row(income_row);
        table.add_row(partner_row);
    }

    format!("Affiliate manager\n{table}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Manager, MonthData, Payload, PlanFact};

    #[test]
    fn format_grid_contains_figures_and_placeholder() {
        colored::control::set_override(false);
        let jan = MonthData {
            plan: PlanFact { income: 1000.0, active_partners: 5.0 },
            fact: PlanFact { income: 1200.0, active_partners: 6.0 },
        };
        let payload = Payload {
            total: vec![Some(jan); 12],
            table: vec![Manager { admin_name: "Alice".into(), months: vec![None; 12] }],
        };
        let out = format_grid(&grid::render(&payload, 0));
        assert!(out.starts_with("Affiliate manager"));
        assert!(out.contains("January"));
        assert!(out.contains("June"));
        assert!(!out.contains("July"));
        assert!(out.contains("$ 1,000"));
        assert!(out.contains("$ 1,200"));
        assert!(out.contains("Total active partners:"));
        assert!(out.contains("Alice"));
        assert!(out.contains("No data"));
    }
}
