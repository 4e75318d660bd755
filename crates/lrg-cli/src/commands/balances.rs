use lrg_bootstrap::ops;
use lrg_core::responses::BalanceReport;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::{output, render_rows};

/// Handle `lrg balances`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let chain = ctx.connect()?;
    let report = ops::inspect_balances(&chain, &ctx.config, ctx.root()).await?;
    match flags.format {
        OutputFormat::Table => {
            println!("{}", render_balance_table(&report)?);
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => output(&report, flags.format),
    }
}

fn render_balance_table(report: &BalanceReport) -> anyhow::Result<String> {
    let rows = serde_json::to_value(&report.balances)?;
    let table = render_rows(rows.as_array().map_or(&[][..], Vec::as_slice));
    Ok(format!(
        "{table}\n\ngovernor functions: {}\ntimelock functions: {}",
        report.governor_functions.join(", "),
        report.timelock_functions.join(", "),
    ))
}

#[cfg(test)]
mod tests {
    use lrg_core::responses::{AccountBalance, BalanceReport};

    use super::render_balance_table;

    #[test]
    fn balance_table_lists_rows_then_functions() {
        let report = BalanceReport {
            balances: vec![AccountBalance {
                label: "rider".to_string(),
                address: "0x0000000000000000000000000000000000001003".to_string(),
                utility: "10.0".to_string(),
                vote: Some("1.0".to_string()),
            }],
            governor_functions: vec!["propose".to_string(), "queue".to_string()],
            timelock_functions: vec![],
        };
        let out = render_balance_table(&report).expect("table should render");
        assert!(out.lines().next().is_some_and(|line| line.contains("label")));
        assert!(out.contains("governor functions: propose, queue"));
    }
}
