use crate::domain::models::{BatchSummary, JsonOut, OutcomeStatus};
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// One line per hash, then the totals.
pub fn print_summary(json: bool, summary: &BatchSummary) -> anyhow::Result<()> {
    print_one(json, summary, |s| {
        let mut lines: Vec<String> = s
            .outcomes
            .iter()
            .map(|o| match o.status {
                OutcomeStatus::Persisted => format!("{}\tpersisted", o.hash),
                OutcomeStatus::Failed => format!(
                    "{}\tfailed\t{}\t{}",
                    o.hash,
                    o.stage.map(|st| st.to_string()).unwrap_or_default(),
                    o.error.as_deref().unwrap_or_default()
                ),
            })
            .collect();
        lines.push(format!(
            "processed {} hashes: {} persisted, {} failed",
            s.total, s.persisted, s.failed
        ));
        lines.join("\n")
    })
}
