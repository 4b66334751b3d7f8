use serde_json::json;

use super::{CommandOutput, open_desk};
use crate::display::stats_table;
use crate::error::Result;

/// Ticket counts by status and priority plus SLA breaches (agents and admins)
pub async fn cmd_stats(output_json: bool) -> Result<()> {
    let desk = open_desk().await?;
    let stats = desk.stats().await?;

    let mut json_output = serde_json::to_value(&stats)?;
    json_output["sla_compliance"] = json!(stats.sla_compliance());

    CommandOutput::new(json_output)
        .with_text(format!(
            "{}\nSLA compliance: {}%",
            stats_table(&stats),
            stats.sla_compliance()
        ))
        .print(output_json)
}
