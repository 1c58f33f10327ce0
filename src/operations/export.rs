use crate::error::AppResult;
use crate::models::budget::BudgetAllocation;
use std::path::Path;
use tracing::info;

/// Writes one summary row per category followed by its task rows.
pub fn export_allocations(path: &Path, allocations: &[BudgetAllocation]) -> AppResult<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["category", "task", "amount", "percentage"])?;

    let mut rows = 0;
    for allocation in allocations {
        let amount = allocation.amount.to_string();
        let percentage = allocation.percentage.to_string();
        writer.write_record([
            allocation.category.as_str(),
            "",
            amount.as_str(),
            percentage.as_str(),
        ])?;
        rows += 1;
        for task in &allocation.tasks {
            let task_amount = task.amount.to_string();
            writer.write_record([
                allocation.category.as_str(),
                task.name.as_str(),
                task_amount.as_str(),
                "",
            ])?;
            rows += 1;
        }
    }
    writer.flush()?;

    info!(path = %path.display(), rows, "allocation exported");
    Ok(rows)
}
