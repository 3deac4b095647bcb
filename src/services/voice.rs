use crate::error::AppError;
use crate::models::{Dataset, VoiceSummary};
use crate::services::stats::NumericStats;

/// Narration substituted by the caller when composition fails.
pub const SUMMARY_FALLBACK: &str = "Could not generate a voice summary due to an error.";

// Summarize up to 3 numeric columns to keep the narration brief
const MAX_HIGHLIGHTED_COLUMNS: usize = 3;

/// Composes the plain-text narration for a dataset.
///
/// Fragment order is fixed: shape, missing-value status, then numeric
/// highlights. Numeric columns with no non-null values contribute no
/// sentence and do not consume a highlight slot.
pub fn compose_summary(dataset: &Dataset) -> Result<VoiceSummary, AppError> {
    let mut parts = vec![format!(
        "Analysis complete. The dataset has {} rows and {} columns.",
        dataset.row_count,
        dataset.column_count()
    )];

    if dataset.total_null_count() == 0 {
        parts.push("No missing values were found.".to_string());
    } else {
        parts.push("The dataset contains some missing values that may need attention.".to_string());
    }

    let mut highlights = Vec::new();
    for column in dataset.numeric_columns() {
        if highlights.len() == MAX_HIGHLIGHTED_COLUMNS {
            break;
        }
        let stats = NumericStats::from_values(&column.numeric_values());
        match (stats.mean, stats.max) {
            (Some(mean), Some(max)) => highlights.push(format!(
                "For {}, the average is {:.2}, and the maximum value is {:.2}.",
                column.name.replace('_', " "),
                mean,
                max
            )),
            // No non-null values to report on
            (None, None) => {}
            _ => {
                return Err(AppError::SummaryGeneration(format!(
                    "Inconsistent statistics for column {}",
                    column.name
                )))
            }
        }
    }

    if !highlights.is_empty() {
        parts.push("Here is a summary of the key numerical columns.".to_string());
        parts.extend(highlights);
    }

    Ok(VoiceSummary {
        text: parts.join(" "),
    })
}
