use bytes::Bytes;
use csv::ReaderBuilder;
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::error::AppError;
use crate::models::{is_missing, Column, ColumnKind, Dataset, SAMPLE_SIZE};

/// Parses CSV bytes into a [`Dataset`], inferring each column's kind once
/// so downstream consumers never re-detect types.
///
/// The first record is the header row. Records with inconsistent field
/// counts are rejected; input with no parseable header at all (an empty
/// file) is rejected as having no columns.
pub fn load_dataset(data: &Bytes) -> Result<Dataset, AppError> {
    let start = std::time::Instant::now();

    let mut reader = ReaderBuilder::new().from_reader(data.as_ref());

    let headers = reader
        .headers()
        .map_err(|e| AppError::MalformedDataset(format!("Failed to read CSV header: {}", e)))?
        .clone();

    if headers.is_empty() {
        return Err(AppError::EmptyColumnSet);
    }

    let names: Vec<String> = headers.iter().map(str::to_string).collect();
    let mut cells_by_column: Vec<Vec<String>> = vec![Vec::new(); names.len()];

    for result in reader.records() {
        // The reader is strict, so a ragged row surfaces here
        let record = result
            .map_err(|e| AppError::MalformedDataset(format!("Failed to read CSV row: {}", e)))?;
        for (idx, field) in record.iter().enumerate() {
            cells_by_column[idx].push(field.to_string());
        }
    }

    let row_count = cells_by_column.first().map_or(0, |cells| cells.len());

    let columns: Vec<Column> = names
        .into_par_iter()
        .zip(cells_by_column.into_par_iter())
        .map(|(name, cells)| build_column(name, cells))
        .collect();

    tracing::info!(
        "Dataset loaded in {:?}: {} rows, {} columns",
        start.elapsed(),
        row_count,
        columns.len()
    );

    Ok(Dataset { columns, row_count })
}

fn build_column(name: String, cells: Vec<String>) -> Column {
    let (null_count, numeric_count, text_count) = cells
        .par_iter()
        .fold(
            || (0usize, 0usize, 0usize),
            |(mut nulls, mut numbers, mut texts), cell| {
                if is_missing(cell) {
                    nulls += 1;
                } else if cell.trim().parse::<f64>().is_ok() {
                    numbers += 1;
                } else {
                    texts += 1;
                }
                (nulls, numbers, texts)
            },
        )
        .reduce(
            || (0, 0, 0),
            |a, b| (a.0 + b.0, a.1 + b.1, a.2 + b.2),
        );

    // An all-null column counts as numeric, matching how a fully empty CSV
    // column loads as a float column elsewhere.
    let kind = match (numeric_count, text_count) {
        (_, 0) => ColumnKind::Numeric,
        (0, _) => ColumnKind::Categorical,
        _ => ColumnKind::Mixed,
    };

    let mut sample_values = SmallVec::<[String; SAMPLE_SIZE]>::new();
    cells
        .iter()
        .take(SAMPLE_SIZE)
        .for_each(|cell| sample_values.push(cell.clone()));

    Column {
        name,
        kind,
        cells,
        null_count,
        sample_values,
    }
}
