use std::collections::HashMap;

use crate::models::Column;

/// Descriptive statistics over a numeric column's non-null values.
///
/// `count` is the number of non-null values; every other field is `None`
/// when no value exists to compute it from. The standard deviation is the
/// sample deviation (n - 1 denominator), so a single-value column reports
/// `None` there as well.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl NumericStats {
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return NumericStats {
                count,
                mean: None,
                std: None,
                min: None,
                q25: None,
                median: None,
                q75: None,
                max: None,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let sum_sq: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            Some((sum_sq / (count - 1) as f64).sqrt())
        } else {
            None
        };

        NumericStats {
            count,
            mean: Some(mean),
            std,
            min: Some(sorted[0]),
            q25: Some(quantile(&sorted, 0.25)),
            median: Some(quantile(&sorted, 0.5)),
            q75: Some(quantile(&sorted, 0.75)),
            max: Some(sorted[count - 1]),
        }
    }
}

/// Quantile by linear interpolation between closest ranks.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
    }
}

/// Descriptive statistics over a categorical (or mixed) column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalStats {
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}

pub fn categorical_stats(column: &Column) -> CategoricalStats {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    let mut count = 0;

    for cell in column.non_null_cells() {
        count += 1;
        let entry = counts.entry(cell).or_insert(0);
        if *entry == 0 {
            order.push(cell);
        }
        *entry += 1;
    }

    // Ties break toward the value seen first, keeping the result stable.
    let mut top = None;
    let mut freq = 0;
    for value in &order {
        let occurrences = counts[value];
        if occurrences > freq {
            freq = occurrences;
            top = Some((*value).to_string());
        }
    }

    CategoricalStats {
        count,
        unique: order.len(),
        top,
        freq,
    }
}
