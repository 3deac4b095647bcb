use crate::models::{Dataset, InsightReport, ReportSection, SectionBody, Table, PREVIEW_ROWS};
use crate::services::stats::{categorical_stats, NumericStats};

pub const NO_MISSING_VALUES_TEXT: &str = "No missing values found in the dataset. Great!";

/// Builds the structured insight report for a dataset.
///
/// Total over every dataset, including zero-row and zero-column ones: each
/// section either renders real content or a fixed fallback, and the two
/// statistical sections are omitted entirely when no column of their kind
/// exists.
pub fn generate_insights(dataset: &Dataset) -> InsightReport {
    let mut sections = Vec::new();

    sections.push(ReportSection {
        title: "Data Shape".to_string(),
        body: SectionBody::Text(format!(
            "Analysis complete! Your dataset has {} rows and {} columns.",
            dataset.row_count,
            dataset.column_count()
        )),
    });

    sections.push(ReportSection {
        title: "Data Types".to_string(),
        body: SectionBody::Table(data_types_table(dataset)),
    });

    sections.push(ReportSection {
        title: "Missing Values".to_string(),
        body: missing_values_body(dataset),
    });

    if dataset.numeric_columns().next().is_some() {
        sections.push(ReportSection {
            title: "Statistical Summary (Numeric Columns)".to_string(),
            body: SectionBody::Table(numeric_summary_table(dataset)),
        });
    }

    if dataset.categorical_columns().next().is_some() {
        sections.push(ReportSection {
            title: "Statistical Summary (Categorical Columns)".to_string(),
            body: SectionBody::Table(categorical_summary_table(dataset)),
        });
    }

    sections.push(ReportSection {
        title: "Data Preview (First 5 Rows)".to_string(),
        body: SectionBody::Table(preview_table(dataset)),
    });

    InsightReport { sections }
}

fn data_types_table(dataset: &Dataset) -> Table {
    Table {
        columns: vec!["Column".to_string(), "Data Type".to_string()],
        rows: dataset
            .columns
            .iter()
            .map(|column| vec![column.name.clone(), column.kind.label().to_string()])
            .collect(),
    }
}

fn missing_values_body(dataset: &Dataset) -> SectionBody {
    if dataset.total_null_count() == 0 {
        return SectionBody::Text(NO_MISSING_VALUES_TEXT.to_string());
    }

    // Only columns that actually have nulls appear here
    SectionBody::Table(Table {
        columns: vec!["Column".to_string(), "Missing Values".to_string()],
        rows: dataset
            .columns
            .iter()
            .filter(|column| column.null_count > 0)
            .map(|column| vec![column.name.clone(), column.null_count.to_string()])
            .collect(),
    })
}

fn numeric_summary_table(dataset: &Dataset) -> Table {
    let mut columns = vec![String::new()];
    let mut rows: Vec<Vec<String>> = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"]
        .iter()
        .map(|label| vec![label.to_string()])
        .collect();

    for column in dataset.numeric_columns() {
        columns.push(column.name.clone());
        let stats = NumericStats::from_values(&column.numeric_values());
        rows[0].push(stats.count.to_string());
        rows[1].push(format_stat(stats.mean));
        rows[2].push(format_stat(stats.std));
        rows[3].push(format_stat(stats.min));
        rows[4].push(format_stat(stats.q25));
        rows[5].push(format_stat(stats.median));
        rows[6].push(format_stat(stats.q75));
        rows[7].push(format_stat(stats.max));
    }

    Table { columns, rows }
}

fn categorical_summary_table(dataset: &Dataset) -> Table {
    let mut columns = vec![String::new()];
    let mut rows: Vec<Vec<String>> = ["count", "unique", "top", "freq"]
        .iter()
        .map(|label| vec![label.to_string()])
        .collect();

    for column in dataset.categorical_columns() {
        columns.push(column.name.clone());
        let stats = categorical_stats(column);
        rows[0].push(stats.count.to_string());
        rows[1].push(stats.unique.to_string());
        rows[2].push(stats.top.unwrap_or_else(|| "NaN".to_string()));
        rows[3].push(stats.freq.to_string());
    }

    Table { columns, rows }
}

fn preview_table(dataset: &Dataset) -> Table {
    let preview_len = dataset.row_count.min(PREVIEW_ROWS);
    let rows = (0..preview_len)
        .map(|row_idx| {
            dataset
                .columns
                .iter()
                .map(|column| column.cells.get(row_idx).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    Table {
        columns: dataset
            .columns
            .iter()
            .map(|column| column.name.clone())
            .collect(),
        rows,
    }
}

/// Statistics render with full native precision; absent ones render as NaN.
fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "NaN".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::csv_loader::load_dataset;
    use bytes::Bytes;

    fn dataset(input: &'static str) -> Dataset {
        load_dataset(&Bytes::from_static(input.as_bytes())).unwrap()
    }

    fn table<'a>(report: &'a InsightReport, title: &str) -> &'a Table {
        match &report.section(title).expect("section missing").body {
            SectionBody::Table(table) => table,
            SectionBody::Text(text) => panic!("expected table in {}, got text: {}", title, text),
        }
    }

    #[test]
    fn shape_sentence_embeds_exact_counts() {
        let report = generate_insights(&dataset("age,city\n20,A\n30,B\n40,A\n,C\n"));
        match &report.section("Data Shape").unwrap().body {
            SectionBody::Text(text) => {
                assert_eq!(
                    text,
                    "Analysis complete! Your dataset has 4 rows and 2 columns."
                );
            }
            _ => panic!("Data Shape must be a text block"),
        }
    }

    #[test]
    fn section_order_is_fixed() {
        let report = generate_insights(&dataset("age,city\n20,A\n,B\n"));
        let titles: Vec<&str> = report
            .sections
            .iter()
            .map(|section| section.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec![
                "Data Shape",
                "Data Types",
                "Missing Values",
                "Statistical Summary (Numeric Columns)",
                "Statistical Summary (Categorical Columns)",
                "Data Preview (First 5 Rows)",
            ]
        );
    }

    #[test]
    fn data_types_list_every_column() {
        let report = generate_insights(&dataset("age,city,code\n20,A,x1\n30,B,2\n"));
        let types = table(&report, "Data Types");
        assert_eq!(types.columns, vec!["Column", "Data Type"]);
        assert_eq!(
            types.rows,
            vec![
                vec!["age".to_string(), "numeric".to_string()],
                vec!["city".to_string(), "categorical".to_string()],
                vec!["code".to_string(), "mixed".to_string()],
            ]
        );
    }

    #[test]
    fn clean_dataset_gets_reassurance_text() {
        let report = generate_insights(&dataset("age,city\n20,A\n30,B\n"));
        match &report.section("Missing Values").unwrap().body {
            SectionBody::Text(text) => assert_eq!(text, NO_MISSING_VALUES_TEXT),
            _ => panic!("expected the fixed reassurance text"),
        }
    }

    #[test]
    fn missing_values_table_excludes_complete_columns() {
        let report = generate_insights(&dataset("age,city\n20,A\n30,B\n40,A\n,C\n"));
        let missing = table(&report, "Missing Values");
        assert_eq!(missing.rows, vec![vec!["age".to_string(), "1".to_string()]]);
    }

    #[test]
    fn numeric_summary_matches_describe_semantics() {
        let report = generate_insights(&dataset("age,city\n20,A\n30,B\n40,A\n,C\n"));
        let summary = table(&report, "Statistical Summary (Numeric Columns)");
        assert_eq!(summary.columns, vec!["".to_string(), "age".to_string()]);
        assert_eq!(summary.rows[0], vec!["count".to_string(), "3".to_string()]);
        assert_eq!(summary.rows[1], vec!["mean".to_string(), "30".to_string()]);
        assert_eq!(summary.rows[2], vec!["std".to_string(), "10".to_string()]);
        assert_eq!(summary.rows[3], vec!["min".to_string(), "20".to_string()]);
        assert_eq!(summary.rows[4], vec!["25%".to_string(), "25".to_string()]);
        assert_eq!(summary.rows[5], vec!["50%".to_string(), "30".to_string()]);
        assert_eq!(summary.rows[6], vec!["75%".to_string(), "35".to_string()]);
        assert_eq!(summary.rows[7], vec!["max".to_string(), "40".to_string()]);
    }

    #[test]
    fn numeric_summary_omitted_without_numeric_columns() {
        let report = generate_insights(&dataset("city,color\nA,red\nB,blue\n"));
        assert!(report
            .section("Statistical Summary (Numeric Columns)")
            .is_none());
        assert!(report
            .section("Statistical Summary (Categorical Columns)")
            .is_some());
    }

    #[test]
    fn categorical_summary_omitted_without_text_columns() {
        let report = generate_insights(&dataset("a,b\n1,2\n3,4\n"));
        assert!(report
            .section("Statistical Summary (Categorical Columns)")
            .is_none());
        assert!(report
            .section("Statistical Summary (Numeric Columns)")
            .is_some());
    }

    #[test]
    fn categorical_summary_reports_top_and_freq() {
        let report = generate_insights(&dataset("age,city\n20,A\n30,B\n40,A\n,C\n"));
        let summary = table(&report, "Statistical Summary (Categorical Columns)");
        assert_eq!(summary.columns, vec!["".to_string(), "city".to_string()]);
        assert_eq!(summary.rows[0], vec!["count".to_string(), "4".to_string()]);
        assert_eq!(summary.rows[1], vec!["unique".to_string(), "3".to_string()]);
        assert_eq!(summary.rows[2], vec!["top".to_string(), "A".to_string()]);
        assert_eq!(summary.rows[3], vec!["freq".to_string(), "2".to_string()]);
    }

    #[test]
    fn all_null_numeric_column_reports_nan_stats() {
        let report = generate_insights(&dataset("blank,city\n,A\nNA,B\n"));
        let summary = table(&report, "Statistical Summary (Numeric Columns)");
        assert_eq!(summary.rows[0], vec!["count".to_string(), "0".to_string()]);
        assert_eq!(summary.rows[1], vec!["mean".to_string(), "NaN".to_string()]);
        assert_eq!(summary.rows[7], vec!["max".to_string(), "NaN".to_string()]);
    }

    #[test]
    fn preview_caps_at_five_rows_verbatim() {
        let report =
            generate_insights(&dataset("n,tag\n1,a\n2,b\n3,c\n4,d\n5,e\n6,f\n7,g\n"));
        let preview = table(&report, "Data Preview (First 5 Rows)");
        assert_eq!(preview.columns, vec!["n".to_string(), "tag".to_string()]);
        assert_eq!(preview.rows.len(), 5);
        assert_eq!(preview.rows[0], vec!["1".to_string(), "a".to_string()]);
        assert_eq!(preview.rows[4], vec!["5".to_string(), "e".to_string()]);
    }

    #[test]
    fn preview_keeps_null_markers_as_typed() {
        let report = generate_insights(&dataset("age,city\n20,A\nN/A,B\n"));
        let preview = table(&report, "Data Preview (First 5 Rows)");
        assert_eq!(preview.rows[1], vec!["N/A".to_string(), "B".to_string()]);
    }

    #[test]
    fn zero_row_dataset_still_reports_every_fixed_section() {
        let report = generate_insights(&dataset("a,b,c\n"));
        match &report.section("Data Shape").unwrap().body {
            SectionBody::Text(text) => {
                assert_eq!(text, "Analysis complete! Your dataset has 0 rows and 3 columns.");
            }
            _ => panic!("Data Shape must be a text block"),
        }
        assert!(report.section("Data Types").is_some());
        assert!(report.section("Missing Values").is_some());
        let preview = table(&report, "Data Preview (First 5 Rows)");
        assert_eq!(preview.columns.len(), 3);
        assert!(preview.rows.is_empty());
    }

    #[test]
    fn zero_column_dataset_produces_a_valid_report() {
        let empty = Dataset {
            columns: Vec::new(),
            row_count: 0,
        };
        let report = generate_insights(&empty);
        assert!(report.section("Data Shape").is_some());
        assert!(report
            .section("Statistical Summary (Numeric Columns)")
            .is_none());
        let preview = table(&report, "Data Preview (First 5 Rows)");
        assert!(preview.columns.is_empty());
        assert!(preview.rows.is_empty());
    }
}
