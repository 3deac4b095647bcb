use serde::Serialize;
use smallvec::SmallVec;

pub const SAMPLE_SIZE: usize = 3;
pub const PREVIEW_ROWS: usize = 5;

/// Cell spellings treated as missing values during loading.
const MISSING_MARKERS: [&str; 8] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

pub fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell)
}

/// Column classification, computed once at load time and carried on the
/// dataset so no consumer re-infers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Mixed,
}

impl ColumnKind {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
            ColumnKind::Mixed => "mixed",
        }
    }
}

#[derive(Debug)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    /// Raw cell text, one entry per row, verbatim from the source.
    pub cells: Vec<String>,
    pub null_count: usize,
    pub sample_values: SmallVec<[String; SAMPLE_SIZE]>,
}

impl Column {
    pub fn non_null_cells(&self) -> impl Iterator<Item = &str> {
        self.cells
            .iter()
            .map(String::as_str)
            .filter(|cell| !is_missing(cell))
    }

    /// Non-null cells parsed as numbers. For a `Numeric` column every
    /// non-null cell parses; for a `Mixed` column the textual cells drop out.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.non_null_cells()
            .filter_map(|cell| cell.trim().parse::<f64>().ok())
            .collect()
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, ColumnKind::Numeric)
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self.kind, ColumnKind::Categorical | ColumnKind::Mixed)
    }
}

/// In-memory rectangular table. Owned by a single pipeline invocation and
/// never mutated after loading.
#[derive(Debug)]
pub struct Dataset {
    pub columns: Vec<Column>,
    pub row_count: usize,
}

impl Dataset {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn total_null_count(&self) -> usize {
        self.columns.iter().map(|column| column.null_count).sum()
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.is_numeric())
    }

    pub fn categorical_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.is_categorical())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum SectionBody {
    Text(String),
    Table(Table),
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSection {
    pub title: String,
    pub body: SectionBody,
}

/// Ordered set of named descriptive sections about a dataset. Section order
/// is fixed; sections that do not apply are omitted or replaced by a fixed
/// fallback, never silently absent.
#[derive(Debug, Clone, Serialize)]
pub struct InsightReport {
    pub sections: Vec<ReportSection>,
}

impl InsightReport {
    pub fn section(&self, title: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|section| section.title == title)
    }
}

/// Single plain-text narration string intended for speech synthesis.
#[derive(Debug, Clone, Serialize)]
pub struct VoiceSummary {
    pub text: String,
}
