use crate::models::{InsightReport, SectionBody, Table};

const TABLE_CLASSES: &str = "table-auto w-full text-left";

/// Renders one section body into an HTML content block.
pub fn render_body(body: &SectionBody) -> String {
    match body {
        SectionBody::Text(text) => format!("<p>{}</p>", escape_html(text)),
        SectionBody::Table(table) => render_table(table),
    }
}

/// Renders the full report as a sequence of titled HTML blocks.
pub fn render_report(report: &InsightReport) -> String {
    report
        .sections
        .iter()
        .map(|section| {
            format!(
                "<h2>{}</h2>\n{}",
                escape_html(&section.title),
                render_body(&section.body)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_table(table: &Table) -> String {
    let mut html = format!("<table class=\"{}\">", TABLE_CLASSES);

    html.push_str("<thead><tr>");
    for name in &table.columns {
        html.push_str("<th>");
        html.push_str(&escape_html(name));
        html.push_str("</th>");
    }
    html.push_str("</tr></thead>");

    html.push_str("<tbody>");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            html.push_str(&escape_html(cell));
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");

    html
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
