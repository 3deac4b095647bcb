use axum::{
    extract::{Multipart, State},
    http::Method,
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::SectionBody,
    services::{csv_loader, insights, renderer, tts::SpeechSynthesizer, voice},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/datasets/analyze", post(analyze_dataset))
        .layer(cors)
}

#[derive(Debug, Serialize)]
pub struct SectionView {
    title: String,
    body: SectionBody,
    html: String,
}

#[derive(Debug, Serialize)]
pub struct ColumnView {
    name: String,
    kind: &'static str,
    null_count: usize,
    sample_values: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    filename: String,
    row_count: usize,
    column_count: usize,
    column_analysis: Vec<ColumnView>,
    sections: Vec<SectionView>,
    report_html: String,
    voice_summary: String,
    audio_file: Option<String>,
}

#[axum::debug_handler]
async fn analyze_dataset(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let start = std::time::Instant::now();

    // 1. Pull the uploaded file out of the multipart body
    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read upload: {}", e)))?;
            upload = Some((filename, data));
            break;
        }
    }

    let (filename, data) = upload.ok_or_else(|| AppError::InvalidInput("No file part".to_string()))?;

    if filename.is_empty() {
        return Err(AppError::InvalidInput("No selected file".to_string()));
    }
    if !filename.to_lowercase().ends_with(".csv") {
        return Err(AppError::InvalidInput(
            "Invalid file type. Please upload a CSV file.".to_string(),
        ));
    }
    if data.len() > state.config.max_upload_bytes {
        return Err(AppError::InvalidInput(format!(
            "File exceeds the {} byte upload limit",
            state.config.max_upload_bytes
        )));
    }

    tracing::info!("Processing upload: {} ({}KB)", filename, data.len() / 1024);

    // 2. Persist the upload under its own name, stripped of any path parts
    let safe_name = Path::new(&filename)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| AppError::InvalidInput("No selected file".to_string()))?;
    let upload_path = state.config.upload_dir.join(&safe_name);
    tokio::fs::write(&upload_path, &data).await?;

    // 3. Load the dataset; loader errors are fatal to the request
    let dataset = csv_loader::load_dataset(&data)?;

    // 4. Generate the insight report
    let report_start = std::time::Instant::now();
    let report = insights::generate_insights(&dataset);
    tracing::info!("Insight report generated in {:?}", report_start.elapsed());

    // 5. Compose the narration; failures degrade to the fixed fallback
    let voice_summary = match voice::compose_summary(&dataset) {
        Ok(summary) => summary.text,
        Err(e) => {
            tracing::error!("Error creating voice summary: {}", e);
            voice::SUMMARY_FALLBACK.to_string()
        }
    };

    // 6. Synthesize the narration; failures drop the audio artifact only
    let tts_start = std::time::Instant::now();
    let synthesizer = SpeechSynthesizer::new();
    let audio_file = match synthesizer
        .synthesize(&voice_summary, &state.config.tts_language)
        .await
    {
        Ok(audio) => {
            let audio_filename = format!("summary_{}.mp3", Uuid::new_v4().simple());
            let audio_path = state.config.static_dir.join(&audio_filename);
            tokio::fs::write(&audio_path, &audio).await?;
            tracing::info!("Audio summary synthesized in {:?}", tts_start.elapsed());
            Some(audio_filename)
        }
        Err(e) => {
            tracing::warn!("Speech synthesis failed: {}", e);
            None
        }
    };

    let column_analysis = dataset
        .columns
        .iter()
        .map(|column| ColumnView {
            name: column.name.clone(),
            kind: column.kind.label(),
            null_count: column.null_count,
            sample_values: column.sample_values.to_vec(),
        })
        .collect();

    let sections = report
        .sections
        .iter()
        .map(|section| SectionView {
            title: section.title.clone(),
            html: renderer::render_body(&section.body),
            body: section.body.clone(),
        })
        .collect();
    let report_html = renderer::render_report(&report);

    tracing::info!("Total processing completed in {:?}", start.elapsed());

    Ok(Json(AnalyzeResponse {
        filename: safe_name,
        row_count: dataset.row_count,
        column_count: dataset.column_count(),
        column_analysis,
        sections,
        report_html,
        voice_summary,
        audio_file,
    }))
}
