use bytes::Bytes;
use once_cell::sync::Lazy;
use reqwest::Client;

use crate::error::AppError;

// Same endpoint the gTTS library drives
const TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(Client::new);

/// Text-to-speech collaborator. Takes a plain narration string and a
/// language code and returns MP3 bytes; naming and storing the artifact is
/// the caller's job.
pub struct SpeechSynthesizer {
    endpoint: String,
}

impl SpeechSynthesizer {
    pub fn new() -> Self {
        Self {
            endpoint: TTS_ENDPOINT.to_string(),
        }
    }

    pub async fn synthesize(&self, text: &str, lang: &str) -> Result<Bytes, AppError> {
        let response = HTTP_CLIENT
            .get(&self.endpoint)
            .query(&[("ie", "UTF-8"), ("client", "tw-ob"), ("tl", lang), ("q", text)])
            .send()
            .await
            .map_err(|e| AppError::SpeechSynthesis(format!("Failed to reach TTS endpoint: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::SpeechSynthesis(format!(
                "TTS endpoint returned status: {}",
                response.status()
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| AppError::SpeechSynthesis(format!("Failed to read TTS response: {}", e)))
    }
}

impl Default for SpeechSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}
