pub mod csv_loader;
pub mod insights;
pub mod renderer;
pub mod stats;
pub mod tts;
pub mod voice;
