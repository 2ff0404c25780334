use std::path::PathBuf;

use engine_logging::engine_info;

use crate::persist::{AtomicFileWriter, PersistError};

const MAX_MODEL_CHARS: usize = 40;

/// `summary_{model}.txt` when the model is known, otherwise `summary.txt`.
pub fn download_filename(model: Option<&str>) -> String {
    match model.map(sanitize_model).filter(|name| !name.is_empty()) {
        Some(name) => format!("summary_{name}.txt"),
        None => "summary.txt".to_string(),
    }
}

/// Text written to disk: a model header when the model is known, else the bare summary.
pub fn download_document(model: Option<&str>, summary: &str) -> String {
    match model.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("Model: {}\n\nSummary:\n{summary}", name.to_uppercase()),
        None => summary.to_string(),
    }
}

/// Model names come from the service; keep only characters safe in a file name.
fn sanitize_model(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.trim().chars() {
        let c = if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
            c
        } else {
            '_'
        };
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        cleaned.push(c);
    }
    let trimmed: String = cleaned
        .trim_matches(&['_', '.'][..])
        .chars()
        .take(MAX_MODEL_CHARS)
        .collect();
    trimmed
}

/// Materializes summaries as text files in the download directory.
#[derive(Debug, Clone)]
pub struct DownloadWriter {
    writer: AtomicFileWriter,
}

impl DownloadWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
        }
    }

    pub fn save(&self, model: Option<&str>, summary: &str) -> Result<PathBuf, PersistError> {
        let filename = download_filename(model);
        let path = self
            .writer
            .write(&filename, &download_document(model, summary))?;
        engine_info!("Wrote download {:?} ({} bytes)", path, summary.len());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_includes_model_when_known() {
        assert_eq!(download_filename(Some("bart")), "summary_bart.txt");
        assert_eq!(download_filename(Some("t5")), "summary_t5.txt");
        assert_eq!(download_filename(None), "summary.txt");
        assert_eq!(download_filename(Some("  ")), "summary.txt");
    }

    #[test]
    fn filename_strips_path_characters_from_model() {
        assert_eq!(
            download_filename(Some("../etc/passwd")),
            "summary_etc_passwd.txt"
        );
        assert_eq!(
            download_filename(Some("facebook/bart large")),
            "summary_facebook_bart_large.txt"
        );
        assert_eq!(download_filename(Some("///")), "summary.txt");
    }

    #[test]
    fn document_has_header_only_with_model() {
        assert_eq!(
            download_document(Some("t5"), "Hi."),
            "Model: T5\n\nSummary:\nHi."
        );
        assert_eq!(download_document(None, "Hi."), "Hi.");
    }
}
