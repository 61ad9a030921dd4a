//! Sample project that builds with the generated Dockerfile as-is.
//!
//! The app is a small Flask service exposing `POST /predict`, which runs a
//! pretrained DistilBERT sentiment classifier over the posted text.

use crate::artifact::{ArtifactError, write_artifact};
use std::path::{Path, PathBuf};

const APP_PY: &str = r#"from flask import Flask, jsonify, request
import torch
from transformers import DistilBertForSequenceClassification, DistilBertTokenizer

MODEL = "distilbert-base-uncased-finetuned-sst-2-english"

app = Flask(__name__)
tokenizer = DistilBertTokenizer.from_pretrained(MODEL)
model = DistilBertForSequenceClassification.from_pretrained(MODEL)


@app.route("/predict", methods=["POST"])
def predict():
    text = (request.get_json(silent=True) or {}).get("text", "")
    inputs = tokenizer(text, return_tensors="pt", truncation=True, padding=True)
    with torch.no_grad():
        logits = model(**inputs).logits
    label = model.config.id2label[logits.argmax().item()]
    return jsonify({"text": text, "sentiment": label})


if __name__ == "__main__":
    app.run(host="0.0.0.0", port=5000)
"#;

const REQUIREMENTS_TXT: &str = "flask\ntorch\ntransformers\n";

/// Files written by [`scaffold`], relative to the project directory.
pub const FILES: [&str; 2] = ["app.py", "requirements.txt"];

/// Create `dir` and write the sample app into it.
///
/// Refuses to touch a directory that already exists.
pub fn scaffold(dir: &Path) -> Result<Vec<PathBuf>, ScaffoldError> {
    if dir.exists() {
        return Err(ScaffoldError::AlreadyExists(dir.to_path_buf()));
    }

    let mut written = Vec::with_capacity(FILES.len());
    for (name, content) in FILES.iter().zip([APP_PY, REQUIREMENTS_TXT]) {
        let path = dir.join(name);
        write_artifact(&path, content)?;
        written.push(path);
    }

    tracing::info!(dir = %dir.display(), "scaffolded quickstart project");
    Ok(written)
}

#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("directory '{}' already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error(transparent)]
    Write(#[from] ArtifactError),
}
