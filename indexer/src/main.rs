use anyhow::Result;
use clap::{Parser, Subcommand};
use search_core::{DocId, DocumentStatus, SearchEngine};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocId,
    text: String,
    #[serde(default)]
    status: Option<DocumentStatus>,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Load documents into a TF-IDF index and query it", long_about = None)]
struct Cli {
    /// Input path (file or directory of .json/.jsonl files)
    #[arg(long, global = true, default_value = "./docs")]
    input: String,
    /// Space-separated stop words
    #[arg(long, global = true, default_value = "")]
    stop_words: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top documents for a query
    Search {
        #[arg(long)]
        query: String,
        /// Only consider documents with this status
        #[arg(long, default_value = "actual")]
        status: DocumentStatus,
    },
    /// Print the query words found in one document
    Match {
        #[arg(long)]
        query: String,
        #[arg(long)]
        id: DocId,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let mut engine = SearchEngine::from_stop_words_text(&cli.stop_words)?;
    let docs = load_documents(Path::new(&cli.input))?;
    let total = docs.len();
    let added = docs
        .into_iter()
        .filter(|doc| add_document_logged(&mut engine, doc))
        .count();
    tracing::info!(added, rejected = total - added, "ingested documents");

    match cli.command {
        Commands::Search { query, status } => {
            let found = engine.find_top_documents_by_status(&query, status)?;
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        Commands::Match { query, id } => {
            let (words, status) = engine.match_document(&query, id)?;
            let out = serde_json::json!({ "id": id, "words": words, "status": status });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}

/// Add a document, logging instead of propagating a rejection.
fn add_document_logged(engine: &mut SearchEngine, doc: &InputDoc) -> bool {
    let status = doc.status.unwrap_or(DocumentStatus::Actual);
    match engine.add_document(doc.id, &doc.text, status, &doc.ratings) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(doc_id = doc.id, error = %err, "failed to add document");
            false
        }
    }
}

fn load_documents(input_path: &Path) -> Result<Vec<InputDoc>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    } else {
        anyhow::bail!("input path {} does not exist", input_path.display());
    }

    let mut docs = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
    }
    Ok(docs)
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        docs.push(serde_json::from_str(&line)?);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v)?);
            }
        }
        serde_json::Value::Object(_) => docs.push(serde_json::from_value(json)?),
        _ => tracing::warn!(file = %file.display(), "skipping json that is neither object nor array"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_json_and_jsonl_from_directory() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"[{"id": 1, "text": "cat dog", "ratings": [5]}, {"id": 2, "text": "cat", "status": "banned"}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("b.jsonl"), "{\"id\": 3, \"text\": \"bird\"}\n\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let docs = load_documents(dir.path()).unwrap();
        assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(docs[1].status, Some(DocumentStatus::Banned));
        assert!(docs[2].ratings.is_empty());
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(load_documents(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn logged_add_reports_rejections() {
        let mut engine = SearchEngine::default();
        let ok = InputDoc { id: 1, text: "cat".into(), status: None, ratings: vec![2] };
        let dup = InputDoc { id: 1, text: "dog".into(), status: None, ratings: vec![] };
        let negative = InputDoc { id: -4, text: "dog".into(), status: None, ratings: vec![] };
        assert!(add_document_logged(&mut engine, &ok));
        assert!(!add_document_logged(&mut engine, &dup));
        assert!(!add_document_logged(&mut engine, &negative));
        assert_eq!(engine.document_count(), 1);
    }
}
