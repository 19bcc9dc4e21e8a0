
use anyhow::Context;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{QualityError, Result};

const CSV_SAMPLE_ROWS: usize = 10;

/// Kind of source a document came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Csv,
    /// Text handed to the assistant directly rather than read from a file
    #[default]
    Inline,
}

impl FileType {
    /// File type for a path, judged by extension
    #[inline]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Text),
            "md" | "markdown" => Some(Self::Markdown),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Path or label identifying where the text came from
    pub source: String,
    pub file_type: FileType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,
}

impl DocumentMetadata {
    #[inline]
    pub fn new(source: impl Into<String>, file_type: FileType) -> Self {
        Self {
            source: source.into(),
            file_type,
            ..Self::default()
        }
    }

    /// Final path component of the source, or the whole source when it is not a path
    #[inline]
    pub fn file_name(&self) -> &str {
        Path::new(&self.source)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.source)
    }
}

/// Raw text plus where it came from; immutable once chunked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    #[inline]
    pub fn new(text: impl Into<String>, metadata: DocumentMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }
}

/// Optional format handling the loader may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderCapabilities {
    /// Extract PDF text page by page; PDF files are skipped when off
    pub pdf: bool,
    /// Render markdown to plain text instead of indexing the raw markup
    pub markdown: bool,
    /// Summarise CSV tables; CSV files are skipped when off
    pub csv: bool,
}

impl Default for LoaderCapabilities {
    #[inline]
    fn default() -> Self {
        Self {
            pdf: true,
            markdown: true,
            csv: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DocumentLoader {
    capabilities: LoaderCapabilities,
}

impl DocumentLoader {
    #[inline]
    pub fn new(capabilities: LoaderCapabilities) -> Self {
        Self { capabilities }
    }

    #[inline]
    pub fn capabilities(&self) -> LoaderCapabilities {
        self.capabilities
    }

    #[inline]
    pub fn is_supported(&self, path: &Path) -> bool {
        match FileType::from_path(path) {
            Some(FileType::Pdf) => self.capabilities.pdf,
            Some(FileType::Csv) => self.capabilities.csv,
            Some(_) => true,
            None => false,
        }
    }

    /// Load one file. Blank files produce no documents; a PDF yields one document per page.
    #[inline]
    pub fn load_file(&self, path: &Path) -> Result<Vec<Document>> {
        let file_type = FileType::from_path(path).ok_or_else(|| {
            QualityError::Ingestion(format!("Unsupported file type: {}", path.display()))
        })?;

        if file_type == FileType::Pdf {
            if !self.capabilities.pdf {
                return Err(QualityError::Ingestion(format!(
                    "PDF support is disabled: {}",
                    path.display()
                )));
            }
            return load_pdf(path);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let source = path.display().to_string();

        let document = match file_type {
            FileType::Csv if !self.capabilities.csv => {
                return Err(QualityError::Ingestion(format!(
                    "CSV support is disabled: {}",
                    path.display()
                )));
            }
            FileType::Csv => summarize_csv(path, &content)?,
            FileType::Markdown if self.capabilities.markdown => Document::new(
                markdown_to_text(&content),
                DocumentMetadata::new(source, file_type),
            ),
            _ => Document::new(content, DocumentMetadata::new(source, file_type)),
        };

        if document.text.trim().is_empty() {
            debug!("Skipping blank file {}", path.display());
            return Ok(Vec::new());
        }

        debug!(
            "Loaded {} ({} chars)",
            path.display(),
            document.text.chars().count()
        );
        Ok(vec![Document {
            text: document.text.trim().to_string(),
            ..document
        }])
    }

    /// Load every supported file below `dir`; unreadable files are logged and skipped
    #[inline]
    pub fn load_directory(&self, dir: &Path, recursive: bool) -> Result<Vec<Document>> {
        if !dir.is_dir() {
            return Err(QualityError::Ingestion(format!(
                "Directory not found: {}",
                dir.display()
            )));
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        let files: Vec<PathBuf> = WalkDir::new(dir)
            .follow_links(true)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| self.is_supported(path))
            .collect();

        let documents = self.load_all(&files);
        info!(
            "Processed {} documents from {}",
            documents.len(),
            dir.display()
        );
        Ok(documents)
    }

    /// Load a mix of files and directories, skipping anything that fails
    #[inline]
    pub fn load_paths(&self, paths: &[PathBuf], recursive: bool) -> Vec<Document> {
        let mut documents = Vec::new();

        for path in paths {
            if path.is_dir() {
                match self.load_directory(path, recursive) {
                    Ok(docs) => documents.extend(docs),
                    Err(e) => warn!("Skipping {}: {}", path.display(), e),
                }
            } else {
                documents.extend(self.load_all(std::slice::from_ref(path)));
            }
        }

        documents
    }

    fn load_all(&self, files: &[PathBuf]) -> Vec<Document> {
        files
            .iter()
            .flat_map(|path| {
                self.load_file(path).unwrap_or_else(|e| {
                    warn!("Skipping {}: {}", path.display(), e);
                    Vec::new()
                })
            })
            .collect()
    }
}

/// Render markdown to readable plain text, one block per line group
#[inline]
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new_ext(markdown, Options::all()) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::Start(Tag::Item) => text.push_str("- "),
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::CodeBlock | TagEnd::BlockQuote(_),
            ) => text.push_str("\n\n"),
            Event::End(TagEnd::Item | TagEnd::TableRow | TagEnd::TableHead) => text.push('\n'),
            Event::End(TagEnd::TableCell) => text.push_str(" | "),
            _ => {}
        }
    }

    let mut cleaned = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        cleaned.push_str(line);
        cleaned.push('\n');
    }

    cleaned.trim().to_string()
}

fn load_pdf(path: &Path) -> Result<Vec<Document>> {
    let pdf = lopdf::Document::load(path)
        .with_context(|| format!("Failed to open PDF {}", path.display()))?;
    let source = path.display().to_string();

    let mut documents = Vec::new();
    for page in pdf.get_pages().into_keys() {
        let text = match pdf.extract_text(&[page]) {
            Ok(text) => text,
            Err(e) => {
                warn!("No text on page {} of {}: {}", page, path.display(), e);
                continue;
            }
        };
        if text.trim().is_empty() {
            continue;
        }

        documents.push(Document::new(
            text.trim(),
            DocumentMetadata {
                page: Some(page),
                ..DocumentMetadata::new(source.clone(), FileType::Pdf)
            },
        ));
    }

    debug!("Loaded {} pages from {}", documents.len(), path.display());
    Ok(documents)
}

fn summarize_csv(path: &Path, content: &str) -> Result<Document> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row_count = 0;
    for record in reader.records() {
        let record = record.with_context(|| format!("Malformed CSV row in {}", path.display()))?;
        if rows.len() < CSV_SAMPLE_ROWS {
            rows.push(record.iter().map(str::to_string).collect());
        }
        row_count += 1;
    }

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    let mut text = format!("CSV File: {file_name}\n\n");
    let _ = write!(
        text,
        "Shape: {} rows, {} columns\n\n",
        row_count,
        headers.len()
    );
    let _ = write!(text, "Columns: {}\n\n", headers.join(", "));
    text.push_str("Data Sample:\n");
    text.push_str(&render_table(&headers, &rows));

    if row_count > CSV_SAMPLE_ROWS {
        let _ = write!(text, "\n\n... and {} more rows", row_count - CSV_SAMPLE_ROWS);
    }

    Ok(Document::new(
        text,
        DocumentMetadata {
            rows: Some(row_count),
            columns: Some(headers.len()),
            ..DocumentMetadata::new(path.display().to_string(), FileType::Csv)
        },
    ))
}

/// Right-aligned plain-text table
fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let width = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }

    let format_row = |cells: &[String]| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                let cell = cells.get(i).map_or("", String::as_str);
                format!("{cell:>width$}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    };

    std::iter::once(format_row(headers))
        .chain(rows.iter().map(|row| format_row(row)))
        .collect::<Vec<_>>()
        .join("\n")
}
