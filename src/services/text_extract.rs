//! Document loading: turns PDF/DOCX/TXT/MD sources into ordered text blocks.

use std::path::Path;

use thiserror::Error;

/// Extraction gets killed after this long rather than hanging on a
/// pathological file.
const EXTRACT_TIMEOUT_SECS: u64 = 120;

/// Supported MIME types for document upload.
pub const SUPPORTED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
    "text/markdown",
    "application/octet-stream", // fallback — we detect by extension
];

/// Supported file extensions (used as fallback when MIME is generic).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "md"];

#[derive(Debug, Error)]
pub enum DocumentLoadError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("unsupported document type: {0}")]
    Unsupported(String),

    #[error("failed to read {kind} content: {message}")]
    Parse {
        kind: &'static str,
        message: String,
    },

    #[error("document loading timed out after {0}s")]
    Timeout(u64),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Check if a file is supported by MIME type or extension.
pub fn is_supported(content_type: &str, filename: &str) -> bool {
    if content_type != "application/octet-stream" && SUPPORTED_MIME_TYPES.contains(&content_type) {
        return true;
    }
    extension_from_filename(filename)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Load a document from a server-side path.
pub async fn load_path(path: &Path) -> Result<Vec<String>, DocumentLoadError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DocumentLoadError::NotFound(path.display().to_string())
        } else {
            DocumentLoadError::Io(e)
        }
    })?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    load_bytes(&bytes, "application/octet-stream", &filename).await
}

/// Extract ordered text blocks from file bytes, routing to the correct
/// extractor: one block per page for PDF, a single block otherwise.
///
/// CPU-bound extractors (PDF, DOCX) are run on a blocking thread pool via
/// `spawn_blocking` so they don't stall the async runtime.
pub async fn load_bytes(
    bytes: &[u8],
    content_type: &str,
    filename: &str,
) -> Result<Vec<String>, DocumentLoadError> {
    let ext = extension_from_filename(filename).unwrap_or_default();

    let needs_blocking = matches!(
        content_type,
        "application/pdf"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    ) || matches!(ext.as_str(), "pdf" | "docx");

    if needs_blocking {
        let bytes = bytes.to_vec();
        let ct = content_type.to_string();
        let ext = ext.clone();
        let fname = filename.to_string();

        tracing::info!(
            "load_bytes: starting blocking extraction for '{fname}' ({ct}, {} bytes)",
            bytes.len()
        );

        let handle = tokio::task::spawn_blocking(move || {
            let result = load_sync(&bytes, &ct, &ext);
            match &result {
                Ok(blocks) => tracing::info!(
                    "load_bytes: '{fname}' extraction succeeded, {} blocks",
                    blocks.len()
                ),
                Err(e) => tracing::error!("load_bytes: '{fname}' extraction failed: {e}"),
            }
            result
        });

        match tokio::time::timeout(std::time::Duration::from_secs(EXTRACT_TIMEOUT_SECS), handle)
            .await
        {
            Ok(join_result) => join_result.map_err(|_| DocumentLoadError::Parse {
                kind: "document",
                message: "extraction task panicked".to_string(),
            })?,
            Err(_) => Err(DocumentLoadError::Timeout(EXTRACT_TIMEOUT_SECS)),
        }
    } else {
        load_sync(bytes, content_type, &ext)
    }
}

/// Join loaded blocks into the single text the chunker operates on.
pub fn concat_blocks(blocks: &[String]) -> String {
    blocks.join("\n\n")
}

fn load_sync(bytes: &[u8], content_type: &str, ext: &str) -> Result<Vec<String>, DocumentLoadError> {
    match content_type {
        "application/pdf" => extract_pdf(bytes),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
            extract_docx(bytes)
        }
        "text/plain" | "text/markdown" => extract_plaintext(bytes),
        // Fallback: detect by extension
        _ => match ext {
            "pdf" => extract_pdf(bytes),
            "docx" => extract_docx(bytes),
            "txt" | "md" => extract_plaintext(bytes),
            _ => Err(DocumentLoadError::Unsupported(format!(
                "{content_type} (ext: {ext})"
            ))),
        },
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<Vec<String>, DocumentLoadError> {
    // Try pdftotext (poppler) first — much faster and handles complex PDFs better
    match extract_pdf_pdftotext(bytes) {
        Ok(text) if !text.trim().is_empty() => {
            tracing::info!("PDF extracted via pdftotext ({} chars)", text.len());
            return Ok(split_pages(&text));
        }
        Ok(_) => tracing::warn!("pdftotext returned empty text, falling back to pdf_extract"),
        Err(e) => tracing::warn!("pdftotext failed ({e:#}), falling back to pdf_extract"),
    }

    // Fallback to pure-Rust pdf_extract
    tracing::info!("Extracting PDF via pdf_extract (this may be slow for large files)");
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| DocumentLoadError::Parse {
        kind: "PDF",
        message: e.to_string(),
    })?;
    Ok(split_pages(&text))
}

fn extract_pdf_pdftotext(bytes: &[u8]) -> anyhow::Result<String> {
    use anyhow::Context;
    use std::io::Write;
    use std::process::Command;

    // Write bytes to a temp file (pdftotext reads from file)
    let mut tmp = tempfile::NamedTempFile::new().context("Failed to create temp file")?;
    tmp.write_all(bytes).context("Failed to write PDF to temp file")?;
    tmp.flush()?;

    let output = Command::new("pdftotext")
        .arg("-layout")
        .arg(tmp.path())
        .arg("-") // output to stdout
        .output()
        .context("Failed to run pdftotext — is poppler-utils installed?")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("pdftotext exited with {}: {stderr}", output.status);
    }

    String::from_utf8(output.stdout).context("pdftotext output is not valid UTF-8")
}

/// pdftotext separates pages with form feeds; a text without any becomes a
/// single block.
fn split_pages(text: &str) -> Vec<String> {
    text.split('\u{c}')
        .map(|page| page.trim_end().to_string())
        .filter(|page| !page.trim().is_empty())
        .collect()
}

fn extract_docx(bytes: &[u8]) -> Result<Vec<String>, DocumentLoadError> {
    let doc = docx_rs::read_docx(bytes).map_err(|e| DocumentLoadError::Parse {
        kind: "DOCX",
        message: e.to_string(),
    })?;

    let mut text = String::new();
    for child in doc.document.children.iter() {
        collect_docx_text(child, &mut text);
    }
    Ok(vec![text])
}

fn collect_docx_text(child: &docx_rs::DocumentChild, out: &mut String) {
    match child {
        docx_rs::DocumentChild::Paragraph(p) => {
            for run_child in &p.children {
                if let docx_rs::ParagraphChild::Run(run) = run_child {
                    for rc in &run.children {
                        if let docx_rs::RunChild::Text(t) = rc {
                            out.push_str(&t.text);
                        }
                    }
                }
            }
            out.push('\n');
        }
        docx_rs::DocumentChild::Table(table) => {
            for row in &table.rows {
                let docx_rs::TableChild::TableRow(tr) = row;
                for cell in &tr.cells {
                    let docx_rs::TableRowChild::TableCell(tc) = cell;
                    for tc_child in &tc.children {
                        if let docx_rs::TableCellContent::Paragraph(p) = tc_child {
                            for run_child in &p.children {
                                if let docx_rs::ParagraphChild::Run(run) = run_child {
                                    for rc in &run.children {
                                        if let docx_rs::RunChild::Text(t) = rc {
                                            out.push_str(&t.text);
                                        }
                                    }
                                }
                            }
                            out.push('\t');
                        }
                    }
                }
                out.push('\n');
            }
        }
        _ => {}
    }
}

fn extract_plaintext(bytes: &[u8]) -> Result<Vec<String>, DocumentLoadError> {
    let text = String::from_utf8(bytes.to_vec()).map_err(|e| DocumentLoadError::Parse {
        kind: "text",
        message: e.to_string(),
    })?;
    Ok(vec![text])
}

fn extension_from_filename(filename: &str) -> Option<String> {
    filename.rsplit('.').next().map(|e| e.to_lowercase())
}
