//! Text extraction from uploaded resume files.
//!
//! The format is chosen by filename extension alone; the parsers never sniff
//! content. Anything that fails to parse, decodes to invalid UTF-8, or yields
//! only whitespace comes back as `AppError::Extraction`.

use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};

use crate::errors::AppError;

/// Supported resume file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Pdf,
    Docx,
    Txt,
}

impl FileFormat {
    /// Detects the format from the last filename extension, case-insensitive.
    /// `None` for a missing or unsupported extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_lowercase().as_str() {
            "pdf" => Some(FileFormat::Pdf),
            "docx" => Some(FileFormat::Docx),
            "txt" => Some(FileFormat::Txt),
            _ => None,
        }
    }
}

/// Extracts plain text from the uploaded bytes, trimmed of surrounding
/// whitespace. An empty result is an error: a resume with no text cannot be
/// analyzed.
pub fn extract_text(format: FileFormat, data: &[u8]) -> Result<String, AppError> {
    let text = match format {
        FileFormat::Pdf => extract_pdf(data)?,
        FileFormat::Docx => extract_docx(data)?,
        FileFormat::Txt => extract_txt(data)?,
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::Extraction("document contains no text".to_string()));
    }
    Ok(text)
}

fn extract_pdf(data: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(data)
        .map_err(|e| AppError::Extraction(format!("PDF parse error: {e}")))
}

/// Collects the text of every top-level paragraph, joined with newlines,
/// including run text inside hyperlinks (where contact URLs usually live).
fn extract_docx(data: &[u8]) -> Result<String, AppError> {
    let docx =
        read_docx(data).map_err(|e| AppError::Extraction(format!("DOCX parse error: {e}")))?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(p) = child {
            paragraphs.push(paragraph_text(p));
        }
    }
    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut out = String::new();
    for child in &paragraph.children {
        match child {
            ParagraphChild::Run(run) => {
                for rc in &run.children {
                    if let RunChild::Text(t) = rc {
                        out.push_str(&t.text);
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => {
                for lc in &link.children {
                    if let ParagraphChild::Run(run) = lc {
                        for rc in &run.children {
                            if let RunChild::Text(t) = rc {
                                out.push_str(&t.text);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
    out
}

fn extract_txt(data: &[u8]) -> Result<String, AppError> {
    String::from_utf8(data.to_vec())
        .map_err(|e| AppError::Extraction(format!("TXT decode error: {e}")))
}
