use crate::error::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Read};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Text,
    Docx,
    Pdf,
}

impl FileKind {
    /// Maps an extension (without the leading dot) to a kind. Matching is exact,
    /// so `TXT` is not a text document.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "txt" => Some(FileKind::Text),
            "docx" => Some(FileKind::Docx),
            "pdf" => Some(FileKind::Pdf),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension().and_then(|s| s.to_str()).and_then(Self::from_extension)
    }
}

/// One document of a batch as handed to the core: a name, its detected kind
/// (None for unsupported extensions) and the raw bytes.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub filename: String,
    pub kind: Option<FileKind>,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let filename = filename.into();
        let kind = FileKind::from_path(Path::new(&filename));
        Self { filename, kind, bytes: bytes.into() }
    }

    pub fn extension(&self) -> String {
        Path::new(&self.filename)
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

pub fn extract_source(file: &SourceFile) -> Result<(FileKind, String)> {
    match file.kind {
        Some(kind) => Ok((kind, extract_text(kind, &file.bytes)?)),
        None => Err(Error::UnsupportedFormat { extension: file.extension() }),
    }
}

pub fn extract_text(kind: FileKind, bytes: &[u8]) -> Result<String> {
    match kind {
        FileKind::Text => Ok(String::from_utf8(bytes.to_vec())?),
        FileKind::Docx => docx_to_text(bytes),
        FileKind::Pdf => pdf_to_text(bytes),
    }
}

/// DOCX is a zip archive; the body lives in `word/document.xml`.
fn docx_to_text(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::Extraction(format!("not a docx archive: {e}")))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| Error::Extraction(format!("cannot find word/document.xml: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| Error::Extraction(e.to_string()))?;
    let paragraphs = docx_paragraphs(&xml)?;
    Ok(paragraphs.join("\n"))
}

/// Collects the text of every `w:p`, empty paragraphs included.
pub(crate) fn docx_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" if in_paragraph => current.push('\t'),
                b"w:br" | b"w:cr" if in_paragraph => current.push('\n'),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = false;
                    paragraphs.push(std::mem::take(&mut current));
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Ok(Event::Text(e)) if in_text && in_paragraph => {
                let text = e.unescape().map_err(|e| Error::Extraction(e.to_string()))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Extraction(format!(
                    "xml error at position {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }
    Ok(paragraphs)
}

fn pdf_to_text(bytes: &[u8]) -> Result<String> {
    // pdf-extract panics on some malformed inputs; a corrupt upload must only
    // skip its own document.
    let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| Error::Extraction("pdf parser panicked".into()))?
        .map_err(|e| Error::Extraction(e.to_string()))?;
    Ok(join_pages(pages))
}

/// Every page, the last included, is followed by a newline.
fn join_pages(pages: Vec<String>) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(&page);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            let options = zip::write::SimpleFileOptions::default();
            zip.start_file("word/document.xml", options).unwrap();
            zip.write_all(document_xml.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        buf.into_inner()
    }

    /// A minimal PDF with one Helvetica text line per page.
    fn pdf_bytes(pages: &[&str]) -> Vec<u8> {
        let font_id = 3 + 2 * pages.len();
        let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 3 + 2 * i)).collect();
        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()),
        ];
        for (i, line) in pages.iter().enumerate() {
            let content = format!("BT /F1 24 Tf 72 700 Td ({line}) Tj ET");
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << /Font << /F1 {font_id} 0 R >> >> /Contents {} 0 R >>",
                4 + 2 * i
            ));
            objects.push(format!("<< /Length {} >>\nstream\n{content}\nendstream", content.len()));
        }
        objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string());

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!("trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n", objects.len() + 1).as_bytes(),
        );
        pdf
    }

    #[test]
    fn kind_from_extension() {
        assert_eq!(FileKind::from_path(Path::new("a.txt")), Some(FileKind::Text));
        assert_eq!(FileKind::from_path(Path::new("b.docx")), Some(FileKind::Docx));
        assert_eq!(FileKind::from_path(Path::new("c.pdf")), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_path(Path::new("d.csv")), None);
        assert_eq!(FileKind::from_path(Path::new("noext")), None);
    }

    #[test]
    fn plain_text_is_read_as_is() {
        let text = extract_text(FileKind::Text, "Kucing makan\nikan".as_bytes()).unwrap();
        assert_eq!(text, "Kucing makan\nikan");
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let err = extract_text(FileKind::Text, &[0x66, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn unsupported_source_is_rejected() {
        let file = SourceFile::new("data.csv", b"a,b".to_vec());
        match extract_source(&file) {
            Err(Error::UnsupportedFormat { extension }) => assert_eq!(extension, "csv"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn docx_paragraphs_joined_by_newline() {
        let xml = r#"<?xml version="1.0"?>
        <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:body>
                <w:p><w:r><w:t>Kucing </w:t></w:r><w:r><w:t>makan</w:t></w:r></w:p>
                <w:p/>
                <w:p><w:r><w:t>ikan</w:t><w:tab/><w:t>segar</w:t></w:r></w:p>
            </w:body>
        </w:document>"#;
        let text = extract_text(FileKind::Docx, &docx_bytes(xml)).unwrap();
        assert_eq!(text, "Kucing makan\n\nikan\tsegar");
    }

    #[test]
    fn corrupt_docx_is_an_extraction_failure() {
        let err = extract_text(FileKind::Docx, b"definitely not a zip").unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn pdf_pages_are_extracted_in_order() {
        let text = extract_text(FileKind::Pdf, &pdf_bytes(&["Kucing", "Anjing"])).unwrap();
        let kucing = text.find("Kucing").expect("first page text");
        let anjing = text.find("Anjing").expect("second page text");
        assert!(kucing < anjing);
        assert!(text[kucing..anjing].contains('\n'));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn each_pdf_page_ends_with_newline() {
        let pages = vec!["satu".to_string(), String::new(), "tiga".to_string()];
        assert_eq!(join_pages(pages), "satu\n\ntiga\n");
        assert_eq!(join_pages(Vec::new()), "");
    }

    #[test]
    fn corrupt_pdf_is_an_extraction_failure() {
        let err = extract_text(FileKind::Pdf, b"%PDF-1.4 garbage").unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }
}
