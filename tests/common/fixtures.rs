//! Document fixtures built in memory.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

/// Sentences of the first half of the two-topic policy.
pub const MATERNITY_SECTION: &[&str] = &[
    "Maternity benefits cover childbirth expenses after a waiting period of nine months.",
    "Maternity claims require hospital discharge papers and the birth certificate.",
];

/// Sentences of the second half of the two-topic policy.
pub const AMBULANCE_SECTION: &[&str] = &[
    "Ambulance charges are reimbursed up to two thousand rupees per hospitalisation.",
    "Ambulance services must be provided by a registered operator.",
];

/// Build a minimal DOCX archive with one body paragraph per entry.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, p))
        .collect();
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

/// The two-topic policy: maternity first, ambulance second.
pub fn two_topic_policy() -> Vec<u8> {
    let maternity = MATERNITY_SECTION.join(" ");
    let ambulance = AMBULANCE_SECTION.join(" ");
    docx_bytes(&[maternity.as_str(), ambulance.as_str()])
}

/// Write the two-topic policy into `dir` and return its path.
pub fn write_two_topic_policy(dir: &Path) -> PathBuf {
    let path = dir.join("policy.docx");
    std::fs::write(&path, two_topic_policy()).unwrap();
    path
}

/// Build a text PDF with one page per entry, drawing each line on its own row.
pub fn pdf_bytes(pages: &[Vec<&str>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 10.into()]),
            Operation::new("TL", vec![14.into()]),
            Operation::new("Td", vec![40.into(), 780.into()]),
        ];
        for line in lines {
            // Trailing space keeps rows and pages apart in the extracted text.
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(format!("{} ", line))],
            ));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Split a sentence into two rows at the first space past its middle.
fn wrap(sentence: &str) -> Vec<&str> {
    let mid = sentence.len() / 2;
    match sentence[mid..].find(' ') {
        Some(offset) => vec![&sentence[..mid + offset], &sentence[mid + offset + 1..]],
        None => vec![sentence],
    }
}

/// Lay out a section as printed rows, wrapping its first sentence.
fn page_rows<'a>(section: &[&'a str]) -> Vec<&'a str> {
    let mut rows = wrap(section[0]);
    rows.extend_from_slice(&section[1..]);
    rows
}

/// The two-topic policy as a two-page PDF: maternity on page 1, ambulance on page 2.
pub fn two_topic_pdf() -> Vec<u8> {
    pdf_bytes(&[page_rows(MATERNITY_SECTION), page_rows(AMBULANCE_SECTION)])
}

/// Write the two-page policy PDF into `dir` and return its path.
pub fn write_two_topic_pdf(dir: &Path) -> PathBuf {
    let path = dir.join("policy.pdf");
    std::fs::write(&path, two_topic_pdf()).unwrap();
    path
}
