use std::io::Cursor;

use koala_ingest::{C6Extractor, ExtractError, PageSource, PdfDocument, extract, pages};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// A minimal PDF with one text line per BT/ET block, so extracted text keeps line breaks.
fn statement_pdf(page_lines: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in page_lines {
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let y = 800 - 14 * i as i64;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
            operations.push(Operation::new("Td", vec![50.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn c6_statement() -> Vec<u8> {
    statement_pdf(&[
        &["FATURA 17 AGO 2023"],
        &["RESUMO DA FATURA"],
        &[
            "TRANSACOES",
            "31 JUL Autoban 12,20",
            "31 JUL Mercadolivre*Mercadol - Parcela 7/7 296,55",
        ],
        &["01 AGO Top 8,80"],
    ])
}

#[test]
fn test_loads_pages_from_stream() {
    let doc = PdfDocument::load(Cursor::new(c6_statement())).unwrap();
    assert_eq!(doc.page_count(), 4);

    let texts = pages(&doc, 2).unwrap();
    assert_eq!(texts.len(), 2);
    assert!(texts[0].contains("Autoban"));
    assert!(texts[1].contains("Top"));
}

#[test]
fn test_start_page_beyond_document() {
    let doc = PdfDocument::load_mem(&c6_statement()).unwrap();
    let err = pages(&doc, 10).unwrap_err();
    assert!(matches!(
        err,
        ExtractError::PageOutOfRange {
            start_page: 10,
            page_count: 4
        }
    ));
}

#[test]
fn test_extracts_records_from_pdf() {
    let doc = PdfDocument::load_mem(&c6_statement()).unwrap();
    let out = extract(&C6Extractor::new().with_year(2023), &doc).unwrap();

    let names: Vec<_> = out.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Autoban", "Mercadolivre*Mercadol", "Top"]);
    assert_eq!(out.records[1].installment_of(), Some(7));
}
