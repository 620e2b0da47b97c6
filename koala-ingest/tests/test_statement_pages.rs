use chrono::NaiveDate;
use koala_ingest::{
    Bank, C6Extractor, ExtractError, ExtractorRegistry, NubankExtractor, StatementExtractor,
    TextPages, extract, extract_from,
};

const C6_PAGE: &str = include_str!("fixtures/c6_page.txt");
const NUBANK_PAGE: &str = include_str!("fixtures/nubank_page.txt");

#[test]
fn test_nubank_full_page() {
    let out = NubankExtractor::new()
        .with_year(2023)
        .build_records(NUBANK_PAGE)
        .unwrap();

    assert_eq!(out.records.len(), 28);
    assert!(out.skipped.is_empty());

    let payment = &out.records[0];
    assert_eq!(payment.name, "Pagamento em 31 JUL");
    assert_eq!(payment.amount, 1727.0);

    let installments: Vec<_> = out
        .records
        .iter()
        .filter(|r| r.installment.is_some())
        .collect();
    assert_eq!(installments.len(), 2);
    assert_eq!(installments[0].name, "Antecipada - Mercadolivre*Mercadol");
    assert_eq!(installments[0].installment_of(), Some(7));
    assert_eq!(installments[0].installment_to(), Some(7));
    assert_eq!(installments[1].name, "Pag*Riotgame");
    assert_eq!(installments[1].installment_of(), Some(1));
    assert_eq!(installments[1].installment_to(), Some(3));

    let last = out.records.last().unwrap();
    assert_eq!(last.name, "Parker Estacionamentos");
    assert_eq!(last.amount, 14.0);
    assert_eq!(last.purchased_at, NaiveDate::from_ymd_opt(2023, 8, 6).unwrap());

    for r in &out.records {
        assert!(r.amount >= 0.0);
        assert_eq!(r.installment_of().is_some(), r.installment_to().is_some());
    }
}

#[test]
fn test_c6_statement_over_pages() {
    // cover, summary, then two transaction pages
    let source: TextPages = ["cover", "summary", C6_PAGE, "31 AGO Padaria Real 9,50\n"]
        .into_iter()
        .collect();

    let out = extract(&C6Extractor::new().with_year(2023), &source).unwrap();
    assert_eq!(out.records.len(), 9);
    assert_eq!(out.records[0].name, "Pag*Posto");
    assert_eq!(out.records[8].name, "Padaria Real");
    assert_eq!(out.records[8].amount, 9.5);
}

#[test]
fn test_start_page_overrides_layout_default() {
    let source: TextPages = [C6_PAGE].into_iter().collect();
    let c6 = C6Extractor::new().with_year(2023);

    // default start page 2 is past a one-page document
    assert!(matches!(
        extract(&c6, &source),
        Err(ExtractError::PageOutOfRange {
            start_page: 2,
            page_count: 1
        })
    ));

    let out = extract_from(&c6, &source, 0).unwrap();
    assert_eq!(out.records.len(), 8);
}

#[test]
fn test_registry_dispatch() {
    let registry = ExtractorRegistry::with_defaults();
    let source = TextPages::from_form_feed(&format!("a\x0cb\x0cc\x0c{NUBANK_PAGE}"));

    let nubank = registry.get(Bank::Nubank).unwrap();
    let out = extract(nubank, &source).unwrap();
    assert_eq!(out.records.len(), 28);

    // the C6 pattern finds nothing in a Nubank layout
    let c6 = registry.get(Bank::C6).unwrap();
    let out = extract_from(c6, &source, 3).unwrap();
    assert!(out.records.is_empty());
}
