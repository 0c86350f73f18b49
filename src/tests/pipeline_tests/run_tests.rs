// src/tests/pipeline_tests/run_tests.rs
use crate::config::{SelectorConfig, SelectorRule};
use crate::domain::diagnostics::IssueKind;
use crate::extract::county::CountyStrategy;
use crate::extract::pipeline::Pipeline;
use crate::scraper::ScraperError;
use crate::spreadsheets::{load_listings_csv, save_listings_csv};
use crate::tests::utils::{default_pipeline, mixed_page, normal_card, page};

fn single_listing(id: &str, address: &str, price: &str) -> String {
    page(&[normal_card(
        id,
        &format!("/for-sale/{id}"),
        Some(address),
        price,
        &["3 Bed", "2 Bath", "House"],
    )])
}

#[test]
fn normal_records_come_before_grouped_records() -> Result<(), ScraperError> {
    let pages = vec![
        ("p1".to_string(), mixed_page()),
        (
            "p2".to_string(),
            single_listing("r9", "9 Hill Road, Co. Mayo", "€199,000"),
        ),
    ];
    let output = default_pipeline().process_documents(&pages)?;

    let addresses: Vec<&str> = output.records.iter().map(|r| r.address.as_str()).collect();
    assert_eq!(
        addresses,
        vec![
            "12 Main Street, Kilkenny, Co. Kilkenny",
            "Apartment 4, The Maltings, Dublin 8",
            "Site at Ballymore, Co. Westmeath",
            "9 Hill Road, Co. Mayo",
            "The Grange, Stillorgan, Dublin 18",
            "The Grange, Stillorgan, Dublin 18",
        ]
    );
    Ok(())
}

#[test]
fn repeated_pages_are_deduplicated() -> Result<(), ScraperError> {
    let pages = vec![
        ("first".to_string(), mixed_page()),
        ("again".to_string(), mixed_page()),
    ];
    let output = default_pipeline().process_documents(&pages)?;

    assert_eq!(output.records.len(), 5);
    assert_eq!(output.diagnostics.duplicates_removed, 5);
    // Counters from both pages are kept.
    assert_eq!(output.diagnostics.count(IssueKind::NotAListing), 2);
    Ok(())
}

#[test]
fn same_listing_with_other_price_text_is_kept() -> Result<(), ScraperError> {
    let pages = vec![
        (
            "a".to_string(),
            single_listing("r1", "3 Pearse Street, Co. Cork", "€300,000"),
        ),
        (
            "b".to_string(),
            single_listing("r1", "3 Pearse Street, Co. Cork", "AMV: €300,000"),
        ),
    ];
    let output = default_pipeline().process_documents(&pages)?;
    assert_eq!(output.records.len(), 2);
    assert_eq!(output.diagnostics.duplicates_removed, 0);
    Ok(())
}

#[test]
fn one_bad_page_fails_the_run() {
    let broken = page(&[normal_card(
        "r1",
        "/for-sale/r1",
        None,
        "€1",
        &["1 Bed"],
    )]);
    let pages = vec![
        ("good".to_string(), mixed_page()),
        ("broken".to_string(), broken),
    ];
    let result = default_pipeline().process_documents(&pages);
    assert!(matches!(
        result,
        Err(ScraperError::FragmentCountMismatch { .. })
    ));
}

#[test]
fn pattern_strategy_finds_county_mid_address() -> Result<(), ScraperError> {
    let html = single_listing("r1", "Kilbeggan, Co. Westmeath, Ireland", "€180,000");

    let lookup = default_pipeline().process_page("lookup", &html)?;
    assert_eq!(lookup.normal[0].county, "");

    let pattern = Pipeline::new(SelectorConfig::default(), CountyStrategy::Pattern)?
        .process_page("pattern", &html)?;
    assert_eq!(pattern.normal[0].county, "Co. Westmeath");
    Ok(())
}

#[test]
fn renamed_classes_only_need_new_config() -> Result<(), ScraperError> {
    let html = single_listing("r1", "5 Bridge Street, Co. Clare", "€220,000")
        .replace("knPImU", "zzNewA");

    let stale = default_pipeline().process_page("stale", &html);
    assert!(stale.is_err());

    let mut config = SelectorConfig::default();
    config.normal.address = SelectorRule::new(&["p"], "TitleBlock__Address-sc-1avkvav-7 zzNewA");
    config.version = "daft-test".to_string();
    let page = Pipeline::new(config, CountyStrategy::Lookup)?.process_page("fresh", &html)?;

    assert_eq!(page.normal[0].address, "5 Bridge Street, Co. Clare");
    assert_eq!(page.normal[0].county, "Co. Clare");
    Ok(())
}

#[test]
fn written_csv_reads_back() -> Result<(), ScraperError> {
    let output = default_pipeline().process_documents(&[("p".to_string(), mixed_page())])?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("daft_listings.csv");
    save_listings_csv(&path, &output.records)?;

    let back = load_listings_csv(&path)?;
    assert_eq!(back, output.records);
    Ok(())
}
