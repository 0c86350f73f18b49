// src/tests/pipeline_tests/page_tests.rs
use crate::domain::diagnostics::IssueKind;
use crate::domain::ListingRecord;
use crate::scraper::ScraperError;
use crate::tests::utils::{
    default_pipeline, grouped_card, mixed_page, normal_card, page, NORMAL_PRICE,
};

fn record(
    address: &str,
    county: &str,
    beds: &str,
    baths: &str,
    kind: &str,
    area: &str,
    price: &str,
    value: f64,
) -> ListingRecord {
    ListingRecord {
        address: address.into(),
        county: county.into(),
        bedrooms: beds.into(),
        bathrooms: baths.into(),
        property_type: kind.into(),
        area: area.into(),
        price_text: price.into(),
        price_numeric: value,
    }
}

#[test]
fn mixed_page_resolves_both_ad_styles() -> Result<(), ScraperError> {
    let page = default_pipeline().process_page("mixed", &mixed_page())?;

    assert!(page.had_fragments);
    assert_eq!(
        page.normal,
        vec![
            record(
                "12 Main Street, Kilkenny, Co. Kilkenny",
                "Co. Kilkenny",
                "3 Bed",
                "2 Bath",
                "Semi-D",
                "110 m²",
                "€325,000",
                325000.0,
            ),
            record(
                "Apartment 4, The Maltings, Dublin 8",
                "Dublin 8",
                "2 Bed",
                "1 Bath",
                "Apartment",
                "",
                "Price on Application",
                0.0,
            ),
            record(
                "Site at Ballymore, Co. Westmeath",
                "Co. Westmeath",
                "",
                "",
                "Site",
                "0.5 ac",
                "AMV: €50,000",
                50000.0,
            ),
        ]
    );

    assert_eq!(page.grouped.len(), 2);
    for unit in &page.grouped {
        assert_eq!(unit.address, "The Grange, Stillorgan, Dublin 18");
        assert_eq!(unit.county, "Dublin 18");
        assert_eq!(unit.property_type, "Apartment");
        assert!(unit.area.is_empty());
    }
    assert_eq!(page.grouped[0].bedrooms, "2 Bed");
    assert_eq!(page.grouped[0].price_numeric, 400000.0);
    assert_eq!(page.grouped[1].bedrooms, "3 Bed");
    assert_eq!(page.grouped[1].price_numeric, 525000.0);

    assert_eq!(page.diagnostics.count(IssueKind::NotAListing), 1);
    assert_eq!(page.diagnostics.count(IssueKind::SelectorMiss), 0);
    assert_eq!(page.diagnostics.count(IssueKind::PriceFormat), 0);
    Ok(())
}

#[test]
fn page_without_grouped_ads_only_counts_misses() -> Result<(), ScraperError> {
    let html = page(&[normal_card(
        "result-1",
        "/for-sale/x/1",
        Some("1 Quay Street, Galway, Co. Galway"),
        "€410,000",
        &["4 Bed", "3 Bath", "Detached"],
    )]);
    let page = default_pipeline().process_page("normal only", &html)?;

    assert_eq!(page.normal.len(), 1);
    assert!(page.grouped.is_empty());
    assert_eq!(page.diagnostics.count(IssueKind::SelectorMiss), 3);
    Ok(())
}

#[test]
fn blank_page_has_no_fragments() -> Result<(), ScraperError> {
    let page = default_pipeline().process_page("blank", "<html><body></body></html>")?;
    assert!(!page.had_fragments);
    assert!(page.normal.is_empty());
    assert!(page.grouped.is_empty());
    Ok(())
}

#[test]
fn unreadable_price_keeps_the_record() -> Result<(), ScraperError> {
    let html = page(&[normal_card(
        "result-1",
        "/for-sale/x/1",
        Some("2 Strand Road, Sligo, Co. Sligo"),
        "€TBC",
        &["3 Bed", "1 Bath", "Terrace"],
    )]);
    let page = default_pipeline().process_page("tbc", &html)?;

    assert_eq!(page.normal[0].price_text, "€TBC");
    assert_eq!(page.normal[0].price_numeric, 0.0);
    assert_eq!(page.diagnostics.count(IssueKind::PriceFormat), 1);
    Ok(())
}

#[test]
fn price_without_compound_line_is_fatal() {
    let html = format!(
        r#"{}<a href="/for-sale/y/2"><span class="{NORMAL_PRICE}">€1</span></a>"#,
        normal_card("result-1", "/for-sale/x/1", Some("A, Co. Cork"), "€1", &["1 Bed"])
    );
    let err = default_pipeline().process_page("short", &html).unwrap_err();

    assert!(matches!(
        err,
        ScraperError::FragmentCountMismatch {
            left: 2,
            right: 1,
            ..
        }
    ));
}

#[test]
fn listing_without_address_is_fatal() {
    let html = page(&[
        normal_card("result-1", "/for-sale/x/1", Some("A, Co. Cork"), "€1", &["1 Bed"]),
        normal_card("result-2", "/for-sale/x/2", None, "€2", &["2 Bed"]),
    ]);
    let err = default_pipeline().process_page("no address", &html).unwrap_err();

    match err {
        ScraperError::FragmentCountMismatch {
            page,
            left_name,
            left,
            right,
            ..
        } => {
            assert_eq!(page, "no address");
            assert_eq!(left_name, "listing prices");
            assert_eq!((left, right), (2, 1));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn promo_card_and_development_give_four_records() -> Result<(), ScraperError> {
    let html = page(&[
        normal_card(
            "result-1",
            "/for-sale/a/1",
            Some("4 Elm Park, Dublin 4"),
            "€850,000",
            &["3 Bed", "2 Bath", "Semi-D"],
        ),
        normal_card(
            "ad-1",
            "https://mortgages.example.ie/offer",
            None,
            "€0",
            &["Mortgage"],
        ),
        normal_card(
            "result-2",
            "/for-sale/b/2",
            Some("Ardmore, Co. Cork"),
            "€350,000",
            &["3 Bed", "3 Bath", "Duplex"],
        ),
        grouped_card(
            "result-3",
            "Bayside Square, Sutton, Dublin 13",
            &[
                ("€395,000", "2 Bed · 2 Bath · Apartment"),
                ("€450,000", "3 Bed · 2 Bath · Townhouse"),
            ],
        ),
    ]);
    let output = default_pipeline().process_documents(&[("e2e".to_string(), html)])?;

    assert_eq!(output.records.len(), 4);
    assert!(output.records.iter().all(|r| !r.address.is_empty()));
    assert!(output.records.iter().all(|r| r.price_numeric > 0.0));
    assert_eq!(output.records[1].county, "Co. Cork");
    assert_eq!(output.records[3].property_type, "Townhouse");
    Ok(())
}
