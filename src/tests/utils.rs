// src/tests/utils.rs
//
// Minimal listing-page markup built from the default selector classes.

use crate::config::SelectorConfig;
use crate::extract::county::CountyStrategy;
use crate::extract::pipeline::Pipeline;

pub const NORMAL_ADDRESS: &str = "TitleBlock__Address-sc-1avkvav-7 knPImU";
pub const NORMAL_COMPOUND: &str = "TitleBlock__CardInfo-sc-1avkvav-9 QvaxK";
pub const NORMAL_ITEM: &str = "TitleBlock__CardInfoItem-sc-1avkvav-8 bcaKbv";
pub const NORMAL_PRICE: &str = "TitleBlock__StyledSpan-sc-1avkvav-4 gDBFnc";
pub const GROUPED_ADDRESS: &str = "TitleBlock__Address-sc-1avkvav-7 eARcqq";
pub const GROUPED_COMPOUND: &str = "SubUnit__CardInfoItem-sc-10x486s-7 AsGHw";
pub const GROUPED_PRICE: &str = "SubUnit__Title-sc-10x486s-5 keXaVZ";

/// Pipeline over the built-in selectors.
pub fn default_pipeline() -> Pipeline {
    Pipeline::new(SelectorConfig::default(), CountyStrategy::Lookup)
        .unwrap_or_else(|e| panic!("default selectors should compile: {e}"))
}

/// One normal search result. Promotional cards have no address node.
pub fn normal_card(
    id: &str,
    href: &str,
    address: Option<&str>,
    price: &str,
    items: &[&str],
) -> String {
    let address = address
        .map(|a| format!(r#"<p class="{NORMAL_ADDRESS}">{a}</p>"#))
        .unwrap_or_default();
    let items = items
        .iter()
        .map(|i| format!(r#"<p class="{NORMAL_ITEM}">{i}</p>"#))
        .collect::<Vec<_>>()
        .join("<span>·</span>");
    format!(
        r#"<li data-testid="{id}"><a href="{href}">
             <span class="{NORMAL_PRICE}">{price}</span>
             {address}
             <div class="{NORMAL_COMPOUND}">{items}</div>
           </a></li>"#
    )
}

/// One development with several sub units, each a (price, compound line).
pub fn grouped_card(id: &str, address: &str, units: &[(&str, &str)]) -> String {
    let units = units
        .iter()
        .enumerate()
        .map(|(n, (price, compound))| {
            format!(
                r#"<li data-testid="sub-unit-{n}">
                     <p class="{GROUPED_PRICE}">{price}</p>
                     <div class="{GROUPED_COMPOUND}">{compound}</div>
                   </li>"#
            )
        })
        .collect::<String>();
    format!(
        r#"<li data-testid="{id}">
             <p class="{GROUPED_ADDRESS}">{address}</p>
             <ul>{units}</ul>
           </li>"#
    )
}

pub fn page(cards: &[String]) -> String {
    format!(
        "<html><body><ul data-testid=\"results\">{}</ul></body></html>",
        cards.concat()
    )
}

/// Three listings, one promo card and a development with two units.
pub fn mixed_page() -> String {
    page(&[
        normal_card(
            "result-1",
            "/for-sale/house-main-street-kilkenny/1",
            Some("12 Main Street, Kilkenny, Co. Kilkenny"),
            "€325,000",
            &["3 Bed", "2 Bath", "110 m²", "Semi-D"],
        ),
        normal_card(
            "promo-1",
            "/new-homes-for-sale/ashfield/9",
            None,
            "From €300,000",
            &["2 & 3 Bed", "Apartment"],
        ),
        normal_card(
            "result-2",
            "/for-sale/apartment-4-the-maltings-dublin-8/2",
            Some("Apartment 4, The Maltings, Dublin 8"),
            "Price on Application",
            &["2 Bed", "1 Bath", "Apartment"],
        ),
        normal_card(
            "result-3",
            "/for-sale/site-ballymore-westmeath/3",
            Some("Site at Ballymore, Co. Westmeath"),
            "AMV: €50,000",
            &["0.5 ac", "Site"],
        ),
        grouped_card(
            "result-4",
            "The Grange, Stillorgan, Dublin 18",
            &[
                ("€400,000", "2 Bed · 2 Bath · Apartment"),
                ("€525,000", "3 Bed · 2 Bath · Apartment"),
            ],
        ),
    ])
}
