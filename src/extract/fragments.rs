// src/extract/fragments.rs

use crate::config::{CompiledSelectors, JoinKeyRule};
use crate::domain::{Diagnostics, Issue};
use crate::extract::compound::DELIMITER;
use crate::scraper::{GroupedFragments, KeyedText, NormalFragments, PriceFragment};
use scraper::{ElementRef, Html, Selector};

/// Pulls the normal-ad fragment sequences off a page, in document order.
/// Nothing is filtered here; promo cards are still in `prices`.
pub fn extract_normal(
    document: &Html,
    selectors: &CompiledSelectors,
    diagnostics: &mut Diagnostics,
) -> NormalFragments {
    let addresses: Vec<String> = document
        .select(&selectors.normal_address)
        .map(node_text)
        .collect();

    let mut compound_infos = Vec::new();
    let mut info_items = Vec::new();
    for node in document.select(&selectors.normal_compound) {
        let items: Vec<String> = node
            .select(&selectors.normal_info_item)
            .map(node_text)
            .filter(|t| !t.is_empty())
            .collect();
        compound_infos.push(compound_text(node, &items));
        info_items.push(items);
    }

    let prices: Vec<PriceFragment> = document
        .select(&selectors.normal_price)
        .map(|node| PriceFragment {
            text: node_text(node),
            href: enclosing_href(node),
        })
        .collect();

    note_miss(diagnostics, "normal.address", addresses.len());
    note_miss(diagnostics, "normal.compound_info", compound_infos.len());
    note_miss(diagnostics, "normal.price", prices.len());

    NormalFragments {
        addresses,
        compound_infos,
        info_items,
        prices,
    }
}

/// Pulls the grouped-ad fragments, each tagged with the identifier of the
/// list item that ties it to its siblings.
pub fn extract_grouped(
    document: &Html,
    selectors: &CompiledSelectors,
    join: &JoinKeyRule,
    diagnostics: &mut Diagnostics,
) -> GroupedFragments {
    let keyed = |selector: &Selector, depth: usize, skip_empty: bool| -> Vec<KeyedText> {
        document
            .select(selector)
            .map(|node| KeyedText {
                key: join_key(node, join, depth),
                text: node_text(node),
            })
            .filter(|k| !skip_empty || !k.text.is_empty())
            .collect()
    };

    let addresses = keyed(&selectors.grouped_address, join.address_depth, false);
    let compound_infos = keyed(&selectors.grouped_compound, join.unit_depth, true);
    let prices = keyed(&selectors.grouped_price, join.unit_depth, false);

    note_miss(diagnostics, "grouped.address", addresses.len());
    note_miss(diagnostics, "grouped.compound_info", compound_infos.len());
    note_miss(diagnostics, "grouped.price", prices.len());

    GroupedFragments {
        addresses,
        compound_infos,
        prices,
    }
}

fn note_miss(diagnostics: &mut Diagnostics, field: &'static str, found: usize) {
    if found == 0 {
        diagnostics.record(Issue::SelectorMiss { field });
    }
}

/// All text under a node with whitespace collapsed.
fn node_text(node: ElementRef<'_>) -> String {
    node.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compound line for a card. Prefers the info items; otherwise joins the raw
/// text runs, dropping runs that are only separators.
fn compound_text(node: ElementRef<'_>, items: &[String]) -> String {
    let sep = format!(" {DELIMITER} ");
    if !items.is_empty() {
        return items.join(&sep);
    }
    node.text()
        .map(str::trim)
        .filter(|t| !t.is_empty() && !t.chars().all(|c| c == DELIMITER))
        .collect::<Vec<_>>()
        .join(&sep)
}

fn enclosing_href(node: ElementRef<'_>) -> Option<String> {
    node.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}

/// Identifier of the `depth`-th enclosing `join.tag` element (1 = nearest).
fn join_key(node: ElementRef<'_>, join: &JoinKeyRule, depth: usize) -> Option<String> {
    node.ancestors()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == join.tag)
        .nth(depth.checked_sub(1)?)
        .and_then(|li| li.value().attr(&join.attribute))
        .map(str::to_string)
}
