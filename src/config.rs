// src/config.rs

use crate::scraper::ScraperError;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One structural selector: any of `tags` whose `attribute` equals `value`
/// exactly. The site generates its class names, so these rotate over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorRule {
    pub tags: Vec<String>,
    #[serde(default = "default_attribute")]
    pub attribute: String,
    pub value: String,
}

fn default_attribute() -> String {
    "class".to_string()
}

impl SelectorRule {
    pub fn new(tags: &[&str], value: &str) -> Self {
        Self {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            attribute: default_attribute(),
            value: value.to_string(),
        }
    }

    /// Renders the rule as a CSS selector list, e.g.
    /// `span[class="A b"], p[class="A b"]`.
    pub fn css(&self) -> String {
        let value = self.value.replace('\\', "\\\\").replace('"', "\\\"");
        self.tags
            .iter()
            .map(|tag| format!(r#"{tag}[{}="{value}"]"#, self.attribute))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn compile(&self, field: &str) -> Result<Selector, ScraperError> {
        if self.tags.is_empty() {
            return Err(ScraperError::Selector {
                field: field.to_string(),
                msg: "no tags given".to_string(),
            });
        }
        Selector::parse(&self.css()).map_err(|e| ScraperError::Selector {
            field: field.to_string(),
            msg: e.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalSelectors {
    pub address: SelectorRule,
    pub compound_info: SelectorRule,
    /// Individual bed / bath / area / property-type items inside a compound node.
    pub info_item: SelectorRule,
    pub price: SelectorRule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedSelectors {
    pub address: SelectorRule,
    pub compound_info: SelectorRule,
    pub price: SelectorRule,
}

/// How grouped fragments find the list item that carries their join key.
/// Depths count enclosing `tag` elements, 1 = nearest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinKeyRule {
    pub tag: String,
    pub attribute: String,
    pub address_depth: usize,
    pub unit_depth: usize,
}

/// Versioned selector configuration. Markup drift on the site should only
/// ever need a new file here, not a code change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorConfig {
    pub version: String,
    pub normal: NormalSelectors,
    pub grouped: GroupedSelectors,
    pub join_key: JoinKeyRule,
    /// Normal-ad prices are only listings when their anchor starts with this.
    pub listing_href_prefix: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            version: "daft-2021-03".to_string(),
            normal: NormalSelectors {
                address: SelectorRule::new(&["p"], "TitleBlock__Address-sc-1avkvav-7 knPImU"),
                compound_info: SelectorRule::new(&["div"], "TitleBlock__CardInfo-sc-1avkvav-9 QvaxK"),
                info_item: SelectorRule::new(&["p"], "TitleBlock__CardInfoItem-sc-1avkvav-8 bcaKbv"),
                price: SelectorRule::new(&["span"], "TitleBlock__StyledSpan-sc-1avkvav-4 gDBFnc"),
            },
            grouped: GroupedSelectors {
                address: SelectorRule::new(&["p"], "TitleBlock__Address-sc-1avkvav-7 eARcqq"),
                compound_info: SelectorRule::new(&["div"], "SubUnit__CardInfoItem-sc-10x486s-7 AsGHw"),
                price: SelectorRule::new(&["span", "p"], "SubUnit__Title-sc-10x486s-5 keXaVZ"),
            },
            join_key: JoinKeyRule {
                tag: "li".to_string(),
                attribute: "data-testid".to_string(),
                address_depth: 1,
                unit_depth: 2,
            },
            listing_href_prefix: "/for-sale".to_string(),
        }
    }
}

impl SelectorConfig {
    pub fn load(path: &Path) -> Result<Self, ScraperError> {
        let raw = fs::read_to_string(path)?;
        let config: SelectorConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ScraperError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<(), ScraperError> {
        if self.join_key.address_depth == 0 || self.join_key.unit_depth == 0 {
            return Err(ScraperError::Config(
                "join_key depths are 1-based and must be at least 1".into(),
            ));
        }
        // Fail on load rather than on the first page.
        CompiledSelectors::compile(self).map(|_| ())
    }
}

/// Parsed `scraper::Selector`s for one configuration. Compiled once per run
/// and shared read-only across pages.
#[derive(Debug)]
pub struct CompiledSelectors {
    pub normal_address: Selector,
    pub normal_compound: Selector,
    pub normal_info_item: Selector,
    pub normal_price: Selector,
    pub grouped_address: Selector,
    pub grouped_compound: Selector,
    pub grouped_price: Selector,
}

impl CompiledSelectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self, ScraperError> {
        Ok(Self {
            normal_address: config.normal.address.compile("normal.address")?,
            normal_compound: config.normal.compound_info.compile("normal.compound_info")?,
            normal_info_item: config.normal.info_item.compile("normal.info_item")?,
            normal_price: config.normal.price.compile("normal.price")?,
            grouped_address: config.grouped.address.compile("grouped.address")?,
            grouped_compound: config.grouped.compound_info.compile("grouped.compound_info")?,
            grouped_price: config.grouped.price.compile("grouped.price")?,
        })
    }
}
