// Raw fragments pulled off one listing page, before any resolution.
//
// page
//  ├── normal cards
//  │    ├── address          (one per card)
//  │    ├── compound info    (one per card, promo cards included)
//  │    │    └── info items  (bed / bath / area / type pieces)
//  │    └── price            (one per card, promo cards included)
//  │         └── <a href>    (only "/for-sale..." cards are real listings)
//  └── grouped cards
//       └── <li data-testid>                  <- address join key
//            ├── address
//            └── <li> sub unit
//                 └── ...  <li data-testid>   <- price / compound join key
//                      ├── price
//                      └── compound info

/// Price text of a normal card together with the link target of the anchor
/// that wraps it. The href is used as a filter, never transformed.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceFragment {
    pub text: String,
    pub href: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct NormalFragments {
    pub addresses: Vec<String>,
    /// Compound text per card, slots already joined with the delimiter.
    pub compound_infos: Vec<String>,
    /// Info items found inside each compound node, in card order.
    pub info_items: Vec<Vec<String>>,
    pub prices: Vec<PriceFragment>,
}

/// Text of a grouped-ad fragment plus its structural join key.
/// `key` is `None` when the expected list-item ancestor (or its identifier
/// attribute) is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedText {
    pub key: Option<String>,
    pub text: String,
}

#[derive(Debug, Default, Clone)]
pub struct GroupedFragments {
    pub addresses: Vec<KeyedText>,
    pub compound_infos: Vec<KeyedText>,
    pub prices: Vec<KeyedText>,
}

impl NormalFragments {
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty() && self.compound_infos.is_empty() && self.prices.is_empty()
    }
}

impl GroupedFragments {
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty() && self.compound_infos.is_empty() && self.prices.is_empty()
    }
}
