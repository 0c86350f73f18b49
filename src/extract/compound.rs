// src/extract/compound.rs

use once_cell::sync::Lazy;
use regex::Regex;

/// Separator between the sub-fields of a card's info line. It never shows up
/// inside a sub-field.
pub const DELIMITER: char = '·';

/// Slots beyond the fourth are auctioneer attribution and are thrown away.
const MAX_SLOTS: usize = 5;
const EXTRA_SLOT: usize = 4;

pub const PROPERTY_TYPES: [&str; 11] = [
    "Apartment",
    "Bungalow",
    "Detached",
    "Duplex",
    "End of Terrace",
    "House",
    "Semi-D",
    "Site",
    "Studio",
    "Terrace",
    "Townhouse",
];

// "112 m²", "0.5 ac"
static AREA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d (m|ac)").expect("valid area regex"));

/// The resolved bed / bath / area / type line of one card.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompoundField {
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub property_type: Option<String>,
    pub area: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Bedrooms,
    Bathrooms,
    PropertyType,
    Area,
}

struct Rule {
    role: Role,
    /// Slot positions this rule may claim.
    slots: std::ops::Range<usize>,
    matches: fn(&str) -> bool,
}

fn is_bedrooms(slot: &str) -> bool {
    slot.contains("Bed")
}

fn is_bathrooms(slot: &str) -> bool {
    slot.contains("Bath")
}

fn is_property_type(slot: &str) -> bool {
    PROPERTY_TYPES.contains(&slot)
}

fn is_area(slot: &str) -> bool {
    AREA_RE.is_match(slot)
}

// Order matters: for each slot the first rule that matches (and whose role is
// still open) claims it.
static RULES: [Rule; 4] = [
    Rule {
        role: Role::Bedrooms,
        slots: 0..1,
        matches: is_bedrooms,
    },
    Rule {
        role: Role::Bathrooms,
        slots: 0..2,
        matches: is_bathrooms,
    },
    Rule {
        role: Role::PropertyType,
        slots: 0..EXTRA_SLOT,
        matches: is_property_type,
    },
    Rule {
        role: Role::Area,
        slots: 0..EXTRA_SLOT,
        matches: is_area,
    },
];

impl CompoundField {
    pub fn resolve(raw: &str) -> Self {
        let mut slots: Vec<&str> = raw.splitn(MAX_SLOTS, DELIMITER).map(str::trim).collect();
        slots.resize(MAX_SLOTS, "");

        let mut field = CompoundField::default();
        for (pos, slot) in slots.iter().take(EXTRA_SLOT).enumerate() {
            if slot.is_empty() {
                continue;
            }
            let claimed = RULES.iter().find(|rule| {
                rule.slots.contains(&pos) && field.get(rule.role).is_none() && (rule.matches)(slot)
            });
            if let Some(rule) = claimed {
                *field.get_mut(rule.role) = Some(slot.to_string());
            }
        }
        field
    }

    /// Re-joins the resolved fields in canonical order.
    pub fn to_compound_string(&self) -> String {
        [&self.bedrooms, &self.bathrooms, &self.area, &self.property_type]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(&format!(" {DELIMITER} "))
    }

    fn get(&self, role: Role) -> &Option<String> {
        match role {
            Role::Bedrooms => &self.bedrooms,
            Role::Bathrooms => &self.bathrooms,
            Role::PropertyType => &self.property_type,
            Role::Area => &self.area,
        }
    }

    fn get_mut(&mut self, role: Role) -> &mut Option<String> {
        match role {
            Role::Bedrooms => &mut self.bedrooms,
            Role::Bathrooms => &mut self.bathrooms,
            Role::PropertyType => &mut self.property_type,
            Role::Area => &mut self.area,
        }
    }
}
