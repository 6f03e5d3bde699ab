//! Static fixture catalog
//!
//! Read-only list of luminaires the recommendation engine may choose from.
//! Order matters: selection takes the first entry whose technology matches.

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::Technology;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A luminaire with fixed output and wattage
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fixture {
    /// Stable identifier shown in results
    pub id: String,
    /// Human readable name
    pub display_name: String,
    /// Technology this fixture belongs to
    pub technology: Technology,
    /// Rated luminous flux per unit (lm)
    pub lumens_per_unit: f64,
    /// Rated power per unit (W)
    pub watts_per_unit: f64,
}

impl Fixture {
    /// Create a fixture entry
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        technology: Technology,
        lumens_per_unit: f64,
        watts_per_unit: f64,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            technology,
            lumens_per_unit,
            watts_per_unit,
        }
    }

    /// Luminous efficacy in lm/W
    pub fn efficacy(&self) -> f64 {
        if self.watts_per_unit > 0.0 {
            self.lumens_per_unit / self.watts_per_unit
        } else {
            0.0
        }
    }
}

/// Ordered fixture catalog
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FixtureCatalog {
    fixtures: Vec<Fixture>,
}

impl FixtureCatalog {
    /// Wrap a list of fixtures, keeping their order
    pub fn new(fixtures: Vec<Fixture>) -> Self {
        Self { fixtures }
    }

    /// All entries in selection order
    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    /// True if the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// First entry, used as the fallback fixture
    pub fn first(&self) -> Option<&Fixture> {
        self.fixtures.first()
    }

    /// First entry of the given technology
    pub fn first_for(&self, technology: Technology) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.technology == technology)
    }

    /// Entry by identifier
    pub fn get(&self, id: &str) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.id == id)
    }

    /// Technologies with no entry in this catalog
    pub fn missing_technologies(&self) -> Vec<Technology> {
        Technology::ALL
            .into_iter()
            .filter(|t| self.first_for(*t).is_none())
            .collect()
    }
}

impl Default for FixtureCatalog {
    /// Panels and tubes offered on the product pages
    fn default() -> Self {
        Self::new(alloc::vec![
            Fixture::new("led-panel-3600", "LED panel 36 W", Technology::Led, 3600.0, 36.0),
            Fixture::new("led-panel-3200", "LED panel 32 W", Technology::Led, 3200.0, 32.0),
            Fixture::new("led-panel-4000", "LED panel 40 W", Technology::Led, 4000.0, 40.0),
            Fixture::new(
                "fluor-t8-2800",
                "Fluorescent T8 2x29 W",
                Technology::Fluorescent,
                2800.0,
                58.0,
            ),
            Fixture::new(
                "fluor-t8-2600",
                "Fluorescent T8 2x26 W",
                Technology::Fluorescent,
                2600.0,
                52.0,
            ),
            Fixture::new(
                "fluor-t5-3200",
                "Fluorescent T5 65 W",
                Technology::Fluorescent,
                3200.0,
                65.0,
            ),
        ])
    }
}

impl FromIterator<Fixture> for FixtureCatalog {
    fn from_iter<I: IntoIterator<Item = Fixture>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
