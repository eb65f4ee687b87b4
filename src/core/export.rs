//! Purpose: Typed access to a decoded trade-export document.
//! Exports: `TradeExport`, `DEFAULT_PLANET`.
//! Role: Validate the two required top-level keys and resolve per-planet lookups.
//! Invariants: Item-value maps and trade records stay opaque `Value` pass-through.
//! Invariants: A missing planet reports the planets that are present.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::error::{Error, ErrorKind};

/// Planet the original exporter was always inspected for.
pub const DEFAULT_PLANET: &str = "nauvis";

/// Decoded export document.
///
/// `item_values` maps planet -> item -> computed trade value; `trades` maps
/// planet -> discovered trade records. Record shape belongs to the external
/// producer and is never inspected here.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TradeExport {
    item_values: Map<String, Value>,
    trades: Map<String, Value>,
}

impl TradeExport {
    pub fn from_value(document: Value) -> Result<Self, Error> {
        serde_json::from_value(document).map_err(|err| {
            Error::new(ErrorKind::Schema)
                .with_message("document is not a trade export")
                .with_hint("Expected top-level \"item_values\" and \"trades\" objects keyed by planet.")
                .with_source(err)
        })
    }

    /// Sorted union of planet identifiers across both maps.
    pub fn planets(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .item_values
            .keys()
            .chain(self.trades.keys())
            .map(String::as_str)
            .collect();
        names.into_iter().map(str::to_string).collect()
    }

    pub fn item_values(&self, planet: &str) -> Result<&Value, Error> {
        self.item_values
            .get(planet)
            .ok_or_else(|| self.unknown_planet(planet, "item_values"))
    }

    pub fn trades(&self, planet: &str) -> Result<&Value, Error> {
        self.trades
            .get(planet)
            .ok_or_else(|| self.unknown_planet(planet, "trades"))
    }

    fn unknown_planet(&self, planet: &str, section: &str) -> Error {
        let err = Error::new(ErrorKind::NotFound)
            .with_message(format!("planet {planet:?} not present in {section}"));
        let present = self.planets();
        if present.is_empty() {
            err.with_hint("The export contains no planets at all.")
        } else {
            err.with_hint(format!("Planets present: {}.", present.join(", ")))
        }
    }
}
