//! CSV order seed loader.
//!
//! # CSV format
//!
//! One row per order.  `created_at` is optional; a missing or empty value
//! means "the tick the seeds are inserted".
//!
//! ```csv
//! row,col,created_at
//! 2,3,0
//! 4,6,
//! 6,2,0
//! ```
//!
//! The loader only parses.  Bounds and obstacle checks happen when the
//! seeds are inserted into an `OrderRegistry` against a concrete grid.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use fleet_core::{Cell, Tick};

use crate::OrderError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct OrderRecord {
    row:        i32,
    col:        i32,
    #[serde(default)]
    created_at: Option<u64>,
}

/// One parsed order seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OrderSeed {
    pub location:   Cell,
    pub created_at: Option<Tick>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load order seeds from a CSV file.
pub fn load_orders_csv(path: &Path) -> Result<Vec<OrderSeed>, OrderError> {
    let file = std::fs::File::open(path)?;
    load_orders_reader(file)
}

/// Like [`load_orders_csv`] but accepts any `Read` source.
pub fn load_orders_reader<R: Read>(reader: R) -> Result<Vec<OrderSeed>, OrderError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    csv_reader
        .deserialize::<OrderRecord>()
        .enumerate()
        .map(|(i, result)| {
            let r = result.map_err(|e| OrderError::Parse(format!("record {}: {e}", i + 1)))?;
            Ok(OrderSeed {
                location:   Cell::new(r.row, r.col),
                created_at: r.created_at.map(Tick),
            })
        })
        .collect()
}
