//! # Infra Store (I: Infrastructure)
//!
//! Persistence and export for the scenario collection.
//!
//! - `ScenarioStore`: JSON store file with atomic replace-on-save
//! - `export`: CSV table (lossy, with derived metrics) and JSON payload
//!
//! ## Example
//!
//! ```no_run
//! use infra_store::ScenarioStore;
//! use kaizen_core::ValuationParams;
//!
//! let store = ScenarioStore::new("kaizen_scenarios.json");
//! let mut engine = store.load(ValuationParams::default())?;
//! engine.add_examples();
//! store.save(&engine)?;
//! # Ok::<(), infra_store::StoreError>(())
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod export;
pub mod store;

pub use error::{Result, StoreError};
pub use export::{export_to_file, render, timestamped_filename, write_csv, ExportFormat};
pub use store::{write_atomic, ScenarioStore};
