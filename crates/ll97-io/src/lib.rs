//! # ll97-io: Reference Data, Configuration & Payloads
//!
//! Everything that crosses the process boundary on the way into the
//! calculator:
//!
//! - [`factors`] - factor tables from comment-stripped JSON, with bundled
//!   copies of `data/emissions_factors.json` and `data/limit_factors.json`
//! - [`config`] - the TOML [`Ll97Config`]
//! - [`payload`] - lenient decoding of front-end request bodies
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ll97_io::{config::Ll97Config, factors::resolve_factor_tables, payload::load_payload};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Ll97Config::load()?;
//!     let tables = resolve_factor_tables(
//!         config.data.emissions_factors.as_deref(),
//!         config.data.limit_factors.as_deref(),
//!         config.calc.penalty_rate,
//!     )?;
//!     let payload = load_payload("building.json".as_ref())?;
//!     let result = ll97_core::calculate(&tables, &payload.building(), &payload.usage());
//!     println!("{} periods", result.periods.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod factors;
pub mod payload;

pub use config::Ll97Config;
pub use factors::{bundled_factor_tables, load_factor_tables, resolve_factor_tables};
pub use payload::{load_payload, parse_payload, BuildingPayload, UseTypePayload};
