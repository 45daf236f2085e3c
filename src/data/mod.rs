//! Data layer: table model, loading/writing, address matching and filtering.
//!
//! Architecture:
//! ```text
//!  keep_columns.txt + flows.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file, restrict to allow-list → Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  model    │  columns + rows of text cells
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐      ┌──────────┐
//!   │  filter   │ ───▶ │ address  │  CIDR containment for address columns
//!   └──────────┘      └──────────┘
//!        │
//!        ▼
//!   reduced Table → loader::write_table
//! ```

pub mod address;
pub mod filter;
pub mod loader;
pub mod model;
