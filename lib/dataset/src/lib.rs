//! # ClusterX Dataset
//!
//! Reading datasets into [`Record`](clusterx_core::Record)s and reporting
//! clustering results.
//!
//! - [`DelimitedParser`] - comma, semicolon, colon, tab or whitespace
//!   separated text, one record per line
//! - [`ClusterReport`] - serializable run summary, printable as text or JSON
//!
//! ```rust
//! use clusterx_dataset::DelimitedParser;
//! use std::io::Cursor;
//!
//! let data = "2,MIT\n4,NUC\n10,MIT\n";
//! let dataset = DelimitedParser::new().read(Cursor::new(data)).unwrap();
//!
//! assert_eq!(dataset.len(), 3);
//! assert_eq!(dataset.feature_count, 2);
//! assert_eq!(dataset.records[1].categorical_at(0), "NUC");
//! ```

pub mod parser;
pub mod report;

pub use parser::{DelimitedParser, ParsedDataset};
pub use report::{ClusterReport, ClusterSummary, MemberSummary};
