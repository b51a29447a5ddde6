//! Core library for testgen
//!
//! This crate implements the **Functional Core** of the testgen application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`testgen_core`** (this crate): Pure transformation functions with zero I/O
//! - **`testgen`**: File and network I/O, and the batch driver (the Imperative Shell)
//!
//! Everything here can be tested with fixture data: no files are read, no
//! requests are sent.
//!
//! # Module Organization
//!
//! - [`generation`]: The immutable generation configuration, `generateContent`
//!   request construction and response text extraction
//! - [`paths`]: Mapping a design document path to its test specification path
//! - [`report`]: Per-file outcomes and the batch report
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use testgen_core::generation::{build_request, GenerationConfig};
//! use testgen_core::paths::derive_output_path;
//!
//! let config = GenerationConfig::default();
//! let request = build_request(&config, "# Login screen\n...");
//! assert_eq!(request.contents.len(), 1);
//!
//! let output = derive_output_path(Path::new("project/docs/design.md"))?;
//! assert_eq!(output, PathBuf::from("project/tests/design.csv"));
//! ```

pub mod generation;
pub mod paths;
pub mod report;
