#![deny(missing_docs)]
//! Candidate plugin file scanner.
//!
//! Walks a set of root directories breadth-first and reports the files a
//! plugin loader should look at:
//!
//! - a directory holding the ignore marker file is skipped together with
//!   everything below it
//! - directories named like [`ScannerConfig::skip_dir`] are not entered
//! - files below a [`ScannerConfig::dependency_dir`] are reported by
//!   [`PluginScanner::all_files`] but not by [`PluginScanner::search_files`]
//! - only accepted extensions count, and names containing the excluded
//!   fragment never do
//!
//! All name comparisons ignore case. A directory that cannot be read is
//! logged and contributes no files; the rest of the scan continues.

pub mod config;
pub mod error;
pub mod scanner;

pub use config::ScannerConfig;
pub use error::ScanError;
pub use scanner::PluginScanner;
