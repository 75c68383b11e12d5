//! protanno: annotation extraction from UniProt Swiss-Prot DAT files and the
//! UniProt keyword list.

pub mod error;

pub mod cli;
pub mod config;
pub mod corpus;
pub mod dat;
pub mod evidence;
pub mod field;
pub mod filter;
pub mod keywords;
pub mod logging;
pub mod lookup;
pub mod report;
pub mod segment;
pub mod source;
pub mod table;

#[cfg(test)]
pub(crate) mod fixtures;
