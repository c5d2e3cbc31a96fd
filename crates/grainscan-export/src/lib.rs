//! grainscan-export: Pure format serializers (sans-IO)
//!
//! Converts analysis output into external formats: SVG boundary
//! renderings and the historical one-chain-per-line Freeman chain
//! text format.

pub mod chain;
pub mod svg;

pub use chain::{ChainTextError, parse_chain_text, to_chain_text};
pub use svg::{SvgMetadata, to_svg};
