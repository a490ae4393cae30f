//! Provide shared, pure vocabulary and text helpers for the blockgen code generator.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic helpers that both the
//! generation engine and externally supplied node handlers use, so that precedence, quoting and identifier rules
//! never drift between the two.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global state, and no engine-specific types.
//! - Current scope: the precedence ladder ([`rank`]), reserved words of the default target ([`reserved`]), and string
//!   helpers for quoting, comment layout and identifier sanitizing ([`strings`]).
//!
//! ## Examples
//! ```rust
//! use blockgen_core::rank::Rank;
//!
//! assert!(Rank::MULTIPLICATIVE < Rank::ADDITIVE);
//! assert!(Rank::ATOMIC.is_sentinel());
//! ```

pub mod rank;
pub mod reserved;
pub mod strings;

pub use rank::Rank;
pub use strings::QuoteStyle;
