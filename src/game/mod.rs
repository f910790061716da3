//! Game layer root module.
//!
//! Pure rules for the 2v2 elimination variant: move codes, seat geometry,
//! and the round combat resolver. No I/O and no actor state.

pub mod combat;
pub mod types;
