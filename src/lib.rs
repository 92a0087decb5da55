//! Recomputes closed-form probability and combinatorics answers with exact rational arithmetic,
//! and cross-checks them against the fractions, decimals and percentages reported in a LaTeX
//! write-up.

pub mod comb;
pub mod document;
pub mod evaluate;
pub mod exact;
pub mod factorial;
pub mod print;
pub mod report;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
