//! Bill-of-materials calculator for furniture production
//!
//! Given a product model's material recipe and a production quantity,
//! works out how much of every material is needed, rounds sheet goods up
//! to whole sheets, and suggests what to do with leftover foam.

pub mod calculator;
pub mod catalog;
pub mod import;
pub mod models;
pub mod seed;
pub mod validation;
