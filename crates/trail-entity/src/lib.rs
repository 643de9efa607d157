//! # trail-entity
//!
//! Domain records read from the audit trail. Entities are plain
//! serializable values; decoding them from storage rows lives in
//! `trail-database`, which knows which columns may degrade.

pub mod audit;
