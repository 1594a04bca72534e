// src/services/mod.rs
pub mod export;
pub mod extract;
pub mod inflation;
pub mod percent;
pub mod portfolio;
pub mod series;
pub mod table;
