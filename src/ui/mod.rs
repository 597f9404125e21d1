//! UI layer: chart descriptions and their egui rendering.

pub mod figures;
pub mod panels;
pub mod plot;
