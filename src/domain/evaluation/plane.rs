//! Deterministic cost-effectiveness plane.

use serde::{Deserialize, Serialize};

use super::IncrementalTable;

/// Position of an increment on the cost-effectiveness plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    /// More effective, more costly: a trade-off judged by the threshold.
    NorthEast,
    /// Less effective, more costly.
    NorthWest,
    /// More effective, less costly.
    SouthEast,
    /// Less effective, less costly.
    SouthWest,
    /// On an axis or at the origin.
    Axis,
}

impl Quadrant {
    pub fn locate(delta_effect: f64, delta_cost: f64) -> Self {
        match (delta_effect, delta_cost) {
            (e, c) if e > 0.0 && c > 0.0 => Quadrant::NorthEast,
            (e, c) if e < 0.0 && c > 0.0 => Quadrant::NorthWest,
            (e, c) if e > 0.0 && c < 0.0 => Quadrant::SouthEast,
            (e, c) if e < 0.0 && c < 0.0 => Quadrant::SouthWest,
            _ => Quadrant::Axis,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::NorthEast => "north_east",
            Quadrant::NorthWest => "north_west",
            Quadrant::SouthEast => "south_east",
            Quadrant::SouthWest => "south_west",
            Quadrant::Axis => "axis",
        }
    }
}

/// One comparator plotted against its cheaper neighbour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanePoint {
    pub alternative_id: String,
    pub delta_effect: f64,
    pub delta_cost: f64,
    pub quadrant: Quadrant,
    /// On or below the threshold line `Δc = λ·Δe`.
    pub cost_effective: bool,
}

/// Places every comparator row of a table on the plane at threshold λ.
pub fn cost_effectiveness_plane(table: &IncrementalTable, threshold: f64) -> Vec<PlanePoint> {
    table
        .rows()
        .iter()
        .filter_map(|row| {
            let increment = row.increment?;
            Some(PlanePoint {
                alternative_id: row.alternative.id.clone(),
                delta_effect: increment.delta_effect,
                delta_cost: increment.delta_cost,
                quadrant: Quadrant::locate(increment.delta_effect, increment.delta_cost),
                cost_effective: increment.delta_cost <= threshold * increment.delta_effect,
            })
        })
        .collect()
}
