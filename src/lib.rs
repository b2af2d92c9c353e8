//! Viewing geometry and simulated pass predictions for the ISS.
//!
//! [`geometry`] turns pairs of coordinates into a viewing direction or an
//! elevation estimate. [`predict`] lists upcoming passes for an observer.
//! [`web`] serves both over HTTP.

pub mod clock;
pub mod geometry;
pub mod predict;
pub mod web;

pub use geometry::{compute_bearing, estimate_elevation, Direction, GeoPoint};
pub use predict::{predict_passes, PassRecord};
