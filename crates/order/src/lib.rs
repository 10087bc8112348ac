//! Orientational tetrahedral order analysis.
//!
//! Implements the water-structure order parameter q of Chau & Hardwick /
//! Errington & Debenedetti: per qualifying atom, one minus 3/8 times the
//! sum over the six neighbor pairs of the squared deviation of the angle
//! cosine from the ideal tetrahedral -1/3, accumulated into a histogram
//! over a trajectory.

pub mod histogram;
pub mod orientational;
pub mod output;
