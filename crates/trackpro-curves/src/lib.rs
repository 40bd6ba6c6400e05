//! Pedal Response Curves for TrackPro
//!
//! This crate implements the response-curve half of the pedal calibration
//! pipeline: an ordered set of user-editable control points evaluated as a
//! piecewise-linear function, plus the built-in curve shapes offered by the
//! calibration UI.
//!
//! # Overview
//!
//! - [`CurvePoint`]: a single `(input %, output %)` anchor in `[0,100]²`
//! - [`PiecewiseCurve`]: an input-sorted set of at least two points with
//!   linear interpolation between neighbors and flat extrapolation beyond
//!   the endpoints
//! - [`CurveShape`]: the closed set of built-in shapes (Linear, Progressive,
//!   Trail Brake, ...) sampled into fixed five-point curves
//!
//! # Hot-path guarantees
//!
//! [`PiecewiseCurve::evaluate`] is called on every hardware poll (up to
//! ~1 kHz) and therefore:
//! - never allocates
//! - never panics; out-of-range input is clamped, degenerate segments
//!   return their left endpoint
//! - is O(number of points), and curves are small (4–7 points in practice)
//!
//! Point order is a construction-time invariant: the curve is sorted when
//! built and re-sorted after every edit, so evaluation never trusts caller
//! order.
//!
//! # Example
//!
//! ```
//! use trackpro_curves::{CurvePoint, PiecewiseCurve};
//!
//! let curve = PiecewiseCurve::new(vec![
//!     CurvePoint::new(0.0, 0.0),
//!     CurvePoint::new(50.0, 80.0),
//!     CurvePoint::new(100.0, 100.0),
//! ])?;
//!
//! let output = curve.evaluate(25.0);
//! assert!((output - 40.0).abs() < 1e-9);
//! # Ok::<(), trackpro_curves::CurveError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod piecewise;
pub mod point;
pub mod shape;

pub use error::CurveError;
pub use piecewise::PiecewiseCurve;
pub use point::CurvePoint;
pub use shape::CurveShape;

/// Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;
