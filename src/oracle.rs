//! # Distance Oracles
//!
//! The optimizer never sees coordinates. Everything it knows about the problem
//! instance comes through the [`DistanceOracle`] trait: given two point identifiers
//! in `[0, N)` it returns the distance between them. Identifier `0` is home.
//!
//! Two implementations ship with the crate:
//!
//! - [`Scene`]: points on a plane with Euclidean distance.
//! - [`DistanceMatrix`]: a precomputed `N x N` table built from any other oracle.
//!
//! ## Example
//!
//! ```rust
//! use genroute::oracle::{DistanceOracle, Point, Scene};
//!
//! let scene = Scene::new(vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]).unwrap();
//! assert_eq!(scene.distance(0, 1).unwrap(), 5.0);
//! assert!(scene.distance(0, 2).is_err());
//! ```

use crate::error::{GeneticError, Result};

/// Answers distance queries between point identifiers.
///
/// Implementations must be deterministic: the same pair always yields the same
/// distance. Symmetry is expected but not required. The `Sync` bound lets a
/// population evaluate its tours on several threads.
pub trait DistanceOracle: Sync {
    /// Returns the distance travelled going from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Oracle`] if either identifier is unknown.
    fn distance(&self, from: usize, to: usize) -> Result<f64>;

    /// Number of points the oracle knows about, home included, if it is bounded.
    fn num_points(&self) -> Option<usize> {
        None
    }
}

impl<O: DistanceOracle + ?Sized> DistanceOracle for &O {
    fn distance(&self, from: usize, to: usize) -> Result<f64> {
        (**self).distance(from, to)
    }

    fn num_points(&self) -> Option<usize> {
        (**self).num_points()
    }
}

/// A point on the plane.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A fixed layout of points, home first.
///
/// With the `serde` feature a scene (de)serializes as a plain list of points and
/// goes through the same checks as [`Scene::new`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Point>", into = "Vec<Point>"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    points: Vec<Point>,
}

impl Scene {
    /// Creates a scene from its points. The first point is home.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `points` is empty or any coordinate
    /// is NaN or infinite.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.is_empty() {
            return Err(GeneticError::Configuration(
                "A scene needs at least the home point".to_string(),
            ));
        }

        if let Some((idx, point)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(GeneticError::Configuration(format!(
                "Point {} has non-finite coordinates ({}, {})",
                idx, point.x, point.y
            )));
        }

        Ok(Self { points })
    }

    /// Number of points including home.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn home(&self) -> &Point {
        &self.points[0]
    }

    fn point(&self, id: usize, from: usize, to: usize) -> Result<&Point> {
        self.points.get(id).ok_or_else(|| GeneticError::Oracle {
            from,
            to,
            reason: format!(
                "unknown point identifier {} (scene has {} points)",
                id,
                self.points.len()
            ),
        })
    }
}

impl TryFrom<Vec<Point>> for Scene {
    type Error = GeneticError;

    fn try_from(points: Vec<Point>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<Scene> for Vec<Point> {
    fn from(scene: Scene) -> Self {
        scene.points
    }
}

impl DistanceOracle for Scene {
    fn distance(&self, from: usize, to: usize) -> Result<f64> {
        let a = self.point(from, from, to)?;
        let b = self.point(to, from, to)?;
        Ok(a.distance_to(b))
    }

    fn num_points(&self) -> Option<usize> {
        Some(self.points.len())
    }
}

/// A dense table of precomputed distances.
///
/// Useful when the underlying oracle is expensive; a population of `P` tours
/// over `N` points asks for `P * N` distances every generation.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    distances: Vec<f64>,
}

impl DistanceMatrix {
    /// Queries `oracle` for every ordered pair in `[0, size)`.
    ///
    /// # Errors
    ///
    /// Propagates the first oracle failure.
    pub fn from_oracle<O: DistanceOracle + ?Sized>(oracle: &O, size: usize) -> Result<Self> {
        let mut distances = Vec::with_capacity(size * size);
        for from in 0..size {
            for to in 0..size {
                distances.push(oracle.distance(from, to)?);
            }
        }
        Ok(Self { size, distances })
    }

    pub fn from_scene(scene: &Scene) -> Result<Self> {
        Self::from_oracle(scene, scene.num_points())
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl DistanceOracle for DistanceMatrix {
    fn distance(&self, from: usize, to: usize) -> Result<f64> {
        if from >= self.size || to >= self.size {
            return Err(GeneticError::Oracle {
                from,
                to,
                reason: format!("matrix covers identifiers below {}", self.size),
            });
        }
        Ok(self.distances[from * self.size + to])
    }

    fn num_points(&self) -> Option<usize> {
        Some(self.size)
    }
}
