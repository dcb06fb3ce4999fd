//! Generalized force vector.

use nalgebra::{DVector, Vector3};

use crate::error::MbdError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A length-6 generalized force: 3 force components followed by
/// 3 moment components.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneralizedForces {
    force: Vector3<f64>,
    moment: Vector3<f64>,
    vector: DVector<f64>,
}

impl Default for GeneralizedForces {
    /// Zero force and zero moment.
    fn default() -> Self {
        Self::new(Vector3::zeros(), Vector3::zeros())
    }
}

impl GeneralizedForces {
    /// Build from a force and a moment.
    #[must_use]
    pub fn new(force: Vector3<f64>, moment: Vector3<f64>) -> Self {
        let vector = DVector::from_vec(vec![
            force.x, force.y, force.z, moment.x, moment.y, moment.z,
        ]);
        Self {
            force,
            moment,
            vector,
        }
    }

    /// Build from an explicit length-6 vector [force; moment].
    ///
    /// # Errors
    ///
    /// Returns [`MbdError::InvalidForces`] when the vector length is
    /// not 6.
    pub fn from_vector(vector: DVector<f64>) -> Result<Self, MbdError> {
        if vector.len() != 6 {
            return Err(MbdError::invalid_forces(format!(
                "generalized forces must have 6 components, got {}",
                vector.len()
            )));
        }
        let force = Vector3::new(vector[0], vector[1], vector[2]);
        let moment = Vector3::new(vector[3], vector[4], vector[5]);
        Ok(Self {
            force,
            moment,
            vector,
        })
    }

    /// Force components.
    #[must_use]
    pub fn force(&self) -> Vector3<f64> {
        self.force
    }

    /// Moment components.
    #[must_use]
    pub fn moment(&self) -> Vector3<f64> {
        self.moment
    }

    /// The length-6 vector [force; moment].
    #[must_use]
    pub fn vector(&self) -> &DVector<f64> {
        &self.vector
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn packs_force_then_moment() {
        let gf = GeneralizedForces::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(
            gf.vector(),
            &DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        );
        assert_eq!(gf.force(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(gf.moment(), Vector3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn from_vector_round_trips() {
        let v = DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let gf = GeneralizedForces::from_vector(v.clone()).unwrap();
        assert_eq!(gf.vector(), &v);
        assert_eq!(gf.moment(), Vector3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(GeneralizedForces::from_vector(DVector::zeros(5)).is_err());
        assert!(GeneralizedForces::from_vector(DVector::zeros(7)).is_err());
    }

    #[test]
    fn default_is_zero() {
        let gf = GeneralizedForces::default();
        assert_eq!(gf.vector().norm(), 0.0);
    }
}
