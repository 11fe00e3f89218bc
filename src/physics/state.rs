//! Flattened state vectors
//!
//! Integrators only see a flat buffer of `f64`. A [`StateVector`] pairs that
//! buffer with the 2D shape needed to reinterpret it as one or more fields.
//!
//! # Memory Layout
//!
//! Fields are flattened row-major (`y` fastest) and stacked back to back:
//!
//! ```text
//! data = [ f0[0,0] f0[0,1] ... f0[nx-1,ny-1] | f1[0,0] ... | ... | f(k-1)[..] ]
//!          └──────────── nx*ny ─────────────┘
//! ```
//!
//! Decomposition returns `ndarray` views borrowing the buffer; nothing is
//! copied.

use nalgebra::DVector;
use ndarray::{Array2, ArrayBase, ArrayView2, Data, Ix2};
use std::fmt;

use crate::error::{EngineError, EngineResult};

/// Flat state buffer holding `k >= 1` stacked fields of shape `(nx, ny)`
///
/// # Invariant
///
/// `data.len() == nx * ny * k` for some `k >= 1`, checked at construction.
///
/// # Example
///
/// ```rust
/// use diffuse_rs::physics::StateVector;
/// use ndarray::array;
///
/// let field = array![[1.0, 2.0], [3.0, 4.0]];
/// let state = StateVector::from_field(&field)?;
///
/// assert_eq!(state.data().as_slice(), &[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(state.to_field()?, field.view());
/// # Ok::<(), diffuse_rs::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    data: DVector<f64>,
    shape: (usize, usize),
}

impl StateVector {
    /// Wrap an existing flat buffer
    ///
    /// # Errors
    ///
    /// [`EngineError::Shape`] when the shape has a zero extent or the buffer
    /// length is not a positive multiple of `nx * ny`.
    pub fn new(data: DVector<f64>, shape: (usize, usize)) -> EngineResult<Self> {
        let field_size = shape.0 * shape.1;
        if field_size == 0 {
            return Err(EngineError::shape(format!(
                "field shape must be non-empty, got {:?}",
                shape
            )));
        }
        if data.is_empty() || data.len() % field_size != 0 {
            return Err(EngineError::shape(format!(
                "buffer of size {} is not a whole number of fields of shape {:?}",
                data.len(),
                shape
            )));
        }

        Ok(Self { data, shape })
    }

    /// Flatten a single 2D field
    ///
    /// Accepts owned arrays and views; the field is read in logical row-major
    /// order whatever its memory layout.
    ///
    /// # Errors
    ///
    /// [`EngineError::Shape`] when the field has a zero extent.
    pub fn from_field<S>(field: &ArrayBase<S, Ix2>) -> EngineResult<Self>
    where
        S: Data<Elem = f64>,
    {
        let data = DVector::from_iterator(field.len(), field.iter().copied());
        Self::new(data, field.dim())
    }

    /// Flatten and stack several same-shaped fields in the given order
    ///
    /// # Errors
    ///
    /// [`EngineError::Shape`] for an empty list or when shapes differ.
    pub fn from_fields(fields: &[Array2<f64>]) -> EngineResult<Self> {
        let first = fields
            .first()
            .ok_or_else(|| EngineError::shape("fields must be non-empty"))?;
        let shape = first.dim();

        if let Some((position, field)) = fields
            .iter()
            .enumerate()
            .find(|(_, field)| field.dim() != shape)
        {
            return Err(EngineError::shape(format!(
                "shape mismatch: field {} has shape {:?}, expected {:?}",
                position,
                field.dim(),
                shape
            )));
        }

        let total = fields.iter().map(|field| field.len()).sum();
        let values = fields.iter().flat_map(|field| field.iter().copied());
        let data = DVector::from_iterator(total, values);

        Self::new(data, shape)
    }

    /// View the buffer as a single field
    ///
    /// # Errors
    ///
    /// [`EngineError::Shape`] when the buffer holds more than one field.
    pub fn to_field(&self) -> EngineResult<ArrayView2<'_, f64>> {
        if self.num_fields() != 1 {
            return Err(EngineError::shape(format!(
                "state vector of size {} holds {} fields, cannot view as one field of shape {:?}",
                self.data.len(),
                self.num_fields(),
                self.shape
            )));
        }

        ArrayView2::from_shape(self.shape, self.data.as_slice())
            .map_err(|e| EngineError::shape(e.to_string()))
    }

    /// View the buffer as `num_fields` fields, in stacking order
    ///
    /// # Errors
    ///
    /// [`EngineError::Shape`] unless `data.len() == nx * ny * num_fields`.
    pub fn to_fields(&self, num_fields: usize) -> EngineResult<Vec<ArrayView2<'_, f64>>> {
        let field_size = self.field_size();
        if num_fields == 0 || self.data.len() != field_size * num_fields {
            return Err(EngineError::shape(format!(
                "state vector size {} does not match {} fields of shape {:?}",
                self.data.len(),
                num_fields,
                self.shape
            )));
        }

        self.data
            .as_slice()
            .chunks_exact(field_size)
            .map(|chunk| {
                ArrayView2::from_shape(self.shape, chunk)
                    .map_err(|e| EngineError::shape(e.to_string()))
            })
            .collect()
    }

    /// Replace the buffer, keeping the shape
    pub fn with_data(&self, data: DVector<f64>) -> EngineResult<Self> {
        Self::new(data, self.shape)
    }

    /// Shape `(nx, ny)` of each stacked field
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Number of cells per field
    pub fn field_size(&self) -> usize {
        self.shape.0 * self.shape.1
    }

    /// Number of stacked fields
    pub fn num_fields(&self) -> usize {
        self.data.len() / self.field_size()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &DVector<f64> {
        &self.data
    }

    pub fn into_data(self) -> DVector<f64> {
        self.data
    }

    /// Whether every entry is finite
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StateVector(shape=({}, {}), size={})",
            self.shape.0,
            self.shape.1,
            self.data.len()
        )
    }
}

// ==================== Tests ====================
