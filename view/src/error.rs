use image_grid::DomainError;

/// Error that occurs when a view is constructed from incompatible parts.
///
/// All of these are configuration errors, detected once when the view is set up. Reading pixels
/// from a constructed view never fails.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ViewError {
    /// Two operands do not agree on the number of axes.
    #[error("expected {expected} dimensions, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// A resampling factor that is not finite and positive.
    #[error("invalid scale factor {0}")]
    InvalidScale(f64),
    /// An axis index past the number of axes.
    #[error("axis {axis} out of range for {dimensions} dimensions")]
    AxisOutOfRange { axis: usize, dimensions: usize },
    /// An axis list that is not a permutation.
    #[error("not a permutation of the axes")]
    InvalidPermutation,
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ViewError {
    pub(crate) fn check_dimensions(expected: usize, found: usize) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(ViewError::DimensionMismatch { expected, found })
        }
    }

    pub(crate) fn check_axis(axis: usize, dimensions: usize) -> Result<(), Self> {
        if axis < dimensions {
            Ok(())
        } else {
            Err(ViewError::AxisOutOfRange { axis, dimensions })
        }
    }
}
