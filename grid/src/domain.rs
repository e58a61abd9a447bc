// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
use alloc::vec::Vec;

/// An axis-aligned box of integer coordinates.
///
/// The box is described by its inclusive corners `min` and `max`. Every axis contains at least
/// one coordinate, a domain with an empty axis can not be constructed. The number of elements in
/// the box is additionally guaranteed to fit into an `i64` and a `usize`, which makes it possible
/// to allocate a buffer for all of its pixels and to address each of them with a linear index.
///
/// The first axis can not start at `i64::MIN`, iteration positions itself one coordinate before
/// the minimum of that axis.
///
/// A domain is a plain value. Cloning it yields an independent copy, there is no shared state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Domain {
    min: Vec<i64>,
    max: Vec<i64>,
    shape: Vec<i64>,
    len: usize,
}

/// Error that occurs when a [`Domain`] or a buffer for it is invalid.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A domain needs at least one axis.
    #[error("a domain needs at least one dimension")]
    NoDimensions,
    /// The two corners disagree on the number of axes.
    #[error("corners have {min} and {max} dimensions")]
    MismatchedBounds { min: usize, max: usize },
    /// The axis would contain no coordinate at all.
    #[error("axis {axis} is empty, {min}..={max}")]
    EmptyAxis { axis: usize, min: i64, max: i64 },
    /// The first axis starts at `i64::MIN`.
    #[error("the first axis can not start at {}", i64::MIN)]
    FirstAxisAtMinimum,
    /// An axis index is not below the number of dimensions.
    #[error("axis {axis} out of range for {dimensions} dimensions")]
    AxisOutOfRange { axis: usize, dimensions: usize },
    /// The element count is not addressable.
    #[error("the domain has more elements than are addressable")]
    TooLarge,
    /// A pixel buffer does not cover the domain exactly.
    #[error("buffer holds {found} pixels but the domain requires {expected}")]
    BufferLength { expected: usize, found: usize },
}

impl Domain {
    /// Create a domain from its inclusive corners.
    ///
    /// Fails if the corners have a different number of axes, if there are no axes, if any axis is
    /// empty (`max < min`), if the first axis starts at `i64::MIN`, or if the total number of
    /// elements does not fit into memory indices.
    pub fn new(min: &[i64], max: &[i64]) -> Result<Self, DomainError> {
        if min.len() != max.len() {
            return Err(DomainError::MismatchedBounds {
                min: min.len(),
                max: max.len(),
            });
        }

        if min.is_empty() {
            return Err(DomainError::NoDimensions);
        }

        if min[0] == i64::MIN {
            return Err(DomainError::FirstAxisAtMinimum);
        }

        let mut shape = Vec::with_capacity(min.len());
        let mut total: i64 = 1;
        for (axis, (&lo, &hi)) in min.iter().zip(max).enumerate() {
            let extent = hi
                .checked_sub(lo)
                .and_then(|diff| diff.checked_add(1))
                .ok_or(DomainError::TooLarge)?;

            if extent <= 0 {
                return Err(DomainError::EmptyAxis {
                    axis,
                    min: lo,
                    max: hi,
                });
            }

            total = total.checked_mul(extent).ok_or(DomainError::TooLarge)?;
            shape.push(extent);
        }

        let len = usize::try_from(total).map_err(|_| DomainError::TooLarge)?;

        Ok(Domain {
            min: min.to_vec(),
            max: max.to_vec(),
            shape,
            len,
        })
    }

    /// Create a domain with its minimum corner at the origin.
    pub fn with_shape(shape: &[i64]) -> Result<Self, DomainError> {
        let min = alloc::vec![0; shape.len()];
        let max: Vec<i64> = shape.iter().map(|&extent| extent.saturating_sub(1)).collect();
        Self::new(&min, &max)
    }

    /// The number of axes.
    pub fn num_dimensions(&self) -> usize {
        self.min.len()
    }

    /// The inclusive lower corner.
    pub fn min(&self) -> &[i64] {
        &self.min
    }

    /// The inclusive upper corner.
    pub fn max(&self) -> &[i64] {
        &self.max
    }

    /// The number of coordinates along each axis, `max - min + 1`.
    pub fn shape(&self) -> &[i64] {
        &self.shape
    }

    /// The total number of coordinates in the box.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`, every valid domain holds at least one element.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Test if a coordinate lies within the box.
    ///
    /// Coordinates with a different number of axes are never contained.
    pub fn contains(&self, pos: &[i64]) -> bool {
        pos.len() == self.min.len()
            && pos
                .iter()
                .zip(self.min.iter().zip(&self.max))
                .all(|(&p, (&lo, &hi))| lo <= p && p <= hi)
    }

    /// The same box, moved by `offset`.
    pub fn translated(&self, offset: &[i64]) -> Result<Self, DomainError> {
        if offset.len() != self.num_dimensions() {
            return Err(DomainError::MismatchedBounds {
                min: self.num_dimensions(),
                max: offset.len(),
            });
        }

        let shift = |corner: &[i64]| -> Result<Vec<i64>, DomainError> {
            corner
                .iter()
                .zip(offset)
                .map(|(a, b)| a.checked_add(*b).ok_or(DomainError::TooLarge))
                .collect()
        };
        Self::new(&shift(&self.min)?, &shift(&self.max)?)
    }

    /// Replace the extent of one axis.
    pub fn with_axis(&self, axis: usize, min: i64, max: i64) -> Result<Self, DomainError> {
        if axis >= self.num_dimensions() {
            return Err(DomainError::AxisOutOfRange {
                axis,
                dimensions: self.num_dimensions(),
            });
        }

        let mut lo = self.min.clone();
        let mut hi = self.max.clone();
        lo[axis] = min;
        hi[axis] = max;
        Self::new(&lo, &hi)
    }
}

#[test]
fn empty_axis_fails() {
    assert_eq!(
        Domain::new(&[0, 0], &[3, -1]),
        Err(DomainError::EmptyAxis {
            axis: 1,
            min: 0,
            max: -1
        })
    );
    assert_eq!(Domain::with_shape(&[]), Err(DomainError::NoDimensions));
    assert!(Domain::with_shape(&[4, 0, 2]).is_err());
    assert!(Domain::new(&[0], &[1, 2]).is_err());
}

#[test]
fn shape_and_len() {
    let domain = Domain::new(&[-1, 2, 0], &[1, 5, 0]).expect("valid domain");
    assert_eq!(domain.shape(), &[3, 4, 1]);
    assert_eq!(domain.len(), 12);
    assert!(domain.contains(&[-1, 5, 0]));
    assert!(!domain.contains(&[-2, 5, 0]));
    assert!(!domain.contains(&[0, 3]));
}

#[test]
fn overflowing_domain() {
    assert_eq!(
        Domain::new(&[i64::MIN, 0], &[i64::MAX, 0]),
        Err(DomainError::TooLarge)
    );
    assert_eq!(
        Domain::with_shape(&[1 << 40, 1 << 40]),
        Err(DomainError::TooLarge)
    );
}

#[test]
fn replace_axis() {
    let domain = Domain::new(&[0, 2], &[3, 5]).expect("valid domain");
    let wide = domain.with_axis(1, -4, 9).expect("valid axis");
    assert_eq!(wide.min(), &[0, -4]);
    assert_eq!(wide.max(), &[3, 9]);
    assert_eq!(
        domain.with_axis(2, 0, 1),
        Err(DomainError::AxisOutOfRange {
            axis: 2,
            dimensions: 2
        })
    );
    assert!(domain.with_axis(0, 1, 0).is_err());
}

#[test]
fn extreme_coordinates() {
    assert_eq!(
        Domain::new(&[i64::MIN, 0], &[i64::MIN + 3, 0]),
        Err(DomainError::FirstAxisAtMinimum)
    );
    // Only the first axis is restricted.
    let low = Domain::new(&[i64::MIN + 1, i64::MIN], &[i64::MIN + 3, i64::MIN]).expect("valid");
    assert_eq!(low.shape(), &[3, 1]);
    assert!(Domain::with_shape(&[i64::MIN]).is_err());

    let high = Domain::new(&[i64::MAX - 1], &[i64::MAX]).expect("valid domain");
    assert_eq!(high.translated(&[1]), Err(DomainError::TooLarge));
    assert_eq!(
        high.translated(&[-2]).expect("in range").max(),
        &[i64::MAX - 2]
    );
}
