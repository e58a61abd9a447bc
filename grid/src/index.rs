// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! Linear index arithmetic of a domain.
//!
//! The layout is row-major with the first axis fastest: `stride[0] = 1` and
//! `stride[d] = stride[d - 1] * shape[d - 1]`. All pixel buffers of this crate use it.
use crate::Domain;
use alloc::vec::Vec;

/// The stride table of a [`Domain`], used to convert between linear indices and coordinates.
///
/// The table is derived once. Conversions in both directions are hot paths and perform no bounds
/// checks at all. A coordinate outside of the domain maps to some linear index that may be
/// negative or past the end of a buffer, it is the caller's responsibility to avoid this.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Strides {
    min: Vec<i64>,
    stride: Vec<i64>,
}

impl Strides {
    pub fn new(domain: &Domain) -> Self {
        let shape = domain.shape();
        let mut stride = Vec::with_capacity(shape.len());
        let mut step = 1;
        for &extent in shape {
            stride.push(step);
            // Can not overflow, the product of all extents fits by the domain invariant.
            step *= extent;
        }

        Strides {
            min: domain.min().to_vec(),
            stride,
        }
    }

    pub fn num_dimensions(&self) -> usize {
        self.stride.len()
    }

    /// The step in the linear index for one step along each axis.
    pub fn strides(&self) -> &[i64] {
        &self.stride
    }

    /// The step in the linear index for one step along `axis`.
    #[inline]
    pub fn stride(&self, axis: usize) -> i64 {
        self.stride[axis]
    }

    /// Compute `Σ (coord[d] - min[d]) * stride[d]`.
    ///
    /// The coordinate must have exactly one value per axis.
    #[inline]
    pub fn to_linear(&self, coord: &[i64]) -> i64 {
        debug_assert_eq!(coord.len(), self.stride.len());
        coord
            .iter()
            .zip(self.min.iter().zip(&self.stride))
            .map(|(&c, (&lo, &step))| (c - lo) * step)
            .sum()
    }

    /// Fill `out` with the coordinate of a linear index.
    ///
    /// The axes are visited from the highest down, each one taking the quotient of the remainder
    /// by its stride. The first axis has a stride of one and receives the final remainder
    /// directly. This is the exact inverse of [`Strides::to_linear`] for indices of the domain.
    #[inline]
    pub fn to_coord(&self, linear: i64, out: &mut [i64]) {
        debug_assert_eq!(out.len(), self.stride.len());
        let mut remainder = linear;
        for axis in (1..self.stride.len()).rev() {
            let along = remainder / self.stride[axis];
            remainder -= along * self.stride[axis];
            out[axis] = along + self.min[axis];
        }

        out[0] = remainder + self.min[0];
    }
}

#[test]
fn strides_of_shape() {
    let domain = Domain::with_shape(&[3, 4, 5]).expect("valid domain");
    let strides = Strides::new(&domain);
    assert_eq!(strides.strides(), &[1, 3, 12]);
    assert_eq!(strides.to_linear(&[2, 3, 4]), 59);
}

#[test]
fn offset_domain() {
    let domain = Domain::new(&[-2, 10], &[1, 12]).expect("valid domain");
    let strides = Strides::new(&domain);
    assert_eq!(strides.to_linear(&[-2, 10]), 0);
    assert_eq!(strides.to_linear(&[1, 12]), 11);

    let mut coord = [0; 2];
    strides.to_coord(5, &mut coord);
    assert_eq!(coord, [-1, 11]);
}
