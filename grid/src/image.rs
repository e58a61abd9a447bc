// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
use crate::{Domain, DomainError, Odometer, Strides};
use alloc::vec::Vec;
use bytemuck::Pod;

/// An owned buffer of pixels covering a [`Domain`].
///
/// The pixels are stored without holes in the row-major order of [`Strides`], first axis fastest.
/// This is the terminal backing store of a view pipeline: views borrow its slice and never write
/// to it, so any number of independent accessors can read one image concurrently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayImage<P> {
    domain: Domain,
    strides: Strides,
    data: Vec<P>,
}

impl<P> ArrayImage<P> {
    /// Interpret an existing buffer as the pixels of a domain.
    ///
    /// The buffer length must match the element count of the domain exactly.
    pub fn from_vec(domain: Domain, data: Vec<P>) -> Result<Self, DomainError> {
        if data.len() != domain.len() {
            return Err(DomainError::BufferLength {
                expected: domain.len(),
                found: data.len(),
            });
        }

        let strides = Strides::new(&domain);
        Ok(ArrayImage {
            domain,
            strides,
            data,
        })
    }

    /// Initialize every pixel from its coordinate.
    ///
    /// # Panics
    /// When allocation of memory fails.
    pub fn from_fn(domain: Domain, mut pixel: impl FnMut(&[i64]) -> P) -> Self {
        let mut data = Vec::with_capacity(domain.len());
        let mut odometer = Odometer::new(&domain);
        while odometer.has_next() {
            odometer.advance();
            data.push(pixel(odometer.position()));
        }

        let strides = Strides::new(&domain);
        ArrayImage {
            domain,
            strides,
            data,
        }
    }

    /// Allocate an image where every pixel has the same value.
    pub fn filled(domain: Domain, value: P) -> Self
    where
        P: Clone,
    {
        let data = alloc::vec![value; domain.len()];
        let strides = Strides::new(&domain);
        ArrayImage {
            domain,
            strides,
            data,
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn strides(&self) -> &Strides {
        &self.strides
    }

    pub fn as_slice(&self) -> &[P] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [P] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<P> {
        self.data
    }

    /// Get the pixel at a coordinate, or `None` outside the domain.
    pub fn get(&self, pos: &[i64]) -> Option<&P> {
        if !self.domain.contains(pos) {
            return None;
        }

        // In bounds, by the domain check above.
        self.data.get(self.strides.to_linear(pos) as usize)
    }

    pub fn get_mut(&mut self, pos: &[i64]) -> Option<&mut P> {
        if !self.domain.contains(pos) {
            return None;
        }

        self.data.get_mut(self.strides.to_linear(pos) as usize)
    }

    /// Apply a function to each pixel, keeping the domain.
    pub fn map<Q>(&self, f: impl FnMut(&P) -> Q) -> ArrayImage<Q> {
        ArrayImage {
            domain: self.domain.clone(),
            strides: self.strides.clone(),
            data: self.data.iter().map(f).collect(),
        }
    }

    /// View the pixel data as raw bytes, in native endian.
    pub fn as_bytes(&self) -> &[u8]
    where
        P: Pod,
    {
        bytemuck::cast_slice(&self.data)
    }
}

#[test]
fn from_fn_is_row_major() {
    let domain = Domain::with_shape(&[3, 2]).expect("valid domain");
    let image = ArrayImage::from_fn(domain, |pos| (pos[0] + 10 * pos[1]) as u8);
    assert_eq!(image.as_slice(), &[0, 1, 2, 10, 11, 12]);
    assert_eq!(image.get(&[1, 1]), Some(&11));
    assert_eq!(image.get(&[3, 1]), None);
}

#[test]
fn buffer_length_checked() {
    let domain = Domain::with_shape(&[3, 2]).expect("valid domain");
    let err = ArrayImage::from_vec(domain, alloc::vec![0u8; 5]).unwrap_err();
    assert_eq!(
        err,
        DomainError::BufferLength {
            expected: 6,
            found: 5
        }
    );
}

#[test]
fn rgb_as_bytes() {
    use crate::Rgb8;
    let domain = Domain::with_shape(&[2]).expect("valid domain");
    let image = ArrayImage::from_vec(
        domain,
        alloc::vec![Rgb8::new(1, 2, 3), Rgb8::new(4, 5, 6)],
    )
    .expect("matching length");
    assert_eq!(image.as_bytes(), &[1, 2, 3, 4, 5, 6]);
}
