// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! # Grid
//!
//! Discrete, axis-aligned pixel domains of any dimension and the index arithmetic on them.
//!
//! This library is strictly `no_std`. It offers the lowest layer of an image processing pipeline
//! that treats a picture, a stack or a volume uniformly as a rectangular box of integer
//! coordinates:
//!
//! - A [`Domain`] describes the box by its inclusive `min` and `max` corners.
//! - [`Strides`] maps between a linear buffer offset and a coordinate tuple.
//! - An [`Odometer`] walks the box in row-major order, first axis fastest.
//! - An [`ArrayImage`] owns pixel values laid out according to the strides of its domain.
//!
//! ## Usage
//!
//! ```
//! use image_grid::{ArrayImage, Domain, Strides};
//!
//! let domain = Domain::with_shape(&[4, 3])?;
//! let image = ArrayImage::from_fn(domain.clone(), |pos| (pos[0] + 10 * pos[1]) as u8);
//!
//! let strides = Strides::new(&domain);
//! let linear = strides.to_linear(&[2, 1]);
//! assert_eq!(linear, 6);
//! assert_eq!(image.as_slice()[linear as usize], 12);
//!
//! let mut coord = [0; 2];
//! strides.to_coord(linear, &mut coord);
//! assert_eq!(coord, [2, 1]);
//! # Ok::<(), image_grid::DomainError>(())
//! ```
#![cfg_attr(not(doctest), no_std)]
#![deny(unsafe_code)]
extern crate alloc;

mod domain;
mod image;
mod index;
mod odometer;
pub mod pixel;

pub use self::domain::{Domain, DomainError};
pub use self::image::ArrayImage;
pub use self::index::Strides;
pub use self::odometer::Odometer;
pub use self::pixel::{Bucket, Pixel, Rgb8};
