//! Lazily evaluated views over N-dimensional images, and a sliding maximum filter.
//!
//! A view is an accessor with a mutable position. Reading it with [`Sampler::get`] derives the
//! value at that position from one or more upstream accessors, no pixel data is ever copied. The
//! terminal accessor of every chain is an [`ArrayAccess`] that borrows an [`ArrayImage`].
//!
//! Cloning an accessor copies the whole chain of positions, scratch buffers and histograms but
//! never the borrowed pixels. Accessors are not meant to be shared between threads, give every
//! worker its own clone instead.
//!
//! # Usage
//!
//! Filtering an image with a sliding maximum over a disk of radius 2:
//!
//! ```
//! use image_grid::{ArrayImage, Domain};
//! use image_view::{render, ArrayAccess, FilterOptions, Radius};
//!
//! let domain = Domain::with_shape(&[16, 16])?;
//! let image = ArrayImage::from_fn(domain.clone(), |pos| ((pos[0] * pos[1]) % 7) as u8);
//!
//! let options = FilterOptions {
//!     radius: Radius::Scalar(2),
//!     ..FilterOptions::default()
//! };
//!
//! let filter = options.sliding_max_gray(ArrayAccess::new(&image), &domain)?;
//! let dilated = render(filter, &domain)?;
//! assert_eq!(dilated.domain(), &domain);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Views compose. Mirror an image, convert it to gray and blank a corner:
//!
//! ```
//! use image_grid::{ArrayImage, Domain, Rgb8};
//! use image_view::{
//!     ArrayAccess, ConvertAccess, GrayAverage, MaskAccess, Positionable, Sampler, TransformAccess,
//! };
//!
//! let domain = Domain::with_shape(&[4, 4])?;
//! let image = ArrayImage::filled(domain.clone(), Rgb8::new(30, 60, 90));
//!
//! let mirrored = TransformAccess::mirrored(ArrayAccess::new(&image), &domain, 0)?;
//! let gray = ConvertAccess::new(mirrored, GrayAverage);
//! let mut masked = MaskAccess::new(gray, |pos: &[i64], _: &u8| pos[0] == 0 && pos[1] == 0, 0);
//!
//! masked.set_position(&[1, 0]);
//! assert_eq!(masked.get(), 60);
//! masked.set_position(&[0, 0]);
//! assert_eq!(masked.get(), 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(unsafe_code)]

/// Position and sampling traits, and the terminal array accessor.
mod access;
/// Color conversions of pixel values.
pub mod color;
/// N-ary pixel combinators.
mod combine;
/// Value-to-value pixel conversion.
mod convert;
/// Sequential traversal and materialization.
mod cursor;
mod error;
/// Reading past the edges of a domain.
mod extend;
pub mod histogram;
/// Resampling with cubic convolution.
mod interp;
mod mask;
/// The filter configuration surface.
mod options;
pub mod region;
/// The incremental sliding maximum filter.
mod sliding;
/// Coordinate transforms.
mod transform;


pub use self::access::{ArrayAccess, Positionable, Sampler};
pub use self::color::{ChannelOf, GrayAverage, GrayLuminance, Transfer};
pub use self::combine::{BinaryAccess, QuadAccess};
pub use self::convert::{Chain, ConvertAccess, Converter, FnConverter, Identity};
pub use self::cursor::{render, Cursor};
pub use self::error::ViewError;
pub use self::extend::{BorderMode, ExtendAccess};
pub use self::histogram::{HistogramError, MaxHistogram, RgbHistogram, ValueHistogram};
pub use self::interp::{cubic_kernel, ScaleAxis};
pub use self::mask::MaskAccess;
pub use self::options::{FilterError, FilterOptions, HistogramKind, Radius};
pub use self::region::{Region, RegionError, ScanOrder, Segment};
pub use self::sliding::SlidingMax;
pub use self::transform::{Step, Transform, TransformAccess};

pub use image_grid::{ArrayImage, Domain, DomainError, Rgb8};
