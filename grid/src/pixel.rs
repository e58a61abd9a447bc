// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
//! Pixel value types and the traits numeric views need from them.
//!
//! A pixel is a small `Copy` value, either a scalar intensity or a fixed number of channels. Two
//! traits describe what processing needs from such values:
//!
//! - [`Pixel`] exposes channels as `f32` so that interpolation can mix values.
//! - [`Bucket`] discretizes a scalar into a histogram bucket index and back.
use bytemuck::{Pod, Zeroable};
use core::fmt;

/// A pixel made of a fixed number of numeric channels.
pub trait Pixel: Copy + Default + PartialEq + fmt::Debug {
    /// The number of channels.
    const CHANNELS: usize;

    /// The value of channel `idx`, as a float in the native range of the type.
    fn channel(&self, idx: usize) -> f32;

    /// Build a pixel from float channels, rounding and saturating to the native range.
    fn from_channels(channel: impl FnMut(usize) -> f32) -> Self;
}

/// A scalar that can be discretized into histogram buckets.
///
/// The bucket of a value is an unsigned integer, the histogram further masks it to its own bit
/// width. The value `0` is the background and is never reported as a maximum.
pub trait Bucket: Copy + Default + PartialEq + fmt::Debug {
    fn to_bucket(self) -> usize;

    fn from_bucket(bucket: usize) -> Self;
}

/// A pixel with 8-bit red, green and blue channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Rgb8 { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb8 { r, g, b }
    }

    /// Unpack from `0xAARRGGBB`, ignoring alpha.
    pub const fn from_argb(argb: u32) -> Self {
        Rgb8 {
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Pack as `0xAARRGGBB` with opaque alpha.
    pub const fn to_argb(self) -> u32 {
        0xff00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb8 { r, g, b }
    }
}

impl Pixel for Rgb8 {
    const CHANNELS: usize = 3;

    #[inline]
    fn channel(&self, idx: usize) -> f32 {
        f32::from(self.to_array()[idx])
    }

    #[inline]
    fn from_channels(mut channel: impl FnMut(usize) -> f32) -> Self {
        Rgb8 {
            r: saturate_u8(channel(0)),
            g: saturate_u8(channel(1)),
            b: saturate_u8(channel(2)),
        }
    }
}

impl Pixel for u8 {
    const CHANNELS: usize = 1;

    #[inline]
    fn channel(&self, _: usize) -> f32 {
        f32::from(*self)
    }

    #[inline]
    fn from_channels(mut channel: impl FnMut(usize) -> f32) -> Self {
        saturate_u8(channel(0))
    }
}

impl Pixel for u16 {
    const CHANNELS: usize = 1;

    #[inline]
    fn channel(&self, _: usize) -> f32 {
        f32::from(*self)
    }

    #[inline]
    fn from_channels(mut channel: impl FnMut(usize) -> f32) -> Self {
        // `as` saturates, and maps NaN to zero.
        libm::roundf(channel(0)) as u16
    }
}

impl Pixel for f32 {
    const CHANNELS: usize = 1;

    #[inline]
    fn channel(&self, _: usize) -> f32 {
        *self
    }

    #[inline]
    fn from_channels(mut channel: impl FnMut(usize) -> f32) -> Self {
        channel(0)
    }
}

impl Bucket for u8 {
    #[inline]
    fn to_bucket(self) -> usize {
        usize::from(self)
    }

    #[inline]
    fn from_bucket(bucket: usize) -> Self {
        bucket as u8
    }
}

impl Bucket for u16 {
    #[inline]
    fn to_bucket(self) -> usize {
        usize::from(self)
    }

    #[inline]
    fn from_bucket(bucket: usize) -> Self {
        bucket as u16
    }
}

#[inline]
fn saturate_u8(val: f32) -> u8 {
    libm::roundf(val) as u8
}

#[test]
fn argb_packing() {
    let pixel = Rgb8::from_argb(0x80_12_34_56);
    assert_eq!(pixel, Rgb8::new(0x12, 0x34, 0x56));
    assert_eq!(pixel.to_argb(), 0xff_12_34_56);
}

#[test]
fn channels_saturate() {
    assert_eq!(<u8 as Pixel>::from_channels(|_| 300.0), 255);
    assert_eq!(<u8 as Pixel>::from_channels(|_| -4.0), 0);
    assert_eq!(<u8 as Pixel>::from_channels(|_| 4.5), 5);
    let rgb = Rgb8::from_channels(|idx| [1.2, 254.6, 512.0][idx]);
    assert_eq!(rgb, Rgb8::new(1, 255, 255));
}

#[test]
fn channels_round_half_away() {
    // The largest float below one half.
    let below_half = 0.49999997f32;
    assert_eq!(<u8 as Pixel>::from_channels(|_| below_half), 0);
    assert_eq!(<u16 as Pixel>::from_channels(|_| below_half), 0);
    assert_eq!(<u8 as Pixel>::from_channels(|_| 0.5), 1);
    assert_eq!(<u16 as Pixel>::from_channels(|_| 1000.0 + below_half), 1000);
    assert_eq!(<u16 as Pixel>::from_channels(|_| f32::NAN), 0);
}
