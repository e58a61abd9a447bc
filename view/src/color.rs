//! Conversions from color pixels to intensities.
//!
//! The luminance conversion decodes each channel to linear light, weighs the channels with the
//! Rec. 709 luma coefficients and encodes the result again. The plain average treats the encoded
//! channel values as if they were linear.
use crate::Converter;
use image_grid::Rgb8;

mod transfer;

/// Rec. 709 weights of red, green and blue in the luminance.
const LUMA_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// The transfer characteristic of encoded channel values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Transfer {
    /// A pure power law with exponent 2.2.
    #[default]
    Gamma22,
    /// The piecewise sRGB curve.
    Srgb,
}

/// Gray value as the unweighted mean of the three channels, rounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GrayAverage;

/// Gray value from the luminance of linear light.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GrayLuminance {
    pub transfer: Transfer,
}

/// Extracts a single channel of a color pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChannelOf(pub usize);

impl Transfer {
    /// Encoded value to linear light, both in `0.0..=1.0`.
    pub fn decode(self, val: f32) -> f32 {
        match self {
            Transfer::Gamma22 => transfer::transfer_eo_gamma22(val),
            Transfer::Srgb => transfer::transfer_eo_srgb(val),
        }
    }

    /// Linear light to encoded value, both in `0.0..=1.0`.
    pub fn encode(self, val: f32) -> f32 {
        match self {
            Transfer::Gamma22 => transfer::transfer_oe_gamma22(val),
            Transfer::Srgb => transfer::transfer_oe_srgb(val),
        }
    }
}

impl Converter<Rgb8> for GrayAverage {
    type Out = u8;

    #[inline]
    fn convert(&self, value: Rgb8) -> u8 {
        let sum = u16::from(value.r) + u16::from(value.g) + u16::from(value.b);
        // Rounds to nearest, the sum is an integer so there are no ties.
        ((sum + 1) / 3) as u8
    }
}

impl Converter<Rgb8> for GrayLuminance {
    type Out = u8;

    fn convert(&self, value: Rgb8) -> u8 {
        let linear: f32 = value
            .to_array()
            .iter()
            .zip(LUMA_WEIGHTS)
            .map(|(&ch, weight)| weight * self.transfer.decode(f32::from(ch) / 255.0))
            .sum();
        quantize(self.transfer.encode(linear.clamp(0.0, 1.0)) * 255.0)
    }
}

/// Round an intensity on the 8-bit scale to nearest, halves away from zero.
#[inline]
fn quantize(scaled: f32) -> u8 {
    // `as` saturates, out of range values clamp.
    libm::roundf(scaled) as u8
}

impl Converter<Rgb8> for ChannelOf {
    type Out = u8;

    /// # Panics
    ///
    /// If the channel index is not below three.
    #[inline]
    fn convert(&self, value: Rgb8) -> u8 {
        value.to_array()[self.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rounds() {
        assert_eq!(GrayAverage.convert(Rgb8::new(0, 0, 0)), 0);
        assert_eq!(GrayAverage.convert(Rgb8::new(255, 255, 255)), 255);
        assert_eq!(GrayAverage.convert(Rgb8::new(1, 0, 0)), 0);
        assert_eq!(GrayAverage.convert(Rgb8::new(2, 0, 0)), 1);
        assert_eq!(GrayAverage.convert(Rgb8::new(10, 20, 60)), 30);
    }

    #[test]
    fn luminance_of_primaries() {
        let luminance = GrayLuminance::default();
        assert_eq!(luminance.convert(Rgb8::new(255, 0, 0)), 126);
        assert_eq!(luminance.convert(Rgb8::new(0, 255, 0)), 219);
        assert_eq!(luminance.convert(Rgb8::new(0, 0, 255)), 77);
        assert_eq!(luminance.convert(Rgb8::new(10, 200, 30)), 172);
        // Weights sum to one, grays are preserved.
        for v in [0, 1, 17, 128, 254, 255] {
            assert_eq!(luminance.convert(Rgb8::new(v, v, v)), v);
        }
    }

    #[test]
    fn quantize_rounds_to_nearest() {
        // The largest float below one half.
        assert_eq!(quantize(0.49999997), 0);
        assert_eq!(quantize(0.5), 1);
        assert_eq!(quantize(126.4), 126);
        assert_eq!(quantize(254.5), 255);
        assert_eq!(quantize(300.0), 255);
    }

    #[test]
    fn luminance_is_monotonic() {
        for transfer in [Transfer::Gamma22, Transfer::Srgb] {
            let luminance = GrayLuminance { transfer };
            // Equal channel ratios, increasing intensity.
            for ratio in [[1u16, 1, 1], [4, 2, 1], [0, 3, 1], [1, 0, 0]] {
                let mut last = 0;
                for scale in 0..=63u16 {
                    let rgb = Rgb8::new(
                        (ratio[0] * scale) as u8,
                        (ratio[1] * scale) as u8,
                        (ratio[2] * scale) as u8,
                    );
                    let gray = luminance.convert(rgb);
                    assert!(gray >= last, "{:?} decreased at {:?}", transfer, rgb);
                    last = gray;
                }
            }
        }
    }

    #[test]
    fn single_channels() {
        let rgb = Rgb8::new(3, 5, 7);
        assert_eq!(ChannelOf(0).convert(rgb), 3);
        assert_eq!(ChannelOf(1).convert(rgb), 5);
        assert_eq!(ChannelOf(2).convert(rgb), 7);
    }
}
