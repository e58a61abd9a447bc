use crate::{Positionable, Sampler, ViewError};
use image_grid::{Domain, Pixel};

/// The free parameter of the cubic convolution kernel.
const ALPHA: f64 = 0.5;

/// The cubic convolution kernel with `α = 0.5`, the Catmull-Rom spline.
///
/// ```text
///          | (2 - α)|x|³ + (α - 3)|x|² + 1        for |x| < 1
///   k(x) = | -α|x|³ + 5α|x|² - 8α|x| + 4α         for 1 <= |x| < 2
///          | 0                                    otherwise
/// ```
pub fn cubic_kernel(x: f64) -> f64 {
    let x = x.abs();
    if x < 1.0 {
        x * x * (x * (2.0 - ALPHA) + (ALPHA - 3.0)) + 1.0
    } else if x < 2.0 {
        ALPHA * (((-x + 5.0) * x - 8.0) * x + 4.0)
    } else {
        0.0
    }
}

/// A view that resamples one axis of its source by a scale factor.
///
/// The output coordinate `x` along the axis corresponds to the source coordinate
/// `min + (x - min) / factor`, where `min` is the lower bound of the source along that axis. The
/// value there is interpolated from the four nearest source samples with [`cubic_kernel`]. Taps
/// beyond the source extent along the axis repeat the edge sample, so that the view is readable on
/// its whole [`ScaleAxis::domain`]. The other axes are passed through unchanged.
///
/// Each channel is interpolated independently, then rounded and saturated by
/// [`Pixel::from_channels`].
#[derive(Clone, Debug)]
pub struct ScaleAxis<A> {
    source: A,
    axis: usize,
    factor: f64,
    /// The source extent along the axis.
    lower: i64,
    upper: i64,
    domain: Domain,
    position: Vec<i64>,
    target: Vec<i64>,
}

impl<A: Sampler> ScaleAxis<A>
where
    A::Value: Pixel,
{
    /// Resample `axis` of a source covering `source_domain`.
    ///
    /// A `factor` above one enlarges, below one shrinks. The output domain starts at the same
    /// minimum and has `ceil(extent * factor)` coordinates along the axis.
    pub fn new(
        source: A,
        source_domain: &Domain,
        axis: usize,
        factor: f64,
    ) -> Result<Self, ViewError> {
        let dimensions = source_domain.num_dimensions();
        ViewError::check_dimensions(dimensions, source.num_dimensions())?;
        ViewError::check_axis(axis, dimensions)?;
        if !(factor.is_finite() && factor > 0.0) {
            return Err(ViewError::InvalidScale(factor));
        }

        let lower = source_domain.min()[axis];
        let upper = source_domain.max()[axis];
        let extent = (source_domain.shape()[axis] as f64 * factor).ceil().max(1.0);
        if extent >= i64::MAX as f64 {
            return Err(ViewError::InvalidScale(factor));
        }

        let last = lower
            .checked_add(extent as i64 - 1)
            .ok_or(ViewError::InvalidScale(factor))?;
        let domain = source_domain.with_axis(axis, lower, last)?;

        Ok(ScaleAxis {
            source,
            axis,
            factor,
            lower,
            upper,
            domain,
            position: source_domain.min().to_vec(),
            target: source_domain.min().to_vec(),
        })
    }

    /// The domain on which every read stays within the source.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl<A: Sampler> Positionable for ScaleAxis<A>
where
    A::Value: Pixel,
{
    fn num_dimensions(&self) -> usize {
        self.position.len()
    }

    fn position(&self) -> &[i64] {
        &self.position
    }

    #[inline]
    fn move_axis(&mut self, distance: i64, axis: usize) {
        self.position[axis] += distance;
    }

    fn set_position(&mut self, position: &[i64]) {
        self.position.copy_from_slice(position);
    }
}

impl<A: Sampler> Sampler for ScaleAxis<A>
where
    A::Value: Pixel,
{
    type Value = A::Value;

    fn get(&mut self) -> A::Value {
        let lower = self.lower;
        let at = lower as f64 + (self.position[self.axis] - lower) as f64 / self.factor;
        let base = at.floor();
        let frac = at - base;
        let base = base as i64;

        let weights = [
            cubic_kernel(frac + 1.0),
            cubic_kernel(frac),
            cubic_kernel(1.0 - frac),
            cubic_kernel(2.0 - frac),
        ];

        self.target.copy_from_slice(&self.position);
        self.target[self.axis] = (base - 1).clamp(lower, self.upper);
        self.source.set_position(&self.target);

        let mut taps = [A::Value::default(); 4];
        for (idx, tap) in taps.iter_mut().enumerate() {
            let coord = (base - 1 + idx as i64).clamp(lower, self.upper);
            self.source.set_axis(coord, self.axis);
            *tap = self.source.get();
        }

        A::Value::from_channels(|channel| {
            let sum: f64 = taps
                .iter()
                .zip(&weights)
                .map(|(tap, weight)| f64::from(tap.channel(channel)) * weight)
                .sum();
            sum as f32
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render, ArrayAccess};
    use image_grid::ArrayImage;

    #[test]
    fn kernel_shape() {
        assert_eq!(cubic_kernel(0.0), 1.0);
        assert!(cubic_kernel(1.0).abs() < 1e-12);
        assert!(cubic_kernel(-1.0).abs() < 1e-12);
        assert!(cubic_kernel(2.0).abs() < 1e-12);
        assert_eq!(cubic_kernel(2.5), 0.0);
        assert!((cubic_kernel(0.5) - 0.5625).abs() < 1e-12);
        assert!((cubic_kernel(1.5) + 0.0625).abs() < 1e-12);

        // Partition of unity.
        for step in 0..10 {
            let t = f64::from(step) / 10.0;
            let sum = cubic_kernel(t + 1.0)
                + cubic_kernel(t)
                + cubic_kernel(1.0 - t)
                + cubic_kernel(2.0 - t);
            assert!((sum - 1.0).abs() < 1e-12, "at {}", t);
        }
    }

    #[test]
    fn unit_factor_reproduces_source() {
        let domain = Domain::with_shape(&[6, 3]).unwrap();
        let image = ArrayImage::from_fn(domain.clone(), |pos| (pos[0] * 40 + pos[1]) as u8);
        let scaled = ScaleAxis::new(ArrayAccess::new(&image), &domain, 0, 1.0).unwrap();
        assert_eq!(scaled.domain(), &domain);
        let output = render(scaled, &domain).unwrap();
        assert_eq!(output, image);
    }

    #[test]
    fn enlarge_linear_ramp() {
        let domain = Domain::with_shape(&[5]).unwrap();
        let image = ArrayImage::from_fn(domain.clone(), |pos| (pos[0] * 20) as f32);
        let scaled = ScaleAxis::new(ArrayAccess::new(&image), &domain, 0, 2.0).unwrap();
        assert_eq!(scaled.domain().shape(), &[10]);

        let out_domain = scaled.domain().clone();
        let output = render(scaled, &out_domain).unwrap();
        // Cubic convolution reproduces linear functions away from the clamped edges.
        for x in 2..6 {
            let expected = x as f32 * 10.0;
            let got = output.as_slice()[x];
            assert!((got - expected).abs() < 1e-4, "at {}: {}", x, got);
        }
    }

    #[test]
    fn constant_stays_constant() {
        let domain = Domain::with_shape(&[4, 2]).unwrap();
        let image = ArrayImage::filled(domain.clone(), image_grid::Rgb8::new(9, 99, 199));
        let scaled = ScaleAxis::new(ArrayAccess::new(&image), &domain, 1, 2.5).unwrap();
        let out_domain = scaled.domain().clone();
        assert_eq!(out_domain.shape(), &[4, 5]);
        let output = render(scaled, &out_domain).unwrap();
        assert!(output
            .as_slice()
            .iter()
            .all(|&px| px == image_grid::Rgb8::new(9, 99, 199)));
    }

    #[test]
    fn invalid_factor() {
        let domain = Domain::with_shape(&[4]).unwrap();
        let image = ArrayImage::filled(domain.clone(), 0u8);
        for factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(ScaleAxis::new(ArrayAccess::new(&image), &domain, 0, factor).is_err());
        }
        assert_eq!(
            ScaleAxis::new(ArrayAccess::new(&image), &domain, 1, 1.0).unwrap_err(),
            ViewError::AxisOutOfRange {
                axis: 1,
                dimensions: 1
            }
        );
    }

    #[test]
    fn enlarged_domain_must_be_addressable() {
        let domain = Domain::new(&[i64::MAX - 3], &[i64::MAX - 1]).unwrap();
        let image = ArrayImage::filled(domain.clone(), 0u8);
        assert_eq!(
            ScaleAxis::new(ArrayAccess::new(&image), &domain, 0, 4.0).unwrap_err(),
            ViewError::InvalidScale(4.0)
        );

        // Shrinking stays in range.
        let scale = ScaleAxis::new(ArrayAccess::new(&image), &domain, 0, 0.5).unwrap();
        assert_eq!(scale.domain().min(), &[i64::MAX - 3]);
        assert_eq!(scale.domain().max(), &[i64::MAX - 2]);
    }
}
