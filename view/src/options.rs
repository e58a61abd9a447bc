use crate::histogram::{HistogramError, RgbHistogram, ValueHistogram};
use crate::region::{Region, RegionError};
use crate::{Sampler, SlidingMax, ViewError};
use image_grid::{Bucket, Domain, Rgb8};

/// Error that occurs when a filter is configured.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error(transparent)]
    Region(#[from] RegionError),
    #[error(transparent)]
    Histogram(#[from] HistogramError),
    #[error(transparent)]
    View(#[from] ViewError),
    /// The options select a different kind of histogram than the one requested.
    #[error("the options are configured for a {configured:?} histogram")]
    HistogramKind { configured: HistogramKind },
}

/// The extent of the filter region.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Radius {
    /// The same radius on every axis, a sphere.
    Scalar(i64),
    /// One radius per axis, an axis-aligned ellipsoid.
    PerAxis(Vec<i64>),
}

/// Which histogram counts the pixel values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HistogramKind {
    /// One channel of scalar intensities.
    #[default]
    Intensity,
    /// Three independent 8-bit channels.
    Rgb,
}

/// Configuration of a sliding maximum filter.
///
/// The default is a radius of one with 8-bit intensity buckets. With the `serde` feature the
/// options can be read from configuration files, missing fields take their default value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterOptions {
    pub radius: Radius,
    /// The bucket width of the histogram, `1..=16` for intensities and exactly 8 for RGB.
    pub bits: u32,
    pub histogram: HistogramKind,
}

impl Default for Radius {
    fn default() -> Self {
        Radius::Scalar(1)
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            radius: Radius::default(),
            bits: 8,
            histogram: HistogramKind::default(),
        }
    }
}

impl Radius {
    /// The radius of every axis.
    pub fn radii(&self, dimensions: usize) -> Result<Vec<i64>, RegionError> {
        match self {
            Radius::Scalar(radius) => Ok(vec![*radius; dimensions]),
            Radius::PerAxis(radii) if radii.len() == dimensions => Ok(radii.clone()),
            Radius::PerAxis(radii) => Err(RegionError::DimensionMismatch {
                center: dimensions,
                radii: radii.len(),
            }),
        }
    }
}

impl FilterOptions {
    /// Check the options against images with `dimensions` axes.
    pub fn validate(&self, dimensions: usize) -> Result<(), FilterError> {
        if dimensions == 0 {
            return Err(RegionError::NoDimensions.into());
        }

        let radii = self.radius.radii(dimensions)?;
        if let Some((axis, &radius)) = radii.iter().enumerate().find(|(_, &r)| r < 0) {
            return Err(RegionError::NegativeRadius { axis, radius }.into());
        }

        let supported = match self.histogram {
            HistogramKind::Intensity => (1..=ValueHistogram::<u16>::MAX_BITS).contains(&self.bits),
            HistogramKind::Rgb => self.bits == 8,
        };

        if !supported {
            return Err(HistogramError::UnsupportedBits(self.bits).into());
        }

        Ok(())
    }

    /// The filter region around `center`.
    pub fn region(&self, center: &[i64]) -> Result<Region, FilterError> {
        let radii = self.radius.radii(center.len())?;
        Ok(Region::ellipsoid(center, &radii)?)
    }

    pub fn gray_histogram<P: Bucket>(&self) -> Result<ValueHistogram<P>, FilterError> {
        self.expect_kind(HistogramKind::Intensity)?;
        Ok(ValueHistogram::new(self.bits)?)
    }

    pub fn rgb_histogram(&self) -> Result<RgbHistogram, FilterError> {
        self.expect_kind(HistogramKind::Rgb)?;
        if self.bits != 8 {
            return Err(HistogramError::UnsupportedBits(self.bits).into());
        }
        Ok(RgbHistogram::new())
    }

    /// A sliding maximum of intensities over `domain`, positioned at its minimum corner.
    pub fn sliding_max_gray<A>(
        &self,
        source: A,
        domain: &Domain,
    ) -> Result<SlidingMax<A, ValueHistogram<A::Value>>, FilterError>
    where
        A: Sampler,
        A::Value: Bucket,
    {
        self.validate(domain.num_dimensions())?;
        let histogram = self.gray_histogram()?;
        let region = self.region(domain.min())?;
        Ok(SlidingMax::new(source, domain, region, histogram)?)
    }

    /// A sliding maximum of each color channel over `domain`, positioned at its minimum corner.
    pub fn sliding_max_rgb<A>(
        &self,
        source: A,
        domain: &Domain,
    ) -> Result<SlidingMax<A, RgbHistogram>, FilterError>
    where
        A: Sampler<Value = Rgb8>,
    {
        self.validate(domain.num_dimensions())?;
        let histogram = self.rgb_histogram()?;
        let region = self.region(domain.min())?;
        Ok(SlidingMax::new(source, domain, region, histogram)?)
    }

    fn expect_kind(&self, kind: HistogramKind) -> Result<(), FilterError> {
        if self.histogram == kind {
            Ok(())
        } else {
            Err(FilterError::HistogramKind {
                configured: self.histogram,
            })
        }
    }
}
