//! Bucketed counters that track the largest value present.
//!
//! Values are discretized into `2^bits` buckets. Bucket `0` is the background: adding or removing
//! zero has no effect, and an empty histogram reports zero as its maximum.
use core::marker::PhantomData;
use image_grid::{Bucket, Rgb8};

/// Error that occurs when configuring or updating a histogram.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HistogramError {
    /// A value was removed more often than it had been added.
    #[error("bucket {bucket} removed more often than added")]
    Underflow { bucket: usize },
    #[error("unsupported bucket width of {0} bits")]
    UnsupportedBits(u32),
}

/// A multiset of pixel values with constant time access to its maximum.
///
/// `Clone` is a deep copy of all counts.
pub trait MaxHistogram: Clone {
    type Value: Copy;

    /// Count a value, returns the new maximum.
    fn add(&mut self, value: Self::Value) -> Self::Value;

    /// Uncount a value, returns the new maximum.
    ///
    /// Removing a value that is not counted is an error and leaves the histogram unchanged.
    fn remove(&mut self, value: Self::Value) -> Result<Self::Value, HistogramError>;

    fn max(&self) -> Self::Value;

    /// Remove all values.
    fn clear(&mut self);
}

/// A histogram of a scalar channel.
#[derive(Debug)]
pub struct ValueHistogram<P> {
    counts: Vec<usize>,
    mask: usize,
    max: usize,
    pixel: PhantomData<fn() -> P>,
}

/// Three independent 8-bit histograms, one per channel.
///
/// The maximum is taken per channel, so the reported pixel is generally not one that was added.
#[derive(Clone, Debug)]
pub struct RgbHistogram {
    red: ValueHistogram<u8>,
    green: ValueHistogram<u8>,
    blue: ValueHistogram<u8>,
}

impl<P: Bucket> ValueHistogram<P> {
    /// The largest supported bucket width.
    pub const MAX_BITS: u32 = 16;

    /// A histogram with `2^bits` buckets, for `bits` in `1..=16`.
    pub fn new(bits: u32) -> Result<Self, HistogramError> {
        if !(1..=Self::MAX_BITS).contains(&bits) {
            return Err(HistogramError::UnsupportedBits(bits));
        }

        Ok(Self::with_bits(bits))
    }

    fn with_bits(bits: u32) -> Self {
        let buckets = 1usize << bits;
        ValueHistogram {
            counts: vec![0; buckets],
            mask: buckets - 1,
            max: 0,
            pixel: PhantomData,
        }
    }

    pub fn bits(&self) -> u32 {
        self.counts.len().trailing_zeros()
    }

    /// How often the bucket of `value` has been counted.
    pub fn count(&self, value: P) -> usize {
        self.counts[value.to_bucket() & self.mask]
    }

    fn add_bucket(&mut self, bucket: usize) {
        if bucket == 0 {
            return;
        }

        self.counts[bucket] += 1;
        if bucket > self.max {
            self.max = bucket;
        }
    }

    fn remove_bucket(&mut self, bucket: usize) -> Result<(), HistogramError> {
        if bucket == 0 {
            return Ok(());
        }

        let count = &mut self.counts[bucket];
        *count = count
            .checked_sub(1)
            .ok_or(HistogramError::Underflow { bucket })?;

        if *count == 0 && bucket == self.max {
            self.max = self.counts[..bucket]
                .iter()
                .rposition(|&c| c > 0)
                .unwrap_or(0);
        }

        Ok(())
    }
}

impl<P> Clone for ValueHistogram<P> {
    fn clone(&self) -> Self {
        ValueHistogram {
            counts: self.counts.clone(),
            mask: self.mask,
            max: self.max,
            pixel: PhantomData,
        }
    }
}

impl<P: Bucket> MaxHistogram for ValueHistogram<P> {
    type Value = P;

    #[inline]
    fn add(&mut self, value: P) -> P {
        self.add_bucket(value.to_bucket() & self.mask);
        self.max()
    }

    #[inline]
    fn remove(&mut self, value: P) -> Result<P, HistogramError> {
        self.remove_bucket(value.to_bucket() & self.mask)?;
        Ok(self.max())
    }

    #[inline]
    fn max(&self) -> P {
        P::from_bucket(self.max)
    }

    fn clear(&mut self) {
        self.counts.fill(0);
        self.max = 0;
    }
}

impl RgbHistogram {
    pub fn new() -> Self {
        RgbHistogram {
            red: ValueHistogram::with_bits(8),
            green: ValueHistogram::with_bits(8),
            blue: ValueHistogram::with_bits(8),
        }
    }

    fn channels(&mut self) -> [&mut ValueHistogram<u8>; 3] {
        [&mut self.red, &mut self.green, &mut self.blue]
    }
}

impl Default for RgbHistogram {
    fn default() -> Self {
        RgbHistogram::new()
    }
}

impl MaxHistogram for RgbHistogram {
    type Value = Rgb8;

    fn add(&mut self, value: Rgb8) -> Rgb8 {
        for (channel, v) in self.channels().into_iter().zip(value.to_array()) {
            channel.add_bucket(usize::from(v));
        }
        self.max()
    }

    fn remove(&mut self, value: Rgb8) -> Result<Rgb8, HistogramError> {
        let values = value.to_array();
        // Check all channels first, a failed removal must not change any of them.
        for (channel, v) in self.channels().into_iter().zip(values) {
            if v != 0 && channel.count(v) == 0 {
                return Err(HistogramError::Underflow {
                    bucket: usize::from(v),
                });
            }
        }

        for (channel, v) in self.channels().into_iter().zip(values) {
            channel.remove_bucket(usize::from(v))?;
        }

        Ok(self.max())
    }

    fn max(&self) -> Rgb8 {
        Rgb8::new(self.red.max(), self.green.max(), self.blue.max())
    }

    fn clear(&mut self) {
        for channel in self.channels() {
            channel.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_maximum() {
        let mut hist = ValueHistogram::<u8>::new(8).unwrap();
        assert_eq!(hist.add(5), 5);
        assert_eq!(hist.add(3), 5);
        assert_eq!(hist.add(5), 5);
        assert_eq!(hist.max(), 5);

        assert_eq!(hist.remove(5), Ok(5));
        assert_eq!(hist.remove(5), Ok(3));
        assert_eq!(hist.remove(3), Ok(0));
        assert_eq!(hist.count(3), 0);
    }

    #[test]
    fn underflow_is_reported() {
        let mut hist = ValueHistogram::<u8>::new(8).unwrap();
        hist.add(7);
        assert_eq!(hist.remove(6), Err(HistogramError::Underflow { bucket: 6 }));
        assert_eq!(hist.max(), 7);
        assert_eq!(hist.remove(7), Ok(0));
        assert_eq!(hist.remove(7), Err(HistogramError::Underflow { bucket: 7 }));
    }

    #[test]
    fn zero_is_background() {
        let mut hist = ValueHistogram::<u8>::new(8).unwrap();
        assert_eq!(hist.add(0), 0);
        assert_eq!(hist.add(0), 0);
        assert_eq!(hist.count(0), 0);
        assert_eq!(hist.remove(0), Ok(0));
        assert_eq!(hist.remove(0), Ok(0));

        hist.add(1);
        hist.add(0);
        assert_eq!(hist.remove(1), Ok(0));
    }

    #[test]
    fn bucket_width() {
        assert_eq!(
            ValueHistogram::<u8>::new(0).err(),
            Some(HistogramError::UnsupportedBits(0))
        );
        assert_eq!(
            ValueHistogram::<u16>::new(17).err(),
            Some(HistogramError::UnsupportedBits(17))
        );

        let mut hist = ValueHistogram::<u16>::new(12).unwrap();
        assert_eq!(hist.bits(), 12);
        assert_eq!(hist.add(4000), 4000);
        // Values are masked to the bucket width.
        assert_eq!(hist.add(4096 + 5), 4000);
        assert_eq!(hist.count(5), 1);

        let mut narrow = ValueHistogram::<u8>::new(4).unwrap();
        assert_eq!(narrow.add(0x1f), 0xf);
    }

    #[test]
    fn clones_are_independent() {
        let mut hist = ValueHistogram::<u8>::new(8).unwrap();
        hist.add(9);
        let mut copy = hist.clone();
        copy.add(200);
        assert_eq!(hist.max(), 9);
        assert_eq!(copy.max(), 200);
        copy.clear();
        assert_eq!(copy.max(), 0);
        assert_eq!(hist.max(), 9);
    }

    #[test]
    fn interleaved_against_counts() {
        let mut hist = ValueHistogram::<u8>::new(8).unwrap();
        let mut present: Vec<u8> = Vec::new();
        // A deterministic pseudo random walk of adds and removes.
        let mut state = 0x2545_f491u32;
        for _ in 0..2000 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            if present.is_empty() || state % 3 != 0 {
                let value = (state >> 8) as u8 % 40;
                hist.add(value);
                present.push(value);
            } else {
                let idx = (state >> 4) as usize % present.len();
                let value = present.swap_remove(idx);
                hist.remove(value).unwrap();
            }
            assert_eq!(hist.max(), present.iter().copied().max().unwrap_or(0));
        }
    }

    #[test]
    fn rgb_channels() {
        let mut hist = RgbHistogram::new();
        assert_eq!(hist.add(Rgb8::new(10, 0, 3)), Rgb8::new(10, 0, 3));
        assert_eq!(hist.add(Rgb8::new(2, 7, 1)), Rgb8::new(10, 7, 3));
        assert_eq!(hist.remove(Rgb8::new(10, 0, 3)), Ok(Rgb8::new(2, 7, 1)));

        assert_eq!(
            hist.remove(Rgb8::new(2, 8, 1)),
            Err(HistogramError::Underflow { bucket: 8 })
        );
        assert_eq!(hist.max(), Rgb8::new(2, 7, 1));

        hist.clear();
        assert_eq!(hist.max(), Rgb8::BLACK);
    }
}
