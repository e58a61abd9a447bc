use crate::histogram::MaxHistogram;
use crate::region::{Region, ScanOrder, Segment};
use crate::{Positionable, Sampler, ViewError};
use image_grid::Domain;

/// The maximum of a source over a region that slides with the position.
///
/// The filter keeps a histogram of all source values inside the region. When the region moves,
/// only the points that left it are removed and only the points that entered it are added. For
/// a unit step this touches the surface of the region rather than its volume.
///
/// Region points outside of `bounds` are ignored, the source is never read there. The source
/// must be readable at every point of `bounds`.
///
/// The filter is either *tracking*, when the histogram reflects the current region, or
/// uninitialized. An uninitialized filter only records moves and fills its histogram on the next
/// read.
#[derive(Clone, Debug)]
pub struct SlidingMax<A, H> {
    source: A,
    bounds: Domain,
    current: Region,
    previous: Region,
    histogram: H,
    delta: Vec<i64>,
    /// The axis of the last move, full scans run their segments along it.
    scan_axis: usize,
    tracking: bool,
}

impl<A, H> SlidingMax<A, H>
where
    A: Sampler,
    H: MaxHistogram<Value = A::Value>,
{
    /// Filter `source` over `region`, which is centered at the initial position.
    ///
    /// The histogram is cleared, any previous content is discarded.
    pub fn new(
        source: A,
        bounds: &Domain,
        region: Region,
        mut histogram: H,
    ) -> Result<Self, ViewError> {
        let dimensions = bounds.num_dimensions();
        ViewError::check_dimensions(dimensions, source.num_dimensions())?;
        ViewError::check_dimensions(dimensions, region.num_dimensions())?;
        histogram.clear();

        log::debug!(
            "sliding maximum over {} points with radii {:?} in {:?}..={:?}",
            region.len(),
            region.radii(),
            bounds.min(),
            bounds.max(),
        );

        Ok(SlidingMax {
            source,
            bounds: bounds.clone(),
            previous: region.clone(),
            current: region,
            histogram,
            delta: vec![0; dimensions],
            scan_axis: 0,
            tracking: false,
        })
    }

    /// Forget the histogram, the next read scans the whole region again.
    pub fn reset(&mut self) {
        self.histogram.clear();
        self.tracking = false;
    }

    /// Whether the histogram currently reflects the region.
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// The region at the current position.
    pub fn region(&self) -> &Region {
        &self.current
    }

    pub fn histogram(&self) -> &H {
        &self.histogram
    }

    pub fn bounds(&self) -> &Domain {
        &self.bounds
    }

    pub fn into_source(self) -> A {
        self.source
    }

    /// Move the region by `self.delta` and update the histogram.
    fn relocate(&mut self) {
        let Some(axis) = leading_axis(&self.delta) else {
            return;
        };
        self.scan_axis = axis;

        if !self.tracking {
            self.current.move_center(&self.delta);
            return;
        }

        self.previous.set_center(self.current.center());
        self.current.move_center(&self.delta);

        let disjoint = (0..self.delta.len()).any(|d| {
            self.previous.max()[d] < self.current.min()[d]
                || self.current.max()[d] < self.previous.min()[d]
        });

        if disjoint {
            // Nothing carries over, defer a full scan to the next read.
            self.reset();
        } else {
            self.update(axis);
        }
    }

    /// Apply the symmetric difference of the previous and current region to the histogram.
    ///
    /// A line meets an ellipsoid in a contiguous run of points. Hence the part of a segment that
    /// lies outside of the other region is a run at each end, and each end is scanned inward
    /// until the first point that the other region contains.
    fn update(&mut self, axis: usize) {
        let SlidingMax {
            source,
            bounds,
            current,
            previous,
            histogram,
            ..
        } = self;

        previous.for_each_segment(axis, ScanOrder::Descending, |segment| {
            trim_ends(source, bounds, current, segment, |value| {
                if let Err(err) = histogram.remove(value) {
                    log::error!("sliding maximum lost track of its region: {}", err);
                    panic!("inconsistent histogram of a sliding maximum: {}", err);
                }
            })
        });

        current.for_each_segment(axis, ScanOrder::Ascending, |segment| {
            trim_ends(source, bounds, previous, segment, |value| {
                histogram.add(value);
            })
        });
    }

    /// Count every point of the current region.
    fn full_scan(&mut self) {
        let SlidingMax {
            source,
            bounds,
            current,
            histogram,
            scan_axis,
            ..
        } = self;

        histogram.clear();
        log::trace!(
            "full scan of {} points at {:?} along axis {}",
            current.len(),
            current.center(),
            scan_axis,
        );

        current.for_each_segment(*scan_axis, ScanOrder::Descending, |segment| {
            let axis = segment.axis;
            let lo = (segment.position[axis] - segment.half).max(bounds.min()[axis]);
            let hi = (segment.position[axis] + segment.half).min(bounds.max()[axis]);
            if lo > hi {
                return;
            }

            source.set_position(segment.position);
            source.set_axis(lo, axis);
            if !bounds.contains(source.position()) {
                return;
            }

            for _ in lo..=hi {
                histogram.add(source.get());
                source.fwd(axis);
            }
        });

        self.tracking = true;
    }
}

/// Visit the in-bounds points of `segment` that `other` does not contain.
fn trim_ends<A: Sampler>(
    source: &mut A,
    bounds: &Domain,
    other: &Region,
    segment: Segment,
    mut visit: impl FnMut(A::Value),
) {
    let axis = segment.axis;
    let lo = segment.position[axis] - segment.half;
    let hi = segment.position[axis] + segment.half;

    source.set_position(segment.position);
    source.set_axis(lo, axis);
    let mut low_end = lo;
    while low_end <= hi && !other.contains(source.position()) {
        if bounds.contains(source.position()) {
            visit(source.get());
        }
        source.fwd(axis);
        low_end += 1;
    }

    // The whole segment was outside.
    if low_end > hi {
        return;
    }

    source.set_axis(hi, axis);
    let mut high_end = hi;
    while high_end > low_end && !other.contains(source.position()) {
        if bounds.contains(source.position()) {
            visit(source.get());
        }
        source.bck(axis);
        high_end -= 1;
    }
}

/// The axis with the largest displacement, or `None` for no displacement at all.
fn leading_axis(delta: &[i64]) -> Option<usize> {
    delta
        .iter()
        .enumerate()
        .filter(|(_, d)| **d != 0)
        .max_by_key(|(_, d)| d.unsigned_abs())
        .map(|(axis, _)| axis)
}

impl<A, H> Positionable for SlidingMax<A, H>
where
    A: Sampler,
    H: MaxHistogram<Value = A::Value>,
{
    fn num_dimensions(&self) -> usize {
        self.current.num_dimensions()
    }

    fn position(&self) -> &[i64] {
        self.current.center()
    }

    fn move_axis(&mut self, distance: i64, axis: usize) {
        self.delta.fill(0);
        self.delta[axis] = distance;
        self.relocate();
    }

    fn move_by(&mut self, distance: &[i64]) {
        self.delta.copy_from_slice(distance);
        self.relocate();
    }

    fn set_position(&mut self, position: &[i64]) {
        let center = self.current.center();
        for ((d, &to), &from) in self.delta.iter_mut().zip(position).zip(center) {
            *d = to - from;
        }
        self.relocate();
    }
}

impl<A, H> Sampler for SlidingMax<A, H>
where
    A: Sampler,
    H: MaxHistogram<Value = A::Value>,
{
    type Value = A::Value;

    #[inline]
    fn get(&mut self) -> A::Value {
        if !self.tracking {
            self.full_scan();
        }
        self.histogram.max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArrayAccess, ValueHistogram};
    use image_grid::ArrayImage;

    type GrayMax<'data> = SlidingMax<ArrayAccess<'data, u8>, ValueHistogram<u8>>;

    fn filter(image: &ArrayImage<u8>, radius: i64) -> GrayMax<'_> {
        let domain = image.domain();
        let region = Region::sphere(domain.min(), radius).unwrap();
        let histogram = ValueHistogram::new(8).unwrap();
        SlidingMax::new(ArrayAccess::new(image), domain, region, histogram).unwrap()
    }

    #[test]
    fn lazy_initialization() {
        let domain = Domain::with_shape(&[6]).unwrap();
        let image = ArrayImage::from_vec(domain, vec![1u8, 2, 3, 4, 5, 6]).unwrap();
        let mut max = filter(&image, 1);

        assert!(!max.is_tracking());
        max.move_axis(3, 0);
        max.bck(0);
        assert!(!max.is_tracking());
        assert_eq!(max.position(), &[2]);

        assert_eq!(max.get(), 4);
        assert!(max.is_tracking());
        max.fwd(0);
        assert!(max.is_tracking());
        assert_eq!(max.get(), 5);

        max.reset();
        assert!(!max.is_tracking());
        assert_eq!(max.get(), 5);
    }

    #[test]
    fn far_jumps_rescan() {
        let domain = Domain::with_shape(&[20]).unwrap();
        let image = ArrayImage::from_fn(domain, |pos| pos[0] as u8);
        let mut max = filter(&image, 2);

        assert_eq!(max.get(), 2);
        max.set_position(&[10]);
        assert!(!max.is_tracking());
        assert_eq!(max.get(), 12);
        max.set_position(&[19]);
        assert_eq!(max.get(), 19);
        max.move_axis(-3, 0);
        assert!(max.is_tracking());
        assert_eq!(max.get(), 18);
    }

    #[test]
    fn diagonal_moves() {
        let domain = Domain::with_shape(&[7, 7]).unwrap();
        let mut image = ArrayImage::filled(domain, 0u8);
        *image.get_mut(&[3, 3]).unwrap() = 9;
        let mut max = filter(&image, 1);

        max.set_position(&[1, 1]);
        assert_eq!(max.get(), 0);
        max.move_by(&[1, 1]);
        assert!(max.is_tracking());
        assert_eq!(max.get(), 0);
        max.move_by(&[1, 0]);
        assert_eq!(max.get(), 9);
        max.move_by(&[-1, 1]);
        assert_eq!(max.get(), 9);
        max.move_by(&[-1, -1]);
        assert_eq!(max.get(), 0);
    }

    #[test]
    fn scans_along_the_moved_axis() {
        let domain = Domain::with_shape(&[6, 9]).unwrap();
        let image = ArrayImage::from_fn(domain, |pos| (pos[0] * 10 + pos[1]) as u8);
        let mut max = filter(&image, 2);

        max.move_axis(4, 1);
        assert_eq!(max.scan_axis, 1);
        assert_eq!(max.get(), 24);
        assert!(max.is_tracking());

        // A far jump dominated by the second axis rescans along it, partly outside the image.
        max.move_by(&[1, -5]);
        assert!(!max.is_tracking());
        assert_eq!(max.scan_axis, 1);
        assert_eq!(max.get(), 20);

        max.set_position(&[5, 8]);
        assert_eq!(max.scan_axis, 1);
        max.reset();
        assert_eq!(max.get(), 58);

        max.move_axis(-5, 0);
        assert_eq!(max.scan_axis, 0);
        max.reset();
        assert_eq!(max.get(), 28);
    }

    #[test]
    fn leading_axis_of_moves() {
        assert_eq!(leading_axis(&[0, 0]), None);
        assert_eq!(leading_axis(&[0, -1]), Some(1));
        assert_eq!(leading_axis(&[2, -3, 1]), Some(1));
    }

    #[test]
    fn dimension_checks() {
        let domain = Domain::with_shape(&[4, 4]).unwrap();
        let image = ArrayImage::filled(domain.clone(), 1u8);
        let region = Region::sphere(&[0], 1).unwrap();
        let histogram = ValueHistogram::<u8>::new(8).unwrap();
        let err = SlidingMax::new(ArrayAccess::new(&image), &domain, region, histogram);
        assert_eq!(
            err.err(),
            Some(ViewError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
    }
}
