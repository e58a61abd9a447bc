//! Integer points of hyperspheres and axis-aligned hyperellipsoids.
//!
//! A [`Region`] is the set of points `p` with `Σ (p_d - c_d)² / r_d² <= 1` around a center `c`.
//! It is enumerated as a set of line segments: fixing the offsets along all but one axis leaves a
//! symmetric interval on the remaining one. Callers that aggregate along lines, such as the
//! sliding filter, consume the segments directly.
//!
//! All arithmetic is exact. With `L` the least common multiple of the squared non-zero radii a
//! point is contained iff `Σ (L / r_d²)·(p_d - c_d)² <= L`. The same weights drive enumeration,
//! so a point is enumerated if and only if [`Region::contains`] accepts it.
use core::fmt;

/// Error that occurs when constructing a region.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    #[error("a region needs at least one dimension")]
    NoDimensions,
    #[error("center has {center} coordinates but {radii} radii are given")]
    DimensionMismatch { center: usize, radii: usize },
    #[error("negative radius {radius} on axis {axis}")]
    NegativeRadius { axis: usize, radius: i64 },
    /// The exact containment test would overflow its integer arithmetic.
    #[error("radii are too large for exact containment tests")]
    TooLarge,
}

/// The direction in which offsets are swept on every axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScanOrder {
    /// From the positive extreme to the negative one.
    #[default]
    Descending,
    /// From the negative extreme to the positive one.
    Ascending,
}

/// A line of points inside a region.
///
/// The segment consists of all points `position + k·e_axis` for `k` in `-half..=half`. Its
/// midpoint `position` always lies on the center along `axis`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<'pos> {
    pub position: &'pos [i64],
    pub half: i64,
    pub axis: usize,
}

/// A hypersphere or axis-aligned hyperellipsoid with integer center and radii.
///
/// Enumeration is iterative. The stack of partially fixed axes lives in buffers owned by the
/// region that are allocated once, so enumerating never allocates.
#[derive(Clone)]
pub struct Region {
    center: Vec<i64>,
    radii: Vec<i64>,
    /// Per axis factor `L / r²`, or `L + 1` for a zero radius.
    weights: Vec<u128>,
    /// The common denominator `L`.
    budget: u128,
    min: Vec<i64>,
    max: Vec<i64>,
    len: usize,
    stack: Vec<Level>,
    point: Vec<i64>,
}

/// One partially fixed axis of the enumeration stack.
#[derive(Clone, Copy, Debug, Default)]
struct Level {
    axis: usize,
    offset: i64,
    limit: i64,
    /// Budget left for all axes below this one, before subtracting this offset.
    remaining: u128,
}

impl ScanOrder {
    fn first(self, limit: i64) -> i64 {
        match self {
            ScanOrder::Descending => limit,
            ScanOrder::Ascending => -limit,
        }
    }

    fn step(self) -> i64 {
        match self {
            ScanOrder::Descending => -1,
            ScanOrder::Ascending => 1,
        }
    }
}

impl Segment<'_> {
    /// The number of points, `2·half + 1`.
    pub fn len(&self) -> usize {
        (2 * self.half + 1) as usize
    }

    /// The segment is never empty, it always contains its midpoint.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The coordinate along the segment axis of the first point in the given order.
    pub fn start(&self, order: ScanOrder) -> i64 {
        self.position[self.axis] + order.first(self.half)
    }
}

impl Region {
    /// The ball of points within euclidean distance `radius` around `center`.
    pub fn sphere(center: &[i64], radius: i64) -> Result<Self, RegionError> {
        let radii = vec![radius; center.len()];
        Region::ellipsoid(center, &radii)
    }

    /// The axis-aligned ellipsoid with one half-axis length per dimension.
    ///
    /// A zero radius restricts the region to the center coordinate along that axis.
    pub fn ellipsoid(center: &[i64], radii: &[i64]) -> Result<Self, RegionError> {
        if center.is_empty() {
            return Err(RegionError::NoDimensions);
        }

        if center.len() != radii.len() {
            return Err(RegionError::DimensionMismatch {
                center: center.len(),
                radii: radii.len(),
            });
        }

        if let Some((axis, &radius)) = radii.iter().enumerate().find(|(_, &r)| r < 0) {
            return Err(RegionError::NegativeRadius { axis, radius });
        }

        let mut budget: u128 = 1;
        for &radius in radii.iter().filter(|&&r| r > 0) {
            let square = (radius as u128)
                .checked_mul(radius as u128)
                .ok_or(RegionError::TooLarge)?;
            budget = lcm(budget, square).ok_or(RegionError::TooLarge)?;
        }

        // Any sum of `n` terms each at most `L + 1` must be representable.
        let dimensions = radii.len() as u128;
        budget
            .checked_add(1)
            .and_then(|b| b.checked_mul(dimensions))
            .ok_or(RegionError::TooLarge)?;

        let weights = radii
            .iter()
            .map(|&r| match r {
                0 => budget + 1,
                r => budget / (r as u128 * r as u128),
            })
            .collect();

        let mut region = Region {
            center: center.to_vec(),
            radii: radii.to_vec(),
            weights,
            budget,
            min: center.to_vec(),
            max: center.to_vec(),
            len: 0,
            stack: vec![Level::default(); radii.len() - 1],
            point: center.to_vec(),
        };

        region.update_min_max();
        let mut len = 0;
        region.for_each_segment(0, ScanOrder::Descending, |segment| len += segment.len());
        region.len = len;

        log::debug!(
            "region with radii {:?} has {} points in {} dimensions",
            region.radii,
            region.len,
            region.radii.len(),
        );

        Ok(region)
    }

    pub fn num_dimensions(&self) -> usize {
        self.center.len()
    }

    pub fn center(&self) -> &[i64] {
        &self.center
    }

    pub fn radii(&self) -> &[i64] {
        &self.radii
    }

    /// The lower corner of the bounding box.
    pub fn min(&self) -> &[i64] {
        &self.min
    }

    /// The upper corner of the bounding box, inclusive.
    pub fn max(&self) -> &[i64] {
        &self.max
    }

    /// The number of points in the region, independent of its center.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`, the center is part of every region.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Move the center to an absolute position.
    pub fn set_center(&mut self, center: &[i64]) {
        self.center.copy_from_slice(center);
        self.update_min_max();
    }

    /// Move the center by a relative distance.
    pub fn move_center(&mut self, distance: &[i64]) {
        for (c, d) in self.center.iter_mut().zip(distance) {
            *c += d;
        }
        self.update_min_max();
    }

    /// Move the center along a single axis.
    pub fn move_axis(&mut self, distance: i64, axis: usize) {
        self.center[axis] += distance;
        self.min[axis] = self.center[axis] - self.radii[axis];
        self.max[axis] = self.center[axis] + self.radii[axis];
    }

    /// Recompute the bounding box from center and radii.
    pub fn update_min_max(&mut self) {
        for axis in 0..self.center.len() {
            self.min[axis] = self.center[axis] - self.radii[axis];
            self.max[axis] = self.center[axis] + self.radii[axis];
        }
    }

    /// Test whether a point lies inside the region.
    pub fn contains(&self, pos: &[i64]) -> bool {
        let mut sum: u128 = 0;
        for axis in 0..self.center.len() {
            let p = pos[axis];
            if p < self.min[axis] || p > self.max[axis] {
                return false;
            }

            let d = p.abs_diff(self.center[axis]) as u128;
            // Bounded by the box check, `d² <= r²` hence the term is at most `L`.
            sum += self.weights[axis] * d * d;
        }

        sum <= self.budget
    }

    /// Call `f` with every segment of the region along `axis`.
    ///
    /// The other axes are fixed in increasing axis order, the lowest varies slowest. Each of them
    /// sweeps its offsets in `order`, and every point of the region is part of exactly one
    /// segment.
    ///
    /// # Panics
    ///
    /// If `axis` is not below the number of dimensions.
    pub fn for_each_segment(&mut self, axis: usize, order: ScanOrder, mut f: impl FnMut(Segment)) {
        let dimensions = self.center.len();
        assert!(axis < dimensions, "segment axis {} out of range", axis);

        let levels = dimensions - 1;
        let step = order.step();
        self.point.copy_from_slice(&self.center);

        if levels == 0 {
            let half = isqrt_div(self.budget, self.weights[axis]);
            f(Segment {
                position: &self.point,
                half,
                axis,
            });
            return;
        }

        // Fixed axes are all axes except the segment axis, in increasing order.
        for (depth, level) in self.stack.iter_mut().enumerate() {
            level.axis = if depth < axis { depth } else { depth + 1 };
        }

        let mut depth = 0;
        self.push(depth, self.budget, order);

        loop {
            let level = self.stack[depth];
            let fixed = level.axis;
            self.point[fixed] = self.center[fixed] + level.offset;
            let offset = level.offset.unsigned_abs() as u128;
            let child = level.remaining - self.weights[fixed] * offset * offset;

            if depth + 1 < levels {
                depth += 1;
                self.push(depth, child, order);
                continue;
            }

            let half = isqrt_div(child, self.weights[axis]);
            f(Segment {
                position: &self.point,
                half,
                axis,
            });

            // Advance the deepest level that is not exhausted, popping the others.
            loop {
                let level = &mut self.stack[depth];
                if level.offset != -order.first(level.limit) {
                    level.offset += step;
                    break;
                }

                if depth == 0 {
                    return;
                }

                depth -= 1;
            }
        }
    }

    /// Call `f` with every point of the region.
    ///
    /// Points are visited segment by segment along axis 0, so the sequence in ascending order is
    /// the exact reverse of the descending one.
    pub fn for_each_location(&mut self, order: ScanOrder, mut f: impl FnMut(&[i64])) {
        let mut point = self.center.clone();
        self.for_each_segment(0, order, |segment| {
            point.copy_from_slice(segment.position);
            let mut x = segment.start(order);
            for _ in 0..segment.len() {
                point[0] = x;
                f(&point);
                x += order.step();
            }
        });
    }

    /// Initialize the stack level at `depth` with the budget available to it.
    fn push(&mut self, depth: usize, remaining: u128, order: ScanOrder) {
        let level = &mut self.stack[depth];
        level.limit = isqrt_div(remaining, self.weights[level.axis]);
        level.offset = order.first(level.limit);
        level.remaining = remaining;
    }
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("center", &self.center)
            .field("radii", &self.radii)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

/// The largest `k` with `weight·k² <= budget`.
fn isqrt_div(budget: u128, weight: u128) -> i64 {
    (budget / weight).isqrt() as i64
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: u128, b: u128) -> Option<u128> {
    (a / gcd(a, b)).checked_mul(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn points(region: &mut Region, order: ScanOrder) -> Vec<Vec<i64>> {
        let mut all = Vec::new();
        region.for_each_location(order, |p| all.push(p.to_vec()));
        all
    }

    #[test]
    fn point_counts() {
        let cases: &[(&[i64], i64, usize)] = &[
            (&[0], 3, 7),
            (&[0, 0], 1, 5),
            (&[0, 0], 2, 13),
            (&[0, 0], 3, 29),
            (&[0, 0, 0], 1, 7),
            (&[0, 0, 0], 0, 1),
            (&[5, -2], 0, 1),
        ];

        for &(center, radius, count) in cases {
            let mut region = Region::sphere(center, radius).unwrap();
            assert_eq!(region.len(), count, "radius {} in {}-D", radius, center.len());
            assert_eq!(points(&mut region, ScanOrder::Descending).len(), count);
        }
    }

    #[test]
    fn ellipsoid_points() {
        let mut region = Region::ellipsoid(&[10, 20], &[2, 1]).unwrap();
        let all: BTreeSet<_> = points(&mut region, ScanOrder::Ascending).into_iter().collect();
        let expected: BTreeSet<Vec<i64>> = [
            [8, 20],
            [9, 20],
            [10, 20],
            [11, 20],
            [12, 20],
            [10, 19],
            [10, 21],
        ]
        .iter()
        .map(|p| p.to_vec())
        .collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn zero_radius_is_a_line() {
        let mut region = Region::ellipsoid(&[0, 0, 0], &[0, 2, 0]).unwrap();
        let all = points(&mut region, ScanOrder::Descending);
        assert_eq!(all.len(), 5);
        assert!(all.iter().all(|p| p[0] == 0 && p[2] == 0));
        assert!(!region.contains(&[1, 0, 0]));
    }

    #[test]
    fn symmetric_under_negation() {
        for radii in [&[3i64, 3][..], &[2, 3, 1], &[4, 1], &[2, 2, 2, 2]] {
            let center = vec![0; radii.len()];
            let mut region = Region::ellipsoid(&center, radii).unwrap();
            let all: BTreeSet<_> = points(&mut region, ScanOrder::Descending).into_iter().collect();

            for p in &all {
                for axis in 0..p.len() {
                    let mut mirrored = p.clone();
                    mirrored[axis] = -mirrored[axis];
                    assert!(all.contains(&mirrored), "{:?} mirrored on {}", p, axis);
                }
            }
        }
    }

    #[test]
    fn orders_are_reversed() {
        let mut region = Region::ellipsoid(&[1, 2, 3], &[3, 2, 2]).unwrap();
        let descending = points(&mut region, ScanOrder::Descending);
        let mut ascending = points(&mut region, ScanOrder::Ascending);
        ascending.reverse();
        assert_eq!(descending, ascending);

        let unique: BTreeSet<_> = descending.iter().collect();
        assert_eq!(unique.len(), descending.len());
    }

    #[test]
    fn contains_agrees_with_enumeration() {
        for radii in [&[3i64, 3][..], &[5, 2], &[1, 3, 2], &[0, 4]] {
            let center = [7, -3, 2][..radii.len()].to_vec();
            let mut region = Region::ellipsoid(&center, radii).unwrap();
            let all: BTreeSet<_> = points(&mut region, ScanOrder::Descending).into_iter().collect();

            // Every point of a box one larger than the bounding box.
            let lo: Vec<i64> = region.min().iter().map(|m| m - 1).collect();
            let hi: Vec<i64> = region.max().iter().map(|m| m + 1).collect();
            let mut p = lo.clone();
            'scan: loop {
                let expected = p
                    .iter()
                    .zip(&center)
                    .zip(radii)
                    .map(|((&x, &c), &r)| match r {
                        0 if x == c => 0.0,
                        0 => f64::INFINITY,
                        r => ((x - c) as f64 / r as f64).powi(2),
                    })
                    .sum::<f64>()
                    <= 1.0 + 1e-12;
                assert_eq!(region.contains(&p), expected, "{:?}", p);
                assert_eq!(all.contains(&p), expected, "{:?}", p);

                for axis in 0..p.len() {
                    if p[axis] < hi[axis] {
                        p[axis] += 1;
                        continue 'scan;
                    }
                    p[axis] = lo[axis];
                }
                break;
            }
        }
    }

    #[test]
    fn segments_along_any_axis() {
        let mut region = Region::ellipsoid(&[0, 0, 0], &[2, 3, 1]).unwrap();
        for axis in 0..3 {
            let mut count = 0;
            region.for_each_segment(axis, ScanOrder::Ascending, |segment| {
                assert_eq!(segment.axis, axis);
                assert_eq!(segment.position[axis], 0);
                count += segment.len();
            });
            assert_eq!(count, region.len());
        }
    }

    #[test]
    fn moving_the_center() {
        let mut region = Region::sphere(&[0, 0], 2).unwrap();
        region.move_center(&[3, -1]);
        assert_eq!(region.center(), &[3, -1]);
        assert_eq!(region.min(), &[1, -3]);
        assert_eq!(region.max(), &[5, 1]);
        assert!(region.contains(&[5, -1]));
        assert!(!region.contains(&[5, 0]));

        region.move_axis(-1, 1);
        assert_eq!(region.min(), &[1, -4]);
        region.set_center(&[0, 0]);
        assert!(region.contains(&[0, 2]));
        assert_eq!(points(&mut region, ScanOrder::Ascending).len(), 13);
    }

    #[test]
    fn invalid_regions() {
        assert_eq!(Region::sphere(&[], 1).err(), Some(RegionError::NoDimensions));
        assert_eq!(
            Region::ellipsoid(&[0, 0], &[1]).err(),
            Some(RegionError::DimensionMismatch { center: 2, radii: 1 })
        );
        assert_eq!(
            Region::ellipsoid(&[0, 0], &[1, -2]).err(),
            Some(RegionError::NegativeRadius {
                axis: 1,
                radius: -2
            })
        );
        assert_eq!(
            Region::ellipsoid(&[0, 0], &[i64::MAX, i64::MAX - 1]).err(),
            Some(RegionError::TooLarge)
        );
    }
}
