// Distributed under The MIT License (MIT)
//
// Copyright (c) 2019, 2020 The `image-rs` developers
use crate::Domain;
use alloc::vec::Vec;

/// Row-major iteration state over a [`Domain`].
///
/// The odometer starts *before* the first element: all axes are at their minimum except the first
/// which is one below it. Each call to [`Odometer::advance`] steps the first axis; when an axis
/// runs past its maximum it is reset to its minimum and the carry moves to the next axis.
///
/// The position before the first element is the reason that [`Domain`] rejects a first axis
/// starting at `i64::MIN`. Axes may end at `i64::MAX`.
///
/// ```
/// use image_grid::{Domain, Odometer};
///
/// let domain = Domain::with_shape(&[2, 2])?;
/// let mut odometer = Odometer::new(&domain);
///
/// let mut visited = vec![];
/// while odometer.has_next() {
///     odometer.advance();
///     visited.push(odometer.position().to_vec());
/// }
///
/// assert_eq!(visited, [[0, 0], [1, 0], [0, 1], [1, 1]]);
/// # Ok::<(), image_grid::DomainError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Odometer {
    min: Vec<i64>,
    max: Vec<i64>,
    position: Vec<i64>,
    /// The linear index of the current position, `-1` before the first element.
    index: i64,
    last: i64,
}

impl Odometer {
    pub fn new(domain: &Domain) -> Self {
        let mut odometer = Odometer {
            min: domain.min().to_vec(),
            max: domain.max().to_vec(),
            position: domain.min().to_vec(),
            index: -1,
            // Fits, by the domain invariant.
            last: domain.len() as i64 - 1,
        };
        odometer.reset();
        odometer
    }

    /// Move back to before the first element.
    pub fn reset(&mut self) {
        self.position.copy_from_slice(&self.min);
        self.position[0] -= 1;
        self.index = -1;
    }

    /// Whether another call to `advance` yields an element of the domain.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.index < self.last
    }

    /// Step to the next element in row-major order.
    ///
    /// Returns the highest axis whose coordinate changed. This is `0` unless a carry happened,
    /// in which case all lower axes have been reset to their minimum. Calling this when
    /// [`Odometer::has_next`] is `false` wraps around to the first element.
    #[inline]
    pub fn advance(&mut self) -> usize {
        self.index += 1;
        if self.position[0] < self.max[0] {
            self.position[0] += 1;
            return 0;
        }

        for axis in 1..self.position.len() {
            self.position[axis - 1] = self.min[axis - 1];
            if self.position[axis] < self.max[axis] {
                self.position[axis] += 1;
                return axis;
            }
        }

        // Exhausted, start over.
        let top = self.position.len() - 1;
        self.position.copy_from_slice(&self.min);
        self.index = 0;
        top
    }

    /// Skip forward by `steps` elements.
    pub fn jump(&mut self, steps: usize) {
        for _ in 0..steps {
            self.advance();
        }
    }

    /// The coordinate of the current element.
    pub fn position(&self) -> &[i64] {
        &self.position
    }

    /// The linear index of the current element, `-1` before the first.
    pub fn index(&self) -> i64 {
        self.index
    }

    pub fn num_dimensions(&self) -> usize {
        self.position.len()
    }
}

#[test]
fn carries_reset_lower_axes() {
    let domain = Domain::new(&[1, 1, 1], &[2, 2, 2]).expect("valid domain");
    let mut odometer = Odometer::new(&domain);
    assert_eq!(odometer.advance(), 0);
    assert_eq!(odometer.position(), &[1, 1, 1]);
    assert_eq!(odometer.advance(), 0);
    assert_eq!(odometer.advance(), 1);
    assert_eq!(odometer.position(), &[1, 2, 1]);
    odometer.advance();
    assert_eq!(odometer.advance(), 2);
    assert_eq!(odometer.position(), &[1, 1, 2]);
}

#[test]
fn has_next_on_last_row() {
    let domain = Domain::with_shape(&[3, 2]).expect("valid domain");
    let mut odometer = Odometer::new(&domain);
    let mut count = 0;
    while odometer.has_next() {
        odometer.advance();
        count += 1;
    }
    assert_eq!(count, 6);
    assert_eq!(odometer.position(), &[2, 1]);

    odometer.reset();
    assert!(odometer.has_next());
    assert_eq!(odometer.index(), -1);
}

#[test]
fn extreme_coordinates() {
    let domain = Domain::new(&[i64::MIN + 1, i64::MAX - 1], &[i64::MIN + 2, i64::MAX])
        .expect("valid domain");
    let mut odometer = Odometer::new(&domain);
    assert_eq!(odometer.position(), &[i64::MIN, i64::MAX - 1]);

    let mut visited = alloc::vec![];
    while odometer.has_next() {
        odometer.advance();
        visited.push(odometer.position().to_vec());
    }
    assert_eq!(
        visited,
        [
            [i64::MIN + 1, i64::MAX - 1],
            [i64::MIN + 2, i64::MAX - 1],
            [i64::MIN + 1, i64::MAX],
            [i64::MIN + 2, i64::MAX],
        ]
    );

    let top = Domain::new(&[i64::MAX - 1], &[i64::MAX]).expect("valid domain");
    let mut odometer = Odometer::new(&top);
    odometer.jump(2);
    assert_eq!(odometer.position(), &[i64::MAX]);
    // Wraps around without overflowing.
    assert_eq!(odometer.advance(), 0);
    assert_eq!(odometer.position(), &[i64::MAX - 1]);
}
