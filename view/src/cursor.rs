use crate::{Sampler, ViewError};
use image_grid::{ArrayImage, Domain, Odometer};

/// Sequential traversal of a domain through a sampler.
///
/// The cursor visits every coordinate of the domain in row-major order, first axis fastest, and
/// yields the value of the sampler there. Within a row the sampler is only stepped forward, so
/// accessors with incremental state like [`SlidingMax`](crate::SlidingMax) update cheaply.
///
/// The coordinate of the most recently yielded value is available through [`Cursor::position`].
#[derive(Clone, Debug)]
pub struct Cursor<A> {
    sampler: A,
    odometer: Odometer,
    len: usize,
}

impl<A: Sampler> Cursor<A> {
    pub fn new(sampler: A, domain: &Domain) -> Result<Self, ViewError> {
        ViewError::check_dimensions(domain.num_dimensions(), sampler.num_dimensions())?;
        Ok(Cursor {
            sampler,
            odometer: Odometer::new(domain),
            len: domain.len(),
        })
    }

    /// The coordinate of the last value, or one before the first before iteration started.
    pub fn position(&self) -> &[i64] {
        self.odometer.position()
    }

    /// Move back to before the first element.
    pub fn reset(&mut self) {
        self.odometer.reset();
    }

    pub fn into_sampler(self) -> A {
        self.sampler
    }
}

impl<A: Sampler> Iterator for Cursor<A> {
    type Item = A::Value;

    fn next(&mut self) -> Option<A::Value> {
        if !self.odometer.has_next() {
            return None;
        }

        let changed = self.odometer.advance();
        if changed == 0 && self.odometer.index() > 0 {
            self.sampler.fwd(0);
        } else {
            self.sampler.set_position(self.odometer.position());
        }

        Some(self.sampler.get())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // The index is at least `-1`, so this is at most `len`.
        let left = self.len - (self.odometer.index() + 1) as usize;
        (left, Some(left))
    }
}

impl<A: Sampler> ExactSizeIterator for Cursor<A> {}

/// Materialize the values of a sampler over a domain into a new image.
///
/// This is the only operation in this crate that allocates pixel storage.
pub fn render<A: Sampler>(
    sampler: A,
    domain: &Domain,
) -> Result<ArrayImage<A::Value>, ViewError> {
    let data = Cursor::new(sampler, domain)?.collect();
    Ok(ArrayImage::from_vec(domain.clone(), data)?)
}
