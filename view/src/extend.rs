use crate::{Positionable, Sampler, ViewError};
use image_grid::Domain;

/// How coordinates outside of a domain are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderMode<T> {
    /// Repeat the nearest edge pixel.
    Clamp,
    /// Yield a fixed value outside of the domain.
    Constant(T),
    /// Mirror at the edge pixel without repeating it, `cba|abcd|dcb`.
    Reflect101,
}

/// A view that can be read everywhere, by mapping outside positions into a domain.
///
/// Inside of the domain this forwards to the source unchanged.
#[derive(Clone, Debug)]
pub struct ExtendAccess<A: Sampler> {
    source: A,
    mode: BorderMode<A::Value>,
    min: Vec<i64>,
    shape: Vec<i64>,
    position: Vec<i64>,
    mapped: Vec<i64>,
}

impl<T> BorderMode<T> {
    /// Map an offset from the start of an axis of length `len` into `0..len`.
    ///
    /// Returns `None` if the constant value should be used instead.
    pub fn map_index(&self, idx: i64, len: i64) -> Option<i64> {
        if (0..len).contains(&idx) {
            return Some(idx);
        }

        match self {
            BorderMode::Constant(_) => None,
            BorderMode::Clamp => Some(idx.clamp(0, len - 1)),
            BorderMode::Reflect101 if len == 1 => Some(0),
            BorderMode::Reflect101 => {
                let period = 2 * len - 2;
                let r = idx.rem_euclid(period);
                Some(if r < len { r } else { period - r })
            }
        }
    }
}

impl<A: Sampler> ExtendAccess<A> {
    /// Extend `source`, which must be readable everywhere on `domain`.
    pub fn new(source: A, domain: &Domain, mode: BorderMode<A::Value>) -> Result<Self, ViewError> {
        ViewError::check_dimensions(domain.num_dimensions(), source.num_dimensions())?;
        let position = source.position().to_vec();
        Ok(ExtendAccess {
            source,
            mode,
            min: domain.min().to_vec(),
            shape: domain.shape().to_vec(),
            mapped: position.clone(),
            position,
        })
    }

    pub fn mode(&self) -> &BorderMode<A::Value> {
        &self.mode
    }

    pub fn into_source(self) -> A {
        self.source
    }
}

impl<A: Sampler> Positionable for ExtendAccess<A> {
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

impl<A: Sampler> Sampler for ExtendAccess<A> {
    type Value = A::Value;

    fn get(&mut self) -> A::Value {
        for axis in 0..self.position.len() {
            let offset = self.position[axis] - self.min[axis];
            match self.mode.map_index(offset, self.shape[axis]) {
                Some(idx) => self.mapped[axis] = self.min[axis] + idx,
                None => {
                    if let BorderMode::Constant(value) = self.mode {
                        return value;
                    }
                }
            }
        }

        self.source.set_position(&self.mapped);
        self.source.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArrayAccess;
    use image_grid::ArrayImage;

    #[test]
    fn clamp_mapping() {
        let mode = BorderMode::<u8>::Clamp;
        let mapped: Vec<_> = (-3..8).map(|i| mode.map_index(i, 5)).collect();
        let expected: Vec<_> = [0, 0, 0, 0, 1, 2, 3, 4, 4, 4, 4].map(Some).to_vec();
        assert_eq!(mapped, expected);
    }

    #[test]
    fn reflect101_mapping() {
        let mode = BorderMode::<u8>::Reflect101;
        for i in -8..=8 {
            assert_eq!(mode.map_index(i, 1), Some(0));
        }

        let len2: Vec<_> = (-4..=4).filter_map(|i| mode.map_index(i, 2)).collect();
        assert_eq!(len2, [0, 1, 0, 1, 0, 1, 0, 1, 0]);

        let len5: Vec<_> = (-7..=7).filter_map(|i| mode.map_index(i, 5)).collect();
        assert_eq!(len5, [1, 2, 3, 4, 3, 2, 1, 0, 1, 2, 3, 4, 3, 2, 1]);
    }

    #[test]
    fn constant_outside() {
        let domain = Domain::new(&[2, 2], &[3, 3]).unwrap();
        let image = ArrayImage::from_fn(domain.clone(), |pos| (pos[0] + 10 * pos[1]) as u8);
        let mut view =
            ExtendAccess::new(ArrayAccess::new(&image), &domain, BorderMode::Constant(99)).unwrap();

        view.set_position(&[3, 2]);
        assert_eq!(view.get(), 23);
        view.fwd(0);
        assert_eq!(view.get(), 99);
        view.set_position(&[2, 1]);
        assert_eq!(view.get(), 99);
    }

    #[test]
    fn clamp_reads_edges() {
        let domain = Domain::with_shape(&[3]).unwrap();
        let image = ArrayImage::from_vec(domain.clone(), vec![4u8, 5, 6]).unwrap();
        let mut view =
            ExtendAccess::new(ArrayAccess::new(&image), &domain, BorderMode::Clamp).unwrap();

        let mut line = Vec::new();
        for x in -2..5 {
            view.set_position(&[x]);
            line.push(view.get());
        }
        assert_eq!(line, [4, 4, 4, 5, 6, 6, 6]);
    }
}
