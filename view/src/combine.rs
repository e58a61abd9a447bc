use crate::{Positionable, Sampler, ViewError};

/// A view combining two sources pixel by pixel.
///
/// Both sources are kept at the same position. Reading applies `op` to their current values.
#[derive(Clone, Debug)]
pub struct BinaryAccess<A, B, F> {
    a: A,
    b: B,
    op: F,
}

/// A view combining four sources pixel by pixel.
///
/// This is commonly used to assemble independently computed channels, or to compare several
/// images at once.
#[derive(Clone, Debug)]
pub struct QuadAccess<A, B, C, D, F> {
    a: A,
    b: B,
    c: C,
    d: D,
    op: F,
}

impl<A: Sampler, B: Sampler, F> BinaryAccess<A, B, F> {
    /// Combine two sources, which must have the same number of axes.
    ///
    /// The second source is moved to the position of the first.
    pub fn new(a: A, mut b: B, op: F) -> Result<Self, ViewError> {
        ViewError::check_dimensions(a.num_dimensions(), b.num_dimensions())?;
        b.set_position(a.position());
        Ok(BinaryAccess { a, b, op })
    }

    pub fn into_sources(self) -> (A, B) {
        (self.a, self.b)
    }
}

impl<A: Sampler, B: Sampler, F> Positionable for BinaryAccess<A, B, F> {
    fn num_dimensions(&self) -> usize {
        self.a.num_dimensions()
    }

    fn position(&self) -> &[i64] {
        self.a.position()
    }

    #[inline]
    fn move_axis(&mut self, distance: i64, axis: usize) {
        self.a.move_axis(distance, axis);
        self.b.move_axis(distance, axis);
    }

    #[inline]
    fn fwd(&mut self, axis: usize) {
        self.a.fwd(axis);
        self.b.fwd(axis);
    }

    #[inline]
    fn bck(&mut self, axis: usize) {
        self.a.bck(axis);
        self.b.bck(axis);
    }

    fn move_by(&mut self, distance: &[i64]) {
        self.a.move_by(distance);
        self.b.move_by(distance);
    }

    fn set_position(&mut self, position: &[i64]) {
        self.a.set_position(position);
        self.b.set_position(position);
    }
}

impl<A, B, F, O> Sampler for BinaryAccess<A, B, F>
where
    A: Sampler,
    B: Sampler,
    F: Fn(A::Value, B::Value) -> O + Clone,
    O: Copy,
{
    type Value = O;

    #[inline]
    fn get(&mut self) -> O {
        (self.op)(self.a.get(), self.b.get())
    }
}

impl<A: Sampler, B: Sampler, C: Sampler, D: Sampler, F> QuadAccess<A, B, C, D, F> {
    /// Combine four sources, which must all have the same number of axes.
    ///
    /// All sources are moved to the position of the first.
    pub fn new(a: A, mut b: B, mut c: C, mut d: D, op: F) -> Result<Self, ViewError> {
        let dimensions = a.num_dimensions();
        ViewError::check_dimensions(dimensions, b.num_dimensions())?;
        ViewError::check_dimensions(dimensions, c.num_dimensions())?;
        ViewError::check_dimensions(dimensions, d.num_dimensions())?;
        b.set_position(a.position());
        c.set_position(a.position());
        d.set_position(a.position());
        Ok(QuadAccess { a, b, c, d, op })
    }
}

impl<A: Sampler, B: Sampler, C: Sampler, D: Sampler, F> Positionable
    for QuadAccess<A, B, C, D, F>
{
    fn num_dimensions(&self) -> usize {
        self.a.num_dimensions()
    }

    fn position(&self) -> &[i64] {
        self.a.position()
    }

    #[inline]
    fn move_axis(&mut self, distance: i64, axis: usize) {
        self.a.move_axis(distance, axis);
        self.b.move_axis(distance, axis);
        self.c.move_axis(distance, axis);
        self.d.move_axis(distance, axis);
    }

    #[inline]
    fn fwd(&mut self, axis: usize) {
        self.a.fwd(axis);
        self.b.fwd(axis);
        self.c.fwd(axis);
        self.d.fwd(axis);
    }

    fn set_position(&mut self, position: &[i64]) {
        self.a.set_position(position);
        self.b.set_position(position);
        self.c.set_position(position);
        self.d.set_position(position);
    }
}

impl<A, B, C, D, F, O> Sampler for QuadAccess<A, B, C, D, F>
where
    A: Sampler,
    B: Sampler,
    C: Sampler,
    D: Sampler,
    F: Fn(A::Value, B::Value, C::Value, D::Value) -> O + Clone,
    O: Copy,
{
    type Value = O;

    #[inline]
    fn get(&mut self) -> O {
        (self.op)(self.a.get(), self.b.get(), self.c.get(), self.d.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render, ArrayAccess, TransformAccess};
    use image_grid::{ArrayImage, Domain, Rgb8};

    #[test]
    fn difference_of_images() {
        let domain = Domain::with_shape(&[3, 3]).unwrap();
        let a = ArrayImage::from_fn(domain.clone(), |pos| (pos[0] * 3 + pos[1]) as u8);
        let b = ArrayImage::filled(domain.clone(), 4u8);

        let diff = BinaryAccess::new(ArrayAccess::new(&a), ArrayAccess::new(&b), |x: u8, y: u8| {
            x.abs_diff(y)
        })
        .unwrap();
        let output = render(diff, &domain).unwrap();
        assert_eq!(output.as_slice(), &[4, 1, 2, 3, 0, 3, 2, 1, 4]);
    }

    #[test]
    fn assemble_channels() {
        let domain = Domain::with_shape(&[2, 2]).unwrap();
        let r = ArrayImage::filled(domain.clone(), 10u8);
        let g = ArrayImage::from_fn(domain.clone(), |pos| pos[0] as u8);
        let b = ArrayImage::from_fn(domain.clone(), |pos| pos[1] as u8);
        let alpha = ArrayImage::filled(domain.clone(), true);

        let rgb = QuadAccess::new(
            ArrayAccess::new(&r),
            ArrayAccess::new(&g),
            ArrayAccess::new(&b),
            ArrayAccess::new(&alpha),
            |r: u8, g: u8, b: u8, keep: bool| if keep { Rgb8::new(r, g, b) } else { Rgb8::BLACK },
        )
        .unwrap();

        let output = render(rgb, &domain).unwrap();
        assert_eq!(output.get(&[1, 0]), Some(&Rgb8::new(10, 1, 0)));
        assert_eq!(output.get(&[1, 1]), Some(&Rgb8::new(10, 1, 1)));
    }

    #[test]
    fn sources_stay_aligned() {
        let domain = Domain::with_shape(&[5]).unwrap();
        let image = ArrayImage::from_fn(domain.clone(), |pos| pos[0] as u8);
        let shifted = TransformAccess::translated(ArrayAccess::new(&image), &[1]).unwrap();

        let mut pair =
            BinaryAccess::new(ArrayAccess::new(&image), shifted, |x: u8, y: u8| (x, y)).unwrap();
        pair.set_position(&[1]);
        assert_eq!(pair.get(), (1, 0));
        pair.fwd(0);
        pair.fwd(0);
        assert_eq!(pair.get(), (3, 2));
    }

    #[test]
    fn mismatched_operands() {
        let a = ArrayImage::filled(Domain::with_shape(&[2, 2]).unwrap(), 0u8);
        let b = ArrayImage::filled(Domain::with_shape(&[4]).unwrap(), 0u8);
        let err = BinaryAccess::new(ArrayAccess::new(&a), ArrayAccess::new(&b), |x: u8, _: u8| x);
        assert_eq!(
            err.err(),
            Some(ViewError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
    }
}
