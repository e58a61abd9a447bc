use crate::{Positionable, Sampler};

/// A view that replaces selected pixels by a fixed background.
///
/// The predicate sees the position and the source value. Wherever it returns `true` the view
/// yields the background instead, regardless of the pixel content. This blanks fixed regions of
/// an image such as a text label or a scale bar.
#[derive(Clone, Debug)]
pub struct MaskAccess<A: Sampler, M> {
    source: A,
    masked: M,
    background: A::Value,
}

impl<A, M> MaskAccess<A, M>
where
    A: Sampler,
    M: Fn(&[i64], &A::Value) -> bool + Clone,
{
    pub fn new(source: A, masked: M, background: A::Value) -> Self {
        MaskAccess {
            source,
            masked,
            background,
        }
    }

    pub fn background(&self) -> A::Value {
        self.background
    }
}

impl<A: Sampler, M> Positionable for MaskAccess<A, M> {
    fn num_dimensions(&self) -> usize {
        self.source.num_dimensions()
    }

    fn position(&self) -> &[i64] {
        self.source.position()
    }

    #[inline]
    fn move_axis(&mut self, distance: i64, axis: usize) {
        self.source.move_axis(distance, axis)
    }

    #[inline]
    fn fwd(&mut self, axis: usize) {
        self.source.fwd(axis)
    }

    #[inline]
    fn bck(&mut self, axis: usize) {
        self.source.bck(axis)
    }

    fn set_position(&mut self, position: &[i64]) {
        self.source.set_position(position)
    }
}

impl<A, M> Sampler for MaskAccess<A, M>
where
    A: Sampler,
    M: Fn(&[i64], &A::Value) -> bool + Clone,
{
    type Value = A::Value;

    #[inline]
    fn get(&mut self) -> A::Value {
        let value = self.source.get();
        if (self.masked)(self.source.position(), &value) {
            self.background
        } else {
            value
        }
    }
}

#[test]
fn blank_label_area() {
    use crate::{render, ArrayAccess};
    use image_grid::{ArrayImage, Domain};

    let domain = Domain::with_shape(&[4, 2]).unwrap();
    let image = ArrayImage::filled(domain.clone(), 200u8);

    // The label occupies the two rightmost columns of the first row.
    let label = |pos: &[i64], _: &u8| pos[1] == 0 && pos[0] >= 2;
    let masked = MaskAccess::new(ArrayAccess::new(&image), label, 0);
    let output = render(masked, &domain).unwrap();
    assert_eq!(output.as_slice(), &[200, 200, 0, 0, 200, 200, 200, 200]);

    // Value based masking, dim pixels become background.
    let image = ArrayImage::from_fn(domain.clone(), |pos| (pos[0] * 10) as u8);
    let dim = |_: &[i64], value: &u8| *value < 15;
    let masked = MaskAccess::new(ArrayAccess::new(&image), dim, 255);
    let output = render(masked, &domain).unwrap();
    assert_eq!(output.as_slice(), &[255, 255, 20, 30, 255, 255, 20, 30]);
}
