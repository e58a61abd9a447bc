use image_grid::ArrayImage;

/// An object with a mutable position in an N-dimensional integer space.
///
/// Only [`Positionable::move_axis`] and [`Positionable::set_position`] are required. The other
/// mutators are expressed in terms of them but may be overridden when an accessor can handle a
/// combined move more efficiently than a sequence of single-axis moves.
pub trait Positionable {
    fn num_dimensions(&self) -> usize;

    /// The current position.
    fn position(&self) -> &[i64];

    /// Move by `distance` along `axis`.
    fn move_axis(&mut self, distance: i64, axis: usize);

    /// Move to an absolute position, with one value per axis.
    fn set_position(&mut self, position: &[i64]);

    /// Move one step forward along `axis`.
    #[inline]
    fn fwd(&mut self, axis: usize) {
        self.move_axis(1, axis)
    }

    /// Move one step backward along `axis`.
    #[inline]
    fn bck(&mut self, axis: usize) {
        self.move_axis(-1, axis)
    }

    /// Move by a relative distance, with one value per axis.
    fn move_by(&mut self, distance: &[i64]) {
        for (axis, &step) in distance.iter().enumerate() {
            if step != 0 {
                self.move_axis(step, axis);
            }
        }
    }

    /// Move to an absolute coordinate along one axis.
    fn set_axis(&mut self, position: i64, axis: usize) {
        let distance = position - self.position()[axis];
        if distance != 0 {
            self.move_axis(distance, axis);
        }
    }
}

/// A positionable accessor that yields a pixel value at its position.
///
/// `Clone` is the independent copy: the clone starts at the same position with the same state,
/// and moving or reading one never affects the other.
///
/// Reading outside the domain of the underlying data is a precondition violation. Accessors do
/// not check bounds on every read; wrap an accessor in an [`ExtendAccess`](crate::ExtendAccess)
/// or clip positions beforehand.
pub trait Sampler: Positionable + Clone {
    type Value: Copy;

    /// Compute the value at the current position.
    fn get(&mut self) -> Self::Value;
}

/// The terminal accessor, reading pixels of an [`ArrayImage`].
///
/// The linear offset into the pixel slice is maintained incrementally on every move, so that
/// stepping along an axis costs one addition.
///
/// # Panics
///
/// Reading at a position outside of the domain of the image panics, or silently reads another
/// pixel of the image if the linear offset happens to be in range.
#[derive(Clone, Debug)]
pub struct ArrayAccess<'data, P> {
    data: &'data [P],
    min: &'data [i64],
    stride: &'data [i64],
    position: Vec<i64>,
    offset: i64,
}

impl<'data, P: Copy> ArrayAccess<'data, P> {
    /// An accessor at the minimum corner of the image.
    pub fn new(image: &'data ArrayImage<P>) -> Self {
        let min = image.domain().min();
        ArrayAccess {
            data: image.as_slice(),
            min,
            stride: image.strides().strides(),
            position: min.to_vec(),
            offset: 0,
        }
    }

    /// The linear index of the current position.
    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl<P: Copy> Positionable for ArrayAccess<'_, P> {
    fn num_dimensions(&self) -> usize {
        self.position.len()
    }

    fn position(&self) -> &[i64] {
        &self.position
    }

    #[inline]
    fn move_axis(&mut self, distance: i64, axis: usize) {
        self.position[axis] += distance;
        self.offset += distance * self.stride[axis];
    }

    #[inline]
    fn fwd(&mut self, axis: usize) {
        self.position[axis] += 1;
        self.offset += self.stride[axis];
    }

    #[inline]
    fn bck(&mut self, axis: usize) {
        self.position[axis] -= 1;
        self.offset -= self.stride[axis];
    }

    fn set_position(&mut self, position: &[i64]) {
        self.position.copy_from_slice(position);
        self.offset = position
            .iter()
            .zip(self.min.iter().zip(self.stride))
            .map(|(&p, (&lo, &step))| (p - lo) * step)
            .sum();
    }
}

impl<P: Copy> Sampler for ArrayAccess<'_, P> {
    type Value = P;

    #[inline]
    fn get(&mut self) -> P {
        self.data[self.offset as usize]
    }
}

#[test]
fn incremental_offset() {
    use image_grid::Domain;

    let domain = Domain::new(&[1, 1], &[4, 3]).expect("valid domain");
    let image = ArrayImage::from_fn(domain, |pos| (pos[0] * 10 + pos[1]) as u8);
    let mut access = ArrayAccess::new(&image);

    assert_eq!(access.get(), 11);
    access.fwd(0);
    access.fwd(1);
    assert_eq!(access.get(), 22);
    access.move_axis(2, 0);
    assert_eq!(access.get(), 42);
    access.set_position(&[3, 3]);
    assert_eq!(access.offset(), 10);
    assert_eq!(access.get(), 33);

    let mut copy = access.clone();
    copy.bck(1);
    assert_eq!(copy.get(), 32);
    assert_eq!(access.get(), 33);
}
