use crate::{Positionable, Sampler, ViewError};
use image_grid::Domain;

/// One elementary integer coordinate transformation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// Add an offset on every axis.
    Shift(Vec<i64>),
    /// Reflect one axis, `x -> pivot - x`.
    Mirror { axis: usize, pivot: i64 },
    /// Multiply every axis by an integer factor.
    Scale(Vec<i64>),
    /// Reorder the axes, `target[d] = source[axes[d]]`.
    Permute(Vec<usize>),
}

/// A pure mapping of integer coordinates, built from a chain of [`Step`]s.
///
/// Transforms are values. Combining two of them with [`Transform::and_then`] or
/// [`Transform::compose`] concatenates their steps, merging neighbours where the result is again
/// elementary: two shifts add, two scales multiply, two permutations compose and a mirror
/// followed by the same mirror cancels. A step that does nothing is dropped. Consequently the
/// identity is the empty chain and equality of transforms built from shifts is equality of their
/// total offset.
///
/// ```
/// use image_view::Transform;
///
/// let a = Transform::shift(&[1, 2]);
/// let b = Transform::shift(&[-4, 0]);
/// assert_eq!(a.and_then(b)?, Transform::shift(&[-3, 2]));
/// # Ok::<(), image_view::ViewError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Transform {
    dimensions: usize,
    steps: Vec<Step>,
}

/// A view reading its source at transformed coordinates.
///
/// The view keeps its own logical position. On every read the position is mapped by the
/// transform and the source is moved to the result. The buffers for that mapping are allocated
/// once, together with the view.
#[derive(Clone, Debug)]
pub struct TransformAccess<A> {
    source: A,
    transform: Transform,
    position: Vec<i64>,
    target: Vec<i64>,
    scratch: Vec<i64>,
}

impl Step {
    fn is_identity(&self) -> bool {
        match self {
            Step::Shift(offset) => offset.iter().all(|&v| v == 0),
            Step::Mirror { .. } => false,
            Step::Scale(factor) => factor.iter().all(|&v| v == 1),
            Step::Permute(axes) => axes.iter().enumerate().all(|(d, &a)| d == a),
        }
    }

    /// Fold `next` into this step, when the combination is elementary.
    ///
    /// Returns whether the merged step is the identity, or `None` if the steps do not merge.
    fn merge(&mut self, next: &Step) -> Option<bool> {
        if let (Step::Mirror { axis, pivot }, Step::Mirror { axis: a, pivot: p }) = (&*self, next) {
            return (axis == a && pivot == p).then_some(true);
        }

        match (&mut *self, next) {
            (Step::Shift(offset), Step::Shift(more)) => {
                offset.iter_mut().zip(more).for_each(|(a, b)| *a += b);
            }
            (Step::Scale(factor), Step::Scale(more)) => {
                factor.iter_mut().zip(more).for_each(|(a, b)| *a *= b);
            }
            (Step::Permute(first), Step::Permute(then)) => {
                let combined: Vec<usize> = then.iter().map(|&d| first[d]).collect();
                *first = combined;
            }
            _ => return None,
        }

        Some(self.is_identity())
    }
}

impl Transform {
    /// The transform that maps every coordinate to itself.
    pub fn identity(dimensions: usize) -> Self {
        Transform {
            dimensions,
            steps: Vec::new(),
        }
    }

    /// Add `offset` to every coordinate.
    pub fn shift(offset: &[i64]) -> Self {
        let mut transform = Self::identity(offset.len());
        transform.push(Step::Shift(offset.to_vec()));
        transform
    }

    /// Multiply every coordinate by per-axis factors.
    pub fn scale(factor: &[i64]) -> Self {
        let mut transform = Self::identity(factor.len());
        transform.push(Step::Scale(factor.to_vec()));
        transform
    }

    /// Reflect `axis` around `pivot / 2`.
    ///
    /// Choosing `pivot = min + max` reflects an extent onto itself.
    pub fn mirror(dimensions: usize, axis: usize, pivot: i64) -> Result<Self, ViewError> {
        ViewError::check_axis(axis, dimensions)?;
        let mut transform = Self::identity(dimensions);
        transform.push(Step::Mirror { axis, pivot });
        Ok(transform)
    }

    /// Reorder axes such that the result has `source[axes[d]]` on axis `d`.
    pub fn permute(axes: &[usize]) -> Result<Self, ViewError> {
        let mut seen = vec![false; axes.len()];
        for &axis in axes {
            match seen.get_mut(axis) {
                Some(flag) if !*flag => *flag = true,
                _ => return Err(ViewError::InvalidPermutation),
            }
        }

        let mut transform = Self::identity(axes.len());
        transform.push(Step::Permute(axes.to_vec()));
        Ok(transform)
    }

    pub fn num_dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_identity(&self) -> bool {
        self.steps.is_empty()
    }

    /// First apply `self`, then `next`.
    pub fn and_then(mut self, next: Transform) -> Result<Self, ViewError> {
        ViewError::check_dimensions(self.dimensions, next.dimensions)?;
        for step in next.steps {
            self.push(step);
        }

        Ok(self)
    }

    /// First apply `first`, then `self`.
    pub fn compose(self, first: Transform) -> Result<Self, ViewError> {
        first.and_then(self)
    }

    /// Map `source` into `target`.
    ///
    /// Both slices and `scratch` must have one value per axis. The scratch buffer is needed by
    /// permutations, its contents are overwritten.
    pub fn apply(&self, source: &[i64], target: &mut [i64], scratch: &mut [i64]) {
        target.copy_from_slice(source);
        for step in &self.steps {
            match step {
                Step::Shift(offset) => {
                    target.iter_mut().zip(offset).for_each(|(t, o)| *t += o);
                }
                Step::Mirror { axis, pivot } => {
                    target[*axis] = pivot - target[*axis];
                }
                Step::Scale(factor) => {
                    target.iter_mut().zip(factor).for_each(|(t, f)| *t *= f);
                }
                Step::Permute(axes) => {
                    scratch.copy_from_slice(target);
                    for (t, &axis) in target.iter_mut().zip(axes) {
                        *t = scratch[axis];
                    }
                }
            }
        }
    }

    fn push(&mut self, step: Step) {
        if step.is_identity() {
            return;
        }

        if let Some(last) = self.steps.last_mut() {
            if let Some(identity) = last.merge(&step) {
                if identity {
                    self.steps.pop();
                }
                return;
            }
        }

        self.steps.push(step);
    }
}

impl<A: Sampler> TransformAccess<A> {
    /// Read `source` at `transform(position)`.
    pub fn new(source: A, transform: Transform) -> Result<Self, ViewError> {
        let dimensions = transform.num_dimensions();
        ViewError::check_dimensions(dimensions, source.num_dimensions())?;
        Ok(TransformAccess {
            source,
            transform,
            position: vec![0; dimensions],
            target: vec![0; dimensions],
            scratch: vec![0; dimensions],
        })
    }

    /// The source, moved by `offset`: the view at `x` shows the source at `x - offset`.
    pub fn translated(source: A, offset: &[i64]) -> Result<Self, ViewError> {
        let back: Vec<i64> = offset.iter().map(|&v| -v).collect();
        Self::new(source, Transform::shift(&back))
    }

    /// The source with `axis` reversed within `domain`.
    pub fn mirrored(source: A, domain: &Domain, axis: usize) -> Result<Self, ViewError> {
        let dimensions = domain.num_dimensions();
        ViewError::check_axis(axis, dimensions)?;
        let pivot = domain.min()[axis] + domain.max()[axis];
        Self::new(source, Transform::mirror(dimensions, axis, pivot)?)
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn into_source(self) -> A {
        self.source
    }
}

impl<A: Sampler> Positionable for TransformAccess<A> {
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

impl<A: Sampler> Sampler for TransformAccess<A> {
    type Value = A::Value;

    fn get(&mut self) -> A::Value {
        self.transform
            .apply(&self.position, &mut self.target, &mut self.scratch);
        self.source.set_position(&self.target);
        self.source.get()
    }
}
