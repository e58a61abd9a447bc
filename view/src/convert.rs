use crate::{Positionable, Sampler};
use core::marker::PhantomData;

/// A pure mapping from one pixel value to another.
///
/// Converters compose with [`Converter::and_then`] and [`Converter::compose`], the result is a
/// [`Chain`] that runs both in sequence without any intermediate storage.
pub trait Converter<In> {
    type Out;

    fn convert(&self, value: In) -> Self::Out;

    /// First convert with `self`, then with `next`.
    fn and_then<C>(self, next: C) -> Chain<Self, C>
    where
        Self: Sized,
        C: Converter<Self::Out>,
    {
        Chain {
            first: self,
            then: next,
        }
    }

    /// First convert with `first`, then with `self`.
    fn compose<Pre, C>(self, first: C) -> Chain<C, Self>
    where
        Self: Sized,
        C: Converter<Pre, Out = In>,
    {
        Chain { first, then: self }
    }
}

/// Two converters applied in sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Chain<A, B> {
    first: A,
    then: B,
}

/// The converter that returns its input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity;

/// A converter from a plain function or closure.
pub struct FnConverter<F, Out> {
    f: F,
    out: PhantomData<fn() -> Out>,
}

/// A view that converts every value read from its source.
#[derive(Clone, Debug)]
pub struct ConvertAccess<A, C> {
    source: A,
    converter: C,
}

impl<In, A, B> Converter<In> for Chain<A, B>
where
    A: Converter<In>,
    B: Converter<A::Out>,
{
    type Out = B::Out;

    #[inline]
    fn convert(&self, value: In) -> B::Out {
        self.then.convert(self.first.convert(value))
    }
}

impl<In> Converter<In> for Identity {
    type Out = In;

    #[inline]
    fn convert(&self, value: In) -> In {
        value
    }
}

impl<F, Out> FnConverter<F, Out> {
    pub fn new<In>(f: F) -> Self
    where
        F: Fn(In) -> Out,
    {
        FnConverter {
            f,
            out: PhantomData,
        }
    }
}

impl<In, F, Out> Converter<In> for FnConverter<F, Out>
where
    F: Fn(In) -> Out,
{
    type Out = Out;

    #[inline]
    fn convert(&self, value: In) -> Out {
        (self.f)(value)
    }
}

impl<F: Clone, Out> Clone for FnConverter<F, Out> {
    fn clone(&self) -> Self {
        FnConverter {
            f: self.f.clone(),
            out: PhantomData,
        }
    }
}

impl<F, Out> core::fmt::Debug for FnConverter<F, Out> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnConverter").finish_non_exhaustive()
    }
}

impl<A, C> ConvertAccess<A, C> {
    pub fn new(source: A, converter: C) -> Self {
        ConvertAccess { source, converter }
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    pub fn into_source(self) -> A {
        self.source
    }
}

impl<A: Positionable, C> Positionable for ConvertAccess<A, C> {
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

    fn move_by(&mut self, distance: &[i64]) {
        self.source.move_by(distance)
    }

    fn set_position(&mut self, position: &[i64]) {
        self.source.set_position(position)
    }
}

impl<A, C> Sampler for ConvertAccess<A, C>
where
    A: Sampler,
    C: Converter<A::Value> + Clone,
    C::Out: Copy,
{
    type Value = C::Out;

    #[inline]
    fn get(&mut self) -> C::Out {
        self.converter.convert(self.source.get())
    }
}

#[test]
fn chains_run_in_order() {
    let double = FnConverter::new(|v: u32| v * 2);
    let inc = FnConverter::new(|v: u32| v + 1);
    let twice_then_one = Converter::<u32>::and_then(double.clone(), inc.clone());
    let one_then_twice = Converter::<u32>::compose::<u32, _>(double.clone(), inc);
    assert_eq!(twice_then_one.convert(5u32), 11);
    assert_eq!(one_then_twice.convert(5u32), 12);

    let left = Converter::<u32>::and_then(Identity, double.clone());
    let right = Converter::<u32>::compose::<u32, _>(double, Identity);
    assert_eq!(left.convert(4u32), 8);
    assert_eq!(right.convert(4u32), 8);
}
