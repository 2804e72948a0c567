/// Values that can be blended linearly between two states.
pub trait Interpolatable: Sized + Clone {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Interpolatable for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Interpolatable for f32 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t as f32
    }
}

impl Interpolatable for () {
    fn lerp(&self, _other: &Self, _t: f64) -> Self {}
}

impl Interpolatable for kurbo::Point {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        kurbo::Point::lerp(*self, *other, t)
    }
}

/// Two independently interpolated components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimatablePair<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> AnimatablePair<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Interpolatable, B: Interpolatable> Interpolatable for AnimatablePair<A, B> {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            first: self.first.lerp(&other.first, t),
            second: self.second.lerp(&other.second, t),
        }
    }
}

/// A shape or effect whose animated parameters can be read and written as one
/// interpolatable value.
pub trait Animatable {
    type Data: Interpolatable;

    fn animatable_data(&self) -> Self::Data;

    fn set_animatable_data(&mut self, data: Self::Data);

    /// A copy of `self` with its data blended `t` of the way towards `to`.
    fn interpolated(&self, to: &Self, t: f64) -> Self
    where
        Self: Clone,
    {
        let mut out = self.clone();
        out.set_animatable_data(self.animatable_data().lerp(&to.animatable_data(), t));
        out
    }
}
