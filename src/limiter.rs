/// The common limiter capability.
///
/// Implemented by [`Slider`](crate::Slider) and
/// [`TokenBucket`](crate::TokenBucket). [`Equalizer`](crate::Equalizer) is
/// deliberately not a `Limiter`: its admission decisions are driven by
/// caller-supplied outcomes (`notify`) rather than self-managed capacity, so
/// it has no meaningful blocking `take`.
pub trait Limiter {
    /// Non-blocking admission check; `true` grants one permit.
    fn ask(&self) -> bool;

    /// Blocks the calling thread until a permit is granted.
    fn take(&self);
}
