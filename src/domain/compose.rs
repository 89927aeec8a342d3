/// Chains two functions left to right: the result of `first` is fed to `then`.
pub fn compose<A, B, C>(first: impl Fn(A) -> B, then: impl Fn(B) -> C) -> impl Fn(A) -> C {
    move |arg| then(first(arg))
}

/// Left to right composition of any number of functions.
///
/// `compose!(f, g, h)` behaves like `|x| h(g(f(x)))`.
#[macro_export]
macro_rules! compose {
    ($f:expr $(,)?) => {
        $f
    };
    ($f:expr, $($rest:expr),+ $(,)?) => {
        $crate::domain::compose::compose($f, $crate::compose!($($rest),+))
    };
}
