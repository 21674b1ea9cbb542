//! The pull protocol every buffered operator both implements and consumes.
//!
//! A pull yields either a value or the end marker. Once `End` has been
//! returned, well-behaved upstreams keep returning `End`; the operators
//! assume this but do not enforce it (fusing is a separate concern).

/// Result of a single pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step<T> {
    Value(T),
    End,
}

impl<T> Step<T> {
    pub fn is_end(&self) -> bool {
        matches!(self, Step::End)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Step::Value(v) => Some(v),
            Step::End => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Step<U> {
        match self {
            Step::Value(v) => Step::Value(f(v)),
            Step::End => Step::End,
        }
    }
}

impl<T> From<Option<T>> for Step<T> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => Step::Value(v),
            None => Step::End,
        }
    }
}

impl<T> From<Step<T>> for Option<T> {
    fn from(step: Step<T>) -> Self {
        step.into_option()
    }
}

/// A single-consumer, pull-based upstream.
///
/// Every `Iterator` is a `Pull` source, so operators accept plain iterators
/// (and each other) as upstreams.
pub trait Pull {
    type Item;

    /// Request the next element.
    fn pull(&mut self) -> Step<Self::Item>;
}

impl<I: Iterator> Pull for I {
    type Item = I::Item;

    fn pull(&mut self) -> Step<I::Item> {
        self.next().into()
    }
}
