//! The signal-function primitive.
//!
//! An [`Sf1`] is a stateful reactive transformer from an input stream to an
//! output stream that always carries a current output, so a composite can
//! read one side's view while feeding the other. The component algebra
//! composes signal functions purely at the type level and never inspects
//! their state.

/// A stateful step function with an always-available current output.
pub struct Sf1<I, O> {
    current: O,
    step: Box<dyn FnMut(I) -> O>,
}

impl<I: 'static, O: Clone + 'static> Sf1<I, O> {
    /// Build from an initial output and a step function.
    pub fn new(initial: O, step: impl FnMut(I) -> O + 'static) -> Self {
        Self {
            current: initial,
            step: Box::new(step),
        }
    }

    /// Fold inputs into a mutable model, recomputing the output per step.
    pub fn fold<S: 'static>(
        state: S,
        view: impl Fn(&S) -> O + 'static,
        mut update: impl FnMut(&mut S, I) + 'static,
    ) -> Self {
        let initial = view(&state);
        let mut state = state;
        Self::new(initial, move |input| {
            update(&mut state, input);
            view(&state)
        })
    }

    /// The output of the most recent step (or the initial output).
    pub fn current(&self) -> &O {
        &self.current
    }

    /// Run one step to completion and return the new output.
    pub fn feed(&mut self, input: I) -> O {
        let output = (self.step)(input);
        self.current = output.clone();
        output
    }

    /// Map the output side.
    pub fn map<O2: Clone + 'static>(self, f: impl Fn(O) -> O2 + 'static) -> Sf1<I, O2> {
        let Sf1 { current, mut step } = self;
        let initial = f(current);
        Sf1::new(initial, move |input| f(step(input)))
    }

    /// Map the input side, contravariantly.
    pub fn contramap<I2: 'static>(self, f: impl Fn(I2) -> I + 'static) -> Sf1<I2, O> {
        let Sf1 { current, mut step } = self;
        Sf1::new(current, move |input| step(f(input)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_threads_state() {
        let mut sf = Sf1::fold(0_i64, |count| *count, |count, delta: i64| *count += delta);
        assert_eq!(*sf.current(), 0);
        assert_eq!(sf.feed(5), 5);
        assert_eq!(sf.feed(-2), 3);
        assert_eq!(*sf.current(), 3);
    }

    #[test]
    fn map_covers_current_and_future_outputs() {
        let sf = Sf1::fold(1_i64, |count| *count, |count, delta: i64| *count += delta);
        let mut mapped = sf.map(|n| n * 10);
        assert_eq!(*mapped.current(), 10);
        assert_eq!(mapped.feed(2), 30);
    }

    #[test]
    fn contramap_rewrites_inputs() {
        let sf = Sf1::fold(0_i64, |count| *count, |count, delta: i64| *count += delta);
        let mut mapped = sf.contramap(|text: &str| text.len() as i64);
        assert_eq!(mapped.feed("abc"), 3);
        assert_eq!(mapped.feed("a"), 4);
    }
}
