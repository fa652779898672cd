//! Loop handler trait

use cadence_core::Result;

/// The input, update and render capabilities driven by the loop
///
/// Calls always happen in the order input, update (zero or more times),
/// render. An error from any method aborts the current iteration and ends
/// the run; the driver never retries or swallows it.
pub trait LoopHandler {
    /// Poll input. Returning `true` makes this the last iteration: update and
    /// render still run for it, but no further iteration starts.
    fn process_input(&mut self) -> Result<bool>;

    /// Advance the simulation by exactly `dt` seconds (always the fixed step)
    fn update(&mut self, dt: f64) -> Result<()>;

    /// Draw the current state. `alpha` in `[0, 1)` is how far real time has
    /// moved past the last simulated step, as a fraction of one step.
    fn render(&mut self, alpha: f64) -> Result<()>;
}

/// A handler assembled from three closures
pub struct FnHandler<'a> {
    input: Box<dyn FnMut() -> bool + 'a>,
    update: Box<dyn FnMut(f64) + 'a>,
    render: Box<dyn FnMut(f64) + 'a>,
}

impl<'a> FnHandler<'a> {
    pub fn new(
        input: impl FnMut() -> bool + 'a,
        update: impl FnMut(f64) + 'a,
        render: impl FnMut(f64) + 'a,
    ) -> Self {
        Self {
            input: Box::new(input),
            update: Box::new(update),
            render: Box::new(render),
        }
    }

    pub(crate) fn from_boxed(
        input: Box<dyn FnMut() -> bool + 'a>,
        update: Box<dyn FnMut(f64) + 'a>,
        render: Box<dyn FnMut(f64) + 'a>,
    ) -> Self {
        Self {
            input,
            update,
            render,
        }
    }
}

impl LoopHandler for FnHandler<'_> {
    fn process_input(&mut self) -> Result<bool> {
        Ok((self.input)())
    }

    fn update(&mut self, dt: f64) -> Result<()> {
        (self.update)(dt);
        Ok(())
    }

    fn render(&mut self, alpha: f64) -> Result<()> {
        (self.render)(alpha);
        Ok(())
    }
}

impl<H: LoopHandler + ?Sized> LoopHandler for &mut H {
    fn process_input(&mut self) -> Result<bool> {
        (**self).process_input()
    }

    fn update(&mut self, dt: f64) -> Result<()> {
        (**self).update(dt)
    }

    fn render(&mut self, alpha: f64) -> Result<()> {
        (**self).render(alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_fn_handler_forwards_calls() {
        let calls = RefCell::new(Vec::new());
        let mut handler = FnHandler::new(
            || {
                calls.borrow_mut().push("input".to_string());
                true
            },
            |dt| calls.borrow_mut().push(format!("update {dt}")),
            |alpha| calls.borrow_mut().push(format!("render {alpha}")),
        );

        assert!(handler.process_input().unwrap());
        handler.update(0.5).unwrap();
        handler.render(0.25).unwrap();
        drop(handler);

        assert_eq!(
            calls.into_inner(),
            vec!["input", "update 0.5", "render 0.25"]
        );
    }
}
