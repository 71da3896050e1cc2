//! Enter/exit callbacks.

use esc_core::LaneId;

/// Callbacks invoked synchronously by the escalator.
///
/// Both methods default to no-ops so implementors only override what they
/// care about.  A panic inside a hook propagates out of the call that
/// triggered it.
pub trait EscalatorHooks<P> {
    /// Called after `occupant` has been placed in cell 0 of `lane`.  The
    /// admission has already committed.
    fn on_enter(&mut self, _lane: LaneId, _occupant: &P) {}

    /// Called once when `occupant` leaves the top of `lane`.  Ownership
    /// passes to the hook; the escalator never sees the occupant again.
    fn on_exit(&mut self, _lane: LaneId, _occupant: P) {}
}

/// Hooks that do nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl<P> EscalatorHooks<P> for NoopHooks {}

impl<P, H: EscalatorHooks<P> + ?Sized> EscalatorHooks<P> for &mut H {
    #[inline]
    fn on_enter(&mut self, lane: LaneId, occupant: &P) {
        (**self).on_enter(lane, occupant);
    }

    #[inline]
    fn on_exit(&mut self, lane: LaneId, occupant: P) {
        (**self).on_exit(lane, occupant);
    }
}

type EnterFn<P> = Box<dyn FnMut(LaneId, &P)>;
type ExitFn<P> = Box<dyn FnMut(LaneId, P)>;

/// Hooks built from two optional closures.
///
/// ```rust,ignore
/// let hooks = Callbacks::new()
///     .on_exit(|lane, p: Person| println!("{} left {lane}", p.id));
/// let esc = Escalator::new(&config, hooks)?;
/// ```
pub struct Callbacks<P> {
    enter: Option<EnterFn<P>>,
    exit:  Option<ExitFn<P>>,
}

impl<P> Callbacks<P> {
    pub fn new() -> Self {
        Self { enter: None, exit: None }
    }

    pub fn on_enter(mut self, f: impl FnMut(LaneId, &P) + 'static) -> Self {
        self.enter = Some(Box::new(f));
        self
    }

    pub fn on_exit(mut self, f: impl FnMut(LaneId, P) + 'static) -> Self {
        self.exit = Some(Box::new(f));
        self
    }
}

impl<P> Default for Callbacks<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> EscalatorHooks<P> for Callbacks<P> {
    fn on_enter(&mut self, lane: LaneId, occupant: &P) {
        if let Some(f) = self.enter.as_mut() {
            f(lane, occupant);
        }
    }

    fn on_exit(&mut self, lane: LaneId, occupant: P) {
        if let Some(f) = self.exit.as_mut() {
            f(lane, occupant);
        }
    }
}
