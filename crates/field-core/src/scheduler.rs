//! Frame scheduling port and the self-perpetuating render loop.
//!
//! The loop never drives itself: it asks a [`FrameScheduler`] to run the
//! next tick before the next repaint. The browser front-end backs this with
//! `requestAnimationFrame`; tests use [`ManualScheduler`] and step frames by
//! hand.

use crate::session::RenderSession;
use crate::simulation::TickStats;
use crate::surface::Surface;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

pub trait FrameScheduler {
    /// Run `frame` once, before the next repaint.
    fn request_frame(&self, frame: Box<dyn FnOnce()>);
}

/// Queue-backed scheduler; nothing runs until `step` is called.
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<VecDeque<Box<dyn FnOnce()>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run the oldest pending frame. Returns false when nothing was queued.
    pub fn step(&self) -> bool {
        let next = self.queue.borrow_mut().pop_front();
        match next {
            Some(frame) => {
                frame();
                true
            }
            None => false,
        }
    }

    /// Run up to `frames` frames; returns how many ran.
    pub fn run(&self, frames: usize) -> usize {
        (0..frames).take_while(|_| self.step()).count()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, frame: Box<dyn FnOnce()>) {
        self.queue.borrow_mut().push_back(frame);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Running,
}

type TickHook = Box<dyn FnMut(&RenderSession, TickStats)>;

struct LoopInner<S, F> {
    session: Rc<RefCell<RenderSession>>,
    surface: Rc<RefCell<S>>,
    scheduler: Rc<F>,
    state: Cell<LoopState>,
    skipped: Cell<u64>,
    hook: RefCell<Option<TickHook>>,
}

/// Render loop bound to one session, one surface and one scheduler.
///
/// Once started it reschedules itself unconditionally before every tick and
/// runs until the host tears the page down; there is no stop.
pub struct RenderLoop<S, F> {
    inner: Rc<LoopInner<S, F>>,
}

impl<S, F> RenderLoop<S, F>
where
    S: Surface + 'static,
    F: FrameScheduler + 'static,
{
    pub fn new(
        session: Rc<RefCell<RenderSession>>,
        surface: Rc<RefCell<S>>,
        scheduler: Rc<F>,
    ) -> Self {
        Self {
            inner: Rc::new(LoopInner {
                session,
                surface,
                scheduler,
                state: Cell::new(LoopState::Uninitialized),
                skipped: Cell::new(0),
                hook: RefCell::new(None),
            }),
        }
    }

    /// Called after every completed tick with the session and its stats.
    pub fn on_tick(&self, hook: impl FnMut(&RenderSession, TickStats) + 'static) {
        *self.inner.hook.borrow_mut() = Some(Box::new(hook));
    }

    /// Schedule the first tick. Calling it again is a no-op.
    pub fn start(&self) {
        if self.inner.state.get() == LoopState::Running {
            return;
        }
        self.inner.state.set(LoopState::Running);
        schedule(&self.inner);
    }

    pub fn state(&self) -> LoopState {
        self.inner.state.get()
    }

    pub fn session(&self) -> Rc<RefCell<RenderSession>> {
        Rc::clone(&self.inner.session)
    }

    /// Ticks dropped because the session or surface was already borrowed.
    pub fn skipped_ticks(&self) -> u64 {
        self.inner.skipped.get()
    }
}

fn schedule<S, F>(inner: &Rc<LoopInner<S, F>>)
where
    S: Surface + 'static,
    F: FrameScheduler + 'static,
{
    let next = Rc::clone(inner);
    inner.scheduler.request_frame(Box::new(move || {
        schedule(&next);
        next.run_tick();
    }));
}

impl<S: Surface + 'static, F> LoopInner<S, F> {
    // A tick that cannot get its state is skipped; the next one is already
    // scheduled either way.
    fn run_tick(&self) {
        let (Ok(mut session), Ok(mut surface)) =
            (self.session.try_borrow_mut(), self.surface.try_borrow_mut())
        else {
            self.skipped.set(self.skipped.get() + 1);
            log::warn!("[loop] state busy, skipping tick");
            return;
        };
        let stats = session.tick(&mut *surface);
        drop(surface);
        if let Ok(mut hook) = self.hook.try_borrow_mut() {
            if let Some(h) = hook.as_mut() {
                h(&*session, stats);
            }
        }
    }
}
