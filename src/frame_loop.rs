use gloo_render::{request_animation_frame, AnimationFrame};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;
type FrameTick = Rc<RefCell<dyn FnMut(f64) -> FrameControl>>;

/// Calls `tick` once per animation frame until it returns `Stop` or the loop is dropped.
pub struct FrameLoop {
    slot: FrameSlot,
}

impl FrameLoop {
    pub fn start(tick: impl FnMut(f64) -> FrameControl + 'static) -> Self {
        let slot: FrameSlot = Rc::new(RefCell::new(None));
        let tick: FrameTick = Rc::new(RefCell::new(tick));
        schedule(Rc::downgrade(&slot), tick);
        Self { slot }
    }
}

fn schedule(slot: Weak<RefCell<Option<AnimationFrame>>>, tick: FrameTick) {
    let Some(strong) = slot.upgrade() else {
        return;
    };

    let next = slot.clone();
    let handle = request_animation_frame(move |timestamp| {
        let Some(strong) = next.upgrade() else {
            return;
        };
        let _fired = strong.borrow_mut().take();

        let control = {
            let mut tick_fn = tick.borrow_mut();
            (*tick_fn)(timestamp)
        };
        if control == FrameControl::Continue {
            schedule(next, tick);
        }
    });
    *strong.borrow_mut() = Some(handle);
}
