use blik_studio::{
    motion::Vec2,
    pointer::{PointerFollow, Rect},
};
use gloo::render::{request_animation_frame, AnimationFrame};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};
use web_sys::{Element, HtmlElement};
use yew::NodeRef;

const FIRST_FRAME_SECONDS: f64 = 1.0 / 60.0;

/// Writes the current spring offset onto the followed element.
pub(super) type ApplyOffset = Box<dyn Fn(&HtmlElement, Vec2)>;

/// Runs a [`PointerFollow`] on animation frames and paints the result
/// straight onto the DOM node, bypassing re-renders.
pub(super) struct FollowDriver {
    node: NodeRef,
    follow: RefCell<PointerFollow>,
    frame: RefCell<Option<AnimationFrame>>,
    last_timestamp: Cell<Option<f64>>,
    apply: ApplyOffset,
}

impl FollowDriver {
    pub(super) fn new(node: NodeRef, follow: PointerFollow, apply: ApplyOffset) -> Self {
        Self {
            node,
            follow: RefCell::new(follow),
            frame: RefCell::new(None),
            last_timestamp: Cell::new(None),
            apply,
        }
    }

    pub(super) fn is_enabled(&self) -> bool {
        self.follow.borrow().is_enabled()
    }

    pub(super) fn pointer_move(self: &Rc<Self>, client_x: i32, client_y: i32, bounds: Rect) {
        let pointer = Vec2::new(f64::from(client_x), f64::from(client_y));
        self.follow.borrow_mut().pointer_move(pointer, bounds);
        self.ensure_frame();
    }

    pub(super) fn pointer_leave(self: &Rc<Self>) {
        self.follow.borrow_mut().pointer_leave();
        self.ensure_frame();
    }

    /// Drops any pending frame. Also breaks the frame closure's hold on
    /// the driver.
    pub(super) fn stop(&self) {
        self.frame.borrow_mut().take();
        self.last_timestamp.set(None);
    }

    fn ensure_frame(self: &Rc<Self>) {
        if self.frame.borrow().is_some() || !self.follow.borrow().needs_frame() {
            return;
        }
        let driver = Rc::clone(self);
        let handle = request_animation_frame(move |timestamp| driver.on_frame(timestamp));
        *self.frame.borrow_mut() = Some(handle);
    }

    fn on_frame(self: &Rc<Self>, timestamp: f64) {
        self.frame.borrow_mut().take();
        let dt = match self.last_timestamp.replace(Some(timestamp)) {
            Some(previous) => ((timestamp - previous) / 1000.0).max(0.0),
            None => FIRST_FRAME_SECONDS,
        };

        let offset = self.follow.borrow_mut().tick(dt);
        if let Some(element) = self.node.cast::<HtmlElement>() {
            (self.apply)(&element, offset);
        }

        if self.follow.borrow().needs_frame() {
            self.ensure_frame();
        } else {
            self.last_timestamp.set(None);
        }
    }
}

pub(super) fn bounds_of(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub(super) fn set_transform(element: &HtmlElement, offset: Vec2) {
    let _ = element.style().set_property(
        "transform",
        &format!("translate3d({:.2}px, {:.2}px, 0)", offset.x, offset.y),
    );
}
