use blik_studio::{
    content::PROCESS_STEPS,
    hscroll::{HorizontalScroller, TrackMetrics, SNAP_IDLE},
    motion::MotionPreference,
};
use gloo::{
    events::{EventListener, EventListenerOptions},
    render::{request_animation_frame, AnimationFrame},
    timers::callback::Timeout,
};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};
use web_sys::{window, HtmlElement};
use yew::prelude::*;

use super::{locale::I18n, viewport_size};

const FIRST_FRAME_SECONDS: f64 = 1.0 / 60.0;
const MIN_SCROLL_CORRECTION: f64 = 0.5;

/// Connects a [`HorizontalScroller`] to the window: scroll and resize
/// listeners feed it, animation frames paint the track, and an idle timer
/// settles on the nearest card.
struct ScrollDriver {
    wrapper: NodeRef,
    section: NodeRef,
    track: NodeRef,
    scroller: RefCell<Option<HorizontalScroller>>,
    listeners: RefCell<Vec<EventListener>>,
    frame: RefCell<Option<AnimationFrame>>,
    snap_timer: RefCell<Option<Timeout>>,
    last_timestamp: Cell<Option<f64>>,
}

impl ScrollDriver {
    fn new(wrapper: NodeRef, section: NodeRef, track: NodeRef) -> Self {
        Self {
            wrapper,
            section,
            track,
            scroller: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            frame: RefCell::new(None),
            snap_timer: RefCell::new(None),
            last_timestamp: Cell::new(None),
        }
    }

    fn measure(&self) -> Option<TrackMetrics> {
        let track = self.track.cast::<HtmlElement>()?;
        let (viewport_width, viewport_height) = viewport_size();
        Some(TrackMetrics {
            track_width: f64::from(track.scroll_width()),
            viewport_width,
            viewport_height,
            card_count: track.child_element_count() as usize,
        })
    }

    fn attach(self: &Rc<Self>) {
        let Some(metrics) = self.measure() else {
            tracing::warn!("process track missing; horizontal scroll disabled");
            return;
        };
        let scroller = HorizontalScroller::new(metrics);
        self.set_wrapper_height(scroller.pin_extent());
        self.set_sticky(true);
        *self.scroller.borrow_mut() = Some(scroller);

        let Some(window) = window() else {
            return;
        };
        let passive = EventListenerOptions::default();

        let on_scroll = {
            let driver = Rc::clone(self);
            EventListener::new_with_options(&window, "scroll", passive, move |_| driver.on_scroll())
        };
        let on_resize = {
            let driver = Rc::clone(self);
            EventListener::new_with_options(&window, "resize", passive, move |_| driver.on_resize())
        };
        self.listeners.borrow_mut().extend([on_scroll, on_resize]);

        self.on_scroll();
    }

    /// Tears everything down; later events are ignored by the scroller.
    fn detach(&self) {
        if let Some(scroller) = self.scroller.borrow_mut().as_mut() {
            scroller.detach();
        }
        self.listeners.borrow_mut().clear();
        self.frame.borrow_mut().take();
        self.snap_timer.borrow_mut().take();
        self.last_timestamp.set(None);
        self.set_sticky(false);
    }

    fn on_scroll(self: &Rc<Self>) {
        let Some(wrapper) = self.wrapper.cast::<HtmlElement>() else {
            return;
        };
        let rect = wrapper.get_bounding_client_rect();
        let (pinned, offset) = {
            let mut scroller = self.scroller.borrow_mut();
            let Some(scroller) = scroller.as_mut() else {
                return;
            };
            let update = scroller.on_scroll(rect.top(), rect.bottom());
            (update.pinned, scroller.track_offset())
        };

        if pinned {
            self.ensure_frame();
            self.schedule_snap();
        } else {
            self.frame.borrow_mut().take();
            self.last_timestamp.set(None);
            self.snap_timer.borrow_mut().take();
            self.paint(offset);
        }
    }

    fn on_resize(self: &Rc<Self>) {
        let Some(metrics) = self.measure() else {
            return;
        };
        let (correction, extent, offset) = {
            let mut scroller = self.scroller.borrow_mut();
            let Some(scroller) = scroller.as_mut() else {
                return;
            };
            let correction = scroller.resize(metrics);
            (correction, scroller.pin_extent(), scroller.track_offset())
        };

        self.set_wrapper_height(extent);
        self.paint(offset);
        if correction.abs() >= MIN_SCROLL_CORRECTION {
            scroll_window_by(correction);
        }
    }

    fn schedule_snap(self: &Rc<Self>) {
        let driver = Rc::clone(self);
        let delay = u32::try_from(SNAP_IDLE.as_millis()).unwrap_or(u32::MAX);
        // Replacing the handle cancels the previous countdown.
        *self.snap_timer.borrow_mut() = Some(Timeout::new(delay, move || driver.snap()));
    }

    fn snap(&self) {
        let correction = self
            .scroller
            .borrow()
            .as_ref()
            .and_then(HorizontalScroller::snap_correction);
        if let Some(correction) = correction {
            tracing::debug!(correction, "snapping process track to card");
            scroll_window_by(correction);
        }
    }

    fn ensure_frame(self: &Rc<Self>) {
        let settled = self
            .scroller
            .borrow()
            .as_ref()
            .map_or(true, HorizontalScroller::is_settled);
        if settled || self.frame.borrow().is_some() {
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

        let (offset, settled) = {
            let mut scroller = self.scroller.borrow_mut();
            let Some(scroller) = scroller.as_mut() else {
                return;
            };
            (scroller.tick(dt), scroller.is_settled())
        };
        self.paint(offset);

        if settled {
            self.last_timestamp.set(None);
        } else {
            self.ensure_frame();
        }
    }

    fn paint(&self, offset: f64) {
        if let Some(track) = self.track.cast::<HtmlElement>() {
            let _ = track
                .style()
                .set_property("transform", &format!("translate3d({offset:.2}px, 0, 0)"));
        }
    }

    fn set_wrapper_height(&self, extent: f64) {
        if let Some(wrapper) = self.wrapper.cast::<HtmlElement>() {
            let _ = wrapper.style().set_property("height", &format!("{extent:.0}px"));
        }
    }

    fn set_sticky(&self, sticky: bool) {
        let Some(section) = self.section.cast::<HtmlElement>() else {
            return;
        };
        let style = section.style();
        if sticky {
            let _ = style.set_property("position", "sticky");
            let _ = style.set_property("top", "0");
        } else {
            let _ = style.remove_property("position");
            let _ = style.remove_property("top");
        }
    }
}

fn scroll_window_by(delta_y: f64) {
    if let Some(window) = window() {
        window.scroll_by_with_x_and_y(0.0, delta_y);
    }
}

#[derive(Properties, PartialEq)]
pub(super) struct ProcessProps {
    pub i18n: I18n,
    pub motion: MotionPreference,
}

#[function_component(Process)]
pub(super) fn process(props: &ProcessProps) -> Html {
    let wrapper = use_node_ref();
    let section = use_node_ref();
    let track = use_node_ref();

    {
        let wrapper = wrapper.clone();
        let section = section.clone();
        let track = track.clone();
        use_effect_with(props.motion, move |motion| {
            let driver = Rc::new(ScrollDriver::new(wrapper, section, track));
            if !motion.is_reduced() {
                driver.attach();
            }
            move || driver.detach()
        });
    }

    let i18n = &props.i18n;
    let cards = PROCESS_STEPS.iter().map(|step| {
        html! {
            <article key={step.key} class="process-card">
                <img class="process-card-image" src={step.image} alt="" loading="lazy" />
                <span class="process-card-number">{step.number}</span>
                <h3>{step.title_in(i18n.store())}</h3>
                <p>{step.description_in(i18n.store())}</p>
            </article>
        }
    });

    let heading = html! {
        <header class="process-heading">
            <span class="section-label">{i18n.t("process.label", "How we work")}</span>
            <h2>{i18n.t("process.title", "From first call to launch")}</h2>
            <p>{i18n.t("process.description", "Four steps, one clear plan, no surprises along the way.")}</p>
        </header>
    };

    if props.motion.is_reduced() {
        return html! {
            <section id="process" class="process is-static">
                {heading}
                <div class="process-row">
                    { for cards }
                </div>
            </section>
        };
    }

    html! {
        <div ref={wrapper} class="process-pin">
            <section ref={section} id="process" class="process is-pinned">
                {heading}
                <div ref={track} class="process-track">
                    { for cards }
                </div>
            </section>
        </div>
    }
}
