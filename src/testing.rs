//! Virtual-time scheduler and recording fakes of the browser capabilities.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::platform::{
    IntersectionCallback, IntersectionEntry, IntersectionWatch, ObserverOptions, Rect,
    ScrollBehavior, ScrollContainer, Subscription, Viewport,
};
use crate::schedule::{Scheduled, Scheduler};

struct QueuedTask {
    due: f64,
    id: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: f64,
    next_id: u64,
    queue: Vec<QueuedTask>,
}

/// Scheduler driven by [`ManualScheduler::advance`] instead of wall time.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward, running every task that comes due on the way.
    pub fn advance(&self, ms: u32) {
        let target = self.clock.borrow().now + f64::from(ms);
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let position = clock
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, queued)| queued.due <= target)
                    .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
                    .map(|(position, _)| position);
                position.map(|position| {
                    let queued = clock.queue.remove(position);
                    clock.now = queued.due;
                    queued.task
                })
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().queue.len()
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.clock.borrow().now
    }

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Scheduled {
        let (fired, task) = Scheduled::track(task);
        let id = {
            let mut clock = self.clock.borrow_mut();
            let id = clock.next_id;
            clock.next_id += 1;
            let due = clock.now + f64::from(delay_ms);
            clock.queue.push(QueuedTask {
                due,
                id,
                task: Box::new(task),
            });
            id
        };
        let clock = Rc::downgrade(&self.clock);
        Scheduled::new(fired, move || {
            if let Some(clock) = clock.upgrade() {
                clock.borrow_mut().queue.retain(|queued| queued.id != id);
            }
        })
    }
}

/// Listener bookkeeping shared by the fakes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub observers_created: usize,
    pub observed: usize,
    pub unobserved: usize,
    pub disconnected: usize,
    pub subscribed: usize,
    pub unsubscribed: usize,
}

type Handlers<T> = RefCell<Vec<(u64, Rc<T>)>>;

fn add_handler<T: ?Sized>(handlers: &Handlers<T>, next_id: &Cell<u64>, handler: Rc<T>) -> u64 {
    let id = next_id.get();
    next_id.set(id + 1);
    handlers.borrow_mut().push((id, handler));
    id
}

fn snapshot<T: ?Sized>(handlers: &Handlers<T>) -> Vec<Rc<T>> {
    handlers.borrow().iter().map(|(_, handler)| handler.clone()).collect()
}

pub struct FakeObserverRecord {
    pub options: ObserverOptions,
    pub targets: Vec<u32>,
    pub connected: bool,
    callback: Rc<RefCell<IntersectionCallback>>,
}

struct ViewportState {
    counts: RefCell<Counts>,
    next_id: Cell<u64>,
    supports_intersection: Cell<bool>,
    scroll_y: Cell<f64>,
    inner_height: Cell<f64>,
    rects: RefCell<HashMap<u32, Rect>>,
    footer: Cell<Option<Rect>>,
    media_matches: Cell<bool>,
    observers: RefCell<Vec<FakeObserverRecord>>,
    navigation: Handlers<dyn Fn()>,
    keys: Handlers<dyn Fn(&str)>,
    page_scroll: Handlers<dyn Fn(f64)>,
    media: Handlers<dyn Fn(bool)>,
}

/// In-memory [`Viewport`] whose elements are plain ids.
#[derive(Clone)]
pub struct FakeViewport {
    state: Rc<ViewportState>,
}

impl Default for FakeViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeViewport {
    pub fn new() -> Self {
        Self {
            state: Rc::new(ViewportState {
                counts: RefCell::new(Counts::default()),
                next_id: Cell::new(0),
                supports_intersection: Cell::new(true),
                scroll_y: Cell::new(0.0),
                inner_height: Cell::new(800.0),
                rects: RefCell::new(HashMap::new()),
                footer: Cell::new(None),
                media_matches: Cell::new(false),
                observers: RefCell::new(Vec::new()),
                navigation: RefCell::new(Vec::new()),
                keys: RefCell::new(Vec::new()),
                page_scroll: RefCell::new(Vec::new()),
                media: RefCell::new(Vec::new()),
            }),
        }
    }

    /// A viewport without `IntersectionObserver`, as during server rendering.
    pub fn without_intersection() -> Self {
        let viewport = Self::new();
        viewport.state.supports_intersection.set(false);
        viewport
    }

    pub fn counts(&self) -> Counts {
        *self.state.counts.borrow()
    }

    pub fn observer_count(&self) -> usize {
        self.state.observers.borrow().len()
    }

    pub fn with_observer<R>(&self, index: usize, f: impl FnOnce(&FakeObserverRecord) -> R) -> R {
        f(&self.state.observers.borrow()[index])
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.state.scroll_y.set(y);
    }

    pub fn set_rect(&self, element: u32, rect: Rect) {
        self.state.rects.borrow_mut().insert(element, rect);
    }

    pub fn set_footer(&self, rect: Option<Rect>) {
        self.state.footer.set(rect);
    }

    pub fn set_media_matches(&self, matches: bool) {
        self.state.media_matches.set(matches);
        for handler in snapshot(&self.state.media) {
            handler(matches);
        }
    }

    /// Delivers a batch of entries to the observer created `index`-th.
    pub fn intersect(&self, index: usize, entries: Vec<IntersectionEntry>) {
        let callback = {
            let observers = self.state.observers.borrow();
            let record = &observers[index];
            if !record.connected {
                return;
            }
            record.callback.clone()
        };
        let mut callback = callback.borrow_mut();
        (&mut *callback)(entries);
    }

    pub fn navigate(&self) {
        for handler in snapshot(&self.state.navigation) {
            handler();
        }
    }

    pub fn press(&self, key: &str) {
        for handler in snapshot(&self.state.keys) {
            handler(key);
        }
    }

    pub fn scroll_page(&self, y: f64) {
        self.state.scroll_y.set(y);
        for handler in snapshot(&self.state.page_scroll) {
            handler(y);
        }
    }

    fn subscribe<T: ?Sized + 'static>(
        &self,
        select: fn(&ViewportState) -> &Handlers<T>,
        handler: Rc<T>,
    ) -> Subscription {
        let id = add_handler(select(&self.state), &self.state.next_id, handler);
        self.state.counts.borrow_mut().subscribed += 1;
        let state = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                select(&state).borrow_mut().retain(|(existing, _)| *existing != id);
                state.counts.borrow_mut().unsubscribed += 1;
            }
        })
    }
}

struct FakeObserver {
    state: Weak<ViewportState>,
    index: usize,
}

impl FakeObserver {
    fn with_record(&self, f: impl FnOnce(&mut FakeObserverRecord, &mut Counts)) {
        if let Some(state) = self.state.upgrade() {
            let mut observers = state.observers.borrow_mut();
            f(&mut observers[self.index], &mut state.counts.borrow_mut());
        }
    }
}

impl IntersectionWatch<u32> for FakeObserver {
    fn observe(&mut self, target: &u32) {
        self.with_record(|record, counts| {
            record.targets.push(*target);
            counts.observed += 1;
        });
    }

    fn unobserve(&mut self, target: &u32) {
        self.with_record(|record, counts| {
            record.targets.retain(|existing| existing != target);
            counts.unobserved += 1;
        });
    }

    fn disconnect(&mut self) {
        self.with_record(|record, counts| {
            record.targets.clear();
            record.connected = false;
            counts.disconnected += 1;
        });
    }
}

impl Viewport for FakeViewport {
    type Element = u32;

    fn intersection_observer(
        &self,
        options: ObserverOptions,
        callback: IntersectionCallback,
    ) -> Option<Box<dyn IntersectionWatch<u32>>> {
        if !self.state.supports_intersection.get() {
            return None;
        }
        let mut observers = self.state.observers.borrow_mut();
        observers.push(FakeObserverRecord {
            options,
            targets: Vec::new(),
            connected: true,
            callback: Rc::new(RefCell::new(callback)),
        });
        self.state.counts.borrow_mut().observers_created += 1;
        Some(Box::new(FakeObserver {
            state: Rc::downgrade(&self.state),
            index: observers.len() - 1,
        }))
    }

    fn scroll_y(&self) -> f64 {
        self.state.scroll_y.get()
    }

    fn inner_height(&self) -> f64 {
        self.state.inner_height.get()
    }

    fn bounding_rect(&self, element: &u32) -> Option<Rect> {
        self.state.rects.borrow().get(element).copied()
    }

    fn footer_rect(&self) -> Option<Rect> {
        self.state.footer.get()
    }

    fn on_navigation(&self, handler: Box<dyn Fn()>) -> Option<Subscription> {
        Some(self.subscribe(|state| &state.navigation, Rc::from(handler)))
    }

    fn on_key_down(&self, handler: Box<dyn Fn(&str)>) -> Option<Subscription> {
        Some(self.subscribe(|state| &state.keys, Rc::from(handler)))
    }

    fn on_page_scroll(&self, handler: Box<dyn Fn(f64)>) -> Option<Subscription> {
        Some(self.subscribe(|state| &state.page_scroll, Rc::from(handler)))
    }

    fn match_media(&self, _query: &str, handler: Box<dyn Fn(bool)>) -> Option<(bool, Subscription)> {
        let subscription = self.subscribe(|state| &state.media, Rc::from(handler));
        Some((self.state.media_matches.get(), subscription))
    }
}

struct ContainerState {
    width: Cell<Option<f64>>,
    scrolls: RefCell<Vec<(f64, ScrollBehavior)>>,
    focused: Cell<usize>,
    counts: RefCell<Counts>,
    next_id: Cell<u64>,
    scroll: Handlers<dyn Fn(f64)>,
    resize: Handlers<dyn Fn(f64)>,
}

/// [`ScrollContainer`] recording every command it receives.
#[derive(Clone)]
pub struct FakeContainer {
    state: Rc<ContainerState>,
}

impl FakeContainer {
    pub fn with_width(width: f64) -> Self {
        let container = Self::detached();
        container.state.width.set(Some(width));
        container
    }

    /// A container whose element is not in the document.
    pub fn detached() -> Self {
        Self {
            state: Rc::new(ContainerState {
                width: Cell::new(None),
                scrolls: RefCell::new(Vec::new()),
                focused: Cell::new(0),
                counts: RefCell::new(Counts::default()),
                next_id: Cell::new(0),
                scroll: RefCell::new(Vec::new()),
                resize: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn scrolls(&self) -> Vec<(f64, ScrollBehavior)> {
        self.state.scrolls.borrow().clone()
    }

    pub fn focus_count(&self) -> usize {
        self.state.focused.get()
    }

    pub fn counts(&self) -> Counts {
        *self.state.counts.borrow()
    }

    pub fn user_scroll(&self, offset: f64) {
        for handler in snapshot(&self.state.scroll) {
            handler(offset);
        }
    }

    pub fn resize(&self, width: f64) {
        self.state.width.set(Some(width));
        for handler in snapshot(&self.state.resize) {
            handler(width);
        }
    }

    fn subscribe(
        &self,
        select: fn(&ContainerState) -> &Handlers<dyn Fn(f64)>,
        handler: Box<dyn Fn(f64)>,
    ) -> Option<Subscription> {
        self.state.width.get()?;
        let id = add_handler(select(&self.state), &self.state.next_id, Rc::from(handler));
        self.state.counts.borrow_mut().subscribed += 1;
        let state = Rc::downgrade(&self.state);
        Some(Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                select(&state).borrow_mut().retain(|(existing, _)| *existing != id);
                state.counts.borrow_mut().unsubscribed += 1;
            }
        }))
    }
}

impl ScrollContainer for FakeContainer {
    fn client_width(&self) -> Option<f64> {
        self.state.width.get()
    }

    fn scroll_to(&self, left: f64, behavior: ScrollBehavior) {
        if self.state.width.get().is_some() {
            self.state.scrolls.borrow_mut().push((left, behavior));
        }
    }

    fn focus(&self) {
        if self.state.width.get().is_some() {
            self.state.focused.set(self.state.focused.get() + 1);
        }
    }

    fn on_scroll(&self, handler: Box<dyn Fn(f64)>) -> Option<Subscription> {
        self.subscribe(|state| &state.scroll, handler)
    }

    fn on_resize(&self, handler: Box<dyn Fn(f64)>) -> Option<Subscription> {
        self.subscribe(|state| &state.resize, handler)
    }
}
