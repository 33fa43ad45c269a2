use std::cell::{Cell, RefCell};
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ZeroSizedType;

#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<RefCell<usize>>);

impl CountedDrop {
    pub fn new(value: usize) -> CountedDrop {
        CountedDrop(Rc::new(RefCell::new(value)))
    }
}

impl Deref for CountedDrop {
    type Target = Rc<RefCell<usize>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CountedDrop {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.replace_with(|v| *v + 1);
    }
}

/// A shared countdown. Each [`tick`](Fuse::tick) consumes one unit of the budget and panics once
/// the budget is exhausted.
#[derive(Debug, Clone)]
pub struct Fuse(Rc<Cell<usize>>);

impl Fuse {
    pub fn new(budget: usize) -> Fuse {
        Fuse(Rc::new(Cell::new(budget)))
    }

    pub fn unlimited() -> Fuse {
        Fuse::new(usize::MAX)
    }

    pub fn set(&self, budget: usize) {
        self.0.set(budget);
    }

    pub fn tick(&self) {
        let left = self.0.get();
        if left == 0 {
            panic!("fuse blown");
        }
        self.0.set(left - 1);
    }
}

/// Counts how many [`Fragile`] values are currently alive.
#[derive(Debug, Clone, Default)]
pub struct LiveCount(Rc<Cell<usize>>);

impl LiveCount {
    pub fn new() -> LiveCount {
        LiveCount::default()
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

/// An element whose clone ticks a [`Fuse`] before doing anything else, so that cloning panics
/// after a chosen number of successful clones. Every live instance is tracked by a [`LiveCount`].
#[derive(Debug)]
pub struct Fragile {
    pub value: usize,
    fuse: Fuse,
    live: LiveCount,
}

impl Fragile {
    pub fn new(value: usize, fuse: &Fuse, live: &LiveCount) -> Fragile {
        live.0.set(live.0.get() + 1);
        Fragile {
            value,
            fuse: fuse.clone(),
            live: live.clone(),
        }
    }
}

impl Clone for Fragile {
    fn clone(&self) -> Self {
        self.fuse.tick();
        Fragile::new(self.value, &self.fuse, &self.live)
    }

    fn clone_from(&mut self, source: &Self) {
        self.fuse.tick();
        self.value = source.value;
    }
}

impl PartialEq for Fragile {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Fragile {
    fn drop(&mut self) {
        self.live.0.set(self.live.0.get() - 1);
    }
}

thread_local! {
    static DEFAULT_BUDGET: Cell<usize> = const { Cell::new(usize::MAX) };
}

/// An element whose [`Default`] implementation panics once the current thread's budget runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragileDefault(pub usize);

impl FragileDefault {
    pub fn set_budget(budget: usize) {
        DEFAULT_BUDGET.with(|b| b.set(budget));
    }
}

impl Default for FragileDefault {
    fn default() -> Self {
        DEFAULT_BUDGET.with(|b| {
            let left = b.get();
            if left == 0 {
                panic!("default construction failed");
            }
            b.set(left - 1);
        });
        FragileDefault(0)
    }
}
