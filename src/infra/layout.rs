use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::domain::{AnchorRef, Point, Recipient, ViewportSize};

/// Откуда планировщик узнаёт, где на экране сидит игрок.
///
/// В браузере это замер DOM-элемента якоря (центр его bounding box).
/// Опрашивается один раз на активацию, а не на каждый кадр.
pub trait LayoutProvider {
    /// Центр якоря получателя или `None`, если якорь не найден.
    fn anchor_center(&self, recipient: &Recipient) -> Option<Point>;
}

/// Любая функция `&Recipient -> Option<Point>` тоже годится как layout.
impl<F> LayoutProvider for F
where
    F: Fn(&Recipient) -> Option<Point>,
{
    fn anchor_center(&self, recipient: &Recipient) -> Option<Point> {
        self(recipient)
    }
}

/// Размер вьюпорта – из него берётся центр стола.
pub trait ViewportProvider {
    fn viewport(&self) -> ViewportSize;
}

/// Простая in-memory раскладка для тестов и локального запуска.
///
/// Клоны делят одну карту якорей, поэтому места можно двигать
/// между активациями, уже отдав раскладку планировщику.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLayout {
    anchors: Rc<RefCell<HashMap<AnchorRef, Point>>>,
}

impl InMemoryLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Поставить (или передвинуть) якорь.
    pub fn place(&self, anchor: &AnchorRef, at: Point) {
        self.anchors.borrow_mut().insert(anchor.clone(), at);
    }

    /// Убрать якорь – например, место ушло со стола.
    pub fn remove(&self, anchor: &AnchorRef) -> Option<Point> {
        self.anchors.borrow_mut().remove(anchor)
    }

    pub fn len(&self) -> usize {
        self.anchors.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.borrow().is_empty()
    }
}

impl LayoutProvider for InMemoryLayout {
    fn anchor_center(&self, recipient: &Recipient) -> Option<Point> {
        self.anchors.borrow().get(&recipient.anchor).copied()
    }
}

/// Вьюпорт с размером, который можно поменять "ресайзом".
#[derive(Clone, Debug, Default)]
pub struct FixedViewport {
    size: Rc<Cell<ViewportSize>>,
}

impl FixedViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Rc::new(Cell::new(ViewportSize::new(width, height))),
        }
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.size.set(ViewportSize::new(width, height));
    }
}

impl ViewportProvider for FixedViewport {
    fn viewport(&self) -> ViewportSize {
        self.size.get()
    }
}
