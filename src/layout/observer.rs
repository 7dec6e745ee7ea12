// Size-driven recomputation.
//
// The host pushes container sizes in from its resize observer; the session
// recomputes only when the size or the item set actually changed, then hands
// the new layout to every subscriber. Each call runs to completion, so the
// latest size always wins.

use tracing::debug;

use super::{layout_orbit, ContainerSize, LayoutConfig, OrbitItem, OrbitLayout};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&OrbitLayout)>;

pub struct OrbitSession {
    cfg: LayoutConfig,
    items: Vec<OrbitItem>,
    size: ContainerSize,
    layout: OrbitLayout,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl OrbitSession {
    /// Start with an unmeasured container; the layout uses the fallback extent
    /// until the first `resize`.
    pub fn new(cfg: LayoutConfig, items: Vec<OrbitItem>) -> Self {
        let size = ContainerSize::default();
        let layout = layout_orbit(&items, size, &cfg);
        Self { cfg, items, size, layout, listeners: Vec::new(), next_id: 0 }
    }

    pub fn layout(&self) -> &OrbitLayout {
        &self.layout
    }

    pub fn items(&self) -> &[OrbitItem] {
        &self.items
    }

    pub fn size(&self) -> ContainerSize {
        self.size
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.cfg
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&OrbitLayout) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Push a new container size. Returns true if the layout changed.
    pub fn resize(&mut self, size: ContainerSize) -> bool {
        if size == self.size {
            return false;
        }
        self.size = size;
        self.recompute()
    }

    /// Replace the item set. Returns true if the layout changed.
    pub fn set_items(&mut self, items: Vec<OrbitItem>) -> bool {
        if items == self.items {
            return false;
        }
        self.items = items;
        self.recompute()
    }

    /// Subscribers are only notified, and true only returned, on a change.
    fn recompute(&mut self) -> bool {
        let layout = layout_orbit(&self.items, self.size, &self.cfg);
        if layout == self.layout {
            debug!(width = self.size.width, height = self.size.height, "orbit layout unchanged");
            return false;
        }
        self.layout = layout;
        for (_, listener) in &mut self.listeners {
            listener(&self.layout);
        }
        true
    }
}

impl std::fmt::Debug for OrbitSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrbitSession")
            .field("items", &self.items.len())
            .field("size", &self.size)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
