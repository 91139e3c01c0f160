use alloc::vec::Vec;

use crate::key::OwnerMap;
use crate::options::{FRAME_ROOT_MARGIN_PX, OVERFLOW_CACHE_TTL_MS, OVERFLOW_MARGIN_PX};
use crate::{Dom, NodeKey, ScrollOwner};

/// Resolves the element that scrolls for a given target, caching answers per node.
///
/// Answers are cached for every node visited during a walk. The whole cache is wiped once
/// [`OVERFLOW_CACHE_TTL_MS`] has passed since the previous wipe, so layout changes are picked
/// up eventually.
#[derive(Clone, Debug)]
pub struct OverflowCache<N> {
    map: OwnerMap<N>,
    last_clear_ms: Option<u64>,
}

impl<N: NodeKey> OverflowCache<N> {
    pub fn new() -> Self {
        Self {
            map: OwnerMap::<N>::new(),
            last_clear_ms: None,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, node: &N) -> Option<&ScrollOwner<N>> {
        self.map.get(node)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Wipes the cache if the TTL has elapsed. Returns `true` when a wipe happened.
    ///
    /// The first call only starts the clock.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        match self.last_clear_ms {
            None => {
                self.last_clear_ms = Some(now_ms);
                false
            }
            Some(last) if now_ms.saturating_sub(last) >= OVERFLOW_CACHE_TTL_MS => {
                ssdebug!(entries = self.map.len(), "overflow cache wiped");
                self.map.clear();
                self.last_clear_ms = Some(now_ms);
                true
            }
            Some(_) => false,
        }
    }

    fn fill(&mut self, visited: Vec<N>, owner: &ScrollOwner<N>) {
        for node in visited {
            self.map.insert(node, owner.clone());
        }
    }

    /// Finds the nearest ancestor of `start` (inclusive) that scrolls its content.
    ///
    /// Returns `None` when no ancestor qualifies; the caller should leave the input to native
    /// scrolling.
    pub fn resolve<D>(&mut self, dom: &D, start: &N, now_ms: u64) -> Option<ScrollOwner<N>>
    where
        D: Dom<Node = N> + ?Sized,
    {
        self.expire(now_ms);

        let root = dom.root();
        let mut root_scroll_height: Option<f64> = None;
        let mut visited: Vec<N> = Vec::new();
        let mut cur = Some(start.clone());

        while let Some(node) = cur {
            if let Some(owner) = self.map.get(&node).cloned() {
                self.fill(visited, &owner);
                return Some(owner);
            }
            visited.push(node.clone());

            let root_sh = *root_scroll_height.get_or_insert_with(|| dom.scroll_height(&root));
            let sh = dom.scroll_height(&node);
            if sh == root_sh {
                // A frame whose root barely overflows is not treated as the scroller.
                if !dom.is_frame() || dom.client_height(&root) + FRAME_ROOT_MARGIN_PX < root_sh {
                    let owner = ScrollOwner::Root;
                    self.fill(visited, &owner);
                    return Some(owner);
                }
            } else if dom.client_height(&node) + OVERFLOW_MARGIN_PX < sh
                && dom.overflow_y(&node).can_scroll()
            {
                let owner = ScrollOwner::Element(node.clone());
                self.fill(visited, &owner);
                return Some(owner);
            }

            cur = dom.parent(&node);
        }

        sstrace!(visited = visited.len(), "no overflowing ancestor");
        None
    }
}

impl<N: NodeKey> Default for OverflowCache<N> {
    fn default() -> Self {
        Self::new()
    }
}
