#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::ScrollOwner;

#[cfg(feature = "std")]
pub(crate) type OwnerMap<N> = HashMap<N, ScrollOwner<N>>;
#[cfg(not(feature = "std"))]
pub(crate) type OwnerMap<N> = BTreeMap<N, ScrollOwner<N>>;

/// Bound for node handles used as overflow cache keys.
#[cfg(feature = "std")]
pub trait NodeKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<N: core::hash::Hash + Eq + Clone> NodeKey for N {}

/// Bound for node handles used as overflow cache keys.
#[cfg(not(feature = "std"))]
pub trait NodeKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<N: Ord + Clone> NodeKey for N {}
