use slotmap::new_key_type;

new_key_type! {
    /// Generational handle to a node in a [`Scene`](crate::core::scene::Scene).
    ///
    /// Handles never keep a node alive. Once the node is removed the handle goes
    /// stale and every lookup through it returns `None`.
    pub struct NodeId;
}

/// Handle to a running action inside an [`ActionRunner`](crate::extensions::action::ActionRunner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(pub u32);
