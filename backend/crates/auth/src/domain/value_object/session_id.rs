use kernel::id::Id;

pub struct RefreshSessionMarker;
pub type RefreshSessionId = Id<RefreshSessionMarker>;
