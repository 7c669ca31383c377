mod resolve_heights;

pub use resolve_heights::{ResolveHeights, ResolvedHeights};
