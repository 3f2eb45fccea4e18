pub mod bounds;
pub mod path;
pub mod paths;
pub mod point;
pub mod poly_tree;

pub use bounds::Bounds;
pub use path::Path;
pub use paths::Paths;
pub use point::Point;
pub use poly_tree::{PolyNode, PolyNodeId, PolyTree};
