pub mod contribution_map;
pub mod split;

pub use contribution_map::ContributionMap;
pub use split::*;
