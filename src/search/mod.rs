pub mod directory;
pub mod highlight;
pub mod matcher;

pub use directory::Directory;
pub use highlight::{highlight, Segment};
pub use matcher::{find_match_indices, find_matches, ResolvedCharacter, SearchQuery};
