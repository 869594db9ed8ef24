pub mod chooser;
pub mod enumerate;
pub mod lattice;
pub mod ranking;

pub use chooser::choose;
pub use enumerate::enumerate;
pub use lattice::{Edge, Lattice};
pub use ranking::{compare_tokenizations, kind_rank, score_tokenization, Score};
