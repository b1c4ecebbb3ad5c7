pub mod align_segment;
pub mod command;
pub mod inspect;

pub use align_segment::align_segment;
pub use command::{Cli, Command};
pub use inspect::inspect;
