pub mod channel;
pub mod segment;
pub mod table;
pub mod window;

pub use channel::{select_channel, ACCEPTED_CHANNEL_TYPES};
pub use segment::{extract_segment, Segment, SegmentInfo};
pub use table::{align_streams, AlignedTable, Alignment, StreamRole, TruncationNotice};
pub use window::TimeWindow;
