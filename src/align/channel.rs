use super::table::AlignedTable;
use crate::error::{Result, SyncError};
use crate::trodes::{Column, ScalarType};
use tracing::info;

/// Sample types accepted as an audio-like voltage channel.
pub const ACCEPTED_CHANNEL_TYPES: [ScalarType; 3] =
    [ScalarType::Int16, ScalarType::Int32, ScalarType::Float32];

/// Pick the voltage channel: the first scalar column, in table order, whose
/// type is one of [`ACCEPTED_CHANNEL_TYPES`].
///
/// This is a first match, not a best match. A table holding two voltage
/// columns always yields the one declared first. Repeated (array) fields are
/// never selected.
pub fn select_channel(table: &AlignedTable) -> Result<&Column> {
    let column = table
        .columns()
        .iter()
        .find(|c| c.is_scalar() && ACCEPTED_CHANNEL_TYPES.contains(&c.scalar_type()))
        .ok_or_else(|| SyncError::ChannelNotFound {
            accepted: ACCEPTED_CHANNEL_TYPES
                .iter()
                .map(|t| t.token())
                .collect::<Vec<_>>()
                .join(", "),
        })?;

    info!("Selected channel `{}` ({})", column.name, column.scalar_type());
    Ok(column)
}
