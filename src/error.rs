use thiserror::Error;

use crate::block::BlockType;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot remove the last admin user")]
    LastAdmin,

    #[error("user not found: {id}")]
    UserNotFound { id: String },

    #[error("block index {index} is out of range for {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("block {block_id} holds {expected} content, got {actual}")]
    BlockTypeMismatch {
        block_id: String,
        expected: BlockType,
        actual: BlockType,
    },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
