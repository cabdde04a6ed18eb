use eekv_byte_store::ByteStoreError;

/// Outcomes of store operations that did not succeed.
///
/// The first three are ordinary answers to an operator and are rendered as
/// a single line by the shell; only `Storage` means the device misbehaved.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("already exists")]
    AlreadyExists,

    #[error("not found")]
    NotFound,

    #[error("no space left")]
    NoSpace,

    #[error("address {addr:#06X} is outside the region")]
    OutOfRange { addr: usize },

    #[error("region of {region} bytes does not fit a device of {capacity} bytes")]
    RegionTooLarge { region: usize, capacity: usize },

    #[error("storage error: {0}")]
    Storage(#[from] ByteStoreError),
}
