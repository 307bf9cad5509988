pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod remote;

/// Length of a full object id in hex characters.
pub const OBJECT_ID_LENGTH: usize = 40;
