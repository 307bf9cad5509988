use crate::areas::repository::Repository;
use crate::artifacts::abort::Abort;
use crate::artifacts::objects::remote::Remote;

pub mod add_remote;
pub mod fetch;
pub mod pull;
pub mod push;
pub mod rm_remote;

impl Repository {
    /// Load a remote record or abort with the user-facing error.
    pub(crate) fn open_remote(&self, name: &str) -> anyhow::Result<Remote> {
        self.load_remote(name)?
            .ok_or_else(|| Abort::RemoteMissing.into())
    }
}
