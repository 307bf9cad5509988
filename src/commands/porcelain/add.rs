use crate::areas::repository::Repository;
use crate::artifacts::abort::Abort;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;

impl Repository {
    /// Stage one working file for the next commit.
    ///
    /// A file whose content matches HEAD's version is unstaged instead of
    /// staged; either way any pending removal of the name is lifted.
    pub fn add(&self, name: &str) -> anyhow::Result<()> {
        if !self.workspace().file_exists(name) {
            anyhow::bail!(Abort::MissingFile);
        }

        let blob = Blob::new(self.workspace().read_file(name)?);
        let oid = blob.object_id()?;
        let head = self.head_commit()?;

        let mut index = self.index();
        index.rehydrate()?;

        if head.blob_id(name) == Some(&oid) {
            index.unstage_add(name);
        } else {
            self.database().store(&blob)?;
            index.stage_add(name, oid);
        }

        index.lift_removal(name);
        index.save()
    }
}
