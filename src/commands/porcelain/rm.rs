use crate::areas::repository::Repository;
use crate::artifacts::abort::Abort;

impl Repository {
    /// Unstage a file, and if HEAD tracks it, stage its removal and delete
    /// it from the working directory.
    pub fn rm(&self, name: &str) -> anyhow::Result<()> {
        let head = self.head_commit()?;

        let mut index = self.index();
        index.rehydrate()?;

        if !index.is_staged_for_add(name) && !head.tracks(name) {
            anyhow::bail!(Abort::NothingToRemove);
        }

        index.unstage_add(name);

        if head.tracks(name) {
            index.stage_remove(name);
            if self.workspace().file_exists(name) {
                self.workspace().remove_file(name)?;
            }
        }

        index.save()
    }
}
