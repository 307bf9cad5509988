use crate::areas::repository::Repository;
use crate::artifacts::abort::Abort;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Walk the first-parent chain from HEAD, printing each commit.
    pub fn log(&self) -> anyhow::Result<()> {
        let mut cursor = Some(self.head_commit_id()?);

        while let Some(oid) = cursor {
            let commit = self.database().load_commit(&oid)?;
            self.print_commit(&oid, &commit)?;
            cursor = commit.parent().cloned();
        }

        Ok(())
    }

    /// Print every commit in the store, in directory-listing order.
    pub fn global_log(&self) -> anyhow::Result<()> {
        for oid in self.database().list_commit_ids()? {
            let commit = self.database().load_commit(&oid)?;
            self.print_commit(&oid, &commit)?;
        }

        Ok(())
    }

    /// Print the ids of every commit whose message matches exactly.
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut found = false;

        for oid in self.database().list_commit_ids()? {
            let commit = self.database().load_commit(&oid)?;
            if commit.message() == message {
                writeln!(self.writer(), "{}", oid)?;
                found = true;
            }
        }

        if !found {
            anyhow::bail!(Abort::MessageNotFound);
        }

        Ok(())
    }

    fn print_commit(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {}", oid)?;
        if let (Some(parent), Some(parent2)) = (commit.parent(), commit.parent2()) {
            writeln!(
                writer,
                "Merge: {} {}",
                parent.to_short_oid(),
                parent2.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
