//! Commit and push the accepted commit message.

use crate::error::PublishError;
use crate::git::Vcs;
use crate::message::CommitDraft;

/// Stage all changes, commit with `draft`, and push.
///
/// Steps:
/// 1. `git add .` - pick up anything modified since the diff was taken
/// 2. `git commit -m <message>`
/// 3. `git push` - to the branch's tracking remote
///
/// A failed push leaves the commit in place.
pub fn publish_commit<V: Vcs + ?Sized>(vcs: &V, draft: &CommitDraft) -> Result<(), PublishError> {
    vcs.stage_all()?;
    vcs.commit(&draft.message)?;
    vcs.push()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitError;
    use crate::git::runner::MockVcs;
    use mockall::predicate::eq;

    fn draft() -> CommitDraft {
        CommitDraft {
            message: "fix(ABC-42): adds y".to_string(),
        }
    }

    #[test]
    fn test_publish_runs_add_commit_push_in_order() {
        let mut vcs = MockVcs::new();
        let mut seq = mockall::Sequence::new();
        vcs.expect_stage_all().times(1).in_sequence(&mut seq).returning(|| Ok(()));
        vcs.expect_commit()
            .with(eq("fix(ABC-42): adds y"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        vcs.expect_push().times(1).in_sequence(&mut seq).returning(|| Ok(()));

        publish_commit(&vcs, &draft()).unwrap();
    }

    #[test]
    fn test_commit_failure_skips_push() {
        let mut vcs = MockVcs::new();
        vcs.expect_stage_all().returning(|| Ok(()));
        vcs.expect_commit().returning(|_| {
            Err(GitError::CommandFailed {
                operation: "commit".into(),
                stderr: "nothing to commit".into(),
            })
        });
        vcs.expect_push().never();

        let err = publish_commit(&vcs, &draft()).unwrap_err();
        assert!(err.to_string().contains("nothing to commit"));
    }

    #[test]
    fn test_push_failure_is_reported() {
        let mut vcs = MockVcs::new();
        vcs.expect_stage_all().returning(|| Ok(()));
        vcs.expect_commit().returning(|_| Ok(()));
        vcs.expect_push().returning(|| {
            Err(GitError::CommandFailed {
                operation: "push".into(),
                stderr: "no upstream branch".into(),
            })
        });

        let err = publish_commit(&vcs, &draft()).unwrap_err();
        assert!(matches!(err, PublishError::Git(GitError::CommandFailed { .. })));
    }
}
