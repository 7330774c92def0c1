use std::fs;
use std::path::Path;

use git2::{IndexAddOption, Oid, Repository, Signature};
use tempfile::TempDir;

/// A local repository whose HEAD points at `refs/heads/main`.
pub struct FixtureRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl FixtureRepo {
    pub fn new(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let fixture = Self { dir, repo };
        fixture.commit("main", files, "init");
        fixture.repo.set_head("refs/heads/main").unwrap();
        fixture
    }

    pub fn url(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Add `files` on top of `branch` (or of main for a new branch).
    pub fn commit(&self, branch: &str, files: &[(&str, &str)], message: &str) -> Oid {
        for (path, contents) in files {
            write_file(self.dir.path(), path, contents);
        }

        let mut index = self.repo.index().unwrap();
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();

        let sig = Signature::now("Test User", "test@example.com").unwrap();
        let branch_ref = format!("refs/heads/{branch}");
        let parent = self
            .repo
            .find_reference(&branch_ref)
            .or_else(|_| self.repo.find_reference("refs/heads/main"))
            .ok()
            .and_then(|r| r.peel_to_commit().ok());

        match parent {
            Some(parent) => self
                .repo
                .commit(Some(&branch_ref), &sig, &sig, message, &tree, &[&parent])
                .unwrap(),
            None => self
                .repo
                .commit(Some(&branch_ref), &sig, &sig, message, &tree, &[])
                .unwrap(),
        }
    }

    pub fn delete_branch(&self, branch: &str) {
        self.repo
            .find_reference(&format!("refs/heads/{branch}"))
            .unwrap()
            .delete()
            .unwrap();
    }
}

fn write_file(root: &Path, path: &str, contents: &str) {
    let full = root.join(path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(full, contents).unwrap();
}
