//! Test fixtures: a sample project file and scratch git repositories.

use std::path::Path;

use git2::{IndexAddOption, Oid, Repository, RepositoryInitOptions, Signature};

/// A component with a two-arch native goal and a single-arch script goal.
pub const TWO_ARCH_PROJECT: &str = r#"
ci:
  type: teamcity
  url: http://ci.example.com:8111

components:
  - name: widget
    description: The widget library
    goals:
      - name: build
        description: Compile the library
        buildType: release
        buildGoal: widget
        buildVars:
          X: 1
        artifacts:
          - out/*.tar.gz
        builds:
          - arch: arm32-linux-gnueabihf
            buildVars:
              Y: 2
          - arch: x86_64-linux-gcc

      - name: docs
        buildVars:
          FORMAT: html
        artifacts:
          - docs.zip
        builds:
          - arch: host
            script:
              - ./gen-docs.sh
              - zip -r docs.zip docs
"#;

/// Initialize a repository at `path` whose unborn HEAD points at `branch`.
pub fn init_git_repo(path: &Path, branch: &str) -> Repository {
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head(branch);
    Repository::init_opts(path, &opts).unwrap()
}

/// Stage everything in the working tree and commit it onto HEAD.
pub fn commit_all(repo: &Repository, message: &str) -> Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();

    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = Signature::now("Test", "test@example.com").unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}
