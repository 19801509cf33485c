/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: every case matches
    #[test]
    fn test_exit_code_success() {
        cargo_bin_cmd!("lockfile-tree")
            .args([
                "verify",
                "tests/fixtures/cases/goof",
                "tests/fixtures/cases/cycle",
            ])
            .assert()
            .code(0);
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("lockfile-tree").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("lockfile-tree")
            .arg("--version")
            .assert()
            .code(0);
    }

    /// Exit code 1: a case differs from its expected tree
    #[test]
    fn test_exit_code_differences_found() {
        cargo_bin_cmd!("lockfile-tree")
            .args(["verify", "tests/fixtures/cases/drift"])
            .assert()
            .code(1);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("lockfile-tree")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("lockfile-tree")
            .args([
                "tree",
                "tests/fixtures/cases/goof/dep-graph.json",
                "-f",
                "invalid_format",
            ])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - non-existent lockfile
    #[test]
    fn test_exit_code_application_error_missing_lockfile() {
        cargo_bin_cmd!("lockfile-tree")
            .args(["preprocess", "/nonexistent/package-lock.json"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("lockfile does not exist"));
    }

    /// Exit code 3: Application error - inconsistent graph
    #[test]
    fn test_exit_code_application_error_dangling_edge() {
        cargo_bin_cmd!("lockfile-tree")
            .args(["tree", "tests/fixtures/graphs/dangling.json"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("GraphInconsistencyError 500"));
    }
}

mod preprocess_tests {
    use super::*;

    #[test]
    fn test_preprocess_npm_lockfile() {
        let output = cargo_bin_cmd!("lockfile-tree")
            .args(["preprocess", "tests/fixtures/lockfiles/package-lock.json"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let dependencies = value["dependencies"].as_object().unwrap();
        assert_eq!(dependencies["left-pad"]["version"], "1.3.0");
        assert!(!dependencies.contains_key("pad"));

        let keys: Vec<&String> = dependencies.keys().collect();
        assert_eq!(keys, vec!["debug", "ms", "left-pad"]);
    }

    #[test]
    fn test_preprocess_yarn_lockfile() {
        cargo_bin_cmd!("lockfile-tree")
            .args(["preprocess", "tests/fixtures/lockfiles/yarn.lock"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"left-pad@^1.3.0\":\n"))
            .stdout(predicate::str::contains("    left-pad \"^1.3.0\"\n"))
            .stdout(predicate::str::contains("npm:").not())
            .stderr(predicate::str::contains("Resolved 1 alias(es)"));
    }

    #[test]
    fn test_preprocess_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let output_path = dir.path().join("package-lock.resolved.json");

        cargo_bin_cmd!("lockfile-tree")
            .args([
                "preprocess",
                "tests/fixtures/lockfiles/package-lock.json",
                "-o",
                output_path.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stderr(predicate::str::contains("Output complete"));

        let written = fs::read_to_string(&output_path).unwrap();
        assert!(written.contains("\"left-pad\""));
    }

    #[test]
    fn test_preprocess_npm_v3_is_unsupported() {
        cargo_bin_cmd!("lockfile-tree")
            .args(["preprocess", "tests/fixtures/lockfiles/package-lock-v3.json"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("UnsupportedError 500"));
    }
}

mod tree_tests {
    use super::*;

    #[test]
    fn test_tree_from_graph_as_text() {
        cargo_bin_cmd!("lockfile-tree")
            .args([
                "tree",
                "tests/fixtures/cases/goof/dep-graph.json",
                "-f",
                "text",
            ])
            .assert()
            .success()
            .stdout(
                "goof@0.0.3\n├── adm-zip@0.4.7\n└─┬ body-parser@1.9.0\n  └── bytes@1.0.0\n",
            );
    }

    #[test]
    fn test_tree_from_graph_as_json() {
        let output = cargo_bin_cmd!("lockfile-tree")
            .args(["tree", "tests/fixtures/cases/cycle/dep-graph.json"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let expected: serde_json::Value = serde_json::from_str(
            &fs::read_to_string("tests/fixtures/cases/cycle/expected-tree.json").unwrap(),
        )
        .unwrap();
        assert_eq!(tree["name"], expected["name"]);
        assert_eq!(tree["deps"][0]["deps"][0]["deps"][0]["deduped"], true);
    }

    #[test]
    fn test_tree_from_listing() {
        cargo_bin_cmd!("lockfile-tree")
            .args([
                "tree",
                "tests/fixtures/cases/goof/expected-tree.txt",
                "--from",
                "listing",
                "-f",
                "text",
            ])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("goof@0.0.3\n"));
    }

    #[test]
    fn test_tree_size_limit_is_an_application_error() {
        cargo_bin_cmd!("lockfile-tree")
            .args([
                "tree",
                "tests/fixtures/cases/goof/dep-graph.json",
                "--max-tree-size",
                "2",
            ])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("TreeSizeLimitError 422"))
            .stderr(predicate::str::contains("exceeds the limit of 2"));
    }
}

mod verify_tests {
    use super::*;

    #[test]
    fn test_verify_reports_differences() {
        cargo_bin_cmd!("lockfile-tree")
            .args(["verify", "tests/fixtures/cases/drift", "-c", "1"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(
                "   DIFFERENT VERSION AT goof@0.0.3 -> body-parser@1.9.0 -> bytes@1.0.0 EXPECTED 1.0.1\n",
            ))
            .stdout(predicate::str::contains(
                "   MISSING goof@0.0.3 -> cookie@0.1.2\n",
            ));
    }

    #[test]
    fn test_verify_skips_case_without_expectation() {
        cargo_bin_cmd!("lockfile-tree")
            .args([
                "verify",
                "tests/fixtures/cases/goof",
                "tests/fixtures/cases/no-expectation",
            ])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("MATCH goof"))
            .stdout(predicate::str::contains(
                "SKIP no-expectation [InvalidUserInputError]",
            ))
            .stdout(predicate::str::contains(
                "Summary: 1 matched, 0 differ, 1 skipped",
            ));
    }

    #[test]
    fn test_verify_rejects_zero_concurrency() {
        cargo_bin_cmd!("lockfile-tree")
            .args(["verify", "tests/fixtures/cases/goof", "-c", "0"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Invalid concurrency: 0"));
    }
}
