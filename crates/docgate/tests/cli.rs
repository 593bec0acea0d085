use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("docgate").unwrap()
}

/// Temp project whose build runs `script` through `sh -c`.
fn project(script: &str, extra: &str) -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    let config = format!(
        "[build]\ncommand = [\"sh\", \"-c\", {:?}]\n{}",
        script, extra
    );
    fs::write(temp.path().join("docgate.toml"), config).unwrap();
    temp
}

fn config_path(temp: &TempDir) -> PathBuf {
    temp.path().join("docgate.toml")
}

fn write_doc(root: &Path, rel: &str, content: &str) {
    let path = root.join("src/content/docs").join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[cfg(unix)]
mod verify_build {
    use super::*;

    #[test]
    fn passes_when_dist_created() {
        let temp = project("mkdir -p dist", "");

        cmd()
            .arg("--config")
            .arg(config_path(&temp))
            .arg("verify-build")
            .assert()
            .success()
            .stdout(contains("✅ Build successful"));
    }

    #[test]
    fn fails_when_build_fails() {
        let temp = project("mkdir -p dist; exit 1", "");

        cmd()
            .arg("--config")
            .arg(config_path(&temp))
            .arg("verify-build")
            .assert()
            .code(1)
            .stdout(contains("Build failed"))
            .stdout(contains("✅").not());
    }

    #[test]
    fn fails_when_dist_missing() {
        let temp = project("true", "");

        cmd()
            .arg("--config")
            .arg(config_path(&temp))
            .arg("verify-build")
            .assert()
            .code(1)
            .stdout(contains("Output directory not found"));
    }

    #[test]
    fn honours_output_override() {
        let temp = project("mkdir -p build", "");

        cmd()
            .arg("--config")
            .arg(config_path(&temp))
            .args(["verify-build", "--output", "build"])
            .assert()
            .success();
    }
}

mod check_links {
    use super::*;

    #[test]
    fn passes_on_clean_docs() {
        let temp = project("true", "");
        write_doc(
            temp.path(),
            "overview.md",
            "---\ntitle: Overview\n---\n[ACL](/acl) [repo](https://github.com/kwila-cloud/simple-sync)",
        );
        write_doc(temp.path(), "api/v1.mdx", "[Back](../../overview/)");

        cmd()
            .arg("--config")
            .arg(config_path(&temp))
            .arg("check-links")
            .assert()
            .success()
            .stdout(contains("✅ No broken links found"));
    }

    #[test]
    fn reports_broken_link_and_file() {
        let temp = project("true", "");
        write_doc(temp.path(), "guide.md", "[docs](/overview)\n\n[broken]()\n");

        cmd()
            .arg("--config")
            .arg(config_path(&temp))
            .arg("check-links")
            .assert()
            .code(1)
            .stdout(contains("Broken link in guide.md:3"))
            .stdout(contains("/overview").not())
            .stdout(contains("Broken links detected: 1"));
    }

    #[test]
    fn reports_links_inside_mdx_components() {
        let temp = project("true", "");
        write_doc(
            temp.path(),
            "tech-stack.mdx",
            "---\ntitle: Tech Stack\ndraft: yes\n---\n<Card title=\"Storage\">\nBacked by [SQLite](#).\n</Card>\n",
        );

        cmd()
            .arg("--config")
            .arg(config_path(&temp))
            .arg("check-links")
            .assert()
            .code(1)
            .stdout(contains("Broken link in tech-stack.mdx:6: [SQLite](#)"));
    }

    #[test]
    fn missing_docs_dir_fails() {
        let temp = project("true", "");

        cmd()
            .arg("--config")
            .arg(config_path(&temp))
            .arg("check-links")
            .assert()
            .code(1)
            .stdout(contains("Docs directory not found"));
    }

    #[test]
    fn json_report_lists_findings() {
        let temp = project("true", "");
        write_doc(temp.path(), "acl.md", "[todo](#)");

        let output = cmd()
            .arg("--config")
            .arg(config_path(&temp))
            .args(["check-links", "--json"])
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["files_scanned"], 1);
        assert_eq!(report["findings"][0]["file"], "acl.md");
        assert_eq!(report["findings"][0]["target"], "#");
    }
}

#[cfg(unix)]
mod perf {
    use super::*;

    const SMALL_BUILD: &str = "mkdir -p dist && printf 'hello' > dist/index.html";

    #[test]
    fn passes_within_budget() {
        let temp = project(SMALL_BUILD, "");

        cmd()
            .arg("--config")
            .arg(config_path(&temp))
            .arg("perf")
            .assert()
            .success()
            .stdout(contains("Build completed in"))
            .stdout(contains("✅ Performance test passed"));
    }

    #[test]
    fn fails_over_size_budget() {
        let temp = project(SMALL_BUILD, "[thresholds]\nmax_output_bytes = 4\n");

        cmd()
            .arg("--config")
            .arg(config_path(&temp))
            .arg("perf")
            .assert()
            .code(1)
            .stdout(contains("Bundle size"));
    }

    #[test]
    fn fails_over_time_budget() {
        let temp = project("sleep 0.2 && mkdir -p dist", "");

        cmd()
            .arg("--config")
            .arg(config_path(&temp))
            .args(["perf", "--max-build-ms", "10"])
            .assert()
            .code(1)
            .stdout(contains("Build time"));
    }

    #[test]
    fn fails_when_build_fails() {
        let temp = project("echo 'astro build exploded' >&2; exit 1", "");

        cmd()
            .arg("--config")
            .arg(config_path(&temp))
            .arg("perf")
            .assert()
            .code(1)
            .stdout(contains("Performance test failed"))
            .stdout(contains("astro build exploded"));
    }

    #[test]
    fn json_report_on_stdout() {
        let temp = project(SMALL_BUILD, "");

        let output = cmd()
            .arg("--config")
            .arg(config_path(&temp))
            .args(["perf", "--json"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["output_bytes"], 5);
        assert_eq!(report["thresholds"]["max_output_bytes"], 52_428_800);
        assert!(report["violations"].as_array().unwrap().is_empty());
    }
}

mod init {
    use super::*;

    #[test]
    fn writes_default_config() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("docgate.toml");

        cmd().arg("--config").arg(&path).arg("init").assert().success();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("command = [\"npm\", \"run\", \"build\"]"));
    }

    #[test]
    fn keeps_existing_config_without_yes() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("docgate.toml");
        fs::write(&path, "[site]\noutput = \"public\"\n").unwrap();

        cmd()
            .arg("--config")
            .arg(&path)
            .arg("init")
            .assert()
            .success()
            .stdout(contains("already exists"));

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[site]\noutput = \"public\"\n"
        );
    }
}

#[test]
fn malformed_config_fails() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("docgate.toml");
    fs::write(&path, "[build\ncommand = 1").unwrap();

    cmd()
        .arg("--config")
        .arg(&path)
        .arg("check-links")
        .assert()
        .code(1)
        .stdout(contains("Failed to parse"));
}
