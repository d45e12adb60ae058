use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const QUESTIONS: [&str; 5] = [
    "¿El botiquin se encuentra libre de obtaculos?",
    "¿Cuenta con señalización visible para todos?",
    "¿Presenta daños fisicos?",
    "¿Cuenta con todos los materiales?",
    "¿Cuenta con checklist?",
];

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let dir = tmp.path().join("work");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&dir).expect("create work dir");
        Self {
            _tmp: tmp,
            home,
            dir,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("botiquin").expect("binary under test");
        cmd.env("HOME", &self.home);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    /// Writes an answers file of (section, question, answer, comment) rows.
    pub fn write_answers(&self, name: &str, entries: &[(&str, &str, &str, &str)]) -> PathBuf {
        let rows: Vec<Value> = entries
            .iter()
            .map(|(section, question, answer, comment)| {
                serde_json::json!({
                    "section": section,
                    "question": question,
                    "answer": answer,
                    "comment": comment,
                })
            })
            .collect();
        let path = self.dir.join(name);
        fs::write(
            &path,
            serde_json::to_string_pretty(&rows).expect("serialize answers"),
        )
        .expect("write answers file");
        path
    }
}

/// Full "SI" answer set covering every question of the given sections.
pub fn full_answers<'a>(sections: &[&'a str]) -> Vec<(&'a str, &'static str, &'static str, &'static str)> {
    let mut rows = Vec::new();
    for section in sections {
        for question in QUESTIONS.iter() {
            rows.push((*section, *question, "SI", ""));
        }
    }
    rows
}
