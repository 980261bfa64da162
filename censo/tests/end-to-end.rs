/// Integration tests which run the `censo` binary, both as a payload driven through stdin/stdout
/// and as a complete local job.

#[macro_use]
extern crate serde_json;
extern crate tempfile;

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const TEST_BIN_NAME: &str = "censo";

const DIRECTORY: &str = "1,Calle Sol,42\n2,Calle Luna,7\n3,Calle Mar,500\n4,Calle Vacia,9\n";
const POPULATION: &str = "00042,1300\n00007,100\n00009,10\n";

// This can't be a one-liner because cargo sometimes runs integration tests from
// `target/debug/deps`.
fn get_bin_path() -> PathBuf {
    let mut path = env::current_exe().unwrap();
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push(TEST_BIN_NAME);
    path
}

fn shop_rows(street: &str, count: usize) -> String {
    (0..count)
        .map(|i| format!("{},Shop {},a,b,c,{}\n", i, i, street))
        .collect()
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(get_bin_path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    child.wait_with_output().unwrap()
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new(shops: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("in")).unwrap();
        fs::write(dir.path().join("in/censoComercios.csv"), shops).unwrap();
        fs::write(dir.path().join("in/censoCallejero.csv"), DIRECTORY).unwrap();
        fs::write(dir.path().join("censoPoblacion.csv"), POPULATION).unwrap();
        Workspace { dir }
    }

    fn path(&self, relative: &str) -> String {
        self.dir.path().join(relative).to_string_lossy().into_owned()
    }

    fn run(&self, min_shops: &str, extra_args: &[&str]) -> Output {
        let input = self.path("in");
        let output = self.path("out");
        let population = self.path("censoPoblacion.csv");
        let mut args = vec![
            "run",
            "--input",
            input.as_str(),
            "--output",
            output.as_str(),
            "--min-shops",
            min_shops,
            "--population",
            population.as_str(),
        ];
        args.extend_from_slice(extra_args);

        Command::new(get_bin_path())
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .unwrap()
    }

    fn read_output(&self) -> String {
        let mut files: Vec<PathBuf> = fs::read_dir(Path::new(&self.path("out")))
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        files.sort();
        files
            .iter()
            .map(|file| fs::read_to_string(file).unwrap())
            .collect()
    }
}

fn expected_row(street: &str, shops: &str, population: &str) -> String {
    format!("{:<40}{:<10}\t{}", street, shops, population)
}

#[test]
fn run_sanity_check() {
    let output = Command::new(get_bin_path())
        .arg("sanity-check")
        .output()
        .unwrap();
    let output_str = String::from_utf8(output.stdout).unwrap();

    assert_eq!("sanity located\n", output_str);
}

#[test]
fn run_map_counts_shops_of_the_unit() {
    let value = shop_rows("Calle Sol", 6);
    let json_input = json_map_input("/data/censoComercios.csv", &value);

    let output = run_with_stdin(&["map"], &json_input);
    let output_str = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert_eq!(
        r#"{"partitions":{"0":[{"key":"Calle Sol","value":{"ShopCount":6}}]}}"#,
        output_str
    );
}

#[test]
fn run_map_street_directory() {
    let json_input = json_map_input("censoCallejero.csv", "1,Calle Sol,42\n");

    let output = run_with_stdin(&["map"], &json_input);
    let output_str = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert_eq!(
        r#"{"partitions":{"0":[{"key":"Calle Sol","value":{"StreetCode":"00042"}}]}}"#,
        output_str
    );
}

#[test]
fn run_map_malformed_row() {
    let json_input = json_map_input("censoComercios.csv", "1,Shop,a\n");

    let output = run_with_stdin(&["map"], &json_input);

    assert_eq!(false, output.status.success());
}

#[test]
fn run_map_unknown_input() {
    let json_input = json_map_input("other.csv", "1,Shop,a,b,c,Calle Sol\n");

    let output = run_with_stdin(&["map"], &json_input);

    assert_eq!(false, output.status.success());
}

#[test]
fn run_reduce_sums_unit_counts() {
    let workspace = Workspace::new("");
    let population = workspace.path("censoPoblacion.csv");
    let json_input = r#"[
        {"key":"Calle Luna","values":[{"ShopCount":2}]},
        {"key":"Calle Sol","values":[{"ShopCount":4},{"StreetCode":"00042"},{"ShopCount":2}]}
    ]"#;

    let output = run_with_stdin(
        &["reduce", "--min-shops", "5", "--population", population.as_str()],
        json_input,
    );
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert!(output.status.success());
    assert_eq!(0, result[0]["values"].as_array().unwrap().len());
    assert_eq!(
        format!("{}{:<10}216", expected_row("Calle Sol", "6", ""), "1300"),
        result[1]["values"][0]
    );
}

#[test]
fn run_reduce_missing_population_file() {
    let json_input = r#"[{"key":"Calle Sol","values":[{"ShopCount":6}]}]"#;

    let output = run_with_stdin(
        &["reduce", "--min-shops", "5", "--population", "/nonexistent/censoPoblacion.csv"],
        json_input,
    );

    assert_eq!(false, output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn run_local_job() {
    let shops = format!(
        "{}{}{}",
        shop_rows("Calle Sol", 6),
        shop_rows("Calle Mar", 7),
        shop_rows("Calle Luna", 5)
    );
    let workspace = Workspace::new(&shops);

    let output = workspace.run("5", &[]);

    assert!(output.status.success());
    let expected = format!(
        "{}\n{}{:<10}216\n",
        expected_row("Calle Mar", "7", "No indice"),
        expected_row("Calle Sol", "6", ""),
        "1300"
    );
    assert_eq!(expected, workspace.read_output());
}

#[test]
fn run_local_job_with_split_input() {
    let shops = format!(
        "{}{}{}",
        shop_rows("Calle Sol", 3),
        shop_rows("Calle Luna", 2),
        shop_rows("Calle Sol", 3)
    );
    let workspace = Workspace::new(&shops);

    let output = workspace.run("1", &["--unit-lines", "1", "--workers", "3"]);

    assert!(output.status.success());
    let expected = format!(
        "{}{:<10}50\n{}{:<10}216\n",
        expected_row("Calle Luna", "2", ""),
        "100",
        expected_row("Calle Sol", "6", ""),
        "1300"
    );
    assert_eq!(expected, workspace.read_output());
}

#[test]
fn run_local_job_is_idempotent() {
    let shops = format!("{}{}", shop_rows("Calle Sol", 9), shop_rows("Calle Mar", 4));
    let workspace = Workspace::new(&shops);

    assert!(workspace.run("2", &["--partitions", "3", "--unit-lines", "2"]).status.success());
    let first = workspace.read_output();
    assert!(workspace.run("2", &["--partitions", "3", "--unit-lines", "2"]).status.success());
    let second = workspace.read_output();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn run_local_job_missing_population_file() {
    let workspace = Workspace::new(&shop_rows("Calle Sol", 6));
    fs::remove_file(workspace.path("censoPoblacion.csv")).unwrap();

    let output = workspace.run("5", &[]);

    assert_eq!(false, output.status.success());
    assert!(!Path::new(&workspace.path("out")).exists());
}

fn json_map_input(key: &str, value: &str) -> String {
    serde_json::to_string(&json!({ "key": key, "value": value })).unwrap()
}
