#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::thread;
use tempfile::TempDir;

pub const API_KEY: &str = "test-key";
const REPORT_TEMPLATE: &str = include_str!("../../templates/hash_report_template.md");

/// Isolated working directory laid out the way `hashscope run` expects it.
pub struct TestEnv {
    _tmp: TempDir,
    pub work: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let work = tmp.path().join("work");
        fs::create_dir_all(work.join("templates")).expect("create templates dir");
        fs::write(work.join("api_key.txt"), format!("{API_KEY}\n")).expect("write api key");
        fs::write(
            work.join("templates/hash_report_template.md"),
            REPORT_TEMPLATE,
        )
        .expect("write template");
        Self { _tmp: tmp, work }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("hashscope");
        cmd.current_dir(&self.work).env_remove("RUST_LOG");
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

    pub fn path(&self, rel: &str) -> PathBuf {
        self.work.join(rel)
    }

    /// Writes `hashes.xlsx`; a `None` hash leaves the cell empty.
    pub fn write_hash_list(&self, rows: &[(&str, Option<&str>)]) {
        let mut wb = rust_xlsxwriter::Workbook::new();
        let ws = wb.add_worksheet();
        for (i, (name, hash)) in rows.iter().enumerate() {
            ws.write_string(i as u32, 0, *name).expect("write name cell");
            if let Some(h) = hash {
                ws.write_string(i as u32, 1, *h).expect("write hash cell");
            }
        }
        wb.save(self.path("hashes.xlsx")).expect("save hash list");
    }
}

/// Minimal stand-in for the `files/{hash}` endpoint.
///
/// Known hashes get a file object, everything else a `NotFoundError`; a wrong
/// API key gets `WrongCredentialsError`.
pub struct StubService {
    pub url: String,
}

impl StubService {
    pub fn start(known: &[&str]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub service");
        let addr = listener.local_addr().expect("stub address");
        let objects: HashMap<String, Value> = known
            .iter()
            .map(|h| (h.to_string(), file_object(h)))
            .collect();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                answer(stream, &objects);
            }
        });
        Self {
            url: format!("http://{addr}/api/v3"),
        }
    }
}

pub fn file_object(hash: &str) -> Value {
    json!({
        "id": hash,
        "type": "file",
        "links": {"self": format!("https://www.virustotal.com/api/v3/files/{hash}")},
        "attributes": {
            "meaningful_name": format!("sample-{}.exe", &hash[..hash.len().min(4)]),
            "popular_threat_classification": {"suggested_threat_label": "trojan.stub/test"},
            "reputation": -5,
            "sandbox_verdicts": {
                "Zenbox": {"category": "malicious", "malware_names": ["Stub"]}
            },
            "total_votes": {"harmless": 1, "malicious": 9}
        }
    })
}

pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}/api/v3")
}

fn answer(stream: TcpStream, objects: &HashMap<String, Value>) {
    let mut reader = BufReader::new(match stream.try_clone() {
        Ok(s) => s,
        Err(_) => return,
    });
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let mut key = None;
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) if line == "\r\n" || line == "\n" => break,
            Ok(_) => {
                if let Some((name, value)) = line.split_once(':') {
                    if name.trim().eq_ignore_ascii_case("x-apikey") {
                        key = Some(value.trim().to_string());
                    }
                }
            }
        }
    }

    let path = request_line.split_whitespace().nth(1).unwrap_or_default();
    let hash = path.rsplit_once("/files/").map(|(_, h)| h).unwrap_or_default();

    let (status, body) = if key.as_deref() != Some(API_KEY) {
        (
            "401 Unauthorized",
            json!({"error": {"code": "WrongCredentialsError", "message": "Wrong API key"}}),
        )
    } else if let Some(obj) = objects.get(hash) {
        ("200 OK", json!({"data": obj}))
    } else {
        (
            "404 Not Found",
            json!({"error": {
                "code": "NotFoundError",
                "message": format!("File \"{hash}\" not found")
            }}),
        )
    };

    let body = body.to_string();
    let mut stream = stream;
    let _ = write!(
        stream,
        "HTTP/1.1 {status}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.flush();
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}
