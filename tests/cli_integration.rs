// CLI integration tests for the decode/inspect flows.
use std::path::Path;
use std::process::Command;

use serde_json::{Value, json};

use tradelens::core::codec::encode_document;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_tradelens");
    Command::new(exe)
}

fn parse_json(value: &str) -> Value {
    serde_json::from_str(value).expect("valid json")
}

fn write_export(path: &Path, document: &Value) {
    let encoded = encode_document(document).expect("encode");
    std::fs::write(path, format!("{encoded}\n")).expect("write fixture");
}

fn sample_document() -> Value {
    json!({
        "item_values": {
            "nauvis": { "iron-plate": 2.5 },
            "gleba": { "yumako": 1.0 }
        },
        "trades": {
            "nauvis": [],
            "gleba": [ { "gives": "yumako", "takes": "jellynut", "qty": 4 } ]
        }
    })
}

#[test]
fn show_prints_item_values_then_trades() {
    let temp = tempfile::tempdir().expect("tempdir");
    let export = temp.path().join("export.txt");
    write_export(&export, &sample_document());

    let show = cmd()
        .args(["show", export.to_str().unwrap()])
        .output()
        .expect("show");
    assert!(show.status.success());

    let stdout = String::from_utf8(show.stdout).expect("utf8");
    let mut lines = stdout.lines();
    let values = parse_json(lines.next().expect("values line"));
    let trades = parse_json(lines.next().expect("trades line"));
    assert!(lines.next().is_none());
    assert_eq!(values, json!({ "iron-plate": 2.5 }));
    assert_eq!(trades, json!([]));
}

#[test]
fn planet_flag_selects_other_planets() {
    let temp = tempfile::tempdir().expect("tempdir");
    let export = temp.path().join("export.txt");
    write_export(&export, &sample_document());

    let values = cmd()
        .args(["values", export.to_str().unwrap(), "--planet", "gleba"])
        .output()
        .expect("values");
    assert!(values.status.success());
    assert_eq!(
        parse_json(std::str::from_utf8(&values.stdout).expect("utf8")),
        json!({ "yumako": 1.0 })
    );

    let trades = cmd()
        .args(["trades", export.to_str().unwrap(), "--planet", "gleba"])
        .output()
        .expect("trades");
    assert!(trades.status.success());
    assert_eq!(
        parse_json(std::str::from_utf8(&trades.stdout).expect("utf8")),
        json!([ { "gives": "yumako", "takes": "jellynut", "qty": 4 } ])
    );
}

#[test]
fn planets_lists_the_sorted_union() {
    let temp = tempfile::tempdir().expect("tempdir");
    let export = temp.path().join("export.txt");
    write_export(&export, &sample_document());

    let planets = cmd()
        .args(["planets", export.to_str().unwrap()])
        .output()
        .expect("planets");
    assert!(planets.status.success());
    assert_eq!(
        parse_json(std::str::from_utf8(&planets.stdout).expect("utf8")),
        json!(["gleba", "nauvis"])
    );
}

#[test]
fn dump_round_trips_the_whole_document() {
    let temp = tempfile::tempdir().expect("tempdir");
    let export = temp.path().join("export.txt");
    let document = sample_document();
    write_export(&export, &document);

    let dump = cmd()
        .args(["dump", export.to_str().unwrap()])
        .output()
        .expect("dump");
    assert!(dump.status.success());
    assert_eq!(
        parse_json(std::str::from_utf8(&dump.stdout).expect("utf8")),
        document
    );
}

#[test]
fn encode_output_is_decodable_by_show() {
    let temp = tempfile::tempdir().expect("tempdir");
    let raw = temp.path().join("document.json");
    let export = temp.path().join("export.txt");
    let document = json!({
        "item_values": { "nauvis": { "iron-plate": 2.5 } },
        "trades": { "nauvis": [] }
    });
    std::fs::write(&raw, serde_json::to_string(&document).unwrap()).expect("write raw");

    let encode = cmd()
        .args(["encode", raw.to_str().unwrap()])
        .output()
        .expect("encode");
    assert!(encode.status.success());
    std::fs::write(&export, &encode.stdout).expect("write export");

    let show = cmd()
        .args(["show", export.to_str().unwrap()])
        .output()
        .expect("show");
    assert!(show.status.success());
    let stdout = String::from_utf8(show.stdout).expect("utf8");
    let mut lines = stdout.lines();
    assert_eq!(
        parse_json(lines.next().expect("values line")),
        json!({ "iron-plate": 2.5 })
    );
    assert_eq!(parse_json(lines.next().expect("trades line")), json!([]));
}

#[test]
fn decode_failures_map_to_stable_exit_codes() {
    let temp = tempfile::tempdir().expect("tempdir");

    // Missing file.
    let missing = temp.path().join("missing.txt");
    let output = cmd()
        .args(["show", missing.to_str().unwrap()])
        .output()
        .expect("show");
    assert_eq!(output.status.code(), Some(3));

    // Not base64.
    let garbled = temp.path().join("garbled.txt");
    std::fs::write(&garbled, "!!! not base64 !!!").expect("write");
    let output = cmd()
        .args(["show", garbled.to_str().unwrap()])
        .output()
        .expect("show");
    assert_eq!(output.status.code(), Some(5));

    // Base64 of bytes that are not a zlib stream.
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    let stale = temp.path().join("stale.txt");
    std::fs::write(&stale, STANDARD.encode(b"not a zlib stream")).expect("write");
    let output = cmd()
        .args(["show", stale.to_str().unwrap()])
        .output()
        .expect("show");
    assert_eq!(output.status.code(), Some(6));

    // Inflates to bytes that are not JSON.
    use std::io::Write as _;
    let mut deflated = Vec::new();
    {
        let mut encoder =
            flate2::write::ZlibEncoder::new(&mut deflated, flate2::Compression::default());
        encoder.write_all(b"not json").expect("deflate");
        encoder.finish().expect("finish");
    }
    let scrambled = temp.path().join("scrambled.txt");
    std::fs::write(&scrambled, STANDARD.encode(&deflated)).expect("write");
    let output = cmd()
        .args(["show", scrambled.to_str().unwrap()])
        .output()
        .expect("show");
    assert_eq!(output.status.code(), Some(7));

    // Valid JSON that is not a trade export.
    let shapeless = temp.path().join("shapeless.txt");
    write_export(&shapeless, &json!({ "item_values": {} }));
    let output = cmd()
        .args(["show", shapeless.to_str().unwrap()])
        .output()
        .expect("show");
    assert_eq!(output.status.code(), Some(8));
}

#[test]
fn missing_planet_reports_not_found_with_planet_hint() {
    let temp = tempfile::tempdir().expect("tempdir");
    let export = temp.path().join("export.txt");
    write_export(&export, &sample_document());

    let output = cmd()
        .args(["show", export.to_str().unwrap(), "--planet", "aquilo"])
        .output()
        .expect("show");
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());

    // Non-TTY stderr carries a single-line JSON error envelope.
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    let envelope = parse_json(stderr.lines().next().expect("error line"));
    let inner = envelope
        .get("error")
        .and_then(|value| value.as_object())
        .expect("error object");
    assert_eq!(inner.get("kind").and_then(|v| v.as_str()), Some("NotFound"));
    let hint = inner.get("hint").and_then(|v| v.as_str()).expect("hint");
    assert!(hint.contains("gleba"));
    assert!(hint.contains("nauvis"));
}

#[test]
fn usage_errors_exit_with_code_two() {
    let output = cmd().output().expect("no args");
    assert_eq!(output.status.code(), Some(2));

    let output = cmd().args(["no-such-command"]).output().expect("bad cmd");
    assert_eq!(output.status.code(), Some(2));
}
