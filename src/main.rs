use compound_vlstr::access::HeapArray;
use compound_vlstr::bridge::{self, ErrorSink, STATUS_OK};
use compound_vlstr::{CodecConfig, CompoundLayout, LayoutSpec, VlStrCodec};
use serde::Deserialize;
use serde_json::{Map, Value};

const DEMO_JSON: &str = r#"{
  "config": { "tail_policy": "ignore" },
  "layout": {
    "members": [
      ["id", {"int": 8}],
      ["name", "vl_string"],
      ["score", {"float": 8}],
      ["comment", "vl_string"]
    ]
  },
  "rows": [
    { "id": 1, "name": "Alice", "comment": "héllo wörld" },
    { "name": "Bob" },
    { "name": "数据集", "comment": "" }
  ]
}"#;

#[derive(Deserialize)]
struct Demo {
    #[serde(default)]
    config: CodecConfig,
    layout: LayoutSpec,
    rows: Vec<Map<String, Value>>,
}

struct StderrSink;

impl ErrorSink for StderrSink {
    fn null_argument(&mut self, msg: &str) {
        eprintln!("NullPointerException: {msg}");
    }

    fn fatal_error(&mut self, msg: &str) {
        eprintln!("InternalError: {msg}");
    }

    fn library_error(&mut self, msg: &str) {
        eprintln!("LibraryException: {msg}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEMO_JSON.to_string(),
    };
    let mut demo: Demo = serde_json::from_str(&input)?;
    // the layout decides the slot width
    demo.config.pointer_width = demo.layout.width;

    let layout = CompoundLayout::from_spec(&demo.layout)?;
    let mut codec = VlStrCodec::new(demo.config);
    let mut sink = StderrSink;

    println!(
        "record size {} bytes, pointer size {}",
        layout.record_size(),
        bridge::get_pointer_size(&codec)
    );
    for member in layout.members() {
        println!("  {member}");
    }

    let mut buf = HeapArray::new(vec![0u8; layout.record_size() * demo.rows.len()]);
    for (r, row) in demo.rows.iter().enumerate() {
        for (name, value) in row {
            let Some(member) = layout.member(name) else {
                eprintln!("row {r}: no member '{name}'");
                continue;
            };
            if !member.kind().is_vl_string() {
                eprintln!("row {r}: member '{name}' is {:?}, not a string slot", member.kind());
                continue;
            }
            let ofs = i32::try_from(r * layout.record_size() + member.offset())?;
            let status =
                bridge::compound_cpy_vl_str(&mut sink, &mut codec, value.as_str(), Some(&mut buf), ofs);
            if status != STATUS_OK {
                eprintln!("row {r}: failed to store '{name}'");
            }
        }
    }

    for r in 0..demo.rows.len() {
        let mut fields = Vec::new();
        for member in layout.members().iter().filter(|m| m.kind().is_vl_string()) {
            let ofs = i32::try_from(r * layout.record_size() + member.offset())?;
            let text = bridge::create_vl_str_from_compound(&mut sink, &codec, Some(&mut buf), ofs);
            fields.push(format!("{}={:?}", member.name(), text));
        }
        println!("record {r}: {}", fields.join(", "));
    }

    let live = codec.arena().live();
    let schema = layout.slot_schema()?;
    let offsets = schema
        .offsets()
        .iter()
        .map(|&o| i32::try_from(o))
        .collect::<Result<Vec<_>, _>>()?;
    let mut indices = HeapArray::new(offsets);
    let status = bridge::free_compound_vl_str(
        &mut sink,
        &mut codec,
        Some(&mut buf),
        i32::try_from(layout.record_size())?,
        Some(&mut indices),
    );
    println!(
        "released {} strings (status {status}), {} live",
        live - codec.arena().live(),
        codec.arena().live()
    );
    Ok(())
}
