//! Tiny ONNX graphs encoded by hand for tests.
//!
//! Every model multiplies its (summed) inputs by a `[32, C]` matrix that copies
//! the first `C` features through, so the scores of a row are its leading
//! features.

use std::path::{Path, PathBuf};

pub const FEATURES: usize = 32;

fn varint(buf: &mut Vec<u8>, mut v: u64) {
    while v >= 0x80 {
        buf.push((v as u8) | 0x80);
        v >>= 7;
    }
    buf.push(v as u8);
}

fn int_field(buf: &mut Vec<u8>, field: u32, v: i64) {
    varint(buf, u64::from(field << 3));
    varint(buf, v as u64);
}

fn bytes_field(buf: &mut Vec<u8>, field: u32, data: &[u8]) {
    varint(buf, u64::from((field << 3) | 2));
    varint(buf, data.len() as u64);
    buf.extend_from_slice(data);
}

fn str_field(buf: &mut Vec<u8>, field: u32, s: &str) {
    bytes_field(buf, field, s.as_bytes());
}

fn tensor(name: &str, dims: &[i64], data: &[f32]) -> Vec<u8> {
    let mut buf = Vec::new();
    for &d in dims {
        int_field(&mut buf, 1, d);
    }
    // FLOAT
    int_field(&mut buf, 2, 1);
    str_field(&mut buf, 8, name);
    let raw: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
    bytes_field(&mut buf, 9, &raw);
    buf
}

/// `[batch, width]` float tensor with a symbolic batch dimension.
fn value_info(name: &str, width: i64) -> Vec<u8> {
    let mut batch = Vec::new();
    str_field(&mut batch, 2, "N");
    let mut cols = Vec::new();
    int_field(&mut cols, 1, width);

    let mut shape = Vec::new();
    bytes_field(&mut shape, 1, &batch);
    bytes_field(&mut shape, 1, &cols);

    let mut tensor_type = Vec::new();
    int_field(&mut tensor_type, 1, 1);
    bytes_field(&mut tensor_type, 2, &shape);

    let mut type_proto = Vec::new();
    bytes_field(&mut type_proto, 1, &tensor_type);

    let mut buf = Vec::new();
    str_field(&mut buf, 1, name);
    bytes_field(&mut buf, 2, &type_proto);
    buf
}

fn node(op_type: &str, name: &str, inputs: &[&str], output: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    for input in inputs {
        str_field(&mut buf, 1, input);
    }
    str_field(&mut buf, 2, output);
    str_field(&mut buf, 3, name);
    str_field(&mut buf, 4, op_type);
    buf
}

/// Encodes a model whose inputs are summed and projected onto `classes` scores.
pub fn encode(inputs: &[&str], classes: usize) -> Vec<u8> {
    assert!(!inputs.is_empty() && classes <= FEATURES);

    let mut weights = vec![0f32; FEATURES * classes];
    for c in 0..classes {
        weights[c * classes + c] = 1.0;
    }

    let mut graph = Vec::new();
    let mut acc = inputs[0].to_string();
    for (i, input) in inputs.iter().enumerate().skip(1) {
        let out = format!("sum_{i}");
        bytes_field(&mut graph, 1, &node("Add", &out, &[&acc, input], &out));
        acc = out;
    }
    bytes_field(&mut graph, 1, &node("MatMul", "project", &[&acc, "W"], "scores"));
    str_field(&mut graph, 2, "point_history_test");
    bytes_field(
        &mut graph,
        5,
        &tensor("W", &[FEATURES as i64, classes as i64], &weights),
    );
    for input in inputs {
        bytes_field(&mut graph, 11, &value_info(input, FEATURES as i64));
    }
    bytes_field(&mut graph, 12, &value_info("scores", classes as i64));

    let mut opset = Vec::new();
    int_field(&mut opset, 2, 13);

    let mut model = Vec::new();
    int_field(&mut model, 1, 8);
    str_field(&mut model, 2, "point-history-tests");
    bytes_field(&mut model, 7, &graph);
    bytes_field(&mut model, 8, &opset);
    model
}

/// Writes a single-input (`point_history`) three-class model to `dir/file_name`.
pub fn write_single_input(dir: &Path, file_name: &str) -> PathBuf {
    write(dir, file_name, &encode(&["point_history"], 3))
}

/// Writes a model with inputs `history_a` and `history_b` whose scores are their sum.
pub fn write_dual_input(dir: &Path, file_name: &str) -> PathBuf {
    write(dir, file_name, &encode(&["history_a", "history_b"], 3))
}

pub fn write(dir: &Path, file_name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// One `[1, 32]` row whose leading features are `scores`.
pub fn row(scores: &[f32]) -> Vec<f32> {
    let mut row = vec![0f32; FEATURES];
    row[..scores.len()].copy_from_slice(scores);
    row
}
