//! Build script for habtx
//!
//! Generates the one-period sine table used by the AFSK tone synthesiser
//! into `$OUT_DIR/sine_table.rs`.

use std::env;
use std::f64::consts::PI;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Entries in one period. Must match `SINE_TABLE_LEN` in `src/consts.rs`.
const TABLE_LEN: usize = 512;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let mut table = String::new();
    let _ = writeln!(table, "/// One period of a sine wave, offset to unsigned 8-bit PWM duty values.");
    let _ = writeln!(table, "static SINE_TABLE: [u8; {TABLE_LEN}] = [");
    for i in 0..TABLE_LEN {
        let angle = 2.0 * PI * i as f64 / TABLE_LEN as f64;
        let sample = (128.0 + 127.0 * angle.sin()).round() as u8;
        let _ = write!(table, "{sample},");
        if i % 16 == 15 {
            table.push('\n');
        }
    }
    table.push_str("];\n");

    let out = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    fs::write(Path::new(&out).join("sine_table.rs"), table).expect("write sine table");
}
