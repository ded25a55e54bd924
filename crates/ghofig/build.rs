//! Convert `data/reference.md` into the embedded lookup database.

use std::env;
use std::path::PathBuf;

#[path = "src/catalog.rs"]
#[allow(dead_code)]
mod catalog;

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR"));
    let reference = manifest_dir.join("data").join("reference.md");
    println!("cargo:rerun-if-changed={}", reference.display());
    println!("cargo:rerun-if-changed=src/catalog.rs");

    let text = std::fs::read_to_string(&reference)
        .unwrap_or_else(|err| panic!("read {}: {err}", reference.display()));
    let entries = catalog::parse_reference(&text);
    assert!(
        !entries.is_empty(),
        "no options parsed from {}",
        reference.display()
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR"));
    let database = out_dir.join("ghofig.db");
    catalog::write_database(&database, &entries)
        .unwrap_or_else(|err| panic!("write {}: {err}", database.display()));
}
