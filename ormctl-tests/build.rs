fn main() {
    // Generate form types for integration tests
    // The generated code is only used by tests (via include!), so it won't
    // affect normal library compilation
    let out_dir = std::env::var("OUT_DIR").unwrap();
    ormctl_codegen::FormGenBuilder::new("schema/bookstore.schema.sql")
        .output_dir(&out_dir)
        .force()
        .generate()
        .expect("form generation failed");

    println!("cargo:rerun-if-changed=schema/bookstore.schema.sql");
}
