fn main() {
    println!("cargo:rerun-if-changed=proto/kvstore.proto");
    tonic_prost_build::configure()
        .compile_protos(&["proto/kvstore.proto"], &["proto/"])
        .expect("Failed to compile proto/kvstore.proto");
}
