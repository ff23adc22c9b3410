//! Generated protobuf messages and gRPC stubs for the key-value service.

pub mod kv {
    tonic::include_proto!("kvstore");
}
