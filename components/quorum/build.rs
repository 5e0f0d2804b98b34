extern crate tonic_build;

fn main() {
    tonic_build::configure()
        .build_client(true)
        .build_server(true)
        .compile(
            &[
                "src/proto/consensus.proto",
                "src/proto/lock.proto",
                "src/proto/control.proto",
            ],
            &["src/proto/"],
        )
        .unwrap();
}
