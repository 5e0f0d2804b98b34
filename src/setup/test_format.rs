use std::cell::RefCell;
use std::io::{self, Write};
use std::str::from_utf8;

use chrono::DateTime;
use pretty_assertions::assert_eq;
use slog::Drain;

use super::log_format::SkinnyFormat;
use super::log_format::TIMESTAMP_FORMAT;

thread_local! {
    static BUFFER: RefCell<Vec<u8>> = RefCell::new(Vec::new());
}

struct TestWriter;

impl Write for TestWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        BUFFER.with(|buffer| buffer.borrow_mut().write(buf))
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_skinny_format() {
    let decorator = slog_term::PlainSyncDecorator::new(TestWriter);
    let drain = SkinnyFormat::new(decorator).fuse();
    let logger = slog::Logger::root(drain, o!());

    info!(logger, "initialized");
    info!(logger, "promised"; "id" => 3, "holder" => "beaver");
    debug!(logger, "propose: failed"; "peer" => "oregon", "err" => %"deadline exceeded");
    warn!(logger, "jumped to promise"; "id" => 23);
    error!(logger, "bad peers"; "peers" => ?["oregon", "spaniel"]);

    let file = "src/setup/test_format.rs";
    let want = vec![
        format!("INFO {}:33 initialized", file),
        format!("INFO {}:34 promised, id: 3, holder: beaver", file),
        format!(
            "DEBG {}:35 propose: failed, peer: oregon, err: deadline exceeded",
            file
        ),
        format!("WARN {}:36 jumped to promise, id: 23", file),
        format!("ERRO {}:37 bad peers, peers: [\"oregon\", \"spaniel\"]", file),
    ];

    BUFFER.with(|buffer| {
        let buffer = buffer.borrow();
        let output = from_utf8(&*buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(want.len(), lines.len());

        for (line, want) in lines.iter().zip(want.iter()) {
            let (ts, rest) = line.split_at(line.find(' ').unwrap());
            assert!(
                DateTime::parse_from_str(ts, TIMESTAMP_FORMAT).is_ok(),
                "timestamp: {}",
                ts
            );
            assert_eq!(want.as_str(), &rest[1..]);
        }
    })
}

#[test]
fn test_skinny_format_logger_values() {
    BUFFER.with(|buffer| buffer.borrow_mut().clear());

    let decorator = slog_term::PlainSyncDecorator::new(TestWriter);
    let drain = SkinnyFormat::new(decorator).fuse();
    let logger = slog::Logger::root(drain, o!("instance" => "london"));

    info!(logger, "initialized");

    BUFFER.with(|buffer| {
        let buffer = buffer.borrow();
        let output = from_utf8(&*buffer).unwrap();
        assert!(
            output.trim_end().ends_with("initialized, instance: london"),
            "output: {}",
            output
        );
    })
}
