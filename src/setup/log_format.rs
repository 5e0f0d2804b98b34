use std::io;

use slog::{Drain, OwnedKVList, Record, KV};
use slog_term::{Decorator, RecordDecorator, Serializer};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// SkinnyFormat writes one line per record:
///
/// ```text
/// 2021-03-07T10:13:55.035+01:00 INFO src/lock/lock.rs:32 client: acquire lock, holder: beaver, instance: london
/// ```
pub struct SkinnyFormat<D>
where
    D: Decorator,
{
    decorator: D,
}

impl<D> SkinnyFormat<D>
where
    D: Decorator,
{
    pub fn new(decorator: D) -> SkinnyFormat<D> {
        SkinnyFormat { decorator }
    }
}

impl<D> Drain for SkinnyFormat<D>
where
    D: Decorator,
{
    type Ok = ();
    type Err = io::Error;

    fn log(&self, record: &Record, values: &OwnedKVList) -> io::Result<()> {
        self.decorator.with_record(record, values, |rd| {
            write_header(rd, record)?;
            write_body(rd, record, values)?;

            rd.start_whitespace()?;
            writeln!(rd)?;
            rd.flush()
        })
    }
}

fn write_header(rd: &mut dyn RecordDecorator, record: &Record) -> io::Result<()> {
    rd.start_timestamp()?;
    write!(rd, "{}", chrono::Local::now().format(TIMESTAMP_FORMAT))?;

    rd.start_whitespace()?;
    write!(rd, " ")?;

    rd.start_level()?;
    write!(rd, "{}", record.level().as_short_str())?;

    rd.start_whitespace()?;
    write!(rd, " ")?;

    rd.start_msg()?;
    write!(rd, "{}:{}", record.file(), record.line())
}

/// write_body writes the message, then the record's own fields, then the logger's.
fn write_body(rd: &mut dyn RecordDecorator, record: &Record, values: &OwnedKVList) -> io::Result<()> {
    rd.start_whitespace()?;
    write!(rd, " ")?;

    rd.start_msg()?;
    write!(rd, "{}", record.msg())?;

    let mut serializer = Serializer::new(rd, true, true);
    record.kv().serialize(record, &mut serializer)?;
    values.serialize(record, &mut serializer)?;
    serializer.finish()
}
