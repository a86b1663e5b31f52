// util.rs

use std::io::{self, Write};

pub fn writeln_ignore_broken_pipe<W: Write + ?Sized, S: AsRef<str>>(w: &mut W, s: S) -> io::Result<()> {
    match writeln!(w, "{}", s.as_ref()) {
        Err(ref e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
