//! Shared helpers for the integration tests: a capture sink so the trace
//! can be scraped as plain text.

use std::io;
use std::sync::{Arc, Mutex};

use suitetrace::Printer;
use termcolor::NoColor;

#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Printer writing plain (color-stripped) text into a shared buffer.
pub fn capture_printer() -> (Printer, SharedBuf) {
    let buf = SharedBuf::default();
    let printer = Printer::new(Box::new(NoColor::new(buf.clone())));
    (printer, buf)
}
