use std::io::{self, BufWriter, Write};

pub trait RowSink {
    fn write_row(&mut self, row: &[f64]) -> io::Result<()>;
    fn finish(self: Box<Self>) -> io::Result<()>;
}

/// Tab-separated rows, one per line, no header and no trailing separator.
pub struct TsvSink<W: Write> {
    w: BufWriter<W>,
}

impl<W: Write> TsvSink<W> {
    pub fn new(inner: W) -> Self { Self { w: BufWriter::new(inner) } }
}

impl<W: Write> RowSink for TsvSink<W> {
    fn write_row(&mut self, row: &[f64]) -> io::Result<()> {
        for (i, v) in row.iter().enumerate() {
            if i > 0 {
                self.w.write_all(b"\t")?;
            }
            write!(self.w, "{v}")?;
        }
        self.w.write_all(b"\n")
    }
    fn finish(mut self: Box<Self>) -> io::Result<()> { self.w.flush() }
}
