use std::io::{self, BufWriter, Write};

/// Writes received bytes as decimal values with no separators.
pub struct DecimalWriter<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> DecimalWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::new(out),
        }
    }

    pub fn emit(&mut self, byte: u8) -> io::Result<()> {
        write!(self.out, "{byte}")
    }

    pub fn finish(self) -> io::Result<W> {
        let mut inner = self.out.into_inner().map_err(|err| err.into_error())?;
        inner.flush()?;
        Ok(inner)
    }
}

pub fn stdout() -> DecimalWriter<io::Stdout> {
    DecimalWriter::new(io::stdout())
}
