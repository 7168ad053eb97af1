use std::io::{self, Write};
use std::path::Path;

pub const BANNER_WIDTH: usize = 60;

/// Body of a single record in the dump.
#[derive(Debug, Clone, Copy)]
pub enum RecordBody<'a> {
    Content(&'a str),
    Error(&'a str),
}

/// Serializes banner-delimited records to an output stream.
///
/// ```text
/// ============================================================
/// FILE: <path>
/// ============================================================
///
/// <content>
///
/// ```
pub struct RecordWriter<W: Write> {
    inner: W,
    bytes_written: u64,
    records_written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
            records_written: 0,
        }
    }

    pub fn write_banner(&mut self, path: &Path) -> io::Result<()> {
        let rule = "=".repeat(BANNER_WIDTH);
        self.write_str(&format!("{rule}\nFILE: {}\n{rule}\n\n", path.display()))
    }

    pub fn write_body(&mut self, body: RecordBody<'_>) -> io::Result<()> {
        match body {
            RecordBody::Content(content) => {
                self.write_str(content)?;
                self.write_str("\n\n")?;
            }
            RecordBody::Error(message) => {
                self.write_str(&format!("ERROR reading file: {}\n\n", message))?;
            }
        }
        self.records_written += 1;
        Ok(())
    }

    pub fn write_record(&mut self, path: &Path, body: RecordBody<'_>) -> io::Result<()> {
        self.write_banner(path)?;
        self.write_body(body)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_all(text.as_bytes())?;
        self.bytes_written += text.len() as u64;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> String {
        "=".repeat(60)
    }

    #[test]
    fn test_content_record_layout() {
        let mut writer = RecordWriter::new(Vec::new());
        writer
            .write_record(Path::new("./src/battle-screen.tsx"), RecordBody::Content("hello"))
            .unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let expected = format!(
            "{r}\nFILE: ./src/battle-screen.tsx\n{r}\n\nhello\n\n",
            r = rule()
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_error_record_layout() {
        let mut writer = RecordWriter::new(Vec::new());
        writer
            .write_record(Path::new("a/battleManager.js"), RecordBody::Error("Permission denied"))
            .unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert!(output.ends_with("\n\nERROR reading file: Permission denied\n\n"));
        assert!(output.starts_with(&format!("{}\nFILE: a/battleManager.js\n", rule())));
    }

    #[test]
    fn test_content_is_written_verbatim() {
        let content = "line one\r\nline two\n\n\ttabbed ünïcode ✓\n";
        let mut writer = RecordWriter::new(Vec::new());
        writer.write_record(Path::new("f"), RecordBody::Content(content)).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert!(output.contains(&format!("\n\n{}\n\n", content)));
    }

    #[test]
    fn test_counters() {
        let mut writer = RecordWriter::new(Vec::new());
        assert_eq!(writer.records_written(), 0);

        writer.write_record(Path::new("x"), RecordBody::Content("x")).unwrap();
        writer.write_record(Path::new("y"), RecordBody::Error("e")).unwrap();

        assert_eq!(writer.records_written(), 2);
        let written = writer.bytes_written();
        assert_eq!(written, writer.into_inner().len() as u64);
    }
}
