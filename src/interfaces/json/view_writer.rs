use crate::application::view::PortalView;
use crate::domain::package::Package;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Writes snapshots as JSON lines, one object per line.
pub struct ViewWriter<W: Write> {
    sink: W,
}

impl<W: Write> ViewWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn write_view(&mut self, view: &PortalView) -> Result<()> {
        self.write_line(view)
    }

    pub fn write_packages(&mut self, packages: &[Package]) -> Result<()> {
        packages.iter().try_for_each(|p| self.write_line(p))
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.sink, value)?;
        self.sink.write_all(b"\n")?;
        self.sink.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::package::Catalog;
    use crate::domain::session::SessionState;

    #[test]
    fn test_writes_one_line_per_package() {
        let mut out = Vec::new();
        ViewWriter::new(&mut out)
            .write_packages(Catalog::default().list_packages())
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains(r#""duration":"2 Hours""#));
        assert!(lines[1].contains(r#""popular":true"#));
    }

    #[test]
    fn test_writes_view_line() {
        let mut out = Vec::new();
        ViewWriter::new(&mut out)
            .write_view(&PortalView::from(&SessionState::Idle))
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["status"], "idle");
        assert_eq!(value["selected_package"], serde_json::Value::Null);
    }
}
