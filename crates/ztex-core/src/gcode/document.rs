// crates/ztex-core/src/gcode/document.rs

/// Line terminator of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Eol {
    Lf,
    CrLf,
}

impl Eol {
    pub fn as_str(self) -> &'static str {
        match self {
            Eol::Lf => "\n",
            Eol::CrLf => "\r\n",
        }
    }

    /// Terminator of the first line of `text`; LF when there is none.
    pub fn detect(text: &str) -> Eol {
        match text.find('\n') {
            Some(i) if i > 0 && text.as_bytes()[i - 1] == b'\r' => Eol::CrLf,
            _ => Eol::Lf,
        }
    }
}

/// A motion program held in memory: its lines (without terminators) and the
/// terminator they are written back with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub lines: Vec<String>,
    pub eol: Eol,
}

impl Document {
    pub fn new(lines: Vec<String>, eol: Eol) -> Self {
        Self { lines, eol }
    }

    pub fn parse(text: &str) -> Self {
        let eol = Eol::detect(text);
        let body = text.strip_suffix('\n').unwrap_or(text);
        let lines = if text.is_empty() {
            Vec::new()
        } else {
            body.split('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
                .collect()
        };
        Self { lines, eol }
    }

    /// Every line followed by the document terminator.
    pub fn render(&self) -> String {
        let eol = self.eol.as_str();
        let cap = self.lines.iter().map(|l| l.len() + eol.len()).sum();
        let mut out = String::with_capacity(cap);
        for l in &self.lines {
            out.push_str(l);
            out.push_str(eol);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_crlf_documents_crlf() {
        let d = Document::parse("G1 Z0\r\nG1 Z1\r\n");
        assert_eq!(d.eol, Eol::CrLf);
        assert_eq!(d.lines, vec!["G1 Z0", "G1 Z1"]);
        assert_eq!(d.render(), "G1 Z0\r\nG1 Z1\r\n");
    }

    #[test]
    fn lf_and_missing_final_newline() {
        let d = Document::parse("a\nb");
        assert_eq!(d.eol, Eol::Lf);
        assert_eq!(d.lines, vec!["a", "b"]);
        assert_eq!(d.render(), "a\nb\n");
    }

    #[test]
    fn empty_text_is_empty_document() {
        let d = Document::parse("");
        assert!(d.is_empty());
        assert_eq!(d.eol, Eol::Lf);
        assert_eq!(d.render(), "");
    }

    #[test]
    fn blank_lines_survive() {
        let d = Document::parse("a\n\nb\n");
        assert_eq!(d.lines, vec!["a", "", "b"]);
    }
}
