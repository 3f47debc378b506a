//! Operator confirmation before a batch starts.

use crate::scanner::CaptureFile;
use std::io::{self, BufRead, Write};

pub const PROCEED_PROMPT: &str = "Do you want to proceed? (y/n): ";

/// Writes the numbered candidate list followed by the total.
pub fn display_candidates<W: Write>(writer: &mut W, files: &[CaptureFile]) -> io::Result<()> {
    writeln!(writer, "The following files will be processed:")?;
    for (i, file) in files.iter().enumerate() {
        writeln!(writer, "{}: {}", i + 1, file.display_path())?;
    }
    writeln!(writer, "Total {} files.", files.len())?;
    writer.flush()
}

/// Prompts once and reads a single line. End of input counts as a refusal.
pub fn confirm<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, prompt: &str) -> io::Result<bool> {
    write!(writer, "{}", prompt)?;
    writer.flush()?;

    let mut answer = String::new();
    if reader.read_line(&mut answer)? == 0 {
        writeln!(writer)?;
        return Ok(false);
    }

    Ok(is_assent(&answer))
}

/// Only a bare `y` or `Y` is assent.
pub fn is_assent(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn capture(name: &str) -> CaptureFile {
        CaptureFile::new(
            PathBuf::from(name),
            PathBuf::from(format!("{name}.total-stats.txt")),
        )
    }

    #[test]
    fn test_display_candidates() {
        let mut out = Vec::new();
        display_candidates(&mut out, &[capture("a.pcap"), capture("b/c.pcapng")]).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "The following files will be processed:\n1: a.pcap\n2: b/c.pcapng\nTotal 2 files.\n"
        );
    }

    #[test]
    fn test_assent_answers() {
        assert!(is_assent("y"));
        assert!(is_assent("Y\n"));
        assert!(is_assent("  y \r\n"));

        assert!(!is_assent("yes"));
        assert!(!is_assent("n"));
        assert!(!is_assent(""));
        assert!(!is_assent("yy"));
    }

    #[test]
    fn test_confirm_reads_one_line() {
        let mut input = Cursor::new("y\nn\n");
        let mut out = Vec::new();

        assert!(confirm(&mut input, &mut out, PROCEED_PROMPT).unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), PROCEED_PROMPT);
    }

    #[test]
    fn test_confirm_refuses() {
        let mut out = Vec::new();
        assert!(!confirm(&mut Cursor::new("no\n"), &mut out, PROCEED_PROMPT).unwrap());
    }

    #[test]
    fn test_confirm_end_of_input() {
        let mut out = Vec::new();
        assert!(!confirm(&mut Cursor::new(""), &mut out, PROCEED_PROMPT).unwrap());
    }
}
