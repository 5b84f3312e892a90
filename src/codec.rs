use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use crate::contact_book::ContactBook;

pub type Result<T> = std::result::Result<T, CodecError>;

/// Parse a telephone book from `name:number` lines.  Each line is split on its first colon.
/// Numbers are taken as-is; they are only validated when typed in interactively.
pub fn read_book<R: BufRead>(reader: R) -> Result<ContactBook> {
    let mut book = ContactBook::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);

        let (name, number) = line.split_once(':').ok_or_else(|| CodecError::MalformedLine {
            line: index + 1,
            content: String::from(line),
        })?;

        if book.insert(name, number).is_err() {
            debug!("Duplicate entry for {} on line {}, keeping the later number", name, index + 1);
            book.set_number(name, number).ok();
        }
    }

    Ok(book)
}

/// Write the book sorted by name, one `name:number` line per contact.
pub fn write_book<W: Write>(mut writer: W, book: &ContactBook) -> Result<()> {
    for contact in book.sorted_view() {
        writeln!(writer, "{}", contact.to_line())?;
    }
    writer.flush()?;

    Ok(())
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<ContactBook> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let book = read_book(BufReader::new(file))?;

    info!("Loaded {} contacts from {}", book.len(), path.display());
    Ok(book)
}

/// Overwrite the file at `path` with the contents of `book`.
pub fn save<P: AsRef<Path>>(path: P, book: &ContactBook) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_book(BufWriter::new(file), book)?;

    info!("Saved {} contacts to {}", book.len(), path.display());
    Ok(())
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line {line} is not a name:number pair: {content:?}")]
    MalformedLine { line: usize, content: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn splits_on_first_colon_and_strips_terminators() {
        let input = "Alice:+7(900)123-45-67\nBob:89001234567\r\nOdd:8:9\n";

        let book = read_book(Cursor::new(input)).unwrap();

        assert_eq!(book.len(), 3);
        assert_eq!(book.lookup("Alice").unwrap(), "+7(900)123-45-67");
        assert_eq!(book.lookup("Bob").unwrap(), "89001234567");
        assert_eq!(book.lookup("Odd").unwrap(), "8:9");
    }

    #[test]
    fn does_not_validate_numbers() {
        let book = read_book(Cursor::new("Zed:not a number\n")).unwrap();
        assert_eq!(book.lookup("Zed").unwrap(), "not a number");
    }

    #[test]
    fn line_without_colon_fails() {
        let input = "Alice:89001234567\nBob 89001234567\n";

        match read_book(Cursor::new(input)) {
            Err(CodecError::MalformedLine { line, content }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "Bob 89001234567");
            },
            other => panic!("expected malformed line, got {:?}", other),
        }
    }

    #[test]
    fn writes_sorted_lines() {
        let mut book = ContactBook::new();
        book.insert("Carol", "89000000003").unwrap();
        book.insert("Alice", "89000000001").unwrap();
        book.insert("Bob", "89000000002").unwrap();

        let mut out = Vec::new();
        write_book(&mut out, &book).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Alice:89000000001\nBob:89000000002\nCarol:89000000003\n"
        );
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.txt");

        let mut book = ContactBook::new();
        book.insert("Alice", "+7(900)123-45-67").unwrap();
        book.insert("bob", "89001234567").unwrap();
        book.insert("Name With Spaces", "anything goes").unwrap();

        save(&path, &book).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, book);
    }

    #[test]
    fn empty_file_is_empty_book() {
        let book = read_book(Cursor::new("")).unwrap();
        assert!(book.is_empty());
    }
}
