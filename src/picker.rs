use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use thiserror::Error;

use crate::text_io::TextIO;

pub type Result<T> = std::result::Result<T, PickerError>;

/// Outcome of choosing a file from the directory listing.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Pick {
    Cancelled,
    File(String),
}

/// Lists the telephone book files of one directory and lets the user pick one by number.
#[derive(Debug, Clone)]
pub struct Picker {
    dir: PathBuf,
    extension: String,
}

impl Picker {
    /// `dir_path` is taken as typed; surrounding quotes and whitespace are dropped.
    pub fn new(dir_path: &str, extension: &str) -> Self {
        let cleaned = dir_path.trim().trim_matches(|c: char| c == '"' || c == '\'');

        Picker {
            dir: PathBuf::from(cleaned),
            extension: String::from(extension.trim_start_matches('.')),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// File names directly under the directory that carry the book extension, sorted by name.
    pub fn list_text_files(&self) -> Result<Vec<String>> {
        let suffix = format!(".{}", self.extension);
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(&suffix) {
                    files.push(String::from(name));
                }
            }
        }

        files.sort();
        Ok(files)
    }

    /// Print the numbered listing and read a 1-based choice.  Out of range numbers are asked
    /// again; anything that is not a number cancels the pick.
    pub fn choose<R: BufRead, W: Write>(&self, io: &mut TextIO<R, W>) -> Result<Pick> {
        let files = self.list_text_files()?;
        if files.is_empty() {
            return Err(PickerError::NoTextFiles(self.dir.clone()));
        }

        io.say("\nThose are the text files in this directory:")?;
        for (index, file) in files.iter().enumerate() {
            io.say(&format!("{}. {}", index + 1, file))?;
        }

        let mut prompt = "\nWhich one do you want to open now? (enter a number)\n";
        loop {
            let answer = io.read_line(prompt)?;

            let choice = match i64::from_str(answer.trim()) {
                Ok(num) => num,
                Err(_) => {
                    debug!("File pick cancelled with {:?}", answer);
                    return Ok(Pick::Cancelled);
                },
            };

            let index = usize::try_from(choice).ok().filter(|&num| num >= 1 && num <= files.len());
            if let Some(index) = index {
                let file = files[index - 1].clone();
                io.say(&format!("You're now working with {}\n", file))?;
                return Ok(Pick::File(file));
            }

            prompt = "Please, choose a number from the list above.\nNumber: ";
        }
    }
}

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("Could not read directory: {0}")]
    Io(#[from] io::Error),
    #[error("No telephone book files found in {}", .0.display())]
    NoTextFiles(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn dir_with(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            fs::write(dir.path().join(file), "").unwrap();
        }
        dir
    }

    fn picker_for(dir: &tempfile::TempDir) -> Picker {
        Picker::new(dir.path().to_str().unwrap(), "txt")
    }

    fn scripted(input: &str) -> TextIO<Cursor<Vec<u8>>, Vec<u8>> {
        TextIO::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn strips_quotes_from_path() {
        let picker = Picker::new("  \"/tmp/books\"\n", ".txt");
        assert_eq!(picker.dir(), Path::new("/tmp/books"));
        assert_eq!(picker.path_of("a.txt"), Path::new("/tmp/books/a.txt"));
    }

    #[test]
    fn lists_only_text_files_sorted() {
        let dir = dir_with(&["b.txt", "a.txt", "notes.md", "txt", "c.txt.bak"]);
        fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let files = picker_for(&dir).list_text_files().unwrap();

        assert_eq!(files, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let picker = Picker::new("/definitely/not/here", "txt");
        assert!(matches!(picker.list_text_files(), Err(PickerError::Io(_))));
    }

    #[test]
    fn reprompts_until_in_range() {
        let dir = dir_with(&["a.txt", "b.txt"]);
        let mut io = scripted("0\n3\n2\n");

        let pick = picker_for(&dir).choose(&mut io).unwrap();

        assert_eq!(pick, Pick::File(String::from("b.txt")));
        let output = String::from_utf8(io.output().clone()).unwrap();
        assert_eq!(output.matches("Please, choose a number from the list above.").count(), 2);
        assert!(output.contains("1. a.txt\n2. b.txt\n"));
        assert!(output.contains("You're now working with b.txt"));
    }

    #[test]
    fn negative_number_is_asked_again() {
        let dir = dir_with(&["a.txt"]);
        let mut io = scripted("-1\n1\n");

        let pick = picker_for(&dir).choose(&mut io).unwrap();

        assert_eq!(pick, Pick::File(String::from("a.txt")));
        let output = String::from_utf8(io.output().clone()).unwrap();
        assert_eq!(output.matches("Please, choose a number from the list above.").count(), 1);
    }

    #[test]
    fn non_numeric_answer_cancels() {
        let dir = dir_with(&["a.txt"]);

        let pick = picker_for(&dir).choose(&mut scripted("cancel\n")).unwrap();
        assert_eq!(pick, Pick::Cancelled);

        let pick = picker_for(&dir).choose(&mut scripted("5\nnope\n")).unwrap();
        assert_eq!(pick, Pick::Cancelled);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = dir_with(&["readme.md"]);

        let result = picker_for(&dir).choose(&mut scripted("1\n"));
        assert!(matches!(result, Err(PickerError::NoTextFiles(_))));
    }
}
