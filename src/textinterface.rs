use std::io::{self, BufRead, Write};

use log::{debug, info, warn};
use thiserror::Error;

use crate::codec::{self, CodecError};
use crate::config::Settings;
use crate::contact_book::{BookError, ContactBook};
use crate::picker::{Pick, Picker, PickerError};
use crate::text_io::{Input, TextIO};
use crate::validator;

pub type Result<T> = std::result::Result<T, TextInterfaceError>;

/// What the main menu loop does after an operation returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

struct Command<R, W> {
    key: &'static str,
    label: &'static str,
    operation: fn(&mut TextInterface<R, W>) -> Result<Flow>,
}

/// The interactive session over one telephone book file.  The book is loaded when the session
/// is opened and written back to the same file when the menu loop ends.
pub struct TextInterface<R, W> {
    io: TextIO<R, W>,
    picker: Picker,
    file_name: String,
    book: ContactBook,
    commands: Vec<Command<R, W>>,
}

impl<R: BufRead, W: Write> TextInterface<R, W> {
    /// Ask for the directory and the book file, then load it.  Returns Ok(None) if the user
    /// backs out of the file choice; nothing is written in that case.
    pub fn open(mut io: TextIO<R, W>, settings: &Settings) -> Result<Option<Self>> {
        let dir_path = io.read_line("Enter an absolute path to the directory with telephone book text files:\n")?;
        let picker = Picker::new(&dir_path, settings.extension());

        let file_name = match picker.choose(&mut io)? {
            Pick::File(name) => name,
            Pick::Cancelled => {
                warn!("No telephone book chosen in {}", picker.dir().display());
                return Ok(None);
            },
        };

        let book = codec::load(picker.path_of(&file_name))?;

        Ok(Some(TextInterface::with_book(io, picker, file_name, book)))
    }

    fn with_book(io: TextIO<R, W>, picker: Picker, file_name: String, book: ContactBook) -> Self {
        let mut commands: Vec<Command<R, W>> = Vec::new();

        commands.push(Command {
            key: "1",
            label: "Create contact",
            operation: TextInterface::create,
        });

        commands.push(Command {
            key: "2",
            label: "Change contact",
            operation: TextInterface::change,
        });

        commands.push(Command {
            key: "3",
            label: "Find contact",
            operation: TextInterface::find,
        });

        commands.push(Command {
            key: "4",
            label: "Delete contact",
            operation: TextInterface::delete,
        });

        commands.push(Command {
            key: "5",
            label: "Show contacts",
            operation: TextInterface::show,
        });

        commands.push(Command {
            key: "6",
            label: "Copy a contact from another file",
            operation: TextInterface::copy_from_file,
        });

        commands.push(Command {
            key: "7",
            label: "Exit",
            operation: TextInterface::exit,
        });

        TextInterface {
            io,
            picker,
            file_name,
            book,
            commands,
        }
    }

    pub fn book(&self) -> &ContactBook {
        &self.book
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn io(&self) -> &TextIO<R, W> {
        &self.io
    }

    /// Run the menu until the user exits or input runs out, then save the book.  Any other
    /// error ends the session without saving.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.step() {
                Ok(Flow::Continue) => continue,
                Ok(Flow::Exit) => break,
                Err(e) if e.is_input_closed() => {
                    info!("Input closed, leaving the menu");
                    break;
                },
                Err(e) => return Err(e),
            }
        }

        self.save()
    }

    fn save(&self) -> Result<()> {
        codec::save(self.picker.path_of(&self.file_name), &self.book)?;
        Ok(())
    }

    fn step(&mut self) -> Result<Flow> {
        self.print_menu()?;

        let choice = self.io.read_line("Choose the number: ")?;

        let op = self.commands
            .iter()
            .find(|command| command.key == choice)
            .map(|command| command.operation);

        match op {
            Some(op) => op(self),
            None => {
                self.io.say("\nEnter the number provided above!\n")?;
                Ok(Flow::Continue)
            },
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        for command in &self.commands {
            self.io.say(&format!("{}. {}", command.key, command.label))?;
        }
        self.io.say("If you accidentally pressed the wrong button, write 'cancel'")?;
        Ok(())
    }

    fn create(&mut self) -> Result<Flow> {
        loop {
            let name = match ask_until(&mut self.io, "\nName: ", name_format_rejection)? {
                Input::Cancelled => return Ok(Flow::Continue),
                Input::Value(name) => name,
            };

            let number = match ask_until(&mut self.io, "Telephone number: ", |number| {
                number_rejection(number, "You should enter a valid Russian telephone number. Try again: ")
            })? {
                Input::Cancelled => return Ok(Flow::Continue),
                Input::Value(number) => number,
            };

            if let Err(e) = self.book.insert(&name, &number) {
                debug!("{}", e);
                self.io.say("Name already exists")?;
                continue;
            }

            debug!("Created contact {}", name);
            self.io.say("")?;
            return Ok(Flow::Continue);
        }
    }

    fn change(&mut self) -> Result<Flow> {
        let mut prompt = "\nDo you want change name or number? ";

        loop {
            let option = match self.io.ask(prompt)? {
                Input::Cancelled => return Ok(Flow::Continue),
                Input::Value(option) => option,
            };

            match option.as_str() {
                "name" => return self.change_name(),
                "number" => return self.change_number(),
                _ => {
                    self.io.say("Enter either 'name' or 'number'")?;
                    prompt = "Do you want change name or number? ";
                },
            }
        }
    }

    fn change_name(&mut self) -> Result<Flow> {
        let old = match self.existing_contact()? {
            Input::Cancelled => return Ok(Flow::Continue),
            Input::Value(name) => name,
        };

        let book = &self.book;
        let new = match ask_until(&mut self.io, "A new name for this contact: ", |name| {
            name_format_rejection(name).or_else(|| {
                if book.exists(name) {
                    Some("A contact with this name already exists. Enter a different name: ")
                } else {
                    None
                }
            })
        })? {
            Input::Cancelled => return Ok(Flow::Continue),
            Input::Value(name) => name,
        };

        self.book.rename(&old, &new)?;
        debug!("Renamed contact {} to {}", old, new);

        self.io.say("")?;
        Ok(Flow::Continue)
    }

    fn change_number(&mut self) -> Result<Flow> {
        let name = match self.existing_contact()? {
            Input::Cancelled => return Ok(Flow::Continue),
            Input::Value(name) => name,
        };

        let number = match ask_until(&mut self.io, "Enter a new number: ", |number| {
            number_rejection(number, "Invalid number. Try again: ")
        })? {
            Input::Cancelled => return Ok(Flow::Continue),
            Input::Value(number) => number,
        };

        self.book.set_number(&name, &number)?;
        debug!("Changed number of {}", name);

        self.io.say("")?;
        Ok(Flow::Continue)
    }

    /// Ask for the name of a contact in the book until a known one (or cancel) is given.
    fn existing_contact(&mut self) -> Result<Input> {
        let book = &self.book;

        let input = ask_until(&mut self.io, "Enter the name of the contact to change: ", |name| {
            if book.exists(name) {
                None
            } else {
                Some("There's no such contact. Write the name again: ")
            }
        })?;

        Ok(input)
    }

    fn find(&mut self) -> Result<Flow> {
        let name = self.io.read_line("\nEnter a name: ")?;

        let message = match self.book.lookup(&name) {
            Ok(number) => String::from(number),
            Err(_) => String::from("No such contact. Use '5. Show contacts'"),
        };

        self.io.say(&message)?;
        self.io.say("")?;
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> Result<Flow> {
        loop {
            write_contacts(&mut self.io, &self.book)?;

            let name = match self.io.ask("What contact you'd like to delete: ")? {
                Input::Cancelled => return Ok(Flow::Continue),
                Input::Value(name) => name,
            };

            if self.book.delete(&name).is_ok() {
                debug!("Deleted contact {}", name);
                self.io.say("")?;
                return Ok(Flow::Continue);
            }
        }
    }

    fn show(&mut self) -> Result<Flow> {
        write_contacts(&mut self.io, &self.book)?;
        Ok(Flow::Continue)
    }

    /// Copy one contact from another book in the same directory.  The other book is only read.
    fn copy_from_file(&mut self) -> Result<Flow> {
        let file_name = loop {
            match self.picker.choose(&mut self.io)? {
                Pick::Cancelled => return Ok(Flow::Continue),
                Pick::File(name) if name == self.file_name => {
                    self.io.say("You can't copy from the original file!")?;
                },
                Pick::File(name) => break name,
            }
        };

        let other = codec::load(self.picker.path_of(&file_name))?;

        self.io.say(&format!("Contacts from {}:", file_name))?;
        write_contacts(&mut self.io, &other)?;

        let mut prompt = "Which one do you want to copy to another file? (enter a name)\n";
        let name = loop {
            let name = match self.io.ask(prompt)? {
                Input::Cancelled => return Ok(Flow::Continue),
                Input::Value(name) => name,
            };

            if self.book.exists(&name) {
                warn!("Not copying {} from {}, the name is taken", name, file_name);
                self.io.say("There's already a contact with this name in the original telephone book")?;
                return Ok(Flow::Continue);
            }

            if other.exists(&name) {
                break name;
            }

            prompt = "There's no such contacts in the file. The name: ";
        };

        self.book.insert(&name, other.lookup(&name)?)?;
        debug!("Copied contact {} from {}", name, file_name);

        Ok(Flow::Continue)
    }

    fn exit(&mut self) -> Result<Flow> {
        self.io.say("Thank you for working with us!")?;
        Ok(Flow::Exit)
    }
}

/// Keep asking until `reject` accepts the answer or the user cancels.  `reject` returns the
/// prompt to show next when the answer is refused.
fn ask_until<R, W, F>(io: &mut TextIO<R, W>, prompt: &str, reject: F) -> io::Result<Input>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Option<&'static str>,
{
    let mut prompt = String::from(prompt);

    loop {
        match io.ask(&prompt)? {
            Input::Cancelled => return Ok(Input::Cancelled),
            Input::Value(answer) => match reject(&answer) {
                None => return Ok(Input::Value(answer)),
                Some(next) => prompt = String::from(next),
            },
        }
    }
}

/// Names are stored as the part before the first colon of a line, so they can't hold one.
fn name_format_rejection(name: &str) -> Option<&'static str> {
    if name.is_empty() || name.contains(':') {
        Some("A name can't be empty or contain ':'. Enter a different name: ")
    } else {
        None
    }
}

fn number_rejection(number: &str, retry: &'static str) -> Option<&'static str> {
    if validator::is_invalid_number(number) {
        Some(retry)
    } else {
        None
    }
}

fn write_contacts<R: BufRead, W: Write>(io: &mut TextIO<R, W>, book: &ContactBook) -> io::Result<()> {
    io.say("")?;
    for contact in book.sorted_view() {
        io.say(&contact.to_string())?;
    }
    io.say("")
}

#[derive(Debug, Error)]
pub enum TextInterfaceError {
    #[error("IO Error({0})")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Picker(#[from] PickerError),
    #[error(transparent)]
    Book(#[from] BookError),
}

impl TextInterfaceError {
    /// True when the console input stream ended, as opposed to a real failure.
    pub fn is_input_closed(&self) -> bool {
        match self {
            TextInterfaceError::Io(e) | TextInterfaceError::Picker(PickerError::Io(e)) => {
                e.kind() == io::ErrorKind::UnexpectedEof
            },
            _ => false,
        }
    }
}
