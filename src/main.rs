use std::process;

use phonebook::config::Settings;
use phonebook::logger;
use phonebook::text_io::TextIO;
use phonebook::textinterface::TextInterface;

fn main() {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        },
    };

    if let Err(e) = logger::setup(&settings) {
        eprintln!("Could not set up logging: {}", e);
    }

    let result = TextInterface::open(TextIO::stdio(), &settings).and_then(|interface| {
        match interface {
            Some(mut interface) => interface.run(),
            None => Ok(()),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
