//! Console telephone book manager.  A book is a text file of `name:number` lines; the text
//! interface loads one, edits it interactively and writes it back sorted by name on exit.
pub mod codec;
pub mod config;
pub mod contact;
pub mod contact_book;
pub mod logger;
pub mod picker;
pub mod text_io;
pub mod textinterface;
pub mod validator;
