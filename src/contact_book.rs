use std::collections::HashMap;

use thiserror::Error;

use crate::contact::Contact;

pub type Result<T> = std::result::Result<T, BookError>;

/// ContactBook and its related methods represent the main API for managing the name to number
/// mapping of one telephone book file.  Names are unique keys; no ordering is kept internally,
/// sorted order is produced by sorted_view() when displaying or saving.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactBook {
    contacts: HashMap<String, String>,
}

impl ContactBook {
    pub fn new() -> Self {
        ContactBook {
            contacts: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.contacts.contains_key(name)
    }

    /// Add a new contact.  Fails without touching the book if the name is already in use.
    pub fn insert(&mut self, name: &str, number: &str) -> Result<()> {
        if self.exists(name) {
            return Err(BookError::AlreadyExists(String::from(name)));
        }

        self.contacts.insert(String::from(name), String::from(number));
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&str> {
        self.contacts
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| BookError::NotFound(String::from(name)))
    }

    /// Remove a contact, returning its number.
    pub fn delete(&mut self, name: &str) -> Result<String> {
        self.contacts
            .remove(name)
            .ok_or_else(|| BookError::NotFound(String::from(name)))
    }

    /// Move the number stored under `old` to `new`.  Rejected with no mutation if `new` is
    /// already taken or `old` does not exist.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        if self.exists(new) {
            return Err(BookError::AlreadyExists(String::from(new)));
        }

        let number = self.delete(old)?;
        self.contacts.insert(String::from(new), number);

        Ok(())
    }

    /// Overwrite the number of an existing contact.
    pub fn set_number(&mut self, name: &str, number: &str) -> Result<()> {
        let entry = self.contacts
            .get_mut(name)
            .ok_or_else(|| BookError::NotFound(String::from(name)))?;

        *entry = String::from(number);
        Ok(())
    }

    /// Every contact, ascending by name.
    pub fn sorted_view(&self) -> Vec<Contact> {
        let mut list: Vec<Contact> = self.contacts
            .iter()
            .map(|(name, number)| Contact::new(name, number))
            .collect();

        list.sort();
        list
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookError {
    #[error("Name already exists: {0}")]
    AlreadyExists(String),
    #[error("No such contact: {0}")]
    NotFound(String),
}
