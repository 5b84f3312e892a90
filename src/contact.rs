use std::cmp::Ordering;
use std::fmt;

/// A single telephone book entry.  The name is the unique key in a ContactBook; the number is
/// kept as typed.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Contact {
    name: String,
    number: String,
}

impl Contact {
    pub fn new(name: &str, number: &str) -> Self {
        Contact {
            name: String::from(name),
            number: String::from(number),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// Render the contact as one line of a telephone book file, without the line terminator.
    pub fn to_line(&self) -> String {
        format!("{}:{}", self.name, self.number)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.number)
    }
}

impl PartialOrd for Contact {
    fn partial_cmp(&self, other: &Contact) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Contact {
    fn cmp(&self, other: &Contact) -> Ordering {
        if self.name != other.name {
            self.name.cmp(&other.name)
        } else {
            self.number.cmp(&other.number)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_file_line() {
        let contact = Contact::new("Alice", "+7(900)123-45-67");
        assert_eq!(contact.to_string(), "Alice: +7(900)123-45-67");
        assert_eq!(contact.to_line(), "Alice:+7(900)123-45-67");
    }

    #[test]
    fn orders_by_name() {
        let mut contacts = vec![
            Contact::new("Carol", "89000000001"),
            Contact::new("Alice", "89000000003"),
            Contact::new("Bob", "89000000002"),
        ];
        contacts.sort();

        let names: Vec<&str> = contacts.iter().map(Contact::name).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn ordering_agrees_with_equality() {
        let first = Contact::new("Alice", "89000000001");
        let second = Contact::new("Alice", "89000000002");

        assert_ne!(first, second);
        assert_ne!(first.cmp(&second), Ordering::Equal);
        assert_eq!(first.cmp(&first.clone()), Ordering::Equal);
    }
}
