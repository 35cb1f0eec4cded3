//! Single-select expansion state for result rows.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    open: Option<String>,
}

impl Expansion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `id`, or close it if it is already the open row.
    ///
    /// Opening one row closes any other.
    pub fn toggle(&mut self, id: &str) -> Option<&str> {
        if self.is_open(id) {
            self.open = None;
        } else {
            self.open = Some(id.to_string());
        }
        self.open()
    }

    pub fn open(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.as_deref() == Some(id)
    }

    pub fn close(&mut self) {
        self.open = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let expansion = Expansion::new();
        assert_eq!(expansion.open(), None);
        assert!(!expansion.is_open("health"));
    }

    #[test]
    fn toggling_the_open_row_closes_it() {
        let mut expansion = Expansion::new();
        assert_eq!(expansion.toggle("health"), Some("health"));
        assert_eq!(expansion.toggle("health"), None);
        assert_eq!(expansion, Expansion::new());
    }

    #[test]
    fn opening_another_row_closes_the_first() {
        let mut expansion = Expansion::new();
        expansion.toggle("health");
        assert_eq!(expansion.toggle("team"), Some("team"));
        assert!(!expansion.is_open("health"));
        assert!(expansion.is_open("team"));

        expansion.close();
        assert_eq!(expansion.open(), None);
    }
}
