/// State of the inline "add another column" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewColumnForm {
    open: bool,
    title: String,
    focus_requested: bool,
}

impl NewColumnForm {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Title as it would be submitted, `None` when blank
    pub fn submitted_title(&self) -> Option<&str> {
        let trimmed = self.title.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Opening the form asks the shell to focus and select the input
    pub fn open(&mut self) {
        self.open = true;
        self.focus_requested = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn request_focus(&mut self) {
        self.focus_requested = true;
    }

    /// Returns whether the input should grab focus, clearing the request
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// Clears the title and closes the form after a successful submit
    pub fn reset(&mut self) {
        self.title.clear();
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_requests_focus_on_open() {
        let mut form = NewColumnForm::default();
        assert!(!form.is_open());

        form.toggle();
        assert!(form.is_open());
        assert!(form.take_focus_request());
        assert!(!form.take_focus_request());

        form.toggle();
        assert!(!form.is_open());
        assert!(!form.take_focus_request());
    }

    #[test]
    fn test_submitted_title_is_trimmed() {
        let mut form = NewColumnForm::default();

        form.set_title("   ");
        assert_eq!(form.submitted_title(), None);

        form.set_title("  Review ");
        assert_eq!(form.submitted_title(), Some("Review"));
    }

    #[test]
    fn test_reset() {
        let mut form = NewColumnForm::default();
        form.open();
        form.set_title("Done");

        form.reset();

        assert!(!form.is_open());
        assert_eq!(form.title(), "");
    }
}
