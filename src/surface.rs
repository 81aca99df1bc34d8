use super::*;

/// Success marker class on a validated field.
pub const VALID_CLASS: &str = "is-valid";
/// Failure marker class on a validated field.
pub const INVALID_CLASS: &str = "is-invalid";
/// Class identifying the error-message element adjacent to a field.
pub const FEEDBACK_CLASS: &str = "invalid-feedback";

/// Visual validity of a field. A field not yet validated carries neither
/// marker class; setting a state always clears the opposite marker, so a
/// field is in exactly one of neutral, valid, or invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid,
}

/// The capability surface behaviors mutate instead of an ambient document.
///
/// `Page` is the production implementation; tests can substitute a
/// recording fake to exercise validation and visibility logic without any
/// document at all.
pub trait PresentationSurface {
    type Handle: Copy;

    fn field_value(&self, field: Self::Handle) -> Result<String>;

    fn set_validity_state(&mut self, field: Self::Handle, validity: Validity) -> Result<()>;

    /// Ensures exactly one error-message element immediately follows the
    /// field, creating it if absent and reusing it otherwise, with its text
    /// set to `message`.
    fn ensure_error_message(&mut self, field: Self::Handle, message: &str) -> Result<()>;

    /// Removes the error-message element adjacent to the field, if any.
    fn remove_error_message(&mut self, field: Self::Handle) -> Result<()>;

    fn set_container_visibility(&mut self, container: Self::Handle, visible: bool) -> Result<()>;
}

impl PresentationSurface for Page {
    type Handle = NodeId;

    fn field_value(&self, field: NodeId) -> Result<String> {
        self.dom.value(field)
    }

    fn set_validity_state(&mut self, field: NodeId, validity: Validity) -> Result<()> {
        match validity {
            Validity::Valid => {
                self.dom.class_add(field, VALID_CLASS)?;
                self.dom.class_remove(field, INVALID_CLASS)
            }
            Validity::Invalid => {
                self.dom.class_add(field, INVALID_CLASS)?;
                self.dom.class_remove(field, VALID_CLASS)
            }
        }
    }

    fn ensure_error_message(&mut self, field: NodeId, message: &str) -> Result<()> {
        let existing = self
            .dom
            .next_element_sibling(field)
            .filter(|&sibling| {
                self.dom
                    .class_contains(sibling, FEEDBACK_CLASS)
                    .unwrap_or(false)
            });

        let feedback = match existing {
            Some(node) => node,
            None => {
                let node = self.dom.create_detached_element("div");
                self.dom.class_add(node, FEEDBACK_CLASS)?;
                self.dom.insert_after(field, node)?;
                node
            }
        };

        self.dom.set_text(feedback, message);
        Ok(())
    }

    fn remove_error_message(&mut self, field: NodeId) -> Result<()> {
        if let Some(sibling) = self.dom.next_element_sibling(field) {
            if self.dom.class_contains(sibling, FEEDBACK_CLASS)? {
                self.dom.remove_node(sibling);
            }
        }
        Ok(())
    }

    fn set_container_visibility(&mut self, container: NodeId, visible: bool) -> Result<()> {
        self.dom
            .set_display(container, if visible { "block" } else { "none" })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A documentless surface: fields are slots, side effects are recorded.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSurface {
        pub(crate) values: Vec<String>,
        pub(crate) validity: Vec<Option<Validity>>,
        pub(crate) messages: Vec<Option<String>>,
        pub(crate) visible: Vec<Option<bool>>,
    }

    impl RecordingSurface {
        pub(crate) fn with_fields(values: &[&str]) -> Self {
            Self {
                values: values.iter().map(|v| v.to_string()).collect(),
                validity: vec![None; values.len()],
                messages: vec![None; values.len()],
                visible: vec![None; values.len()],
            }
        }
    }

    impl PresentationSurface for RecordingSurface {
        type Handle = usize;

        fn field_value(&self, field: usize) -> Result<String> {
            Ok(self.values[field].clone())
        }

        fn set_validity_state(&mut self, field: usize, validity: Validity) -> Result<()> {
            self.validity[field] = Some(validity);
            Ok(())
        }

        fn ensure_error_message(&mut self, field: usize, message: &str) -> Result<()> {
            self.messages[field] = Some(message.to_string());
            Ok(())
        }

        fn remove_error_message(&mut self, field: usize) -> Result<()> {
            self.messages[field] = None;
            Ok(())
        }

        fn set_container_visibility(&mut self, container: usize, visible: bool) -> Result<()> {
            self.visible[container] = Some(visible);
            Ok(())
        }
    }
}
