//! Deterministic client form behaviors for storefront alert pages.
//!
//! Re-expresses the browser-side glue of a Salla/Zid price-alert application
//! (URL allow-list validation, Arabic-Indic digit normalization, dependent
//! field visibility, destructive-action confirmation, widget bootstrap) as
//! explicitly installable components running against an in-memory document,
//! so every behavior is testable without a browser.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;

mod behaviors;
mod dom;
mod html;
mod pattern;
mod selector;
mod surface;
mod wiring;

pub use behaviors::confirm::{
    AcceptAll, CONFIRM_DELETE_MESSAGE, ConfirmPrompt, DeclineAll, ScriptedPrompt,
};
pub use behaviors::digits::arabic_to_ascii_digits;
pub use behaviors::url::{ALLOWED_DOMAIN_PATTERN, INVALID_URL_MESSAGE, UrlValidator};
pub use behaviors::visibility::VisibilityRule;
pub use behaviors::widgets::{NullToolkit, RecordingToolkit, WidgetToolkit};
pub use dom::NodeId;
pub use surface::{FEEDBACK_CLASS, INVALID_CLASS, PresentationSurface, VALID_CLASS, Validity};
pub use wiring::{
    WidgetCount, install_all, install_confirm_delete, install_digit_normalization,
    install_field_visibility, install_url_validation, install_widgets,
};

use dom::Dom;
use pattern::Pattern;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    Pattern(String),
    Behavior(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::Pattern(msg) => write!(f, "pattern error: {msg}"),
            Self::Behavior(msg) => write!(f, "behavior error: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
        }
    }
}

impl StdError for Error {}

/// Event kinds this crate's behaviors can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Input,
    Blur,
    Change,
    Submit,
}

impl EventKind {
    fn parse(name: &str) -> Result<Self> {
        match name {
            "input" => Ok(Self::Input),
            "blur" => Ok(Self::Blur),
            "change" => Ok(Self::Change),
            "submit" => Ok(Self::Submit),
            other => Err(Error::Behavior(format!("unsupported event type: {other}"))),
        }
    }
}

/// Whether a dispatched submit ran its default action or was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Proceeded,
    Prevented,
}

/// An installed handler. Behaviors are data, not closures, so dispatch can
/// clone one out of the store and run it against the page itself.
#[derive(Debug, Clone)]
pub(crate) enum Behavior {
    ValidateUrl(UrlValidator),
    NormalizeDigits,
    ApplyVisibility(VisibilityRule<NodeId>),
    ConfirmSubmit,
}

#[derive(Debug, Default, Clone)]
struct ListenerStore {
    map: HashMap<NodeId, HashMap<EventKind, Vec<usize>>>,
}

impl ListenerStore {
    fn add(&mut self, node_id: NodeId, event: EventKind, behavior: usize) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event)
            .or_default()
            .push(behavior);
    }

    fn get(&self, node_id: NodeId, event: EventKind) -> Vec<usize> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(&event))
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
struct EventState {
    default_prevented: bool,
}

impl EventState {
    fn new() -> Self {
        Self {
            default_prevented: false,
        }
    }
}

/// An in-memory page: the document plus every behavior installed on it.
///
/// Dispatch is synchronous and run-to-completion; no two handlers ever
/// observe the document mid-mutation.
#[derive(Debug)]
pub struct Page {
    dom: Dom,
    listeners: ListenerStore,
    behaviors: Vec<Behavior>,
    prompt: Box<dyn ConfirmPrompt>,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        let dom = html::parse_html(html)?;
        Ok(Self {
            dom,
            listeners: ListenerStore::default(),
            behaviors: Vec::new(),
            prompt: Box::new(AcceptAll),
        })
    }

    /// Replaces the confirmation prompt consulted by confirm-delete forms.
    /// The default accepts everything.
    pub fn set_confirm_prompt(&mut self, prompt: Box<dyn ConfirmPrompt>) {
        self.prompt = prompt;
    }

    pub(crate) fn add_listener(&mut self, target: NodeId, event: EventKind, behavior: Behavior) {
        let id = self.behaviors.len();
        self.behaviors.push(behavior);
        self.listeners.add(target, event, id);
    }

    pub(crate) fn query_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        selector::query_all(&self.dom, selector)
    }

    fn select_one(&self, selector: &str) -> Result<NodeId> {
        selector::query_all(&self.dom, selector)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    pub(crate) fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.dom.by_id(id)
    }

    /// The wrapping container of the element with the given id: its parent
    /// element, the unit the visibility rules hide or show.
    pub(crate) fn container_of(&self, id: &str) -> Option<NodeId> {
        let node = self.dom.by_id(id)?;
        let parent = self.dom.parent(node)?;
        self.dom.element(parent).map(|_| parent)
    }

    /// Sets an input's or textarea's value, firing `input`.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let tag = self
            .dom
            .tag_name(target)
            .ok_or_else(|| Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: "non-element".into(),
            })?
            .to_ascii_lowercase();

        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }

        self.dom.set_value(target, text)?;
        self.dispatch_event(target, EventKind::Input)?;
        Ok(())
    }

    /// Sets a select's value, firing `input` and `change` when it changes.
    /// A value not offered by any option is ignored.
    pub fn select_value(&mut self, selector: &str, value: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let tag = self
            .dom
            .tag_name(target)
            .unwrap_or_default()
            .to_ascii_lowercase();
        if tag != "select" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "select".into(),
                actual: tag,
            });
        }

        let current = self.dom.value(target)?;
        if current == value {
            return Ok(());
        }
        if !self.dom.set_select_value(target, value)? {
            return Ok(());
        }
        self.dispatch_event(target, EventKind::Input)?;
        self.dispatch_event(target, EventKind::Change)?;
        Ok(())
    }

    pub fn blur(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, EventKind::Blur)?;
        Ok(())
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let event = EventKind::parse(event)?;
        self.dispatch_event(target, event)?;
        Ok(())
    }

    /// Submits the form matching `selector` (or the form enclosing the
    /// matched element). Prevent-default is the sole cancellation mechanism;
    /// only the confirm-delete behavior uses it.
    pub fn submit(&mut self, selector: &str) -> Result<SubmitOutcome> {
        let target = self.select_one(selector)?;
        let form = if self
            .dom
            .tag_name(target)
            .map(|tag| tag.eq_ignore_ascii_case("form"))
            .unwrap_or(false)
        {
            Some(target)
        } else {
            self.dom.find_ancestor_by_tag(target, "form")
        };

        let Some(form) = form else {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "form or element inside a form".into(),
                actual: self.dom.tag_name(target).unwrap_or("non-element").into(),
            });
        };

        let state = self.dispatch_event(form, EventKind::Submit)?;
        if state.default_prevented {
            Ok(SubmitOutcome::Prevented)
        } else {
            Ok(SubmitOutcome::Proceeded)
        }
    }

    fn dispatch_event(&mut self, target: NodeId, event: EventKind) -> Result<EventState> {
        let mut state = EventState::new();
        for id in self.listeners.get(target, event) {
            let behavior = self.behaviors[id].clone();
            self.run_behavior(&behavior, target, &mut state)?;
        }
        Ok(state)
    }

    fn run_behavior(
        &mut self,
        behavior: &Behavior,
        target: NodeId,
        state: &mut EventState,
    ) -> Result<()> {
        match behavior {
            Behavior::ValidateUrl(validator) => validator.validate(self, target),
            Behavior::NormalizeDigits => {
                let value = self.dom.value(target)?;
                self.dom.set_value(target, &arabic_to_ascii_digits(&value))
            }
            Behavior::ApplyVisibility(rule) => rule.apply(self),
            Behavior::ConfirmSubmit => {
                if !self.prompt.confirm(CONFIRM_DELETE_MESSAGE) {
                    state.default_prevented = true;
                }
                Ok(())
            }
        }
    }

    // Inspectors.

    pub fn exists(&self, selector: &str) -> Result<bool> {
        Ok(selector::query_all(&self.dom, selector)?
            .into_iter()
            .next()
            .is_some())
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.value(target)
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        self.dom.class_contains(target, class_name)
    }

    /// Whether the matched element is shown, as controlled by its inline
    /// display. Initial `style="display: none"` markup is honored.
    pub fn is_visible(&self, selector: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.dom.is_displayed(target))
    }

    /// The text of the feedback element immediately following the matched
    /// field, if one exists.
    pub fn feedback_message(&self, selector: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        let Some(sibling) = self.dom.next_element_sibling(target) else {
            return Ok(None);
        };
        if self.dom.class_contains(sibling, FEEDBACK_CLASS)? {
            Ok(Some(self.dom.text_content(sibling)))
        } else {
            Ok(None)
        }
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.dom.outer_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.value(target)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.dom.outer_snippet(target),
            });
        }
        Ok(())
    }
}
