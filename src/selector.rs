use super::*;
use crate::dom::{Dom, NodeId};

/// One compound selector step: `tag#id.class[attr="value"]` in any mix.
/// Combinators, selector lists, and pseudo-classes are not supported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorStep {
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<AttrCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
}

impl SelectorStep {
    /// The bare `#id` fast path: nothing to match but the id index.
    pub(crate) fn id_only(&self) -> Option<&str> {
        if self.tag.is_none() && self.classes.is_empty() && self.attrs.is_empty() {
            self.id.as_deref()
        } else {
            None
        }
    }
}

pub(crate) fn parse_selector(selector: &str) -> Result<SelectorStep> {
    let unsupported = || Error::UnsupportedSelector(selector.to_string());
    let mut step = SelectorStep::default();
    let chars: Vec<char> = selector.trim().chars().collect();
    if chars.is_empty() {
        return Err(unsupported());
    }

    let mut i = 0usize;
    if is_ident_char(chars[0]) {
        let start = i;
        while i < chars.len() && is_ident_char(chars[i]) {
            i += 1;
        }
        step.tag = Some(chars[start..i].iter().collect::<String>().to_lowercase());
    } else if chars[0] == '*' {
        i += 1;
    }

    while i < chars.len() {
        match chars[i] {
            '#' => {
                i += 1;
                let name = take_ident(&chars, &mut i);
                if name.is_empty() || step.id.is_some() {
                    return Err(unsupported());
                }
                step.id = Some(name);
            }
            '.' => {
                i += 1;
                let name = take_ident(&chars, &mut i);
                if name.is_empty() {
                    return Err(unsupported());
                }
                step.classes.push(name);
            }
            '[' => {
                i += 1;
                let key = take_ident(&chars, &mut i).to_lowercase();
                if key.is_empty() {
                    return Err(unsupported());
                }
                match chars.get(i) {
                    Some(']') => {
                        i += 1;
                        step.attrs.push(AttrCondition::Exists { key });
                    }
                    Some('=') => {
                        i += 1;
                        let value = take_attr_value(&chars, &mut i).ok_or_else(unsupported)?;
                        if chars.get(i) != Some(&']') {
                            return Err(unsupported());
                        }
                        i += 1;
                        step.attrs.push(AttrCondition::Eq { key, value });
                    }
                    _ => return Err(unsupported()),
                }
            }
            // Combinators, lists, and pseudo-classes are out of scope.
            _ => return Err(unsupported()),
        }
    }

    Ok(step)
}

fn take_ident(chars: &[char], i: &mut usize) -> String {
    let start = *i;
    while *i < chars.len() && is_ident_char(chars[*i]) {
        *i += 1;
    }
    chars[start..*i].iter().collect()
}

fn take_attr_value(chars: &[char], i: &mut usize) -> Option<String> {
    match chars.get(*i) {
        Some(&quote) if quote == '"' || quote == '\'' => {
            *i += 1;
            let start = *i;
            while *i < chars.len() && chars[*i] != quote {
                *i += 1;
            }
            if *i >= chars.len() {
                return None;
            }
            let value = chars[start..*i].iter().collect();
            *i += 1;
            Some(value)
        }
        Some(_) => {
            let start = *i;
            while *i < chars.len() && chars[*i] != ']' {
                *i += 1;
            }
            Some(chars[start..*i].iter().collect())
        }
        None => None,
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

pub(crate) fn matches(dom: &Dom, node_id: NodeId, step: &SelectorStep) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };

    if let Some(tag) = &step.tag {
        if !element.tag_name.eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if let Some(id) = &step.id {
        if element.attrs.get("id") != Some(id) {
            return false;
        }
    }
    for class_name in &step.classes {
        if !dom.class_contains(node_id, class_name).unwrap_or(false) {
            return false;
        }
    }
    for condition in &step.attrs {
        let satisfied = match condition {
            AttrCondition::Exists { key } => element.attrs.contains_key(key),
            AttrCondition::Eq { key, value } => element.attrs.get(key) == Some(value),
        };
        if !satisfied {
            return false;
        }
    }
    true
}

/// All matching elements in document order, with the id-index fast path.
pub(crate) fn query_all(dom: &Dom, selector: &str) -> Result<Vec<NodeId>> {
    let step = parse_selector(selector)?;

    if let Some(id) = step.id_only() {
        return Ok(dom.by_id(id).into_iter().collect());
    }

    Ok(dom
        .all_element_nodes()
        .into_iter()
        .filter(|&candidate| matches(dom, candidate, &step))
        .collect())
}
