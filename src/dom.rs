use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    pub(crate) attrs: HashMap<String, String>,
    pub(crate) value: String,
    pub(crate) style_display: Option<String>,
}

/// Arena-backed document tree. Removed nodes stay in the arena but are
/// detached from the tree, so traversal from the root never sees them.
#[derive(Debug, Clone)]
pub(crate) struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    pub(crate) id_index: HashMap<String, NodeId>,
}

impl Dom {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let value = attrs.get("value").cloned().unwrap_or_default();
        let style_display = attrs.get("style").and_then(|style| parse_display(style));
        let element = Element {
            tag_name,
            attrs,
            value,
            style_display,
        };
        let id = self.create_node(Some(parent), NodeType::Element(element));
        if let Some(id_attr) = self
            .element(id)
            .and_then(|element| element.attrs.get("id").cloned())
        {
            self.id_index.insert(id_attr, id);
        }
        id
    }

    pub(crate) fn create_detached_element(&mut self, tag_name: &str) -> NodeId {
        let element = Element {
            tag_name: tag_name.to_string(),
            attrs: HashMap::new(),
            value: String::new(),
            style_display: None,
        };
        self.create_node(None, NodeType::Element(element))
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    fn require_element_mut(&mut self, node_id: NodeId, what: &str) -> Result<&mut Element> {
        self.element_mut(node_id)
            .ok_or_else(|| Error::Behavior(format!("{what} target is not an element")))
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes[node_id.0].parent
    }

    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|element| element.attrs.get(name).cloned())
    }

    pub(crate) fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub(crate) fn find_ancestor_by_tag(&self, node_id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cursor = self.parent(node_id);
        while let Some(current) = cursor {
            if self
                .tag_name(current)
                .map(|name| name.eq_ignore_ascii_case(tag))
                .unwrap_or(false)
            {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    pub(crate) fn next_element_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        let parent = self.parent(node_id)?;
        let siblings = &self.nodes[parent.0].children;
        let position = siblings.iter().position(|&child| child == node_id)?;
        siblings[position + 1..]
            .iter()
            .copied()
            .find(|&sibling| self.element(sibling).is_some())
    }

    /// Inserts a detached node directly after `anchor` among its siblings.
    pub(crate) fn insert_after(&mut self, anchor: NodeId, node: NodeId) -> Result<()> {
        let parent = self
            .parent(anchor)
            .ok_or_else(|| Error::Behavior("insert anchor has no parent".into()))?;
        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|&child| child == anchor)
            .ok_or_else(|| Error::Behavior("insert anchor not among parent children".into()))?;
        self.nodes[parent.0].children.insert(position + 1, node);
        self.nodes[node.0].parent = Some(parent);
        if let Some(id_attr) = self.attr(node, "id") {
            self.id_index.insert(id_attr, node);
        }
        Ok(())
    }

    /// Detaches a node (and its subtree) from the tree.
    pub(crate) fn remove_node(&mut self, node_id: NodeId) {
        if let Some(parent) = self.parent(node_id) {
            self.nodes[parent.0]
                .children
                .retain(|&child| child != node_id);
        }
        self.nodes[node_id.0].parent = None;
        let mut stack = vec![node_id];
        while let Some(current) = stack.pop() {
            if let Some(id_attr) = self.attr(current, "id") {
                if self.id_index.get(&id_attr) == Some(&current) {
                    self.id_index.remove(&id_attr);
                }
            }
            stack.extend(self.nodes[current.0].children.iter().copied());
        }
    }

    pub(crate) fn value(&self, node_id: NodeId) -> Result<String> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Behavior("value target is not an element".into()))?;
        Ok(element.value.clone())
    }

    pub(crate) fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        let element = self.require_element_mut(node_id, "value")?;
        element.value = value.to_string();
        Ok(())
    }

    /// Sets a select's value; returns false when no option offers `requested`.
    pub(crate) fn set_select_value(&mut self, select: NodeId, requested: &str) -> Result<bool> {
        let offered = self
            .option_nodes(select)
            .iter()
            .any(|&option| self.option_value(option) == requested);
        if !offered {
            return Ok(false);
        }
        let element = self.require_element_mut(select, "select value")?;
        element.value = requested.to_string();
        Ok(true)
    }

    /// Gives every select its initial value: the `selected` option if any,
    /// else the first option, else empty.
    pub(crate) fn initialize_form_control_values(&mut self) -> Result<()> {
        let selects: Vec<NodeId> = self
            .all_element_nodes()
            .into_iter()
            .filter(|&node| {
                self.tag_name(node)
                    .map(|tag| tag.eq_ignore_ascii_case("select"))
                    .unwrap_or(false)
            })
            .collect();

        for select in selects {
            let options = self.option_nodes(select);
            let chosen = options
                .iter()
                .copied()
                .find(|&option| {
                    self.element(option)
                        .map(|element| element.attrs.contains_key("selected"))
                        .unwrap_or(false)
                })
                .or_else(|| options.first().copied());
            let value = chosen
                .map(|option| self.option_value(option))
                .unwrap_or_default();
            let element = self.require_element_mut(select, "select value")?;
            element.value = value;
        }
        Ok(())
    }

    fn option_nodes(&self, select: NodeId) -> Vec<NodeId> {
        let mut options = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[select.0].children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self
                .tag_name(current)
                .map(|tag| tag.eq_ignore_ascii_case("option"))
                .unwrap_or(false)
            {
                options.push(current);
            }
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        options
    }

    /// An option's value attribute, falling back to its text content.
    fn option_value(&self, option: NodeId) -> String {
        self.attr(option, "value")
            .unwrap_or_else(|| self.text_content(option).trim().to_string())
    }

    pub(crate) fn class_contains(&self, node_id: NodeId, class_name: &str) -> Result<bool> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Behavior("classList target is not an element".into()))?;
        Ok(class_tokens(element.attrs.get("class").map(String::as_str))
            .iter()
            .any(|name| name == class_name))
    }

    pub(crate) fn class_add(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self.require_element_mut(node_id, "classList")?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        if !classes.iter().any(|name| name == class_name) {
            classes.push(class_name.to_string());
        }
        set_class_attr(element, &classes);
        Ok(())
    }

    pub(crate) fn class_remove(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self.require_element_mut(node_id, "classList")?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        classes.retain(|name| name != class_name);
        set_class_attr(element, &classes);
        Ok(())
    }

    pub(crate) fn set_display(&mut self, node_id: NodeId, display: &str) -> Result<()> {
        let element = self.require_element_mut(node_id, "style.display")?;
        element.style_display = Some(display.to_string());
        Ok(())
    }

    pub(crate) fn is_displayed(&self, node_id: NodeId) -> bool {
        self.element(node_id)
            .map(|element| element.style_display.as_deref() != Some("none"))
            .unwrap_or(false)
    }

    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![node_id];
        while let Some(current) = stack.pop() {
            if let NodeType::Text(text) = &self.nodes[current.0].node_type {
                out.push_str(text);
            }
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        out
    }

    /// Replaces a node's children with a single text node.
    pub(crate) fn set_text(&mut self, node_id: NodeId, text: &str) {
        let children: Vec<NodeId> = self.nodes[node_id.0].children.clone();
        for child in children {
            self.remove_node(child);
        }
        self.create_text(node_id, text.to_string());
    }

    pub(crate) fn all_element_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_elements_dfs(self.root, &mut out);
        out
    }

    fn collect_elements_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        if self.element(node_id).is_some() {
            out.push(node_id);
        }
        for child in &self.nodes[node_id.0].children {
            self.collect_elements_dfs(*child, out);
        }
    }

    /// A one-line rendering of an element, for assertion failures.
    pub(crate) fn outer_snippet(&self, node_id: NodeId) -> String {
        let Some(element) = self.element(node_id) else {
            return "<non-element>".to_string();
        };
        let mut attrs: Vec<(&String, &String)> = element.attrs.iter().collect();
        attrs.sort();
        let mut out = format!("<{}", element.tag_name);
        for (name, value) in attrs {
            out.push_str(&format!(" {name}=\"{value}\""));
        }
        out.push('>');
        out.push_str(self.text_content(node_id).trim());
        out.push_str(&format!("</{}>", element.tag_name));
        out
    }
}

fn class_tokens(attr: Option<&str>) -> Vec<String> {
    attr.unwrap_or_default()
        .split_ascii_whitespace()
        .map(str::to_string)
        .collect()
}

fn set_class_attr(element: &mut Element, classes: &[String]) {
    if classes.is_empty() {
        element.attrs.remove("class");
    } else {
        element.attrs.insert("class".to_string(), classes.join(" "));
    }
}

/// Extracts the `display` property from an inline style attribute.
fn parse_display(style: &str) -> Option<String> {
    for declaration in style.split(';') {
        let mut parts = declaration.splitn(2, ':');
        let property = parts.next()?.trim();
        if property.eq_ignore_ascii_case("display") {
            return parts.next().map(|value| value.trim().to_string());
        }
    }
    None
}
