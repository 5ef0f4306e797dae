//! In-memory rendition of the CEPEA home page.
//!
//! The page is re-rendered from a [`SiteModel`] and the current click state on
//! every lookup, so clicking a category link or "Mais valores" changes what
//! later waits can see, the same way the live site does.

use crate::core::navigator::anchors;
use crate::domain::ports::{Element, Locator, Page, WaitPolicy};
use crate::utils::error::{Result, ScrapeError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone)]
struct Category {
    label: String,
    rows: Vec<Vec<String>>,
    responsive: bool,
}

/// Static content of the simulated site.
#[derive(Debug, Clone)]
pub struct SiteModel {
    categories: Vec<Category>,
    category_menu: bool,
    reachable: bool,
}

impl SiteModel {
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            category_menu: true,
            reachable: true,
        }
    }

    /// Adds a menu entry whose indicator table holds `rows`, one `<td>` per
    /// string.
    pub fn with_category(mut self, label: &str, rows: Vec<Vec<&str>>) -> Self {
        self.categories.push(Category {
            label: label.to_string(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(str::to_string).collect())
                .collect(),
            responsive: true,
        });
        self
    }

    /// Adds a menu entry that never renders its table once clicked.
    pub fn with_unresponsive_category(mut self, label: &str) -> Self {
        self.categories.push(Category {
            label: label.to_string(),
            rows: Vec::new(),
            responsive: false,
        });
        self
    }

    pub fn without_category_menu(mut self) -> Self {
        self.category_menu = false;
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    fn category(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.label == label)
    }

    fn render(&self, state: &SiteState) -> Node {
        let mut body = Node::new("body");

        if self.category_menu {
            let menu = self.categories.iter().fold(
                Node::new("ul").classes(anchors::MENU_CLASS),
                |menu, category| {
                    menu.child(
                        Node::new("li").child(
                            Node::new("a")
                                .text(&category.label)
                                .on_click(ClickAction::Select(category.label.clone())),
                        ),
                    )
                },
            );
            let column = Node::new("div")
                .classes(anchors::CATEGORY_COLUMN_CLASS)
                .child(menu);
            body = body.child(
                Node::new("div")
                    .id(anchors::CATEGORY_WRAPPER_ID)
                    .child(Node::new("div").id(anchors::CATEGORY_ID).child(column)),
            );
        }

        let selected = state
            .selected
            .as_deref()
            .and_then(|label| self.category(label))
            .filter(|category| category.responsive);

        if let Some(category) = selected {
            body = body.child(
                Node::new("div").classes(anchors::LINKS_AFTER_TABLE_CLASS).child(
                    Node::new("a")
                        .text(anchors::MORE_VALUES_TEXT)
                        .on_click(ClickAction::Expand),
                ),
            );

            if state.expanded {
                body = body.child(render_table(category));
            }
        }

        body
    }
}

impl Default for SiteModel {
    fn default() -> Self {
        Self::new()
    }
}

fn render_table(category: &Category) -> Node {
    let header = ["Data", "À vista R$", "Var./Dia", "Var./Mês", "À vista US$"]
        .iter()
        .fold(Node::new("tr"), |tr, h| tr.child(Node::new("th").text(h)));

    let body = category.rows.iter().fold(Node::new("tbody"), |tbody, row| {
        tbody.child(
            row.iter()
                .fold(Node::new("tr"), |tr, cell| tr.child(Node::new("td").text(cell))),
        )
    });

    Node::new("table")
        .id(anchors::INDICATOR_TABLE_ID)
        .child(Node::new("thead").child(header))
        .child(body)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ClickAction {
    Select(String),
    Expand,
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    text: String,
    action: Option<ClickAction>,
    children: Vec<Node>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            text: String::new(),
            action: None,
            children: Vec::new(),
        }
    }

    fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Accepts the dotted form used by [`Locator::Class`].
    fn classes(mut self, classes: &str) -> Self {
        self.classes = classes.split('.').map(str::to_string).collect();
        self
    }

    fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    fn on_click(mut self, action: ClickAction) -> Self {
        self.action = Some(action);
        self
    }

    fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    fn matches(&self, locator: &Locator) -> bool {
        match locator {
            Locator::Id(id) => self.id.as_deref() == Some(id.as_str()),
            Locator::Class(classes) => classes
                .split('.')
                .filter(|c| !c.is_empty())
                .all(|c| self.classes.iter().any(|own| own == c)),
            Locator::Tag(tag) => self.tag.eq_ignore_ascii_case(tag),
            Locator::LinkTextContains(fragment) => {
                self.tag == "a" && self.text.contains(fragment.as_str())
            }
        }
    }

    fn collect_matches<'a>(&'a self, locator: &Locator, out: &mut Vec<&'a Node>) {
        for child in &self.children {
            if child.matches(locator) {
                out.push(child);
            }
            child.collect_matches(locator, out);
        }
    }

    fn inner_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        if !self.text.is_empty() {
            parts.push(&self.text);
        }
        for child in &self.children {
            child.collect_text(parts);
        }
    }
}

#[derive(Debug, Default)]
struct SiteState {
    visited: Vec<String>,
    selected: Option<String>,
    expanded: bool,
    clicks: Vec<String>,
    closed: bool,
}

fn lock(state: &Mutex<SiteState>) -> MutexGuard<'_, SiteState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Read-only view of what happened to an [`InMemoryPage`], usable after the
/// page itself was moved into a session.
#[derive(Debug, Clone)]
pub struct SiteProbe {
    state: Arc<Mutex<SiteState>>,
}

impl SiteProbe {
    /// Text of every clicked element, in click order.
    pub fn clicks(&self) -> Vec<String> {
        lock(&self.state).clicks.clone()
    }

    pub fn visited(&self) -> Vec<String> {
        lock(&self.state).visited.clone()
    }

    pub fn is_closed(&self) -> bool {
        lock(&self.state).closed
    }
}

#[derive(Debug)]
pub struct InMemoryPage {
    site: Arc<SiteModel>,
    state: Arc<Mutex<SiteState>>,
}

impl InMemoryPage {
    pub fn new(site: SiteModel) -> Self {
        Self {
            site: Arc::new(site),
            state: Arc::new(Mutex::new(SiteState::default())),
        }
    }

    pub fn probe(&self) -> SiteProbe {
        SiteProbe {
            state: Arc::clone(&self.state),
        }
    }

    /// Puts the page straight into the expanded state of `label`.
    pub fn select_and_expand(&self, label: &str) {
        let mut state = lock(&self.state);
        state.selected = Some(label.to_string());
        state.expanded = true;
    }

    fn element(&self, node: Node) -> InMemoryElement {
        InMemoryElement {
            node,
            state: Arc::clone(&self.state),
        }
    }
}

#[async_trait]
impl Page for InMemoryPage {
    type Element = InMemoryElement;

    async fn goto(&self, url: &str) -> Result<()> {
        if !self.site.reachable {
            return Err(ScrapeError::IoError(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("cannot reach {}", url),
            )));
        }
        let mut state = lock(&self.state);
        state.visited.push(url.to_string());
        state.selected = None;
        state.expanded = false;
        Ok(())
    }

    async fn wait_visible(&self, locator: &Locator, wait: WaitPolicy) -> Result<InMemoryElement> {
        // Content only changes on click, so a single lookup is as good as
        // polling for the whole timeout.
        let root = {
            let state = lock(&self.state);
            self.site.render(&state)
        };
        let mut found = Vec::new();
        root.collect_matches(locator, &mut found);

        match found.first() {
            Some(node) => Ok(self.element((*node).clone())),
            None => Err(ScrapeError::Timeout {
                anchor: locator.to_string(),
                seconds: wait.timeout.as_secs(),
            }),
        }
    }

    async fn quit(self) -> Result<()> {
        lock(&self.state).closed = true;
        Ok(())
    }
}

/// Snapshot of a rendered node; clicks act on the shared page state.
#[derive(Debug, Clone)]
pub struct InMemoryElement {
    node: Node,
    state: Arc<Mutex<SiteState>>,
}

impl InMemoryElement {
    fn wrap(&self, node: &Node) -> Self {
        Self {
            node: node.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

#[async_trait]
impl Element for InMemoryElement {
    async fn find(&self, locator: &Locator) -> Result<Self> {
        let mut found = Vec::new();
        self.node.collect_matches(locator, &mut found);
        found
            .first()
            .map(|node| self.wrap(node))
            .ok_or_else(|| ScrapeError::ElementNotFound {
                anchor: locator.to_string(),
            })
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self>> {
        let mut found = Vec::new();
        self.node.collect_matches(locator, &mut found);
        Ok(found.into_iter().map(|node| self.wrap(node)).collect())
    }

    async fn text(&self) -> Result<String> {
        Ok(self.node.inner_text())
    }

    async fn click(&self) -> Result<()> {
        let mut state = lock(&self.state);
        state.clicks.push(self.node.inner_text());
        match &self.node.action {
            Some(ClickAction::Select(label)) => {
                state.selected = Some(label.clone());
                state.expanded = false;
            }
            Some(ClickAction::Expand) => state.expanded = true,
            None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_table_only_visible_after_select_and_expand() {
        let page = InMemoryPage::new(SiteModel::new().with_category("Soja", vec![]));
        let table = Locator::id(anchors::INDICATOR_TABLE_ID);
        let wait = WaitPolicy::default();

        assert!(page.wait_visible(&table, wait).await.is_err());

        let menu = page
            .wait_visible(&Locator::class(anchors::MENU_CLASS), wait)
            .await
            .unwrap();
        menu.find(&Locator::tag("a")).await.unwrap().click().await.unwrap();
        assert!(page.wait_visible(&table, wait).await.is_err());

        let links = page
            .wait_visible(&Locator::class(anchors::LINKS_AFTER_TABLE_CLASS), wait)
            .await
            .unwrap();
        links
            .find(&Locator::link_text_contains("Mais valores"))
            .await
            .unwrap()
            .click()
            .await
            .unwrap();
        assert!(page.wait_visible(&table, wait).await.is_ok());
    }

    #[tokio::test]
    async fn test_li_text_includes_link_text() {
        let page = InMemoryPage::new(SiteModel::new().with_category("Café", vec![]));
        let menu = page
            .wait_visible(&Locator::class(anchors::MENU_CLASS), WaitPolicy::default())
            .await
            .unwrap();
        let items = menu.find_all(&Locator::tag("li")).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text().await.unwrap(), "Café");
    }

    #[tokio::test]
    async fn test_unreachable_site_fails_goto() {
        let page = InMemoryPage::new(SiteModel::new().unreachable());
        assert!(page.goto("https://cepea.esalq.usp.br/br/").await.is_err());
        assert!(page.probe().visited().is_empty());
    }

    #[tokio::test]
    async fn test_quit_is_visible_through_probe() {
        let page = InMemoryPage::new(SiteModel::new());
        let probe = page.probe();
        page.quit().await.unwrap();
        assert!(probe.is_closed());
    }
}
