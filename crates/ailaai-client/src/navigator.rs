//! Walking a card's conversation script.
//!
//! The navigator holds the node on screen and the ancestors leading to it.
//! Opening a choice pushes the current node; going back pops it. Choices
//! marked as message actions never move the navigator, they produce a
//! [`ReplyRequest`] addressed by the titles along the path.

use ailaai_shared::ConversationItem;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::NavigationError;

/// Ask the composer to start a reply in the context of a conversation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRequest {
    /// Node titles from the root down to the chosen node.
    pub breadcrumb: Vec<String>,
}

/// Outcome of choosing one of the current node's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The child is now the current node.
    Descended,
    /// The child is a message action; position is unchanged.
    Reply(ReplyRequest),
}

#[derive(Debug, Clone)]
pub struct ConversationNavigator {
    /// Payload the tree was parsed from, used to detect changes. The outer
    /// `None` means the tree was handed over directly and no payload is known.
    payload: Option<Option<String>>,
    current: ConversationItem,
    /// Ancestors of `current`, root first.
    stack: Vec<ConversationItem>,
    /// 0 = unlimited
    max_depth: usize,
}

impl ConversationNavigator {
    pub fn new(root: ConversationItem) -> Self {
        Self {
            payload: None,
            current: root,
            stack: Vec::new(),
            max_depth: 0,
        }
    }

    /// Parse a card's stored conversation. Unreadable payloads give an empty
    /// root so the card still offers "send message".
    pub fn from_payload(payload: Option<&str>) -> Self {
        let mut navigator = Self::new(ConversationItem::parse_or_default(payload));
        navigator.payload = Some(payload.map(str::to_string));
        navigator
    }

    /// Limit how deep an authored script may be followed.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Start over from the root if `payload` differs from the one currently
    /// loaded. Returns whether a reset happened.
    pub fn reset(&mut self, payload: Option<&str>) -> bool {
        if self.payload.as_ref().map(Option::as_deref) == Some(payload) {
            return false;
        }
        debug!(depth = self.stack.len(), "Conversation changed, returning to root");
        *self = Self::from_payload(payload).with_max_depth(self.max_depth);
        true
    }

    pub fn current(&self) -> &ConversationItem {
        &self.current
    }

    pub fn stack(&self) -> &[ConversationItem] {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_at_root(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Titles from the root to the current node.
    pub fn breadcrumb(&self) -> Vec<String> {
        self.stack
            .iter()
            .chain(std::iter::once(&self.current))
            .map(|item| item.title.clone())
            .collect()
    }

    /// Choose the child at `index` of the current node.
    pub fn select_child(&mut self, index: usize) -> Result<Selection, NavigationError> {
        let available = self.current.items.len();
        let child = self
            .current
            .items
            .get(index)
            .ok_or(NavigationError::NoSuchChild { index, available })?;

        if child.is_message_action() {
            let mut breadcrumb = self.breadcrumb();
            breadcrumb.push(child.title.clone());
            debug!(?breadcrumb, "Conversation reply chosen");
            return Ok(Selection::Reply(ReplyRequest { breadcrumb }));
        }

        if self.max_depth != 0 && self.stack.len() >= self.max_depth {
            return Err(NavigationError::TooDeep { max: self.max_depth });
        }

        let child = child.clone();
        let parent = std::mem::replace(&mut self.current, child);
        self.stack.push(parent);
        debug!(depth = self.stack.len(), title = %self.current.title, "Conversation descended");
        Ok(Selection::Descended)
    }

    /// Return to the parent node. Does nothing at the root.
    pub fn go_back(&mut self) -> bool {
        match self.stack.pop() {
            Some(parent) => {
                self.current = parent;
                debug!(depth = self.stack.len(), "Conversation went back");
                true
            }
            None => false,
        }
    }

    /// The "send message" action offered when the current node has no
    /// children.
    pub fn terminal_action(&self) -> Option<ReplyRequest> {
        self.current.is_leaf().then(|| ReplyRequest {
            breadcrumb: self.breadcrumb(),
        })
    }
}

impl Default for ConversationNavigator {
    fn default() -> Self {
        Self::new(ConversationItem::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ailaai_shared::ConversationAction;

    fn menu() -> ConversationItem {
        ConversationItem::new("Menu").with_items(vec![ConversationItem::new("Order")])
    }

    fn deep() -> ConversationItem {
        ConversationItem::new("Root").with_items(vec![
            ConversationItem::new("Food").with_items(vec![
                ConversationItem::new("Pizza").with_items(vec![
                    ConversationItem::new("Large"),
                    ConversationItem::new("Ask about toppings").with_action(ConversationAction::Message),
                ]),
            ]),
            ConversationItem::new("Talk to us").with_action(ConversationAction::Message),
        ])
    }

    #[test]
    fn test_menu_order_scenario() {
        let mut nav = ConversationNavigator::new(menu());

        assert_eq!(nav.select_child(0).unwrap(), Selection::Descended);
        assert_eq!(nav.current().title, "Order");
        assert_eq!(nav.stack().len(), 1);
        assert_eq!(nav.stack()[0], menu());

        let action = nav.terminal_action().unwrap();
        assert_eq!(action.breadcrumb, vec!["Menu", "Order"]);

        assert!(nav.go_back());
        assert_eq!(nav.current().title, "Menu");
        assert!(nav.stack().is_empty());
    }

    #[test]
    fn test_descend_then_back_restores_root() {
        let root = deep();
        let mut nav = ConversationNavigator::new(root.clone());

        nav.select_child(0).unwrap();
        nav.select_child(0).unwrap();
        assert_eq!(nav.depth(), 2);
        assert_eq!(nav.breadcrumb(), vec!["Root", "Food", "Pizza"]);

        assert!(nav.go_back());
        assert!(nav.go_back());
        assert_eq!(nav.current(), &root);
        assert!(nav.is_at_root());
    }

    #[test]
    fn test_message_child_does_not_move() {
        let mut nav = ConversationNavigator::new(deep());
        nav.select_child(0).unwrap();
        nav.select_child(0).unwrap();

        let before_current = nav.current().clone();
        let before_stack = nav.stack().to_vec();

        let selection = nav.select_child(1).unwrap();
        assert_eq!(
            selection,
            Selection::Reply(ReplyRequest {
                breadcrumb: vec![
                    "Root".to_string(),
                    "Food".to_string(),
                    "Pizza".to_string(),
                    "Ask about toppings".to_string(),
                ],
            })
        );
        assert_eq!(nav.current(), &before_current);
        assert_eq!(nav.stack(), before_stack.as_slice());
    }

    #[test]
    fn test_message_child_at_root() {
        let mut nav = ConversationNavigator::new(deep());
        let Selection::Reply(request) = nav.select_child(1).unwrap() else {
            panic!("expected a reply");
        };
        assert_eq!(request.breadcrumb, vec!["Root", "Talk to us"]);
        assert!(nav.is_at_root());
    }

    #[test]
    fn test_terminal_action_only_at_leaf() {
        let mut nav = ConversationNavigator::new(deep());
        assert!(nav.terminal_action().is_none());

        nav.select_child(0).unwrap();
        nav.select_child(0).unwrap();
        nav.select_child(0).unwrap();
        assert_eq!(nav.current().title, "Large");
        assert_eq!(
            nav.terminal_action().unwrap().breadcrumb,
            vec!["Root", "Food", "Pizza", "Large"]
        );
    }

    #[test]
    fn test_back_at_root_is_noop() {
        let mut nav = ConversationNavigator::new(menu());
        assert!(!nav.can_go_back());
        assert!(!nav.go_back());
        assert_eq!(nav.current().title, "Menu");
    }

    #[test]
    fn test_out_of_range_choice() {
        let mut nav = ConversationNavigator::new(menu());
        assert_eq!(
            nav.select_child(3),
            Err(NavigationError::NoSuchChild { index: 3, available: 1 })
        );
        assert!(nav.is_at_root());
    }

    #[test]
    fn test_malformed_payload_gives_empty_root() {
        let nav = ConversationNavigator::from_payload(Some("not json"));
        assert_eq!(nav.current(), &ConversationItem::default());
        assert_eq!(nav.terminal_action().unwrap().breadcrumb, vec![""]);

        let nav = ConversationNavigator::from_payload(None);
        assert!(nav.current().is_leaf());
    }

    #[test]
    fn test_reset_only_when_payload_changes() {
        let first = r#"{"title":"Menu","items":[{"title":"Order"}]}"#;
        let mut nav = ConversationNavigator::from_payload(Some(first));
        nav.select_child(0).unwrap();

        assert!(!nav.reset(Some(first)));
        assert_eq!(nav.current().title, "Order");

        let second = r#"{"title":"Menu","items":[{"title":"Order"},{"title":"Hours"}]}"#;
        assert!(nav.reset(Some(second)));
        assert_eq!(nav.current().title, "Menu");
        assert_eq!(nav.current().items.len(), 2);
        assert!(nav.stack().is_empty());

        assert!(nav.reset(None));
        assert_eq!(nav.current(), &ConversationItem::default());
    }

    #[test]
    fn test_reset_of_tree_without_payload() {
        let mut nav = ConversationNavigator::new(menu());
        nav.select_child(0).unwrap();

        assert!(nav.reset(None));
        assert_eq!(nav.current(), &ConversationItem::default());
        assert!(nav.is_at_root());

        assert!(!nav.reset(None));

        let mut nav = ConversationNavigator::default();
        assert!(nav.reset(Some(r#"{"title":"Menu"}"#)));
        assert_eq!(nav.current().title, "Menu");
    }

    #[test]
    fn test_depth_limit() {
        let mut nav = ConversationNavigator::new(deep()).with_max_depth(1);
        nav.select_child(0).unwrap();
        assert_eq!(nav.select_child(0), Err(NavigationError::TooDeep { max: 1 }));
        assert_eq!(nav.current().title, "Food");

        nav.reset(Some("{}"));
        assert!(nav.is_at_root());
    }

    #[test]
    fn test_depth_limit_does_not_block_replies() {
        let mut nav = ConversationNavigator::new(deep()).with_max_depth(1);
        nav.select_child(0).unwrap();
        nav.go_back();
        assert!(matches!(nav.select_child(1), Ok(Selection::Reply(_))));
    }
}
