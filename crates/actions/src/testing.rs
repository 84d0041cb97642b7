//! In-memory `PagePort` used by this crate's unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use listcheck_core_types::{CheckError, ElementHandle, Locator};

use crate::ports::PagePort;

pub(crate) struct MockNode {
    key: String,
    parent: Option<u64>,
    text: String,
    visible: bool,
    interactable: bool,
    present_after: u32,
    click_fails: bool,
    removed: bool,
}

impl MockNode {
    /// Element only shows up after the page has been queried `polls` times.
    pub fn present_after(mut self, polls: u32) -> Self {
        self.present_after = polls;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn obscured(mut self) -> Self {
        self.interactable = false;
        self
    }

    pub fn click_fails(mut self) -> Self {
        self.click_fails = true;
        self
    }

    pub fn child_of(mut self, parent: ElementHandle) -> Self {
        self.parent = Some(parent.0);
        self
    }
}

#[derive(Default)]
struct MockState {
    nodes: Vec<MockNode>,
    find_calls: u32,
    clicks: Vec<u64>,
    script_clicks: Vec<u64>,
    keys: Vec<(u64, String)>,
    scripts: Vec<String>,
}

pub(crate) struct MockPage {
    state: Mutex<MockState>,
}

impl MockPage {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState::default()),
        }
    }

    pub fn node(locator: &Locator, text: &str) -> MockNode {
        MockNode {
            key: locator.to_string(),
            parent: None,
            text: text.to_string(),
            visible: true,
            interactable: true,
            present_after: 0,
            click_fails: false,
            removed: false,
        }
    }

    pub fn add_node(&self, node: MockNode) -> ElementHandle {
        let mut state = self.state.lock().unwrap();
        state.nodes.push(node);
        ElementHandle(state.nodes.len() as u64 - 1)
    }

    pub fn remove(&self, handle: ElementHandle) {
        self.state.lock().unwrap().nodes[handle.0 as usize].removed = true;
    }

    pub fn clicks(&self) -> Vec<u64> {
        self.state.lock().unwrap().clicks.clone()
    }

    pub fn script_clicks(&self) -> Vec<u64> {
        self.state.lock().unwrap().script_clicks.clone()
    }

    pub fn keys(&self) -> Vec<(u64, String)> {
        self.state.lock().unwrap().keys.clone()
    }

    pub fn scripts(&self) -> Vec<String> {
        self.state.lock().unwrap().scripts.clone()
    }

    fn live<'a>(state: &'a MockState, handle: &ElementHandle) -> Result<&'a MockNode, CheckError> {
        let node = state
            .nodes
            .get(handle.0 as usize)
            .ok_or_else(|| CheckError::page(format!("{handle} unknown")))?;
        if node.removed {
            return Err(CheckError::page(format!("{handle} is stale")));
        }
        Ok(node)
    }
}

#[async_trait]
impl PagePort for MockPage {
    async fn goto(&self, _url: &str) -> Result<(), CheckError> {
        Ok(())
    }

    async fn back(&self) -> Result<(), CheckError> {
        Ok(())
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>, CheckError> {
        let mut state = self.state.lock().unwrap();
        state.find_calls += 1;
        let calls = state.find_calls;
        let key = locator.to_string();
        Ok(state
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| {
                node.key == key && node.parent.is_none() && !node.removed && calls > node.present_after
            })
            .map(|(index, _)| ElementHandle(index as u64))
            .collect())
    }

    async fn find_within(
        &self,
        scope: &ElementHandle,
        locator: &Locator,
    ) -> Result<Vec<ElementHandle>, CheckError> {
        let state = self.state.lock().unwrap();
        let key = locator.to_string();
        Ok(state
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.key == key && node.parent == Some(scope.0) && !node.removed)
            .map(|(index, _)| ElementHandle(index as u64))
            .collect())
    }

    async fn read_text(&self, handle: &ElementHandle) -> Result<String, CheckError> {
        let state = self.state.lock().unwrap();
        Ok(Self::live(&state, handle)?.text.clone())
    }

    async fn is_visible(&self, handle: &ElementHandle) -> Result<bool, CheckError> {
        let state = self.state.lock().unwrap();
        Ok(Self::live(&state, handle)?.visible)
    }

    async fn is_interactable(&self, handle: &ElementHandle) -> Result<bool, CheckError> {
        let state = self.state.lock().unwrap();
        Ok(Self::live(&state, handle)?.interactable)
    }

    async fn click(&self, handle: &ElementHandle) -> Result<(), CheckError> {
        let mut state = self.state.lock().unwrap();
        let node = Self::live(&state, handle)?;
        if node.click_fails {
            return Err(CheckError::page(format!("{handle} is obscured")));
        }
        state.clicks.push(handle.0);
        Ok(())
    }

    async fn send_keys(&self, handle: &ElementHandle, text: &str) -> Result<(), CheckError> {
        let mut state = self.state.lock().unwrap();
        Self::live(&state, handle)?;
        state.keys.push((handle.0, text.to_string()));
        Ok(())
    }

    async fn eval(&self, script: &str) -> Result<Value, CheckError> {
        let mut state = self.state.lock().unwrap();
        state.scripts.push(script.to_string());
        Ok(Value::Null)
    }

    async fn eval_on(&self, handle: &ElementHandle, function: &str) -> Result<Value, CheckError> {
        let mut state = self.state.lock().unwrap();
        Self::live(&state, handle)?;
        if function.contains(".click()") || function.contains("this.click") {
            state.script_clicks.push(handle.0);
        }
        state.scripts.push(function.to_string());
        Ok(Value::Null)
    }
}
