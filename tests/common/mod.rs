//! A scripted in-memory portal implementing [`PagePort`], rich enough to
//! carry the whole scenario: clicking a node can flip other nodes in and
//! out of the page, typing and history navigation are recorded.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use listcheck_actions::PagePort;
use listcheck_core_types::{CheckError, ElementHandle, Locator};
use listcheck_scenario::LocatorMap;

pub struct ScriptedNode {
    pub key: String,
    pub parent: Option<u64>,
    pub text: String,
    pub present: bool,
    pub activates: Vec<u64>,
    pub deactivates: Vec<u64>,
}

#[derive(Default)]
struct PortalState {
    nodes: Vec<ScriptedNode>,
    typed: Vec<(String, String)>,
    backs: u32,
    height: i64,
}

pub struct ScriptedPortal {
    state: Mutex<PortalState>,
}

pub fn node(locator: &Locator, text: &str) -> ScriptedNode {
    ScriptedNode {
        key: locator.to_string(),
        parent: None,
        text: text.to_string(),
        present: true,
        activates: Vec::new(),
        deactivates: Vec::new(),
    }
}

impl ScriptedPortal {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PortalState {
                height: 4200,
                ..PortalState::default()
            }),
        }
    }

    pub fn add(&self, node: ScriptedNode) -> u64 {
        let mut state = self.state.lock().unwrap();
        state.nodes.push(node);
        state.nodes.len() as u64 - 1
    }

    /// Everything typed during the run, as (element key, text) pairs.
    pub fn typed(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().typed.clone()
    }

    pub fn backs(&self) -> u32 {
        self.state.lock().unwrap().backs
    }
}

#[async_trait]
impl PagePort for ScriptedPortal {
    async fn goto(&self, _url: &str) -> Result<(), CheckError> {
        Ok(())
    }

    async fn back(&self) -> Result<(), CheckError> {
        self.state.lock().unwrap().backs += 1;
        Ok(())
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>, CheckError> {
        let state = self.state.lock().unwrap();
        let key = locator.to_string();
        Ok(state
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.key == key && n.parent.is_none() && n.present)
            .map(|(i, _)| ElementHandle(i as u64))
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
            .filter(|(_, n)| n.key == key && n.parent == Some(scope.0) && n.present)
            .map(|(i, _)| ElementHandle(i as u64))
            .collect())
    }

    async fn read_text(&self, handle: &ElementHandle) -> Result<String, CheckError> {
        let state = self.state.lock().unwrap();
        Ok(state.nodes[handle.0 as usize].text.clone())
    }

    async fn is_visible(&self, handle: &ElementHandle) -> Result<bool, CheckError> {
        let state = self.state.lock().unwrap();
        Ok(state.nodes[handle.0 as usize].present)
    }

    async fn is_interactable(&self, handle: &ElementHandle) -> Result<bool, CheckError> {
        self.is_visible(handle).await
    }

    async fn click(&self, handle: &ElementHandle) -> Result<(), CheckError> {
        let mut state = self.state.lock().unwrap();
        let activates = state.nodes[handle.0 as usize].activates.clone();
        let deactivates = state.nodes[handle.0 as usize].deactivates.clone();
        for index in activates {
            state.nodes[index as usize].present = true;
        }
        for index in deactivates {
            state.nodes[index as usize].present = false;
        }
        Ok(())
    }

    async fn send_keys(&self, handle: &ElementHandle, text: &str) -> Result<(), CheckError> {
        let mut state = self.state.lock().unwrap();
        let key = state.nodes[handle.0 as usize].key.clone();
        state.typed.push((key, text.to_string()));
        Ok(())
    }

    async fn eval(&self, script: &str) -> Result<Value, CheckError> {
        if script.contains("scrollHeight") {
            let state = self.state.lock().unwrap();
            return Ok(json!(state.height));
        }
        Ok(Value::Null)
    }

    async fn eval_on(&self, _handle: &ElementHandle, _function: &str) -> Result<Value, CheckError> {
        Ok(Value::Null)
    }
}

/// Build a portal carrying the full result page: consent banner, area
/// autocomplete, filter panel, one listing card with a gallery overlay and
/// a phone reveal, plus one price/title pair per entry in `prices`/`sizes`.
pub fn full_portal(locators: &LocatorMap, prices: &[i64], sizes: &[i64]) -> ScriptedPortal {
    let portal = ScriptedPortal::new();

    portal.add(node(&locators.cookie_accept, "ΑΠΟΔΟΧΗ"));
    portal.add(node(&locators.search_input, ""));
    portal.add(node(&locators.suggestion_panel, ""));
    portal.add(node(&locators.suggestion_option, "Παγκράτι, Αθήνα"));
    portal.add(node(&locators.suggestion_option, "Παγκράτι (Πλατεία)"));
    portal.add(node(&locators.area_confirm, "Παγκράτι"));
    portal.add(node(&locators.search_submit, "Αναζήτηση"));

    portal.add(node(&locators.filter_menu, "Τιμή"));
    portal.add(node(&locators.price_min_input, ""));
    portal.add(node(&locators.price_max_input, ""));
    portal.add(node(&locators.size_tab, "Τετραγωνικά"));
    portal.add(node(&locators.size_min_input, ""));
    portal.add(node(&locators.size_max_input, ""));
    portal.add(node(&locators.filter_dismiss, ""));

    for price in prices {
        portal.add(node(&locators.price_display, &format!("{price} €")));
    }
    for size in sizes {
        portal.add(node(
            &locators.title_display,
            &format!("Διαμέρισμα {size} τ.μ."),
        ));
    }

    portal.add(node(&locators.sort_menu, "Ταξινόμηση"));
    portal.add(node(&locators.sort_descending, "Τιμή (φθίνουσα)"));

    let card = portal.add(node(&locators.listing_card, ""));
    let counter = portal.add(ScriptedNode {
        present: false,
        ..node(&locators.gallery_counter, "24")
    });
    let confirmation = portal.add(ScriptedNode {
        present: false,
        ..node(&locators.reveal_confirmation, "+30 210 5551234")
    });
    let trigger = portal.add(ScriptedNode {
        present: false,
        activates: vec![confirmation],
        ..node(&locators.reveal_trigger, "Προβολή τηλεφώνου")
    });
    portal.add(ScriptedNode {
        parent: Some(card),
        activates: vec![counter, trigger],
        ..node(&locators.listing_image, "")
    });
    portal.add(ScriptedNode {
        deactivates: vec![counter, trigger, confirmation],
        ..node(&locators.modal_close, "x")
    });

    portal
}
