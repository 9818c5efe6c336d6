use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::{
  debug,
  info
};

use crate::error::TabError;
use crate::scope::RequestScope;

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Default,
)]
pub enum Tab {
  #[default]
  Dashboard,
  Projects,
  Gantt,
  Reports,
  Tasks,
  Notes,
  Ml
}

impl Tab {
  pub const ALL: [Tab; 7] = [
    Tab::Dashboard,
    Tab::Projects,
    Tab::Gantt,
    Tab::Reports,
    Tab::Tasks,
    Tab::Notes,
    Tab::Ml
  ];

  pub fn as_key(self) -> &'static str {
    match self {
      | Tab::Dashboard => "dashboard",
      | Tab::Projects => "projects",
      | Tab::Gantt => "gantt",
      | Tab::Reports => "reports",
      | Tab::Tasks => "tasks",
      | Tab::Notes => "notes",
      | Tab::Ml => "ml"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Tab::Dashboard => "Dashboard",
      | Tab::Projects => "Projects",
      | Tab::Gantt => "Gantt Chart",
      | Tab::Reports => "Reports",
      | Tab::Tasks => "Tasks",
      | Tab::Notes => "Notes",
      | Tab::Ml => "ML Insights"
    }
  }

  pub fn icon(self) -> &'static str {
    match self {
      | Tab::Dashboard => "fa-gauge",
      | Tab::Projects => "fa-folder",
      | Tab::Gantt => "fa-chart-gantt",
      | Tab::Reports => "fa-file-lines",
      | Tab::Tasks => "fa-list-check",
      | Tab::Notes => "fa-note-sticky",
      | Tab::Ml => "fa-brain"
    }
  }

  /// DOM id of the tab's content panel.
  pub fn panel_id(self) -> String {
    format!("{}-tab", self.as_key())
  }
}

impl fmt::Display for Tab {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_key())
  }
}

impl FromStr for Tab {
  type Err = TabError;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    Tab::ALL
      .into_iter()
      .find(|tab| tab.as_key() == s)
      .ok_or_else(|| {
        TabError::NotFound(s.to_string())
      })
  }
}

/// One activation of a tab. Every switch,
/// including re-selecting the active tab,
/// gets a new generation and a new scope.
#[derive(Debug, Clone)]
pub struct TabSwitch {
  pub tab:        Tab,
  pub generation: u64,
  pub scope:      RequestScope
}

#[derive(Debug, Clone)]
pub struct TabController {
  active:     Tab,
  generation: u64,
  scope:      RequestScope
}

impl Default for TabController {
  fn default() -> Self {
    Self::new(Tab::default())
  }
}

impl TabController {
  pub fn new(initial: Tab) -> Self {
    Self {
      active:     initial,
      generation: 0,
      scope:      RequestScope::new()
    }
  }

  pub fn active(&self) -> Tab {
    self.active
  }

  pub fn generation(&self) -> u64 {
    self.generation
  }

  pub fn current(&self) -> TabSwitch {
    TabSwitch {
      tab:        self.active,
      generation: self.generation,
      scope:      self.scope.clone()
    }
  }

  pub fn activate(
    &mut self,
    tab: Tab
  ) -> TabSwitch {
    self.scope.abort_all();
    self.scope = RequestScope::new();
    self.generation += 1;
    info!(
      from = %self.active,
      to = %tab,
      generation = self.generation,
      "switching tab"
    );
    self.active = tab;
    self.current()
  }

  pub fn switch_tab(
    &mut self,
    name: &str
  ) -> Result<TabSwitch, TabError> {
    let tab = name.parse::<Tab>()?;
    Ok(self.activate(tab))
  }

  pub fn is_active(&self, tab: Tab) -> bool {
    self.active == tab
  }

  pub fn button_class(
    &self,
    tab: Tab
  ) -> &'static str {
    if self.is_active(tab) {
      "tab-btn active"
    } else {
      "tab-btn"
    }
  }

  pub fn panel_class(
    &self,
    tab: Tab
  ) -> &'static str {
    if self.is_active(tab) {
      "tab-content"
    } else {
      "tab-content hidden"
    }
  }
}

/// Load callbacks registered per tab.
pub struct TabLoaders<L> {
  loaders: BTreeMap<Tab, L>
}

impl<L> Default for TabLoaders<L> {
  fn default() -> Self {
    Self {
      loaders: BTreeMap::new()
    }
  }
}

impl<L> TabLoaders<L> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(
    &mut self,
    tab: Tab,
    loader: L
  ) -> &mut Self {
    self.loaders.insert(tab, loader);
    self
  }

  pub fn get(&self, tab: Tab) -> Option<&L> {
    self.loaders.get(&tab)
  }

  /// Runs the loader registered for the
  /// switched-to tab; `false` when the tab
  /// has none.
  pub fn dispatch(
    &self,
    switch: &TabSwitch
  ) -> bool
  where
    L: Fn(&TabSwitch)
  {
    match self.loaders.get(&switch.tab) {
      | Some(loader) => {
        loader(switch);
        true
      }
      | None => {
        debug!(tab = %switch.tab, "no loader registered");
        false
      }
    }
  }
}
