mod dashboard;
mod gantt;
mod ml;
mod notes;
mod projects;
mod reports;
mod tasks;

use pmdash_core::views::header;
use pmdash_core::{
  Notice,
  Tab
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  html
};

use super::actions;
use super::handle::Ui;

pub use dashboard::render_dashboard;
pub use gantt::render_gantt;
pub use ml::render_ml;
pub use notes::render_notes;
pub use projects::render_projects;
pub use reports::render_reports;
pub use tasks::render_tasks;

pub fn on_click(
  ui: &Ui,
  action: impl Fn(&Ui) + 'static
) -> Callback<MouseEvent> {
  let ui = ui.clone();
  Callback::from(move |_: MouseEvent| {
    action(&ui)
  })
}

pub fn render_header(ui: &Ui) -> Html {
  let notify = |notice: fn() -> Notice| {
    on_click(ui, move |ui| ui.notify(notice()))
  };
  html! {
      <header class="header">
          <h1><i class="fas fa-chart-line"></i>{ " PM Dashboard" }</h1>
          <div class="header-actions">
              <button id="searchBtn" class="icon-btn" title="Search" onclick={on_click(ui, actions::header_search)}>
                  <i class="fas fa-search"></i>
              </button>
              <button id="notificationsBtn" class="icon-btn" title="Notifications"
                  onclick={notify(header::notifications_notice)}>
                  <i class="fas fa-bell"></i>
              </button>
              <button id="settingsBtn" class="icon-btn" title="Settings" onclick={on_click(ui, actions::open_settings)}>
                  <i class="fas fa-cog"></i>
              </button>
              <button id="ttsBtn" class="icon-btn" title="Text-to-Speech"
                  onclick={notify(header::tts_notice)}>
                  <i class="fas fa-volume-up"></i>
              </button>
          </div>
      </header>
  }
}

pub fn render_tab_bar(ui: &Ui) -> Html {
  let state = ui.shared.state.borrow();
  let tabs = state.tabs();
  html! {
      <nav class="tab-bar">
          {
              for Tab::ALL.into_iter().map(|tab| html! {
                  <button
                      class={tabs.button_class(tab)}
                      data-tab={tab.as_key()}
                      onclick={on_click(ui, move |ui| actions::switch_tab(ui, tab))}
                  >
                      <i class={format!("fas {}", tab.icon())}></i>
                      { format!(" {}", tab.label()) }
                  </button>
              })
          }
      </nav>
  }
}

/// Every panel stays mounted; only the
/// active one is visible.
pub fn render_tab_panels(ui: &Ui) -> Html {
  let classes: Vec<(Tab, &'static str)> = {
    let state = ui.shared.state.borrow();
    Tab::ALL
      .into_iter()
      .map(|tab| (tab, state.tabs().panel_class(tab)))
      .collect()
  };

  html! {
      <main class="tab-panels">
          {
              for classes.into_iter().map(|(tab, class)| {
                  let body = match tab {
                      Tab::Dashboard => render_dashboard(ui),
                      Tab::Projects => render_projects(ui),
                      Tab::Gantt => render_gantt(ui),
                      Tab::Reports => render_reports(ui),
                      Tab::Tasks => render_tasks(ui),
                      Tab::Notes => render_notes(ui),
                      Tab::Ml => render_ml(ui),
                  };
                  html! {
                      <section id={tab.panel_id()} class={class}>{ body }</section>
                  }
              })
          }
      </main>
  }
}
