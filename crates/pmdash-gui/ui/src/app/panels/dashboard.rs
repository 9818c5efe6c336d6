use pmdash_core::views::dashboard::QUICK_ACTIONS;
use yew::{
  Html,
  html
};

use super::on_click;
use crate::app::actions;
use crate::app::handle::Ui;

pub fn render_dashboard(ui: &Ui) -> Html {
  let panels = ui.shared.panels.borrow();
  let Some(view) = panels.dashboard.as_ref() else {
    return html! { <div class="loading">{ "Loading..." }</div> };
  };

  html! {
      <div class="dashboard">
          <div class="stats-grid">
              {
                  for view.stat_cards().into_iter().map(|card| {
                      let style = card.gradient.map(|g| format!("background: {g}"));
                      html! {
                          <div class="stat-card" style={style}>
                              <div class="stat-value">{ card.value }</div>
                              <div class="stat-label">{ card.label }</div>
                          </div>
                      }
                  })
              }
          </div>

          <div class="card">
              <h3>{ "Recent Projects" }</h3>
              <ul class="recent-projects">
                  {
                      for view.recent.iter().map(|project| {
                          let number = project.number.clone();
                          html! {
                              <li onclick={on_click(ui, move |ui| actions::open_project(ui, number.clone()))}>
                                  <span class="project-name">{ project.name.clone() }</span>
                                  <span class="project-number">{ project.number.clone() }</span>
                              </li>
                          }
                      })
                  }
              </ul>
          </div>

          <div class="card">
              <h3>{ "Quick Actions" }</h3>
              <div class="quick-actions">
                  {
                      for QUICK_ACTIONS.into_iter().map(|action| html! {
                          <button class="btn-primary" onclick={on_click(ui, move |ui| actions::switch_tab(ui, action.tab))}>
                              { action.label }
                          </button>
                      })
                  }
              </div>
          </div>
      </div>
  }
}
