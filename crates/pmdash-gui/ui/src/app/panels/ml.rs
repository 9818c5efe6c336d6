use pmdash_core::views::ml::MlInsights;
use web_sys::Event;
use yew::{
  Callback,
  Html,
  classes,
  html
};

use super::on_click;
use crate::app::actions;
use crate::app::forms::event_value;
use crate::app::handle::Ui;
use crate::components::{
  ProjectSelect,
  StatusBadge
};

fn render_insights(insights: &MlInsights) -> Html {
  let delay = &insights.delay;
  let risk = &insights.risk;

  html! {
      <div class="ml-insights">
          <div class="ml-cards">
              <div class="card">
                  <h3>{ "Delay Prediction" }</h3>
                  <div class={classes!("ml-value", delay.color_class)}>{ format!("{} days", delay.days) }</div>
                  <StatusBadge label={delay.risk_label.clone()} badge={delay.risk_badge} />
                  <div class="confidence">
                      <span>{ format!("Confidence: {}", delay.confidence.label) }</span>
                      <div class="progress">
                          <div class="progress-bar" style={format!("width: {}%", delay.confidence.width)}></div>
                      </div>
                  </div>
              </div>
              <div class="card">
                  <h3>{ "Risk Classification" }</h3>
                  <div class={classes!("ml-value", risk.text_class.clone())}>{ risk.label.clone() }</div>
                  <div class="confidence">
                      <span>{ format!("Confidence: {}", risk.confidence.label) }</span>
                      <div class="progress">
                          <div class="progress-bar" style={format!("width: {}%", risk.confidence.width)}></div>
                      </div>
                  </div>
              </div>
          </div>

          <div class="card">
              <h3>{ "Contributing Factors" }</h3>
              {
                  for insights.factors.iter().map(|factor| html! {
                      <div class="factor">
                          <div class="factor-label">
                              <span>{ factor.name.clone() }</span>
                              <span>{ factor.value.clone() }</span>
                          </div>
                          <div class="progress">
                              <div class={classes!("progress-bar", factor.bar_class)}
                                   style={format!("width: {}%", factor.width)}></div>
                          </div>
                      </div>
                  })
              }
          </div>

          <div class="card">
              <h3>{ "Recommended Actions" }</h3>
              <ul class="recommendations">
                  { for insights.recommendations.iter().map(|line| html! { <li>{ *line }</li> }) }
              </ul>
          </div>
      </div>
  }
}

pub fn render_ml(ui: &Ui) -> Html {
  let (options, selected) = {
    let state = ui.shared.state.borrow();
    (
      state.project_options(),
      state.selected_project().map(str::to_string)
    )
  };
  let on_select = {
    let ui = ui.clone();
    Callback::from(move |event: Event| {
      actions::select_project(&ui, event_value(&event))
    })
  };

  let panels = ui.shared.panels.borrow();
  html! {
      <div class="ml">
          <div class="toolbar">
              <ProjectSelect id="mlProjectSelect" options={options} selected={selected} onchange={on_select} />
              <button class="btn-primary" onclick={on_click(ui, actions::run_prediction)}>
                  <i class="fas fa-brain"></i>{ " Predict" }
              </button>
              <button class="btn-secondary" onclick={on_click(ui, actions::retrain)}>{ "Retrain Models" }</button>
              <button class="btn-secondary" onclick={on_click(ui, actions::model_info)}>{ "Model Info" }</button>
              <button class="btn-secondary" onclick={on_click(ui, actions::share_insights)}>{ "Share" }</button>
              <button class="btn-secondary" onclick={on_click(ui, actions::export_insights)}>{ "Export" }</button>
          </div>
          { for panels.ml.iter().map(render_insights) }
      </div>
  }
}
