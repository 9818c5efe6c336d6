use yew::{
  Html,
  classes,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_memo
};

use super::actions;
use super::handle::{
  Shared,
  Ui
};
use super::modals::render_modal;
use super::panels::{
  render_header,
  render_tab_bar,
  render_tab_panels
};
use super::storage::load_config;
use crate::components::ToastList;

#[function_component(App)]
pub fn app() -> Html {
  let shared = use_memo((), |_| {
    Shared::new(load_config())
  });
  let redraw = use_force_update();
  let ui = Ui::new(shared, redraw);

  {
    let ui = ui.clone();
    use_effect_with((), move |_| {
      tracing::debug!(
        "dashboard mounted, running startup"
      );
      actions::startup(&ui);
      || ()
    });
  }

  let theme = ui
    .shared
    .state
    .borrow()
    .theme()
    .as_key();
  let toasts = ui
    .shared
    .toasts
    .borrow()
    .iter()
    .cloned()
    .collect::<Vec<_>>();

  html! {
      <div class={classes!("app", format!("theme-{theme}"))}>
          { render_header(&ui) }
          { render_tab_bar(&ui) }
          { render_tab_panels(&ui) }
          { render_modal(&ui) }
          <ToastList toasts={toasts} />
      </div>
  }
}
