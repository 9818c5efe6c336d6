use web_sys::Event;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ProjectSelectProps {
  pub id:       &'static str,
  /// `(number, "NUMBER - NAME")` pairs.
  pub options:  Vec<(String, String)>,
  pub selected: Option<String>,
  pub onchange: Callback<Event>
}

#[function_component(ProjectSelect)]
pub fn project_select(
  props: &ProjectSelectProps
) -> Html {
  html! {
      <select id={props.id} class="input-field" onchange={props.onchange.clone()}>
          <option value="" selected={props.selected.is_none()}>{ "Select a project..." }</option>
          {
              for props.options.iter().map(|(number, label)| {
                  let selected = props.selected.as_deref() == Some(number.as_str());
                  html! {
                      <option value={number.clone()} selected={selected}>{ label.clone() }</option>
                  }
              })
          }
      </select>
  }
}
