use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
  pub message: &'static str,
  #[prop_or_default]
  pub children: Html
}

#[function_component(EmptyState)]
pub fn empty_state(
  props: &EmptyStateProps
) -> Html {
  html! {
      <div class="empty-state">
          <p>{ props.message }</p>
          { props.children.clone() }
      </div>
  }
}
