use pmdash_core::badges::Badge;
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
  pub label: String,
  pub badge: Badge
}

/// Fallback classes are kept so the badge
/// still renders, but marked for styling
/// and inspection.
#[function_component(StatusBadge)]
pub fn status_badge(
  props: &StatusBadgeProps
) -> Html {
  let unrecognized =
    (!props.badge.recognized).then_some("true");
  html! {
      <span class={classes!("badge", props.badge.class)} data-unrecognized={unrecognized}>
          { props.label.clone() }
      </span>
  }
}
