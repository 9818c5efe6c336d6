use pmdash_core::presenter::Toast;
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ToastListProps {
  pub toasts: Vec<Toast>
}

#[function_component(ToastList)]
pub fn toast_list(
  props: &ToastListProps
) -> Html {
  html! {
      <div id="toast-container" class="toast-container">
          {
              for props.toasts.iter().map(|toast| html! {
                  <div key={toast.id} class={classes!("toast", toast.kind.as_class())}>
                      <i class={classes!("fas", format!("fa-{}", toast.kind.icon()))}></i>
                      <span>{ toast.message.clone() }</span>
                  </div>
              })
          }
      </div>
  }
}
