use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ModalFrameProps {
  pub title:    &'static str,
  pub on_close: Callback<MouseEvent>,
  pub children: Html
}

#[function_component(ModalFrame)]
pub fn modal_frame(
  props: &ModalFrameProps
) -> Html {
  html! {
      <div id="modal" class="modal">
          <div class="modal-content">
              <div class="modal-header">
                  <h2>{ props.title }</h2>
                  <button class="modal-close" onclick={props.on_close.clone()}>
                      <i class="fas fa-times"></i>
                  </button>
              </div>
              <div class="modal-body">
                  { props.children.clone() }
              </div>
          </div>
      </div>
  }
}
